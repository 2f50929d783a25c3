//! # viewroute Core
//!
//! Core library for viewroute - a client-side route table with lazily loaded views.
//!
//! This library provides the building blocks a hosting shell needs to perform
//! navigation without full reloads: an ordered route table, path matching,
//! deferred component loading, base-prefixed history and a navigation
//! authority that always lets the most recent navigation win.

// Core modules
pub mod config;
pub mod error;
pub mod router;

// Re-export commonly used types
pub use config::{BasePath, RouterOptions};
pub use error::{ConfigError, Error, LoadError, LoadResult, Result, RouterError, RouterResult};
pub use router::{
    lazy, Component, ComponentLoader, Navigation, NavigationOutcome, Params, RouteLocation,
    RouteName, RouteRecord, RouteTable, RouteTableBuilder, Router, RouterHandle, View,
};

/// Current version of the viewroute-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing on stderr, at `debug` level when verbose and `info` otherwise.
///
/// Stdout stays free for rendered pages and machine-readable output.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

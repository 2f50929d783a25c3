//! Router module for managing view navigation and routing
//!
//! This module provides the route table, path matching, deferred component
//! loading, history and the navigation authority built on top of them.

pub mod component;
pub mod handle;
pub mod history;
pub mod path;
pub mod route;
pub mod router;
pub mod table;

// Re-export commonly used types
pub use component::{lazy, Component, ComponentLoader, LazyComponent, View};
pub use handle::RouterHandle;
pub use history::{History, HistoryEntry};
pub use path::{Location, Params, PathPattern};
pub use route::{RouteLocation, RouteName, RouteRecord};
pub use router::{Navigation, NavigationOutcome, Router};
pub use table::{RouteMatch, RouteTable, RouteTableBuilder};

//! Configuration loading for the viewroute CLI

pub mod loader;

pub use loader::CliConfigLoader;

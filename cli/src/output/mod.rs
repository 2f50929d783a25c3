//! CLI-specific output implementations
//!
//! This module formats navigation results and the route table for
//! terminal display.

pub mod navigation;

pub use navigation::{format_error, format_outcome, format_routes, route_summaries};

//! Fallback page for unknown paths

use viewroute_core::{RouteLocation, View};

/// Shown when no declared route matches
#[derive(Debug, Default)]
pub struct NotFoundView;

impl View for NotFoundView {
    fn name(&self) -> &str {
        "NotFoundView"
    }

    fn render(&self, location: &RouteLocation) -> String {
        format!(
            "Page Not Found\n\n  Unknown route: {}\n  Go back home: /",
            location.path
        )
    }
}

//! Landing page

use viewroute_core::{RouteLocation, View};

/// Landing page listing where to go next
#[derive(Debug, Default)]
pub struct HomeView;

impl View for HomeView {
    fn name(&self) -> &str {
        "HomeView"
    }

    fn render(&self, _location: &RouteLocation) -> String {
        [
            "Welcome",
            "",
            "  /authorisation  Sign in to continue",
            "  /tutorial       Learn the basics step by step",
        ]
        .join("\n")
    }
}

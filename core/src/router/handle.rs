//! Shareable handle to the navigation authority
//!
//! The application builds one router at start-up and passes this handle
//! explicitly to everything that needs to navigate. Clones share state.

use super::router::Router;
use super::table::RouteTable;
use crate::config::RouterOptions;
use std::ops::Deref;
use std::sync::Arc;

/// A shareable, UI-friendly handle to control the router
#[derive(Debug, Clone)]
pub struct RouterHandle(Arc<Router>);

impl RouterHandle {
    /// Create a new router handle
    pub fn new(router: Router) -> Self {
        Self(Arc::new(router))
    }

    /// Build a router over `table` and wrap it in a handle
    pub fn from_table(table: RouteTable, options: RouterOptions) -> Self {
        Self::new(Router::new(table, options))
    }
}

impl Deref for RouterHandle {
    type Target = Router;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::component::{lazy, Component, View};
    use crate::router::route::RouteLocation;

    struct Text(&'static str);

    impl View for Text {
        fn name(&self) -> &str {
            self.0
        }

        fn render(&self, _location: &RouteLocation) -> String {
            self.0.to_string()
        }
    }

    #[tokio::test]
    async fn test_router_handle() {
        let table = RouteTable::builder()
            .route(
                "/",
                "home",
                lazy(|| async { Ok(std::sync::Arc::new(Text("Home")) as Component) }),
            )
            .route(
                "/tutorial",
                "tutorial",
                lazy(|| async { Ok(std::sync::Arc::new(Text("Tutorial")) as Component) }),
            )
            .build()
            .expect("Failed to build table");

        let handle = RouterHandle::from_table(table, RouterOptions::default());
        let shell = handle.clone();

        // Test navigation through one handle is visible through the other
        shell.push("/tutorial").await.expect("Failed to navigate");
        assert_eq!(handle.current().unwrap().name.as_str(), "tutorial");

        shell.push("/").await.expect("Failed to navigate");
        assert!(handle.can_go_back());

        // Test go back
        handle.back().await.expect("Failed to go back");
        assert_eq!(shell.current().unwrap().name.as_str(), "tutorial");
    }
}

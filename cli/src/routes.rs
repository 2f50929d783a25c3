//! Application route table
//!
//! Declares which view each path renders. Views are loaded on demand the
//! first time their route is navigated to. Unknown paths fall through to
//! the not-found page.

use crate::pages::{AuthorisationView, HomeView, NotFoundView, TutorialView};
use std::sync::Arc;
use tracing::debug;
use viewroute_core::{
    lazy, Component, ComponentLoader, RouteRecord, RouteTable, RouterHandle, RouterOptions,
    RouterResult, View,
};

/// Deferred loader for a page type
fn page<V>(component: &'static str) -> Arc<dyn ComponentLoader>
where
    V: View + Default + 'static,
{
    lazy(move || async move {
        debug!(component, "loading view");
        Ok(Arc::new(V::default()) as Component)
    })
}

/// Build the application's route table
pub fn app_table() -> RouterResult<RouteTable> {
    RouteTable::builder()
        .record(
            RouteRecord::new("/", "home", page::<HomeView>("HomeView"))?
                .with_meta("component", "HomeView")
                .with_meta("title", "Home"),
        )
        .record(
            RouteRecord::new(
                "/authorisation",
                "authorisation",
                page::<AuthorisationView>("AuthorisationView"),
            )?
            .with_meta("component", "AuthorisationView")
            .with_meta("title", "Authorisation"),
        )
        .record(
            RouteRecord::new("/tutorial", "tutorial", page::<TutorialView>("TutorialView"))?
                .with_meta("component", "TutorialView")
                .with_meta("title", "Tutorial"),
        )
        .fallback_record(
            RouteRecord::new("/*path", "not-found", page::<NotFoundView>("NotFoundView"))?
                .with_meta("component", "NotFoundView")
                .with_meta("title", "Not Found"),
        )
        .build()
}

/// Create the router the shell navigates with
pub fn create_app_router(options: RouterOptions) -> RouterResult<RouterHandle> {
    Ok(RouterHandle::from_table(app_table()?, options))
}

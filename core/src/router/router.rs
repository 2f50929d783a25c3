//! Router implementation for managing navigation state
//!
//! This module provides the core router functionality including
//! state management, navigation, and route resolution.
//!
//! Every navigation takes a ticket from a monotonically increasing
//! counter before it starts loading. Only the holder of the latest ticket
//! may commit, so when loads finish out of order the most recent
//! navigation wins and earlier results are discarded.

use super::component::{Component, LazyComponent};
use super::history::History;
use super::path::{Location, Params};
use super::route::{RouteLocation, RouteRecord};
use super::table::RouteTable;
use crate::config::RouterOptions;
use crate::error::{Result, RouterError, RouterResult};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// A committed navigation: the resolved location and its component
#[derive(Clone)]
pub struct Navigation {
    /// Router state after the navigation
    pub location: RouteLocation,
    /// Component rendered for the location
    pub component: Component,
}

impl Navigation {
    /// Render the component for this navigation's location
    pub fn render(&self) -> String {
        self.component.render(&self.location)
    }
}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigation")
            .field("location", &self.location)
            .field("component", &self.component.name())
            .finish()
    }
}

/// Result of a navigation that did not fail
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// The navigation completed and is now current
    Committed(Navigation),
    /// The target is already the current location
    Duplicated(RouteLocation),
    /// A newer navigation started before this one finished loading
    Superseded,
}

impl NavigationOutcome {
    /// The committed navigation, if any
    pub fn committed(&self) -> Option<&Navigation> {
        match self {
            NavigationOutcome::Committed(navigation) => Some(navigation),
            _ => None,
        }
    }

    /// Whether this navigation changed the current location
    pub fn is_committed(&self) -> bool {
        matches!(self, NavigationOutcome::Committed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
    Traverse(isize),
}

struct NavState {
    history: History,
    current: Option<Navigation>,
}

/// Navigation authority over an immutable route table
pub struct Router {
    table: RouteTable,
    components: Vec<LazyComponent>,
    options: RouterOptions,
    state: Mutex<NavState>,
    latest: AtomicU64,
}

impl Router {
    /// Create a new router over the given table. No loader is invoked.
    pub fn new(table: RouteTable, options: RouterOptions) -> Self {
        let components = table
            .records()
            .iter()
            .map(|record| LazyComponent::new(record.loader.clone(), options.cache_components))
            .collect();

        let history = History::new(options.max_history);

        info!(
            routes = table.len(),
            base = %options.base,
            "router created"
        );

        Self {
            table,
            components,
            options,
            state: Mutex::new(NavState {
                history,
                current: None,
            }),
            latest: AtomicU64::new(0),
        }
    }

    /// The route table this router navigates over
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Declared routes in match order, without the fallback
    pub fn routes(&self) -> &[RouteRecord] {
        self.table.routes()
    }

    /// The options this router was created with
    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Resolve a target to a location without loading anything
    pub fn resolve(&self, target: &str) -> RouterResult<RouteLocation> {
        self.locate(target).map(|(_, location)| location)
    }

    /// Resolve a named route with params without loading anything
    pub fn resolve_named(&self, name: &str, params: &Params) -> RouterResult<RouteLocation> {
        self.locate_named(name, params)
            .map(|(_, location)| location)
    }

    /// Browser href (with base) for a target
    pub fn href(&self, target: &str) -> RouterResult<String> {
        self.resolve(target).map(|location| location.href)
    }

    /// The current location, if a navigation has been committed
    pub fn current(&self) -> Option<RouteLocation> {
        self.lock()
            .current
            .as_ref()
            .map(|navigation| navigation.location.clone())
    }

    /// Perform the initial navigation from a browser URL that includes the base
    pub async fn start(&self, url: &str) -> Result<NavigationOutcome> {
        let target = self.options.base.strip(&Location::without_origin(url));
        debug!(url, target = %target, "starting router");
        let (index, location) = self.locate(&target)?;
        let ticket = self.begin();
        self.transition(ticket, index, location, HistoryMode::Replace)
            .await
    }

    /// Navigate to a target, adding a history entry
    pub async fn push(&self, target: &str) -> Result<NavigationOutcome> {
        let (index, location) = self.locate(target)?;
        let ticket = self.begin();
        self.transition(ticket, index, location, HistoryMode::Push)
            .await
    }

    /// Navigate to a target, replacing the current history entry
    pub async fn replace(&self, target: &str) -> Result<NavigationOutcome> {
        let (index, location) = self.locate(target)?;
        let ticket = self.begin();
        self.transition(ticket, index, location, HistoryMode::Replace)
            .await
    }

    /// Navigate to a named route, adding a history entry
    pub async fn push_named(&self, name: &str, params: &Params) -> Result<NavigationOutcome> {
        let (index, location) = self.locate_named(name, params)?;
        let ticket = self.begin();
        self.transition(ticket, index, location, HistoryMode::Push)
            .await
    }

    /// Go back one entry. Returns `None` when there is nothing to go back to.
    pub async fn back(&self) -> Result<Option<NavigationOutcome>> {
        self.go(-1).await
    }

    /// Go forward one entry. Returns `None` when there is nothing ahead.
    pub async fn forward(&self) -> Result<Option<NavigationOutcome>> {
        self.go(1).await
    }

    /// Move `delta` entries through history
    pub async fn go(&self, delta: isize) -> Result<Option<NavigationOutcome>> {
        // Take the ticket under the lock so no commit slips in between peek and traversal
        let (ticket, target) = {
            let state = self.lock();
            match state.history.peek(delta) {
                Some(target) => (self.begin(), target.to_string()),
                None => return Ok(None),
            }
        };

        let (index, location) = self.locate(&target)?;
        self.transition(ticket, index, location, HistoryMode::Traverse(delta))
            .await
            .map(Some)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.lock().history.can_go_back()
    }

    /// Check if we can go forward
    pub fn can_go_forward(&self) -> bool {
        self.lock().history.can_go_forward()
    }

    /// History entries (application paths), oldest first
    pub fn history(&self) -> Vec<String> {
        self.lock()
            .history
            .entries()
            .iter()
            .map(|entry| entry.full_path.clone())
            .collect()
    }

    /// How many times the named route's loader has been invoked
    pub fn load_count(&self, name: &str) -> Option<usize> {
        self.table
            .by_name(name)
            .and_then(|(index, _)| self.components.get(index))
            .map(LazyComponent::load_count)
    }

    fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    fn lock(&self) -> MutexGuard<'_, NavState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn locate(&self, target: &str) -> RouterResult<(usize, RouteLocation)> {
        let location = Location::parse(target)?;
        let full_path = location.full_path();

        let matched = self
            .table
            .resolve(&location.path, self.options.sensitive, self.options.strict)
            .ok_or_else(|| RouterError::RouteNotFound(full_path.clone()))?;

        Ok((
            matched.index,
            RouteLocation {
                name: matched.record.name.clone(),
                href: self.options.base.href(&full_path),
                path: location.path,
                full_path,
                params: matched.params,
                query: location.query,
                hash: location.hash,
                meta: matched.record.meta.clone(),
            },
        ))
    }

    fn locate_named(&self, name: &str, params: &Params) -> RouterResult<(usize, RouteLocation)> {
        let (index, record) = self
            .table
            .by_name(name)
            .ok_or_else(|| RouterError::NamedRouteNotFound(name.to_string()))?;

        let path = record
            .path
            .build(params)
            .map_err(|param| RouterError::MissingParam {
                route: name.to_string(),
                param,
            })?;

        let location = Location::parse(&path)?;
        let full_path = location.full_path();
        let params = record
            .path
            .matches(&location.path, self.options.sensitive, self.options.strict)
            .unwrap_or_else(|| params.clone());

        Ok((
            index,
            RouteLocation {
                name: record.name.clone(),
                href: self.options.base.href(&full_path),
                path: location.path,
                full_path,
                params,
                query: location.query,
                hash: location.hash,
                meta: record.meta.clone(),
            },
        ))
    }

    async fn transition(
        &self,
        ticket: u64,
        index: usize,
        location: RouteLocation,
        mode: HistoryMode,
    ) -> Result<NavigationOutcome> {
        if !matches!(mode, HistoryMode::Traverse(_)) {
            let is_duplicate = self
                .lock()
                .current
                .as_ref()
                .is_some_and(|current| current.location.is_same_target(&location));
            if is_duplicate {
                debug!(path = %location.full_path, "already at target");
                return Ok(NavigationOutcome::Duplicated(location));
            }
        }

        let component = match self.components.get(index) {
            Some(lazy) => lazy.resolve().await,
            None => return Err(RouterError::RouteNotFound(location.full_path).into()),
        };

        let component = match component {
            Ok(component) => component,
            Err(err) if self.is_latest(ticket) => {
                warn!(route = %location.name, error = %err, "component load failed");
                return Err(err.into());
            }
            Err(_) => return Ok(NavigationOutcome::Superseded),
        };

        let mut state = self.lock();
        if !self.is_latest(ticket) {
            warn!(
                route = %location.name,
                path = %location.full_path,
                "discarding superseded navigation"
            );
            return Ok(NavigationOutcome::Superseded);
        }

        match mode {
            HistoryMode::Push => state.history.push(location.full_path.clone()),
            HistoryMode::Replace => state.history.replace(location.full_path.clone()),
            HistoryMode::Traverse(delta) => {
                state.history.go(delta);
            }
        }

        info!(
            route = %location.name,
            path = %location.full_path,
            component = component.name(),
            "navigation committed"
        );

        let navigation = Navigation {
            location,
            component,
        };
        state.current = Some(navigation.clone());
        Ok(NavigationOutcome::Committed(navigation))
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.table)
            .field("options", &self.options)
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BasePath;
    use crate::error::{Error, LoadError};
    use crate::router::component::{lazy, ComponentLoader, View};
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tokio::sync::Notify;
    use tokio_test::{assert_pending, task};

    struct Page(&'static str);

    impl View for Page {
        fn name(&self) -> &str {
            self.0
        }

        fn render(&self, location: &RouteLocation) -> String {
            format!("<{}> {}", self.0, location.full_path)
        }
    }

    fn page(name: &'static str) -> Arc<dyn ComponentLoader> {
        lazy(move || async move { Ok(Arc::new(Page(name)) as Component) })
    }

    fn app_table() -> RouteTable {
        RouteTable::builder()
            .route("/", "home", page("HomeView"))
            .route("/authorisation", "authorisation", page("AuthorisationView"))
            .route("/tutorial", "tutorial", page("TutorialView"))
            .build()
            .expect("Failed to build table")
    }

    fn app_router() -> Router {
        Router::new(app_table(), RouterOptions::default())
    }

    #[tokio::test]
    async fn test_declared_paths_resolve_to_their_names() {
        let router = app_router();
        for (path, name) in [
            ("/", "home"),
            ("/authorisation", "authorisation"),
            ("/tutorial", "tutorial"),
        ] {
            let outcome = router.push(path).await.unwrap();
            let navigation = outcome.committed().expect("navigation should commit");
            assert_eq!(navigation.location.name.as_str(), name);
            assert_eq!(router.current().unwrap().name.as_str(), name);
        }
    }

    #[tokio::test]
    async fn test_construction_does_not_load_components() {
        let router = app_router();
        assert_eq!(router.load_count("home"), Some(0));
        assert_eq!(router.load_count("tutorial"), Some(0));
        assert!(router.current().is_none());

        router.push("/tutorial").await.unwrap();
        assert_eq!(router.load_count("home"), Some(0));
        assert_eq!(router.load_count("tutorial"), Some(1));
    }

    #[tokio::test]
    async fn test_round_trip_returns_home() {
        let router = app_router();
        router.push("/").await.unwrap();
        router.push("/tutorial").await.unwrap();
        router.push("/").await.unwrap();

        assert_eq!(router.current().unwrap().name.as_str(), "home");
        assert_eq!(router.history(), vec!["/", "/tutorial", "/"]);
        assert_eq!(router.load_count("home"), Some(1));
    }

    #[tokio::test]
    async fn test_uncached_router_reloads_components() {
        let router = Router::new(app_table(), RouterOptions::default().without_component_cache());
        router.push("/").await.unwrap();
        router.push("/tutorial").await.unwrap();
        router.push("/").await.unwrap();
        assert_eq!(router.load_count("home"), Some(2));
    }

    #[tokio::test]
    async fn test_duplicate_navigation() {
        let router = app_router();
        router.push("/tutorial").await.unwrap();
        let outcome = router.push("/tutorial").await.unwrap();

        assert!(matches!(outcome, NavigationOutcome::Duplicated(_)));
        assert_eq!(router.history(), vec!["/tutorial"]);

        // Trailing slash and case reach the same route without a new entry
        for spelling in ["/tutorial/", "/Tutorial"] {
            let outcome = router.push(spelling).await.unwrap();
            assert!(matches!(outcome, NavigationOutcome::Duplicated(_)));
        }
        assert_eq!(router.history(), vec!["/tutorial"]);

        let outcome = router.push("/tutorial?step=2").await.unwrap();
        assert!(outcome.is_committed());
        assert_eq!(router.history(), vec!["/tutorial", "/tutorial?step=2"]);
    }

    #[tokio::test]
    async fn test_unmatched_path_without_fallback() {
        let router = app_router();
        router.push("/").await.unwrap();

        let err = router.push("/does-not-exist").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Router(RouterError::RouteNotFound(ref path)) if path == "/does-not-exist"
        ));
        assert_eq!(router.current().unwrap().name.as_str(), "home");
    }

    #[tokio::test]
    async fn test_unmatched_path_uses_fallback() {
        let table = RouteTable::builder()
            .route("/", "home", page("HomeView"))
            .fallback("/*path", "not-found", page("NotFoundView"))
            .build()
            .unwrap();
        let router = Router::new(table, RouterOptions::default());

        let outcome = router.push("/does-not-exist").await.unwrap();
        let navigation = outcome.committed().unwrap();
        assert_eq!(navigation.location.name.as_str(), "not-found");
        assert_eq!(navigation.component.name(), "NotFoundView");
        assert_eq!(
            navigation.location.params.get("path").map(String::as_str),
            Some("does-not-exist")
        );
    }

    #[tokio::test]
    async fn test_last_navigation_wins() {
        let started = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());
        let slow = {
            let started = started.clone();
            let gate = gate.clone();
            lazy(move || {
                let started = started.clone();
                let gate = gate.clone();
                async move {
                    started.notify_one();
                    gate.notified().await;
                    Ok(Arc::new(Page("SlowView")) as Component)
                }
            })
        };

        let table = RouteTable::builder()
            .route("/slow", "slow", slow)
            .route("/fast", "fast", page("FastView"))
            .build()
            .unwrap();
        let router = Arc::new(Router::new(table, RouterOptions::default()));

        let pending = tokio::spawn({
            let router = router.clone();
            async move { router.push("/slow").await }
        });
        started.notified().await;

        let fast = router.push("/fast").await.unwrap();
        assert!(fast.is_committed());

        gate.notify_one();
        let slow = pending.await.unwrap().unwrap();
        assert!(matches!(slow, NavigationOutcome::Superseded));

        assert_eq!(router.current().unwrap().name.as_str(), "fast");
        assert_eq!(router.history(), vec!["/fast"]);
    }

    #[tokio::test]
    async fn test_never_resolving_load_stays_pending() {
        let table = RouteTable::builder()
            .route("/", "home", page("HomeView"))
            .route("/never", "never", lazy(|| futures::future::pending()))
            .build()
            .unwrap();
        let router = Router::new(table, RouterOptions::default());

        let mut stuck = task::spawn(router.push("/never"));
        assert_pending!(stuck.poll());
        assert_pending!(stuck.poll());
        assert!(router.current().is_none());

        // A later navigation is not blocked by the stuck one
        let outcome = router.push("/").await.unwrap();
        assert!(outcome.is_committed());
        assert_eq!(router.current().unwrap().name.as_str(), "home");
    }

    #[tokio::test]
    async fn test_load_failure_is_visible_and_retried() {
        let fail = Arc::new(AtomicBool::new(true));
        let flaky = {
            let fail = fail.clone();
            lazy(move || {
                let fail = fail.clone();
                async move {
                    if fail.load(Ordering::SeqCst) {
                        Err(LoadError::failed("tutorial", "connection reset"))
                    } else {
                        Ok(Arc::new(Page("TutorialView")) as Component)
                    }
                }
            })
        };
        let table = RouteTable::builder()
            .route("/", "home", page("HomeView"))
            .route("/tutorial", "tutorial", flaky)
            .build()
            .unwrap();
        let router = Router::new(table, RouterOptions::default());
        router.push("/").await.unwrap();

        let err = router.push("/tutorial").await.unwrap_err();
        assert!(matches!(err, Error::Load(_)));
        assert_eq!(router.current().unwrap().name.as_str(), "home");
        assert_eq!(router.history(), vec!["/"]);

        fail.store(false, Ordering::SeqCst);
        let outcome = router.push("/tutorial").await.unwrap();
        assert!(outcome.is_committed());
        assert_eq!(router.load_count("tutorial"), Some(2));
    }

    #[tokio::test]
    async fn test_back_and_forward() {
        let router = app_router();
        assert!(router.back().await.unwrap().is_none());

        router.push("/").await.unwrap();
        router.push("/authorisation").await.unwrap();
        router.push("/tutorial").await.unwrap();

        let outcome = router.back().await.unwrap().unwrap();
        assert_eq!(
            outcome.committed().unwrap().location.name.as_str(),
            "authorisation"
        );
        assert!(router.can_go_forward());

        router.back().await.unwrap();
        assert_eq!(router.current().unwrap().name.as_str(), "home");
        assert!(!router.can_go_back());

        router.forward().await.unwrap();
        router.forward().await.unwrap();
        assert_eq!(router.current().unwrap().name.as_str(), "tutorial");
        assert!(router.forward().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_start_strips_base() {
        let options = RouterOptions::with_base(BasePath::new("/app/").unwrap());
        let router = Router::new(app_table(), options);

        let outcome = router.start("/app/tutorial?step=2#intro").await.unwrap();
        let location = &outcome.committed().unwrap().location;
        assert_eq!(location.name.as_str(), "tutorial");
        assert_eq!(location.path, "/tutorial");
        assert_eq!(location.href, "/app/tutorial?step=2#intro");
        assert_eq!(location.query_value("step"), Some("2"));
        assert_eq!(location.hash.as_deref(), Some("intro"));

        assert_eq!(router.href("/").unwrap(), "/app/");
        assert_eq!(router.history(), vec!["/tutorial?step=2#intro"]);
    }

    #[tokio::test]
    async fn test_start_accepts_full_browser_url() {
        let options = RouterOptions::with_base(BasePath::new("/app/").unwrap());
        let router = Router::new(app_table(), options);

        let outcome = router
            .start("https://example.com/app/authorisation?redirect=%2Ftutorial")
            .await
            .unwrap();
        let location = &outcome.committed().unwrap().location;
        assert_eq!(location.name.as_str(), "authorisation");
        assert_eq!(location.query_value("redirect"), Some("/tutorial"));

        // Navigations inside the app never leave for another origin
        let err = router.push("https://other.host/tutorial").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Router(RouterError::InvalidPath { .. })
        ));
        assert_eq!(router.current().unwrap().name.as_str(), "authorisation");
    }

    #[tokio::test]
    async fn test_named_navigation() {
        let table = RouteTable::builder()
            .route("/", "home", page("HomeView"))
            .route("/lessons/:id", "lesson", page("LessonView"))
            .build()
            .unwrap();
        let router = Router::new(table, RouterOptions::default());

        let mut params = Params::new();
        params.insert("id".to_string(), "3".to_string());
        let outcome = router.push_named("lesson", &params).await.unwrap();
        let location = &outcome.committed().unwrap().location;
        assert_eq!(location.path, "/lessons/3");
        assert_eq!(location.params.get("id").map(String::as_str), Some("3"));

        // Params survive encoding into the path and decoding back out
        params.insert("id".to_string(), "jane doe".to_string());
        let location = router.resolve_named("lesson", &params).unwrap();
        assert_eq!(location.path, "/lessons/jane%20doe");
        assert_eq!(location.params, params);

        let location = router.resolve("/lessons/caf%C3%A9").unwrap();
        assert_eq!(location.params.get("id").map(String::as_str), Some("café"));

        let err = router.push_named("lesson", &Params::new()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Router(RouterError::MissingParam { .. })
        ));

        let err = router.resolve_named("missing", &Params::new()).unwrap_err();
        assert_eq!(err, RouterError::NamedRouteNotFound("missing".to_string()));
    }

    #[tokio::test]
    async fn test_components_resolve_deterministically() {
        let router = Router::new(app_table(), RouterOptions::default().without_component_cache());
        let first = router.push("/tutorial").await.unwrap();
        router.push("/").await.unwrap();
        let second = router.push("/tutorial").await.unwrap();

        let first = first.committed().unwrap();
        let second = second.committed().unwrap();
        assert_eq!(first.component.name(), second.component.name());
        assert_eq!(first.render(), second.render());
    }
}

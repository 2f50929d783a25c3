//! Deferred view components
//!
//! Routes do not hold their view directly. They hold a loader that produces
//! the view on demand, and the router only invokes it when the route is
//! navigated to.

use super::route::RouteLocation;
use crate::error::LoadResult;
use async_trait::async_trait;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// A renderable unit of UI the shell mounts for a route
pub trait View: Send + Sync {
    /// Component name, e.g. `HomeView`
    fn name(&self) -> &str;

    /// Render the view for the given location
    fn render(&self, location: &RouteLocation) -> String;
}

/// Shared handle to a resolved view
pub type Component = Arc<dyn View>;

/// Zero-argument deferred producer of a component
#[async_trait]
pub trait ComponentLoader: Send + Sync {
    /// Retrieve the component
    async fn load(&self) -> LoadResult<Component>;
}

/// Loader backed by a closure returning a future
pub struct FnLoader<F> {
    load_fn: F,
}

#[async_trait]
impl<F, Fut> ComponentLoader for FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = LoadResult<Component>> + Send + 'static,
{
    async fn load(&self) -> LoadResult<Component> {
        (self.load_fn)().await
    }
}

/// Wrap an async closure as a component loader
///
/// ```ignore
/// let loader = lazy(|| async { Ok(Arc::new(HomeView) as Component) });
/// ```
pub fn lazy<F, Fut>(load_fn: F) -> Arc<dyn ComponentLoader>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = LoadResult<Component>> + Send + 'static,
{
    Arc::new(FnLoader { load_fn })
}

/// A route's loader together with its resolution cache
pub struct LazyComponent {
    loader: Arc<dyn ComponentLoader>,
    cache: Option<OnceCell<Component>>,
    loads: AtomicUsize,
}

impl LazyComponent {
    /// Create a lazy component, optionally caching the first successful resolution
    pub fn new(loader: Arc<dyn ComponentLoader>, cache: bool) -> Self {
        Self {
            loader,
            cache: cache.then(OnceCell::new),
            loads: AtomicUsize::new(0),
        }
    }

    /// Resolve the component, invoking the loader unless a cached value exists.
    ///
    /// Failed loads are never cached, so the next call retries.
    pub async fn resolve(&self) -> LoadResult<Component> {
        match &self.cache {
            Some(cell) => cell.get_or_try_init(|| self.invoke()).await.cloned(),
            None => self.invoke().await,
        }
    }

    /// Whether a resolved component is cached
    pub fn is_resolved(&self) -> bool {
        self.cache
            .as_ref()
            .map(OnceCell::initialized)
            .unwrap_or(false)
    }

    /// Number of times the loader has been invoked
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    async fn invoke(&self) -> LoadResult<Component> {
        let attempt = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(attempt, "invoking component loader");
        self.loader.load().await
    }
}

impl std::fmt::Debug for LazyComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyComponent")
            .field("cached", &self.cache.is_some())
            .field("resolved", &self.is_resolved())
            .field("loads", &self.load_count())
            .finish()
    }
}

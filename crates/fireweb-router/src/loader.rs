//! View loaders
//!
//! Eager and lazy loading differ only in when the view is produced. Both
//! sit behind [`ViewLoader`], so the router never knows which one it holds.

use crate::error::RouterResult;
use crate::view::View;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use tokio::sync::OnceCell;

#[async_trait]
pub trait ViewLoader: Send + Sync {
    /// Produce the view for a matched route
    async fn load(&self) -> RouterResult<View>;

    /// Whether a later `load` completes without further work
    fn is_loaded(&self) -> bool;
}

/// Loader for views bundled at startup
#[derive(Debug, Clone)]
pub struct EagerLoader {
    view: View,
}

impl EagerLoader {
    pub fn new(view: View) -> Self {
        Self { view }
    }
}

#[async_trait]
impl ViewLoader for EagerLoader {
    async fn load(&self) -> RouterResult<View> {
        Ok(self.view.clone())
    }

    fn is_loaded(&self) -> bool {
        true
    }
}

type ViewFuture = Pin<Box<dyn Future<Output = RouterResult<View>> + Send>>;

/// Loader that fetches its view on first navigation and caches it
///
/// A failed fetch leaves the cache empty; the next navigation tries again.
pub struct LazyLoader {
    factory: Box<dyn Fn() -> ViewFuture + Send + Sync>,
    cell: OnceCell<View>,
}

impl LazyLoader {
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RouterResult<View>> + Send + 'static,
    {
        Self {
            factory: Box::new(move || -> ViewFuture { Box::pin(factory()) }),
            cell: OnceCell::new(),
        }
    }

    /// Lazy loader whose fetch always succeeds with `view`
    pub fn deferred(view: View) -> Self {
        Self::new(move || {
            let view = view.clone();
            async move { Ok(view) }
        })
    }
}

impl std::fmt::Debug for LazyLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyLoader")
            .field("loaded", &self.cell.get())
            .finish()
    }
}

#[async_trait]
impl ViewLoader for LazyLoader {
    async fn load(&self) -> RouterResult<View> {
        let view = self
            .cell
            .get_or_try_init(|| {
                log::debug!(target: "fireweb::router", "Fetching lazily loaded view");
                (self.factory)()
            })
            .await?;
        Ok(view.clone())
    }

    fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

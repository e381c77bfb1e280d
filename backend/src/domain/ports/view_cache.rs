//! Port for invalidating cached rendered views.
use async_trait::async_trait;

use crate::domain::ViewPath;

/// Marks a cached view stale so the next request recomputes it.
///
/// Invalidation is fire-and-forget: adapters absorb their own failures and
/// callers never inspect an outcome.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Invalidate the view rendered at `path`.
    async fn invalidate(&self, path: &ViewPath);
}

/// Cache that holds nothing and therefore has nothing to invalidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpViewCache;

#[async_trait]
impl ViewCache for NoOpViewCache {
    async fn invalidate(&self, _path: &ViewPath) {}
}

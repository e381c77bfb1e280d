//! View cache that records invalidations in the log.
use async_trait::async_trait;
use tracing::debug;

use crate::domain::ViewPath;
use crate::domain::ports::ViewCache;

/// Logs each invalidation at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingViewCache;

#[async_trait]
impl ViewCache for TracingViewCache {
    async fn invalidate(&self, path: &ViewPath) {
        debug!(%path, "view invalidated");
    }
}

//! View cache adapters.
//!
//! [`TracingViewCache`] is the default: views are rendered on demand, so
//! invalidation only needs a log record. [`RedisViewCache`] deletes the
//! rendered view from a shared Redis instance.

mod redis_view_cache;
mod tracing_view_cache;

pub use redis_view_cache::{RedisViewCache, RedisViewCacheError};
pub use tracing_view_cache::TracingViewCache;

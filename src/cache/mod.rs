//! Response cache keyed by request URL.
//!
//! The service only ever needs two operations from a cache: look a key up and
//! store a response under it. [`ResponseCache`] is that seam; [`MemoryCache`]
//! is the in-process implementation the binary uses.
//!
//! How long an entry stays fresh is decided by the stored response itself,
//! through its `Cache-Control` header (see [`policy`]). Entries are never
//! invalidated explicitly.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::Response;

pub mod entry;
pub mod memory;
pub mod policy;

pub use entry::CacheEntry;
pub use memory::MemoryCache;

/// Errors a cache backend can report.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Boxed future returned by [`ResponseCache`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + Send + 'a>>;

/// A shared, URL-keyed response store.
///
/// Implementations must tolerate concurrent reads and writes to the same key;
/// the last write wins.
pub trait ResponseCache: Send + Sync + 'static {
    /// Returns a fresh response stored under `key`, if any.
    fn lookup<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Response>>;

    /// Stores `response` under `key`. Responses that are not storable per
    /// their `Cache-Control` header are silently skipped.
    fn put(&self, key: String, response: Response) -> CacheFuture<'_, ()>;
}

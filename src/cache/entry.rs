use std::time::Duration;

use tokio::time::Instant;

use crate::Response;

/// A stored response and the window during which it may be served.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub response: Response,
    pub stored_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(response: Response, ttl: Duration) -> Self {
        Self {
            response,
            stored_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

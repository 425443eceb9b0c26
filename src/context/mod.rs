//! Per-request context handed to middleware and route handlers.

use crate::Request;

/// The request being served.
pub struct Context {
    request: Request,
}

impl Context {
    /// Create a new context from a request
    pub fn new(request: Request) -> Self {
        Self { request }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Give the request back to the caller.
    pub fn into_request(self) -> Request {
        self.request
    }
}

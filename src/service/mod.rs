//! The sheet-to-JSON service: path parsing, cache-aside lookup, upstream
//! fetch and row transposition.
//!
//! ```text
//! GET /{spreadsheet_id}/{sheet_name}
//!   → cache hit?  → stored response, verbatim
//!   → cache miss → fetch values → rows → respond, store a copy in the background
//! ```

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::background::TaskQueue;
use crate::cache::ResponseCache;
use crate::context::Context;
use crate::router::Router;
use crate::sheets::{SheetSource, rows_from_grid};
use crate::{Request, Response};

pub mod error;
pub mod path;
pub mod respond;

pub use error::SheetError;
pub use path::parse_sheet_path;

/// Serves sheet requests from `cache`, falling back to `source`.
///
/// Successful responses are written back to the cache through `tasks`, after
/// the response has been handed to the caller. A second request racing the
/// first may therefore still miss.
pub struct SheetService<C, S> {
    cache: Arc<C>,
    source: S,
    tasks: TaskQueue,
}

impl<C, S> SheetService<C, S>
where
    C: ResponseCache,
    S: SheetSource,
{
    pub fn new(cache: Arc<C>, source: S, tasks: TaskQueue) -> Self {
        Self {
            cache,
            source,
            tasks,
        }
    }

    /// Handles one sheet request; every failure becomes a JSON error response.
    pub async fn serve(&self, request: &Request) -> Response {
        match self.try_serve(request).await {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    SheetError::PathFormat => debug!(path = %request.path(), "malformed sheet path"),
                    SheetError::Upstream(message) => {
                        warn!(path = %request.path(), message = %message, "spreadsheet API reported an error")
                    }
                    SheetError::Fetch(_) | SheetError::Encode(_) => {
                        error!(path = %request.path(), error = %e, "sheet request failed")
                    }
                }
                e.into_response()
            }
        }
    }

    async fn try_serve(&self, request: &Request) -> Result<Response, SheetError> {
        let sheet = parse_sheet_path(request.path())?;
        let key = request.url();

        match self.cache.lookup(&key).await {
            Ok(Some(cached)) => {
                info!(key = %key, "serving from cache");
                return Ok(cached);
            }
            Ok(None) => info!(key = %key, "cache miss"),
            Err(e) => warn!(key = %key, error = %e, "cache lookup failed, treating as a miss"),
        }

        let range = self.source.fetch_values(&sheet).await?;
        if let Some(api_error) = range.error {
            return Err(SheetError::Upstream(api_error.message));
        }

        let rows = rows_from_grid(range.values);
        let response = respond::json_ok(&rows)?;

        let cache = Arc::clone(&self.cache);
        let stored = response.clone();
        self.tasks
            .defer("cache-put", async move { cache.put(key, stored).await });

        Ok(response)
    }

    /// Route table: `/` redirects to the profile page, every other path is a
    /// sheet request. Both accept any method.
    pub fn router(self: Arc<Self>) -> Router {
        let mut router = Router::new();
        router.any("/", |_ctx: Context| async { respond::redirect(respond::PROFILE_URL) });
        router.any("/*", move |ctx: Context| {
            let service = Arc::clone(&self);
            async move { service.serve(ctx.request()).await }
        });
        router
    }
}

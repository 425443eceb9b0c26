//! Request routing - map URL patterns to handler functions.
//!
//! Two pattern styles are supported:
//!
//! | Pattern     | Example match            |
//! |-------------|--------------------------|
//! | `/`         | `/`                      |
//! | `/files/*`  | `/files/docs/readme.txt` |
//!
//! A single trailing slash is ignored on both patterns and incoming paths, so
//! `/users/` and `/users` are treated as equivalent. The root `/` only ever
//! matches itself: `//` is a different path.
//!
//! Every route accepts any method. Routes are matched in registration order;
//! the first route whose pattern matches the incoming path wins.

use std::pin::Pin;
use std::sync::Arc;

use crate::context::Context;
use crate::{Request, Response, StatusCode};

/// Type-erased, heap-allocated async handler that processes a [`Context`] and returns a
/// [`Response`].
///
/// Handlers are stored behind `Arc<dyn Fn(…)>` so they can be cloned and shared across
/// threads without copying the underlying closure. In practice you never construct this
/// type directly - use [`Router::any`] instead.
pub type Handler =
    Arc<dyn Fn(Context) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync + 'static>;

/// Conversion trait for async handler functions.
///
/// Any `Fn(Context) -> impl Future<Output = Response> + Send` that is also
/// `Send + Sync + 'static` implements this trait automatically via the blanket impl
/// below. Router methods accept `impl IntoHandler` so the two-type-parameter where-bound
/// does not need to be repeated at every call site.
pub trait IntoHandler: Send + Sync + 'static {
    /// Call the handler with the given context, boxing the returned future.
    fn call(&self, ctx: Context) -> Pin<Box<dyn Future<Output = Response> + Send>>;
}

impl<T, F> IntoHandler for T
where
    T: Fn(Context) -> F + Send + Sync + 'static,
    F: Future<Output = Response> + Send + 'static,
{
    fn call(&self, ctx: Context) -> Pin<Box<dyn Future<Output = Response> + Send>> {
        Box::pin((self)(ctx))
    }
}

// Drops one trailing slash unless that would collapse the path onto the root.
fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if trimmed.len() > 1 => trimmed,
        _ => path,
    }
}

// Compiled representation of a route pattern string.
#[derive(Debug, Clone)]
enum Pattern {
    // Matches one exact path string, e.g. `/`.
    Exact(String),
    // Matches any path that starts with the given prefix, e.g. `/files/*`.
    Wildcard(String),
}

impl Pattern {
    // `/*` suffix → wildcard on the prefix; anything else is an exact match.
    fn parse(pattern: &str) -> Self {
        let pattern = normalize(pattern);

        if let Some(prefix) = pattern.strip_suffix("/*") {
            return Pattern::Wildcard(prefix.to_string());
        }

        Pattern::Exact(pattern.to_string())
    }

    fn matches(&self, path: &str) -> bool {
        let path = normalize(path);

        match self {
            Pattern::Exact(p) => p == path,
            Pattern::Wildcard(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

// A single registered route binding a pattern to a handler.
struct Route {
    pattern: Pattern,
    handler: Handler,
}

/// HTTP request router that dispatches requests to registered handler functions.
///
/// Routes are evaluated in registration order; the first route whose path
/// pattern matches the incoming request is used. When no route matches, a
/// `404 Not Found` response is returned automatically.
///
/// # Examples
///
/// ```rust,no_run
/// use sheetcache::{Router, Response, StatusCode};
/// use sheetcache::context::Context;
///
/// let mut router = Router::new();
/// router.any("/", |_ctx: Context| async { Response::new(StatusCode::Found) });
/// router.any("/*", |_ctx: Context| async { Response::new(StatusCode::Ok) });
/// ```
pub struct Router {
    routes: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a new, empty `Router` with no registered routes.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a handler for requests matching `path`, whatever their method.
    pub fn any(&mut self, path: &str, handler: impl IntoHandler) {
        let handler: Handler = Arc::new(move |ctx| handler.call(ctx));
        self.routes.push(Route {
            pattern: Pattern::parse(path),
            handler,
        });
    }

    /// Return the number of routes registered in this router.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Return `true` if no routes have been registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Dispatch `request` to the first matching route and return its response.
    ///
    /// Routes are tested in registration order. If no route matches, a
    /// `404 Not Found` response is returned.
    pub async fn route(&self, request: Request) -> Response {
        let route = self
            .routes
            .iter()
            .find(|route| route.pattern.matches(request.path()));

        match route {
            Some(route) => (route.handler)(Context::new(request)).await,
            None => Response::new(StatusCode::NotFound),
        }
    }
}

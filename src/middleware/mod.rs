//! Middleware pipeline - composable before/after request handler logic.
//!
//! ## Core types
//!
//! - [`Middleware`] - trait implemented by all middleware.
//! - [`Next`] - cursor into the remaining middleware chain; call [`Next::run`] to
//!   advance to the next layer. Once the chain is exhausted the endpoint runs.
//! - [`MiddlewareHandler`] - type-erased, cheaply-cloneable middleware function.
//! - [`Pipeline`] - an ordered middleware stack in front of one endpoint.
//! - [`LoggerMiddleware`] - built-in request/response logger.

use std::{future::Future, pin::Pin, sync::Arc};
use tokio::time::Instant;

use crate::router::{Handler, IntoHandler, Router};
use crate::{Request, Response, context::Context};

/// A type-erased, reference-counted middleware function.
///
/// The [`Arc`] wrapper makes handlers cheap to clone so that [`Next`] can
/// advance through the chain without copying closures.
pub type MiddlewareHandler = Arc<
    dyn Fn(Context, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync + 'static,
>;

/// Converts a [`Middleware`] implementation into a [`MiddlewareHandler`].
pub fn from_middleware<M>(middleware: Arc<M>) -> MiddlewareHandler
where
    M: Middleware + 'static,
{
    Arc::new(move |ctx: Context, next: Next| middleware.handle(ctx, next))
}

/// A cursor into the remaining middleware chain for a single request.
///
/// `Next` is consumed on each call to [`run`](Self::run), so it cannot be called
/// more than once per middleware invocation.
pub struct Next {
    middlewares: Arc<[MiddlewareHandler]>,
    endpoint: Handler,
    // Tracks which middleware to invoke on the next `run` call.
    index: usize,
}

impl Next {
    /// Invokes the next middleware in the chain, or the endpoint once every
    /// middleware has run, and returns its response.
    pub async fn run(mut self, ctx: Context) -> Response {
        match self.middlewares.get(self.index).cloned() {
            Some(handler) => {
                self.index += 1;
                handler(ctx, self).await
            }
            None => (self.endpoint)(ctx).await,
        }
    }
}

/// The core trait for all middleware.
///
/// Implementors receive a [`Context`] and a [`Next`] cursor. They may:
///
/// - **Pass through** - call `next.run(ctx).await` without modification.
/// - **Short-circuit** - return a [`Response`] directly without calling `next`.
/// - **Decorate** - call `next.run(ctx).await`, inspect the response, and return
///   a modified copy.
///
/// Implementations must be `Send + Sync` because middleware is shared across
/// Tokio tasks, and `handle` must return a pinned, `Send` future.
pub trait Middleware: Send + Sync {
    /// Handle the request and optionally delegate to the next middleware.
    fn handle(&self, ctx: Context, next: Next) -> Pin<Box<dyn Future<Output = Response> + Send>>;
}

/// An ordered middleware stack terminating in a single endpoint.
///
/// # Examples
///
/// ```rust,no_run
/// use sheetcache::{Response, Router, StatusCode};
/// use sheetcache::context::Context;
/// use sheetcache::middleware::{LoggerMiddleware, Pipeline};
///
/// let mut router = Router::new();
/// router.any("/*", |_ctx: Context| async { Response::new(StatusCode::Ok) });
///
/// let pipeline = Pipeline::from_router(router).layer(LoggerMiddleware);
/// ```
#[derive(Clone)]
pub struct Pipeline {
    middlewares: Vec<MiddlewareHandler>,
    endpoint: Handler,
}

impl Pipeline {
    /// Creates a pipeline with no middleware in front of `endpoint`.
    pub fn new(endpoint: impl IntoHandler) -> Self {
        Self {
            middlewares: Vec::new(),
            endpoint: Arc::new(move |ctx| endpoint.call(ctx)),
        }
    }

    /// Creates a pipeline whose endpoint dispatches through `router`.
    pub fn from_router(router: Router) -> Self {
        let router = Arc::new(router);
        Self::new(move |ctx: Context| {
            let router = Arc::clone(&router);
            async move { router.route(ctx.into_request()).await }
        })
    }

    /// Appends a middleware. Middleware runs in the order it was added, outermost first.
    #[must_use]
    pub fn layer<M>(mut self, middleware: M) -> Self
    where
        M: Middleware + 'static,
    {
        self.middlewares.push(from_middleware(Arc::new(middleware)));
        self
    }

    /// Runs `request` through every middleware and the endpoint.
    pub async fn handle(&self, request: Request) -> Response {
        let next = Next {
            middlewares: self.middlewares.clone().into(),
            endpoint: Arc::clone(&self.endpoint),
            index: 0,
        };
        next.run(Context::new(request)).await
    }
}

/// Built-in middleware that logs each request's method, path, status, and duration.
///
/// Emits a single `tracing::info!` line after the downstream handler completes,
/// in the format:
///
/// ```text
/// METHOD /path - STATUS (duration)
/// ```
pub struct LoggerMiddleware;

impl Middleware for LoggerMiddleware {
    fn handle(&self, ctx: Context, next: Next) -> Pin<Box<dyn Future<Output = Response> + Send>> {
        Box::pin(async move {
            let start = Instant::now();
            let method = ctx.request().method().as_str().to_string();
            let path = ctx.request().path().to_string();

            let response = next.run(ctx).await;

            let duration = start.elapsed();
            let status = response.status().as_u16();

            tracing::info!("{} {} - {} ({:?})", method, path, status, duration);

            response
        })
    }
}

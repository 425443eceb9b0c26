//! # sheetcache
//!
//! Serves a spreadsheet range as a JSON array of row objects, keyed by the
//! header row, with a URL-keyed response cache in front of the upstream API.
//!
//! ```text
//! GET /{spreadsheet_id}/{sheet_name}  →  [{"Name":"Alice","Age":"30"}, …]
//! GET /                               →  302 to the author's profile
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use sheetcache::background::TaskQueue;
//! use sheetcache::cache::MemoryCache;
//! use sheetcache::middleware::{LoggerMiddleware, Pipeline};
//! use sheetcache::server::Server;
//! use sheetcache::service::SheetService;
//! use sheetcache::sheets::SheetsClient;
//! use sheetcache::sheets::client::DEFAULT_API_BASE;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SheetsClient::new(reqwest::Client::new(), DEFAULT_API_BASE.parse()?, "api-key");
//!     let tasks = TaskQueue::new();
//!     let service = Arc::new(SheetService::new(Arc::new(MemoryCache::new()), source, tasks));
//!     let pipeline = Pipeline::from_router(service.router()).layer(LoggerMiddleware);
//!
//!     let server = Server::bind("127.0.0.1:8787").await?;
//!     server.run(move |req| {
//!         let pipeline = pipeline.clone();
//!         async move { pipeline.handle(req).await }
//!     }).await?;
//!     Ok(())
//! }
//! ```

pub mod background;
pub mod cache;
pub mod config;
pub mod context;
pub mod http;
pub mod middleware;
pub mod router;
pub mod server;
pub mod service;
pub mod sheets;

pub use http::{Headers, Method, Request, Response, StatusCode};
pub use router::Router;
pub use server::{Server, ServerError};

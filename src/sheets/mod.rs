//! Spreadsheet data source - the upstream values API and its payload.
//!
//! Upstream answers a values query with a JSON document of the shape
//! `{ values?: cell[][], error?: { message: string } }`. Nothing about that
//! document is trusted: [`ValueRange::from_json`] pulls out what it can and
//! treats every other shape as empty.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

pub mod client;
pub mod rows;

pub use client::SheetsClient;
pub use rows::{RowRecord, rows_from_grid};

/// Identifies one sheet (or A1 range) inside one spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SheetRef {
    pub spreadsheet_id: String,
    pub sheet_name: String,
}

impl SheetRef {
    pub fn new(spreadsheet_id: impl Into<String>, sheet_name: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            sheet_name: sheet_name.into(),
        }
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.spreadsheet_id, self.sheet_name)
    }
}

/// Error object reported by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
}

/// Fallback text for an upstream error object that carries no message.
const UNKNOWN_API_ERROR: &str = "Unknown error from spreadsheet API";

/// The parts of an upstream values response this service reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRange {
    /// Cell grid, first row being the header. Empty when upstream sent none.
    pub values: Vec<Vec<Value>>,
    pub error: Option<ApiError>,
}

impl ValueRange {
    /// Extracts `values` and `error` from an arbitrary JSON document.
    ///
    /// - `error` counts when present and not `null`/`false`; its `message`
    ///   is taken verbatim, a bare string error is used as the message.
    /// - `values` that is missing or not an array yields an empty grid; a row
    ///   that is not an array yields an empty row.
    pub fn from_json(doc: Value) -> Self {
        let Value::Object(mut doc) = doc else {
            return Self::default();
        };

        let error = doc.remove("error").and_then(|error| match error {
            Value::Null | Value::Bool(false) => None,
            Value::String(message) => Some(ApiError { message }),
            other => Some(ApiError {
                message: other
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or(UNKNOWN_API_ERROR)
                    .to_owned(),
            }),
        });

        let values = match doc.remove("values") {
            Some(Value::Array(rows)) => rows
                .into_iter()
                .map(|row| match row {
                    Value::Array(cells) => cells,
                    _ => Vec::new(),
                })
                .collect(),
            _ => Vec::new(),
        };

        Self { values, error }
    }
}

/// Failures reaching upstream or reading its answer. Upstream-reported errors
/// are not among them: those arrive inside a [`ValueRange`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("spreadsheet API request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("spreadsheet API base URL cannot carry a path: {0}")]
    InvalidBase(String),
}

/// Boxed future returned by [`SheetSource::fetch_values`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<ValueRange, FetchError>> + Send + 'a>>;

/// Anything that can produce the value grid of a sheet.
pub trait SheetSource: Send + Sync + 'static {
    /// Issues one values query for `sheet`.
    fn fetch_values<'a>(&'a self, sheet: &'a SheetRef) -> FetchFuture<'a>;
}

impl<T: SheetSource> SheetSource for Arc<T> {
    fn fetch_values<'a>(&'a self, sheet: &'a SheetRef) -> FetchFuture<'a> {
        (**self).fetch_values(sheet)
    }
}

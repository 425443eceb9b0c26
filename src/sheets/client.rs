//! HTTP client for the Google Sheets v4 values endpoint.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{FetchError, FetchFuture, SheetRef, SheetSource, ValueRange};

/// Default location of the values API.
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Queries `{base}/{spreadsheet_id}/values/{sheet_name}?key={api_key}`.
///
/// The body is decoded as JSON whatever the HTTP status, since upstream
/// reports its errors as a JSON object on 4xx responses. No retries, no
/// timeout beyond the [`Client`]'s own.
pub struct SheetsClient {
    http: Client,
    base: Url,
    api_key: String,
}

impl SheetsClient {
    pub fn new(http: Client, base: Url, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base,
            api_key: api_key.into(),
        }
    }

    /// Builds the values URL for `sheet`. Both identifiers are percent-encoded
    /// as single path segments.
    pub fn values_url(&self, sheet: &SheetRef) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidBase(self.base.to_string()))?
            .pop_if_empty()
            .push(&sheet.spreadsheet_id)
            .push("values")
            .push(&sheet.sheet_name);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn fetch(&self, sheet: &SheetRef) -> Result<ValueRange, FetchError> {
        let url = self.values_url(sheet)?;

        // `without_url` keeps the API key out of error messages and logs.
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url()))?;
        let status = response.status();

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Transport(e.without_url()))?;
        debug!(sheet = %sheet, status = %status, "spreadsheet API responded");

        Ok(ValueRange::from_json(body))
    }
}

impl SheetSource for SheetsClient {
    fn fetch_values<'a>(&'a self, sheet: &'a SheetRef) -> FetchFuture<'a> {
        Box::pin(self.fetch(sheet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Request, Response, StatusCode};
    use crate::server::Server;
    use std::sync::{Arc, Mutex};

    /// Local stand-in for the values API. Records each request line and answers
    /// by sheet name: `Missing` gets a 404 error object, `Html` a login page,
    /// anything else a one-row grid.
    async fn stub_upstream() -> (String, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let server = Server::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/v4/spreadsheets", server.local_addr());

        let log = Arc::clone(&seen);
        tokio::spawn(server.run(move |req: Request| {
            log.lock().unwrap().push(format!(
                "{} {}?{}",
                req.method(),
                req.path(),
                req.query_string().unwrap_or_default()
            ));
            let path = req.path().to_owned();
            async move {
                if path.ends_with("/Missing") {
                    Response::new(StatusCode::NotFound)
                        .header("Content-Type", "application/json")
                        .body(r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#)
                } else if path.ends_with("/Html") {
                    Response::new(StatusCode::Ok)
                        .header("Content-Type", "text/html")
                        .body("<html><body>Sign in</body></html>")
                } else {
                    Response::new(StatusCode::Ok)
                        .header("Content-Type", "application/json")
                        .body(r#"{"range":"Sheet1!A1:B2","values":[["A","B"],["1","2"]]}"#)
                }
            }
        }));

        (base, seen)
    }

    fn client(base: &str) -> SheetsClient {
        let http = Client::builder().no_proxy().build().unwrap();
        SheetsClient::new(http, Url::parse(base).unwrap(), "secret")
    }

    #[test]
    fn values_url_layout() {
        let url = client(DEFAULT_API_BASE)
            .values_url(&SheetRef::new("1AbC", "Sheet1"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/1AbC/values/Sheet1?key=secret"
        );
    }

    #[test]
    fn values_url_encodes_segments() {
        let url = client("http://127.0.0.1:9000/v4/spreadsheets/")
            .values_url(&SheetRef::new("id", "My Sheet/2"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/v4/spreadsheets/id/values/My%20Sheet%2F2?key=secret"
        );
    }

    #[test]
    fn base_without_path_support_is_rejected() {
        let err = client("mailto:someone@example.com")
            .values_url(&SheetRef::new("id", "Sheet1"))
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidBase(_)));
    }

    #[tokio::test]
    async fn fetch_sends_key_and_decodes_values() {
        let (base, seen) = stub_upstream().await;
        let range = client(&base)
            .fetch_values(&SheetRef::new("1AbC", "Sheet1"))
            .await
            .unwrap();

        assert_eq!(range.error, None);
        assert_eq!(range.values.len(), 2);
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["GET /v4/spreadsheets/1AbC/values/Sheet1?key=secret"]
        );
    }

    #[tokio::test]
    async fn error_status_body_is_still_decoded() {
        let (base, _) = stub_upstream().await;
        let range = client(&base)
            .fetch_values(&SheetRef::new("1AbC", "Missing"))
            .await
            .unwrap();

        assert_eq!(range.error.unwrap().message, "Requested entity was not found.");
        assert!(range.values.is_empty());
    }

    #[tokio::test]
    async fn non_json_body_is_a_transport_error_without_the_key() {
        let (base, _) = stub_upstream().await;
        let err = client(&base)
            .fetch_values(&SheetRef::new("1AbC", "Html"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
        assert!(!err.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_transport_error_without_the_key() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}/v4/spreadsheets"))
            .fetch_values(&SheetRef::new("1AbC", "Sheet1"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
        assert!(!err.to_string().contains("secret"));
    }
}

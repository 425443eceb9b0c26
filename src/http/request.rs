//! HTTP/1.1 request parsing using the [`httparse`] crate.

use thiserror::Error;

use super::{Headers, Method};

/// Errors that can occur while parsing an HTTP/1.1 request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request is incomplete - more data needed")]
    Incomplete,

    #[error("HTTP parse error: {0}")]
    Parse(#[from] httparse::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}

/// A parsed HTTP/1.1 request head.
///
/// Created by [`Request::parse`] from a raw byte buffer. The body, if any, is
/// left in the caller's buffer; nothing this service routes reads it.
///
/// # Examples
///
/// ```
/// use sheetcache::http::request::Request;
///
/// let raw = b"GET /1AbC/Sheet1?x=1 HTTP/1.1\r\nHost: sheets.local\r\n\r\n";
/// let (request, _offset) = Request::parse(raw).unwrap();
///
/// assert_eq!(request.method().as_str(), "GET");
/// assert_eq!(request.path(), "/1AbC/Sheet1");
/// assert_eq!(request.query_string(), Some("x=1"));
/// assert_eq!(request.url(), "http://sheets.local/1AbC/Sheet1?x=1");
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    /// HTTP minor version: 0 for HTTP/1.0, 1 for HTTP/1.1.
    version: u8,
    headers: Headers,
    query: Option<String>,
}

impl Request {
    /// Maximum number of headers we support per request.
    const MAX_HEADERS: usize = 64;

    /// Parse a raw HTTP/1.1 request from a byte slice.
    ///
    /// Returns the parsed `Request` and the byte offset at which the body begins
    /// in `buf` (i.e. immediately after the `\r\n\r\n` header terminator).
    ///
    /// # Errors
    ///
    /// - [`RequestError::Incomplete`] - more data is needed to complete the request headers.
    /// - [`RequestError::Parse`] - the data is malformed and cannot be parsed.
    /// - [`RequestError::MissingField`] - a required field (method, path, version) is absent.
    pub fn parse(buf: &[u8]) -> Result<(Self, usize), RequestError> {
        let mut headers = [httparse::EMPTY_HEADER; Self::MAX_HEADERS];
        let mut raw_req = httparse::Request::new(&mut headers);

        let body_offset = match raw_req.parse(buf)? {
            httparse::Status::Complete(offset) => offset,
            httparse::Status::Partial => return Err(RequestError::Incomplete),
        };

        let Ok(method) = raw_req
            .method
            .ok_or(RequestError::MissingField { field: "method" })?
            .parse::<Method>();

        let raw_path = raw_req
            .path
            .ok_or(RequestError::MissingField { field: "path" })?;

        let (path, query) = match raw_path.split_once('?') {
            Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
            None => (raw_path.to_owned(), None),
        };

        let version = raw_req
            .version
            .ok_or(RequestError::MissingField { field: "version" })?;

        let mut header_map = Headers::with_capacity(raw_req.headers.len());
        for header in raw_req.headers.iter() {
            if let Ok(value) = std::str::from_utf8(header.value) {
                header_map.insert(header.name, value);
            }
        }

        Ok((
            Self {
                method,
                path,
                version,
                headers: header_map,
                query,
            },
            body_offset,
        ))
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path (without the query string).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the HTTP minor version number (0 = HTTP/1.0, 1 = HTTP/1.1).
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the request headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the raw query string (without the leading `?`), if any.
    pub fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Reconstructs the absolute request URL from the `Host` header, path and
    /// query string. Falls back to `localhost` when no `Host` was sent.
    pub fn url(&self) -> String {
        let host = self.headers.get("host").unwrap_or("localhost");
        match &self.query {
            Some(query) => format!("http://{host}{}?{query}", self.path),
            None => format!("http://{host}{}", self.path),
        }
    }

    /// Returns `true` if the connection should be kept alive after this request.
    ///
    /// HTTP/1.1 defaults to keep-alive. HTTP/1.0 defaults to close unless
    /// `Connection: keep-alive` is explicitly set.
    pub fn is_keep_alive(&self) -> bool {
        match self.headers.get("connection") {
            Some(conn) => conn.eq_ignore_ascii_case("keep-alive"),
            None => self.version == 1,
        }
    }

    /// Returns the value of the `Content-Length` header parsed as a `usize`, if present.
    pub fn content_length(&self) -> Option<usize> {
        self.headers.get("content-length")?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sheet_request() {
        let raw = b"GET /abc123/Sheet1 HTTP/1.1\r\nHost: localhost:8787\r\n\r\n";
        let (req, offset) = Request::parse(raw).unwrap();
        assert_eq!(req.method(), &Method::Get);
        assert_eq!(req.path(), "/abc123/Sheet1");
        assert_eq!(req.version(), 1);
        assert_eq!(req.query_string(), None);
        assert_eq!(offset, raw.len());
    }

    #[test]
    fn url_includes_host_and_query() {
        let raw = b"GET /abc/Sheet1?v=2 HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let (req, _) = Request::parse(raw).unwrap();
        assert_eq!(req.path(), "/abc/Sheet1");
        assert_eq!(req.url(), "http://example.com/abc/Sheet1?v=2");
    }

    #[test]
    fn url_without_host_falls_back_to_localhost() {
        let raw = b"GET /abc/Sheet1 HTTP/1.0\r\n\r\n";
        let (req, _) = Request::parse(raw).unwrap();
        assert_eq!(req.url(), "http://localhost/abc/Sheet1");
    }

    #[test]
    fn incomplete_request() {
        let raw = b"GET / HTTP/1.1\r\nHost:";
        assert!(matches!(Request::parse(raw), Err(RequestError::Incomplete)));
    }

    #[test]
    fn keep_alive_rules() {
        let (req, _) = Request::parse(b"GET / HTTP/1.1\r\nHost: a\r\n\r\n").unwrap();
        assert!(req.is_keep_alive());

        let (req, _) =
            Request::parse(b"GET / HTTP/1.1\r\nHost: a\r\nConnection: close\r\n\r\n").unwrap();
        assert!(!req.is_keep_alive());

        let (req, _) = Request::parse(b"GET / HTTP/1.0\r\nHost: a\r\n\r\n").unwrap();
        assert!(!req.is_keep_alive());
    }

    #[test]
    fn content_length() {
        let raw = b"POST /a/b HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
        let (req, body_offset) = Request::parse(raw).unwrap();
        assert_eq!(req.content_length(), Some(5));
        assert_eq!(&raw[body_offset..], b"hello");
    }
}

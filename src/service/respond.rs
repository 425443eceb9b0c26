//! Response constructors shared by every route.

use serde::Serialize;

use crate::http::{Response, StatusCode};

/// Where `/` redirects to.
pub const PROFILE_URL: &str = "https://github.com/gtoselli";

/// Freshness granted to shared caches for successful responses.
pub const CACHE_CONTROL: &str = "s-maxage=30";

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn json_base(status: StatusCode) -> Response {
    Response::new(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
}

/// `200 OK` with `body` serialized as JSON, cacheable by shared caches.
pub fn json_ok<T: Serialize + ?Sized>(body: &T) -> Result<Response, serde_json::Error> {
    let body = serde_json::to_vec(body)?;
    Ok(json_base(StatusCode::Ok)
        .header("Cache-Control", CACHE_CONTROL)
        .body_bytes(body))
}

/// `{"error": message}` with the given status. Never cacheable, still CORS-readable.
pub fn error(message: &str, status: StatusCode) -> Response {
    let body = serde_json::to_vec(&ErrorBody { error: message }).unwrap_or_default();
    json_base(status).body_bytes(body)
}

/// `302 Found` to `location`, empty body.
pub fn redirect(location: &str) -> Response {
    Response::new(StatusCode::Found).header("Location", location)
}

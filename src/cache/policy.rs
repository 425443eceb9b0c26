//! Freshness rules derived from a response's `Cache-Control` header.

use std::time::Duration;

use crate::http::Headers;

/// How long a shared cache may keep a response with these headers.
///
/// `s-maxage` wins over `max-age`. `no-store` and `private` forbid storage, as
/// does a missing or zero lifetime.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sheetcache::cache::policy::shared_max_age;
/// use sheetcache::http::Headers;
///
/// let mut headers = Headers::new();
/// headers.insert("Cache-Control", "max-age=60, s-maxage=30");
/// assert_eq!(shared_max_age(&headers), Some(Duration::from_secs(30)));
/// ```
pub fn shared_max_age(headers: &Headers) -> Option<Duration> {
    let mut s_maxage = None;
    let mut max_age = None;

    let directives = headers
        .get_all("cache-control")
        .flat_map(|value| value.split(','))
        .map(str::trim);

    for directive in directives {
        let (name, value) = match directive.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim().trim_matches('"'))),
            None => (directive, None),
        };

        if name.eq_ignore_ascii_case("no-store") || name.eq_ignore_ascii_case("private") {
            return None;
        }

        let seconds = value.and_then(|v| v.parse::<u64>().ok());
        if name.eq_ignore_ascii_case("s-maxage") {
            s_maxage = s_maxage.or(seconds);
        } else if name.eq_ignore_ascii_case("max-age") {
            max_age = max_age.or(seconds);
        }
    }

    s_maxage
        .or(max_age)
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
}

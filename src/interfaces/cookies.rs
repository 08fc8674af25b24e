use cookie::{Cookie, CookieJar};
use tracing::warn;

/// Builds a cookie jar from the value of an inbound `Cookie` header.
///
/// Pairs that do not parse are skipped rather than failing the whole header.
pub fn jar_from_header(header: &str) -> CookieJar {
    let mut jar = CookieJar::new();
    for cookie in Cookie::split_parse(header) {
        match cookie {
            Ok(cookie) => jar.add_original(cookie.into_owned()),
            Err(e) => warn!("skipping malformed cookie: {e}"),
        }
    }
    jar
}

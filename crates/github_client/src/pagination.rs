//! Link header pagination.
//!
//! GitHub paginates list endpoints with an RFC 8288 `Link` header:
//!
//! ```text
//! Link: <https://api.github.com/repositories/1/actions/runners?page=2>; rel="next",
//!       <https://api.github.com/repositories/1/actions/runners?page=5>; rel="last"
//! ```

use reqwest::header::{HeaderMap, LINK};
use tracing::warn;
use url::Url;

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;

/// Returns the `rel="next"` target from the `Link` headers of a response, if any.
pub fn next_page_url(headers: &HeaderMap) -> Option<Url> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| find_relation(value, "next"))
        .and_then(|target| match Url::parse(target) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(link = target, error = %e, "Ignoring unparseable pagination link");
                None
            }
        })
}

/// Finds the target of the link with the given relation in a `Link` header value.
pub fn find_relation<'a>(header: &'a str, relation: &str) -> Option<&'a str> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts
            .next()?
            .trim()
            .strip_prefix('<')?
            .strip_suffix('>')?;

        let matches = parts.any(|param| {
            let Some((key, value)) = param.split_once('=') else {
                return false;
            };
            key.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_ascii_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case(relation))
        });

        matches.then_some(target)
    })
}

//! Primitive cell checks the catalog rules are composed from.
//!
//! Each function looks at one already-present cell value; presence itself is
//! decided by the rule that calls it.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use url::Url;
use validator::ValidateLength;

/// Signed run of ASCII digits.
static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid regex"));

/// Decimal with a point and/or an exponent, e.g. `4.5`, `.5`, `3.`, `1e3`.
static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.[0-9]*|\.[0-9]+|[0-9]+(?:\.[0-9]*)?[eE][+-]?[0-9]+|\.[0-9]+[eE][+-]?[0-9]+)$")
        .expect("valid regex")
});

/// `YYYY-MM-DD HH:MM:SS.f` with one to six fractional digits.
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{1,6}$")
        .expect("valid regex")
});

/// chrono format matching [`TIMESTAMP_RE`] once the shape has been checked.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Required literal prefix of `link` / `image_link`: the `https` scheme
/// followed by an authority.
pub const URL_PREFIX: &str = "https://";

/// Character count (not bytes) is at most `max`.
pub fn within_length(value: &str, max: u64) -> bool {
    value.validate_length(None, Some(max), None)
}

/// Literal text is an integer, so a float-looking value such as `3.0` fails.
pub fn is_integer_literal(value: &str) -> bool {
    INTEGER_RE.is_match(value)
}

/// Literal text is a floating-point number; a bare integer such as `3` fails.
pub fn is_float_literal(value: &str) -> bool {
    FLOAT_RE.is_match(value) && value.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Characters a URL never carries literally. `Url::parse` would quietly
/// percent-encode or strip them, so they are rejected on the raw text.
fn is_forbidden_url_char(c: char) -> bool {
    c.is_whitespace()
        || c.is_control()
        || matches!(c, '\\' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`')
}

/// Parse `value` only if it is written as `scheme://authority...` with no
/// characters that would need escaping. `Url::parse` alone accepts
/// `https:example.com`, `https:///example.com` and backslash separators, and
/// silently encodes embedded spaces.
fn parse_strict_url(value: &str) -> Option<Url> {
    if value.chars().any(is_forbidden_url_char) {
        return None;
    }
    let (_, rest) = value.split_once(':')?;
    let authority = rest.strip_prefix("//")?;
    if authority.is_empty() || authority.starts_with('/') {
        return None;
    }
    Url::parse(value).ok()
}

/// Written as `scheme://host...` with a non-empty host.
pub fn is_well_formed_url(value: &str) -> bool {
    parse_strict_url(value)
        .is_some_and(|url| url.host_str().is_some_and(|host| !host.is_empty()))
}

/// The full link rule: bounded length, literal `https://` prefix, well-formed
/// URL with the `https` scheme.
pub fn is_https_link(value: &str, max_len: u64) -> bool {
    within_length(value, max_len)
        && value.starts_with(URL_PREFIX)
        && parse_strict_url(value).is_some_and(|url| {
            url.scheme() == "https" && url.host_str().is_some_and(|host| !host.is_empty())
        })
}

/// Exact `YYYY-MM-DD HH:MM:SS.ffffff` shape naming a real calendar instant.
pub fn is_catalog_timestamp(value: &str) -> bool {
    TIMESTAMP_RE.is_match(value) && NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).is_ok()
}

/// Contains at least one category level separator.
pub fn is_category_path(value: &str) -> bool {
    value.contains(crate::types::CATEGORY_SEPARATOR)
}

/// Equals one of `allowed` exactly.
pub fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

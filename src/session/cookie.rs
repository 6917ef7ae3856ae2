use axum::http::{header, HeaderMap, HeaderValue};
use lazy_static::lazy_static;
use regex::Regex;

use crate::config::SessionConfig;

lazy_static! {
    static ref COOKIE_PAIR_RE: Regex =
        Regex::new(r"(?:^|;)\s*([^=;\s]+)\s*=\s*([^;]*)").unwrap();
}

/// Value of cookie `name` across all `Cookie` headers, percent-decoded when
/// the encoding is valid. Empty values count as absent.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| COOKIE_PAIR_RE.captures_iter(raw))
        .find(|caps| &caps[1] == name)
        .map(|caps| decode_value(caps[2].trim().trim_matches('"')))
        .filter(|v| !v.is_empty())
}

fn decode_value(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// `Set-Cookie` value for a freshly minted session token.
pub fn session_cookie(cfg: &SessionConfig, token: &str) -> anyhow::Result<HeaderValue> {
    let raw = format!(
        "{}={}; Max-Age={}; Path=/",
        cfg.cookie_name,
        token,
        cfg.max_age_secs()
    );
    Ok(HeaderValue::from_str(&raw)?)
}

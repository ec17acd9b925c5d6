//! Link target filtering.

use regex::Regex;
use std::sync::OnceLock;

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Return the href if it is safe to emit in an `<a>` tag.
///
/// Relative references (`/about`, `#intro`, `page.html`) pass through.
/// Absolute URLs must use `http`, `https` or `mailto`. The scheme is
/// checked after removing whitespace and control characters, which
/// browsers ignore inside a scheme (`java\tscript:`).
pub fn safe_href(href: &str) -> Option<&str> {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    let scheme = SCHEME.get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.-]*):").unwrap());

    let compact: String = href
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    match scheme.captures(&compact) {
        Some(caps) => {
            let name = caps[1].to_ascii_lowercase();
            ALLOWED_SCHEMES.contains(&name.as_str()).then_some(href)
        }
        None => Some(href),
    }
}

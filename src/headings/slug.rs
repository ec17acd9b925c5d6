//! Anchor slugs for heading text.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Generate an anchor slug from heading text.
///
/// Lowercases, decomposes with NFKD so accents split off their base letters,
/// drops everything outside `[a-z0-9]`, whitespace and `-`, trims, then
/// turns whitespace runs and hyphen runs into single hyphens. Leading or
/// trailing hyphens that were in the source text are kept.
///
/// # Examples
///
/// ```
/// use blogdoc::headings::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("Café Crème"), "cafe-creme");
/// assert_eq!(slugify("What's new in 2.0?"), "whats-new-in-20");
/// ```
pub fn slugify(text: &str) -> String {
    static PATTERNS: OnceLock<(Regex, Regex, Regex)> = OnceLock::new();
    let (disallowed, whitespace, hyphens) = PATTERNS.get_or_init(|| {
        (
            Regex::new(r"[^a-z0-9\s-]").unwrap(),
            Regex::new(r"\s+").unwrap(),
            Regex::new(r"-+").unwrap(),
        )
    });

    let normalized: String = text.to_lowercase().nfkd().collect();
    let kept = disallowed.replace_all(&normalized, "");
    let spaced = whitespace.replace_all(kept.trim(), "-");
    hyphens.replace_all(&spaced, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_simple() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("1. Getting Started"), "1-getting-started");
    }

    #[test]
    fn test_slugify_whitespace() {
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(slugify("tabs\tand\nnewlines"), "tabs-and-newlines");
    }

    #[test]
    fn test_slugify_hyphen_runs() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("a---b"), "a-b");
    }

    #[test]
    fn test_slugify_diacritics() {
        assert_eq!(slugify("Ångström Über"), "angstrom-uber");
        assert_eq!(slugify("naïve résumé"), "naive-resume");
    }

    #[test]
    fn test_slugify_compatibility_forms() {
        // NFKD folds the ligature and full-width digits.
        assert_eq!(slugify("ﬁle １２"), "file-12");
    }

    #[test]
    fn test_slugify_drops_non_latin() {
        assert_eq!(slugify("日本語"), "");
        assert_eq!(slugify("Rust 🦀 tips"), "rust-tips");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }
}

//! URL slugs for blog titles.

use crate::headings::slugify;

/// Slug used when a title has no characters that survive slugging.
pub const FALLBACK_SLUG: &str = "untitled";

/// Slug for a post title: the anchor slug with edge hyphens removed.
pub fn title_slug(title: &str) -> String {
    let slug = slugify(title).trim_matches('-').to_string();
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Find a free slug for `title`.
///
/// Tries the bare slug first, then `slug-1`, `slug-2`, ... until
/// `is_taken` reports a free one.
///
/// # Examples
///
/// ```
/// use blogdoc::blog::unique_title_slug;
///
/// let taken = ["hello-world", "hello-world-1"];
/// let slug = unique_title_slug("Hello, World!", |s| taken.contains(&s));
/// assert_eq!(slug, "hello-world-2");
/// ```
pub fn unique_title_slug(title: &str, mut is_taken: impl FnMut(&str) -> bool) -> String {
    let base = title_slug(title);
    if !is_taken(&base) {
        return base;
    }
    (1u64..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_slug() {
        assert_eq!(title_slug("My First Post"), "my-first-post");
        assert_eq!(title_slug("- Draft -"), "draft");
        assert_eq!(title_slug("¿Qué pasa?"), "que-pasa");
        assert_eq!(title_slug("???"), FALLBACK_SLUG);
    }

    #[test]
    fn test_unique_slug_free() {
        assert_eq!(unique_title_slug("Post", |_| false), "post");
    }

    #[test]
    fn test_unique_slug_counts_from_one() {
        let taken = ["post", "post-1"];
        assert_eq!(unique_title_slug("Post", |s| taken.contains(&s)), "post-2");
    }
}

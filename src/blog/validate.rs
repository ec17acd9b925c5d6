//! Field rules for blog submissions.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::{CoverImage, Seo};

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 200;
pub const SUMMARY_MIN: usize = 10;
pub const SUMMARY_MAX: usize = 500;
pub const TAGS_MIN: usize = 1;
pub const TAGS_MAX: usize = 10;
pub const META_TITLE_MAX: usize = 70;
pub const META_DESCRIPTION_MAX: usize = 160;

/// A single rejected field with a reader-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn uri_pattern() -> &'static Regex {
    static URI: OnceLock<Regex> = OnceLock::new();
    URI.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://\S+$").unwrap())
}

/// Collects every failing rule instead of stopping at the first.
#[derive(Debug, Default)]
pub(super) struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn length(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        let len = value.trim().chars().count();
        if len == 0 {
            self.fail(field, "is required");
        } else if len < min {
            self.fail(field, format!("must be at least {} characters", min));
        } else if len > max {
            self.fail(field, format!("must not exceed {} characters", max));
        }
    }

    pub fn title(&mut self, title: &str) {
        self.length("title", title, TITLE_MIN, TITLE_MAX);
    }

    pub fn summary(&mut self, summary: &str) {
        self.length("summary", summary, SUMMARY_MIN, SUMMARY_MAX);
    }

    pub fn category(&mut self, category: &str) {
        if category.trim().is_empty() {
            self.fail("category", "is required");
        }
    }

    pub fn tags(&mut self, tags: &[String]) {
        if tags.len() < TAGS_MIN {
            self.fail("tags", "at least one tag is required");
        } else if tags.len() > TAGS_MAX {
            self.fail("tags", format!("must not exceed {} tags", TAGS_MAX));
        }
        if tags.iter().any(|tag| tag.trim().is_empty()) {
            self.fail("tags", "must not contain empty tags");
        }
    }

    pub fn cover_image(&mut self, cover: &CoverImage) {
        match cover.url.as_deref().map(str::trim) {
            None | Some("") => self.fail("coverImage.url", "is required"),
            Some(url) if !uri_pattern().is_match(url) => {
                self.fail("coverImage.url", "must be a valid URL")
            }
            Some(_) => {}
        }
    }

    pub fn seo(&mut self, seo: &Seo) {
        if let Some(title) = &seo.meta_title
            && title.chars().count() > META_TITLE_MAX
        {
            self.fail(
                "seo.metaTitle",
                format!("must not exceed {} characters", META_TITLE_MAX),
            );
        }
        if let Some(description) = &seo.meta_description
            && description.chars().count() > META_DESCRIPTION_MAX
        {
            self.fail(
                "seo.metaDescription",
                format!("must not exceed {} characters", META_DESCRIPTION_MAX),
            );
        }
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

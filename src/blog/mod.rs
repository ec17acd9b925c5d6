//! Blog posts and the write-path checks applied to submissions.
//!
//! A submission is a [`BlogInput`] (create) or a [`BlogUpdate`] (partial
//! edit). Both carry the body as raw JSON; validation turns it into a typed
//! [`Document`] through [`validate_content`], so malformed content is
//! reported separately from ordinary field errors.

mod slug;
mod validate;

pub use slug::{FALLBACK_SLUG, title_slug, unique_title_slug};
pub use validate::{
    FieldError, META_DESCRIPTION_MAX, META_TITLE_MAX, SUMMARY_MAX, SUMMARY_MIN, TAGS_MAX,
    TAGS_MIN, TITLE_MAX, TITLE_MIN,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::document::{ContentError, Document, validate_content};
use validate::FieldChecks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// A stored post. The body is always a typed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content: Document,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<CoverImage>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub status: BlogStatus,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub seo: Seo,
}

impl Blog {
    /// Build a post from an accepted submission once storage has assigned
    /// its id and slug.
    pub fn new(id: impl Into<String>, slug: impl Into<String>, post: NewBlog) -> Self {
        Self {
            id: id.into(),
            title: post.title,
            slug: slug.into(),
            summary: post.summary,
            content: post.content,
            cover_image: post.cover_image,
            tags: post.tags,
            category: post.category,
            status: post.status,
            views: 0,
            seo: post.seo.unwrap_or_default(),
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == BlogStatus::Published
    }

    /// Apply accepted changes. Returns `true` when the title changed, in
    /// which case the caller is expected to pick a new slug.
    pub fn apply(&mut self, changes: BlogChanges) -> bool {
        let mut retitled = false;
        if let Some(title) = changes.title {
            retitled = title != self.title;
            self.title = title;
        }
        if let Some(summary) = changes.summary {
            self.summary = summary;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(cover_image) = changes.cover_image {
            self.cover_image = Some(cover_image);
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(seo) = changes.seo {
            self.seo = seo;
        }
        retitled
    }
}

/// Why a submission was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlogError {
    #[error("invalid content: {0}")]
    InvalidContent(#[from] ContentError),

    #[error("invalid fields: {}", join_fields(.0))]
    InvalidFields(Vec<FieldError>),

    #[error("update must change at least one field")]
    EmptyUpdate,
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Body of a create request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: Option<CoverImage>,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(default)]
    pub status: BlogStatus,
}

/// A create request that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlog {
    pub title: String,
    pub summary: String,
    pub content: Document,
    pub category: String,
    pub tags: Vec<String>,
    pub cover_image: Option<CoverImage>,
    pub seo: Option<Seo>,
    pub status: BlogStatus,
}

impl BlogInput {
    /// Check every field, then the content.
    ///
    /// Field errors are reported together; content is only examined once
    /// the fields pass.
    pub fn validate(self) -> Result<NewBlog, BlogError> {
        let mut checks = FieldChecks::default();
        checks.title(&self.title);
        checks.summary(&self.summary);
        checks.category(&self.category);
        checks.tags(&self.tags);
        if let Some(cover) = &self.cover_image {
            checks.cover_image(cover);
        }
        if let Some(seo) = &self.seo {
            checks.seo(seo);
        }
        checks.finish().map_err(BlogError::InvalidFields)?;

        let content = validate_content(&self.content)?;
        Ok(NewBlog {
            title: self.title.trim().to_string(),
            summary: self.summary.trim().to_string(),
            content,
            category: self.category.trim().to_string(),
            tags: trim_tags(self.tags),
            cover_image: self.cover_image,
            seo: self.seo,
            status: self.status,
        })
    }
}

/// Body of an edit request. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub cover_image: Option<CoverImage>,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(default)]
    pub status: Option<BlogStatus>,
}

/// An edit request that passed every check.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<Document>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub cover_image: Option<CoverImage>,
    pub seo: Option<Seo>,
    pub status: Option<BlogStatus>,
}

impl BlogUpdate {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.summary.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.cover_image.is_none()
            && self.seo.is_none()
            && self.status.is_none()
    }

    pub fn validate(self) -> Result<BlogChanges, BlogError> {
        if self.is_empty() {
            return Err(BlogError::EmptyUpdate);
        }

        let mut checks = FieldChecks::default();
        if let Some(title) = &self.title {
            checks.title(title);
        }
        if let Some(summary) = &self.summary {
            checks.summary(summary);
        }
        if let Some(category) = &self.category {
            checks.category(category);
        }
        if let Some(tags) = &self.tags {
            checks.tags(tags);
        }
        if let Some(cover) = &self.cover_image {
            checks.cover_image(cover);
        }
        if let Some(seo) = &self.seo {
            checks.seo(seo);
        }
        checks.finish().map_err(BlogError::InvalidFields)?;

        let content = self.content.as_ref().map(validate_content).transpose()?;
        Ok(BlogChanges {
            title: self.title.map(|t| t.trim().to_string()),
            summary: self.summary.map(|s| s.trim().to_string()),
            content,
            category: self.category.map(|c| c.trim().to_string()),
            tags: self.tags.map(trim_tags),
            cover_image: self.cover_image,
            seo: self.seo,
            status: self.status,
        })
    }
}

fn trim_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter().map(|tag| tag.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(content: Value) -> BlogInput {
        serde_json::from_value(json!({
            "title": "  Hello World ",
            "summary": "A short introduction post.",
            "content": content,
            "category": "general",
            "tags": [" intro ", "rust"],
            "status": "published"
        }))
        .unwrap()
    }

    fn doc() -> Value {
        json!({"type": "doc", "content": [{"type": "paragraph"}]})
    }

    #[test]
    fn test_valid_submission() {
        let post = submission(doc()).validate().unwrap();
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.tags, vec!["intro", "rust"]);
        assert_eq!(post.status, BlogStatus::Published);
        assert_eq!(post.content.blocks().len(), 1);
    }

    #[test]
    fn test_content_errors_are_distinct() {
        assert_eq!(
            submission(Value::Null).validate(),
            Err(BlogError::InvalidContent(ContentError::Missing))
        );
        assert_eq!(
            submission(json!("text")).validate(),
            Err(BlogError::InvalidContent(ContentError::NotAnObject {
                found: "string"
            }))
        );
    }

    #[test]
    fn test_field_errors_reported_together() {
        let input = BlogInput {
            title: "Hi".into(),
            content: doc(),
            ..BlogInput::default()
        };
        let Err(BlogError::InvalidFields(errors)) = input.validate() else {
            panic!("expected field errors");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "summary", "category", "tags"]);
    }

    #[test]
    fn test_status_defaults_to_draft() {
        let input: BlogInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input.status, BlogStatus::Draft);
    }

    #[test]
    fn test_empty_update_rejected() {
        assert_eq!(BlogUpdate::default().validate(), Err(BlogError::EmptyUpdate));
    }

    #[test]
    fn test_update_checks_only_present_fields() {
        let update: BlogUpdate = serde_json::from_value(json!({"status": "published"})).unwrap();
        let changes = update.validate().unwrap();
        assert_eq!(changes.status, Some(BlogStatus::Published));
        assert!(changes.content.is_none());

        let update: BlogUpdate = serde_json::from_value(json!({"content": [1, 2]})).unwrap();
        assert!(matches!(
            update.validate(),
            Err(BlogError::InvalidContent(ContentError::NotAnObject { found: "array" }))
        ));
    }

    #[test]
    fn test_apply_reports_retitle() {
        let mut blog = Blog::new("1", "hello-world", submission(doc()).validate().unwrap());
        assert_eq!(blog.views, 0);
        assert!(blog.is_published());

        let same_title = BlogChanges {
            title: Some("Hello World".into()),
            ..BlogChanges::default()
        };
        assert!(!blog.apply(same_title));

        let renamed = BlogChanges {
            title: Some("Goodbye".into()),
            status: Some(BlogStatus::Draft),
            ..BlogChanges::default()
        };
        assert!(blog.apply(renamed));
        assert_eq!(blog.title, "Goodbye");
        assert!(!blog.is_published());
    }

    #[test]
    fn test_blog_json_shape() {
        let blog = Blog::new("7", "hello-world", submission(doc()).validate().unwrap());
        let value = serde_json::to_value(&blog).unwrap();
        assert_eq!(value["content"]["type"], "doc");
        assert_eq!(value["status"], "published");
        assert!(value.get("coverImage").is_none());

        let back: Blog = serde_json::from_value(value).unwrap();
        assert_eq!(back, blog);
    }
}

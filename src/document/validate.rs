//! Write-path gate for submitted documents.
//!
//! Only the root is checked strictly. Nested nodes may use any type so
//! that newer editor extensions can be stored before the renderer learns
//! about them.

use serde_json::Value;
use thiserror::Error;

use super::Document;
use super::node::NodeKind;

/// Why a submitted document was rejected as malformed content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("content is required")]
    Missing,

    #[error("content must be a document object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("content root has unrecognized type `{0}`")]
    UnknownRootType(String),

    #[error("content root `type` must be a string, found {found}")]
    InvalidRootType { found: &'static str },
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accept or reject a candidate document before it is persisted.
///
/// The root must be a JSON object. If it carries a `type` tag, the tag
/// must name a known node type (`doc` is expected, but not required).
/// Nested nodes are not checked: mistyped fields and non-object children
/// are accepted and carried through unchanged. On success the candidate is
/// returned as a typed [`Document`] whose [`Document::to_value`] equals the
/// input.
pub fn validate_content(candidate: &Value) -> Result<Document, ContentError> {
    let result = check_root(candidate);
    match &result {
        Ok(()) => tracing::trace!("content accepted"),
        Err(err) => tracing::debug!(error = %err, "content rejected"),
    }
    result.map(|()| Document::from(candidate.clone()))
}

fn check_root(candidate: &Value) -> Result<(), ContentError> {
    let root = match candidate {
        Value::Null => return Err(ContentError::Missing),
        Value::Object(root) => root,
        other => {
            return Err(ContentError::NotAnObject {
                found: json_kind(other),
            });
        }
    };

    match root.get("type") {
        None => Ok(()),
        Some(Value::String(kind)) if NodeKind::from_name(kind).is_some() => Ok(()),
        Some(Value::String(kind)) => Err(ContentError::UnknownRootType(kind.clone())),
        Some(other) => Err(ContentError::InvalidRootType {
            found: json_kind(other),
        }),
    }
}

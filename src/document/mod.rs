//! Rich-text document model.
//!
//! Documents are trees of typed [`Node`]s in the editor's JSON shape
//! (`{"type": "doc", "content": [...]}`). The tree is stored as-is and only
//! interpreted on read; see [`crate::render`], [`crate::headings`] and
//! [`crate::reading`] for the traversals that consume it.
//!
//! ## Example
//!
//! ```
//! use blogdoc::document::{Document, validate_content};
//! use serde_json::json;
//!
//! let doc = validate_content(&json!({
//!     "type": "doc",
//!     "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Hello"}]}]
//! }))
//! .unwrap();
//! assert_eq!(doc.blocks().len(), 1);
//! ```

mod node;
mod validate;
mod wire;

pub use node::{
    Attrs, DEFAULT_HEADING_LEVEL, Element, Mark, MarkKind, Node, NodeKind, Text, UnknownNode,
};
pub use validate::{ContentError, validate_content};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete document: the root node of a content tree.
///
/// The root is normally a [`Node::Doc`]. Deserializing a `Document` directly
/// skips the submission checks in [`validate_content`]; use that on the write
/// path and plain deserialization for already-persisted content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Build a `doc` root around the given top-level blocks.
    pub fn new(blocks: Vec<Node>) -> Self {
        Self {
            root: Node::doc(blocks),
        }
    }

    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// Top-level blocks in document order.
    pub fn blocks(&self) -> &[Node] {
        self.root.children()
    }

    /// Visit every node, root included, in depth-first pre-order.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a Node)) {
        self.root.walk(&mut visit);
    }

    pub fn walk_mut(&mut self, mut visit: impl FnMut(&mut Node)) {
        self.root.walk_mut(&mut visit);
    }

    /// Parse and validate a JSON submission.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(validate_content(&value)?)
    }

    pub fn to_value(&self) -> Value {
        Value::from(self.root.clone())
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self {
            root: Node::from(value),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_walk_is_preorder() {
        let doc = Document::new(vec![
            Node::heading(1, vec![Node::text("a")]),
            Node::bullet_list(vec![Node::list_item(vec![Node::paragraph(vec![
                Node::text("b"),
            ])])]),
            Node::paragraph(vec![Node::text("c")]),
        ]);

        let mut order = Vec::new();
        doc.walk(|node| order.push(node.type_name().unwrap_or_default()));

        assert_eq!(
            order,
            [
                "doc",
                "heading",
                "text",
                "bulletList",
                "listItem",
                "paragraph",
                "text",
                "paragraph",
                "text"
            ]
        );
    }

    #[test]
    fn test_document_serde_is_transparent() {
        let value = json!({"type": "doc", "content": [{"type": "horizontalRule"}]});
        let doc: Document = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(doc.blocks(), &[Node::horizontal_rule()]);
        assert_eq!(serde_json::to_value(&doc).unwrap(), value);
        assert_eq!(doc.to_value(), value);
    }

    #[test]
    fn test_from_json_str_rejects_non_object() {
        assert!(Document::from_json_str("[1, 2]").is_err());
        assert!(Document::from_json_str("not json").is_err());
        assert!(Document::from_json_str(r#"{"type": "doc"}"#).is_ok());
    }
}

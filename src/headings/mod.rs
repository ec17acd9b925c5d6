//! Heading extraction and anchor ids.
//!
//! Headings are collected in depth-first pre-order over the whole tree, so
//! a heading nested inside a blockquote or list is found where it appears
//! in the document. Each heading gets an id derived from its text; repeated
//! slugs are numbered `-2`, `-3`, ... within one pass. Text that slugs to
//! nothing (only punctuation or non-Latin script) uses [`FALLBACK_ID`].
//!
//! Two entry points share the same walk:
//!
//! - [`extract_headings`] reads a document and returns descriptors.
//! - [`anchor_headings`] also writes each id onto its heading node, so the
//!   renderer can emit anchors straight from the tree.
//!
//! For the same document both return identical descriptors.

mod slug;

pub use slug::slugify;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::document::{Document, Element, Node};

/// Base id for headings whose text produces an empty slug.
pub const FALLBACK_ID: &str = "section";

/// A heading as it appears in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingDescriptor {
    /// Anchor id, unique within one extraction pass
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
    /// Plain heading text, marks stripped
    pub text: String,
}

/// Assigns de-duplicated ids to headings during one pass.
///
/// The first heading with a given slug keeps it bare; later ones get the
/// running occurrence number appended. If a numbered id collides with a
/// heading whose own text slugs to the same string, the counter keeps
/// advancing until the id is free.
#[derive(Debug, Default)]
pub struct HeadingSlugger {
    counts: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl HeadingSlugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unique id for the given heading text. Never empty.
    pub fn unique_id(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = FALLBACK_ID.to_string();
        }
        loop {
            let count = self.counts.entry(base.clone()).or_insert(0);
            *count += 1;
            let id = if *count > 1 {
                format!("{}-{}", base, count)
            } else {
                base.clone()
            };
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Describe a heading node, or `None` when it has no text.
    pub fn describe(&mut self, heading: &Element) -> Option<HeadingDescriptor> {
        let text = heading.label();
        if text.is_empty() {
            return None;
        }
        Some(HeadingDescriptor {
            id: self.unique_id(&text),
            level: heading.level(),
            text,
        })
    }
}

/// Collect heading descriptors in document order.
///
/// # Examples
///
/// ```
/// use blogdoc::document::{Document, Node};
/// use blogdoc::headings::extract_headings;
///
/// let doc = Document::new(vec![
///     Node::heading(2, vec![Node::text("Setup")]),
///     Node::heading(2, vec![Node::text("Setup")]),
/// ]);
/// let ids: Vec<_> = extract_headings(&doc).into_iter().map(|h| h.id).collect();
/// assert_eq!(ids, ["setup", "setup-2"]);
/// ```
pub fn extract_headings(doc: &Document) -> Vec<HeadingDescriptor> {
    let mut slugger = HeadingSlugger::new();
    let mut headings = Vec::new();
    doc.walk(|node| {
        if let Node::Heading(heading) = node
            && let Some(descriptor) = slugger.describe(heading)
        {
            headings.push(descriptor);
        }
    });
    headings
}

/// Embed anchor ids on every heading node and return the descriptors.
///
/// Headings without text have any stale id cleared so the rendered anchors
/// always match the returned list.
pub fn anchor_headings(doc: &mut Document) -> Vec<HeadingDescriptor> {
    let mut slugger = HeadingSlugger::new();
    let mut headings = Vec::new();
    doc.walk_mut(|node| {
        if let Node::Heading(heading) = node {
            let descriptor = slugger.describe(heading);
            heading.set_anchor_id(descriptor.as_ref().map(|d| d.id.clone()));
            headings.extend(descriptor);
        }
    });
    tracing::trace!(count = headings.len(), "anchored headings");
    headings
}

/// Count headings per level, ordered from level 1 to 6.
pub fn level_counts(headings: &[HeadingDescriptor]) -> IndexMap<u8, usize> {
    let mut counts = IndexMap::new();
    for level in 1..=6 {
        let count = headings.iter().filter(|h| h.level == level).count();
        if count > 0 {
            counts.insert(level, count);
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Mark;
    use serde_json::json;

    fn getting_started_doc() -> Document {
        Document::from(json!({
            "type": "doc",
            "content": [
                {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Getting Started"}]},
                {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Getting Started"}]}
            ]
        }))
    }

    #[test]
    fn test_duplicate_headings_get_numbered() {
        let headings = extract_headings(&getting_started_doc());
        assert_eq!(
            headings,
            vec![
                HeadingDescriptor {
                    id: "getting-started".into(),
                    level: 2,
                    text: "Getting Started".into(),
                },
                HeadingDescriptor {
                    id: "getting-started-2".into(),
                    level: 2,
                    text: "Getting Started".into(),
                },
            ]
        );
    }

    #[test]
    fn test_third_duplicate() {
        let doc = Document::new(vec![
            Node::heading(2, vec![Node::text("FAQ")]),
            Node::heading(3, vec![Node::text("faq")]),
            Node::heading(4, vec![Node::text("F.A.Q")]),
        ]);
        let ids: Vec<_> = extract_headings(&doc).into_iter().map(|h| h.id).collect();
        assert_eq!(ids, ["faq", "faq-2", "faq-3"]);
    }

    #[test]
    fn test_numbered_id_collision_is_skipped() {
        let doc = Document::new(vec![
            Node::heading(2, vec![Node::text("Intro")]),
            Node::heading(2, vec![Node::text("Intro 2")]),
            Node::heading(2, vec![Node::text("Intro")]),
        ]);
        let ids: Vec<_> = extract_headings(&doc).into_iter().map(|h| h.id).collect();
        assert_eq!(ids, ["intro", "intro-2", "intro-3"]);
    }

    #[test]
    fn test_nested_headings_in_preorder() {
        let doc = Document::new(vec![
            Node::heading(1, vec![Node::text("One")]),
            Node::blockquote(vec![Node::heading(3, vec![Node::text("Two")])]),
            Node::bullet_list(vec![Node::list_item(vec![Node::heading(
                4,
                vec![Node::text("Three")],
            )])]),
            Node::heading(2, vec![Node::text("Four")]),
        ]);
        let texts: Vec<_> = extract_headings(&doc).into_iter().map(|h| h.text).collect();
        assert_eq!(texts, ["One", "Two", "Three", "Four"]);
    }

    #[test]
    fn test_label_ignores_marks_and_non_text_children() {
        let doc = Document::new(vec![Node::heading(
            2,
            vec![
                Node::marked_text("Fast ", vec![Mark::bold()]),
                Node::hard_break(),
                Node::marked_text("builds", vec![Mark::italic()]),
            ],
        )]);
        let headings = extract_headings(&doc);
        assert_eq!(headings[0].text, "Fast builds");
        assert_eq!(headings[0].id, "fast-builds");
    }

    #[test]
    fn test_empty_headings_are_skipped() {
        let doc = Document::new(vec![
            Node::heading(2, vec![]),
            Node::heading(2, vec![Node::text("   ")]),
            Node::heading(2, vec![Node::text("Real")]),
        ]);
        let headings = extract_headings(&doc);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].id, "real");
    }

    #[test]
    fn test_missing_level_defaults_to_two() {
        let doc = Document::from(json!({
            "type": "doc",
            "content": [{"type": "heading", "content": [{"type": "text", "text": "Plain"}]}]
        }));
        assert_eq!(extract_headings(&doc)[0].level, 2);
    }

    #[test]
    fn test_counter_resets_per_call() {
        let doc = getting_started_doc();
        assert_eq!(extract_headings(&doc), extract_headings(&doc));
    }

    #[test]
    fn test_anchor_matches_extract() {
        let mut doc = getting_started_doc();
        let extracted = extract_headings(&doc);
        let anchored = anchor_headings(&mut doc);
        assert_eq!(extracted, anchored);

        let ids: Vec<_> = doc
            .blocks()
            .iter()
            .filter_map(|node| match node {
                Node::Heading(h) => h.anchor_id(),
                _ => None,
            })
            .collect();
        assert_eq!(ids, ["getting-started", "getting-started-2"]);
    }

    #[test]
    fn test_anchor_clears_stale_ids() {
        let mut doc = Document::from(json!({
            "type": "doc",
            "content": [{"type": "heading", "attrs": {"level": 2, "id": "stale"}}]
        }));
        assert!(anchor_headings(&mut doc).is_empty());
        let Node::Heading(heading) = &doc.blocks()[0] else {
            panic!("expected heading");
        };
        assert_eq!(heading.anchor_id(), None);
        assert_eq!(heading.attrs.get("level"), Some(&json!(2)));
    }

    #[test]
    fn test_unsluggable_text_uses_fallback_id() {
        let mut doc = Document::new(vec![
            Node::heading(2, vec![Node::text("日本語")]),
            Node::heading(2, vec![Node::text("!!!")]),
            Node::heading(2, vec![Node::text("Section")]),
        ]);
        let headings = anchor_headings(&mut doc);
        let ids: Vec<_> = headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["section", "section-2", "section-3"]);
        assert_eq!(headings[0].text, "日本語");

        let anchors: Vec<_> = doc
            .blocks()
            .iter()
            .filter_map(|node| node.element().and_then(Element::anchor_id))
            .collect();
        assert_eq!(anchors, ids);
    }

    #[test]
    fn test_anchor_keeps_other_heading_attrs() {
        let mut doc = Document::from(json!({
            "type": "doc",
            "content": [{
                "type": "heading",
                "attrs": {"level": 9, "textAlign": "center"},
                "content": [{"type": "text", "text": "Deep"}]
            }]
        }));
        let headings = anchor_headings(&mut doc);
        assert_eq!(headings[0].level, 6);
        assert_eq!(
            doc.to_value()["content"][0]["attrs"],
            json!({"level": 9, "textAlign": "center", "id": "deep"})
        );
    }

    #[test]
    fn test_level_counts_ordered() {
        let doc = Document::new(vec![
            Node::heading(3, vec![Node::text("c")]),
            Node::heading(1, vec![Node::text("a")]),
            Node::heading(3, vec![Node::text("d")]),
        ]);
        let counts = level_counts(&extract_headings(&doc));
        assert_eq!(counts.into_iter().collect::<Vec<_>>(), vec![(1, 1), (3, 2)]);
    }
}

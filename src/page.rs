//! Read-path composition of a rendered article page.
//!
//! Headings are anchored once on a private copy of the document; the HTML,
//! the table of contents and the read time are all derived from that copy,
//! so anchor ids in the markup always match the TOC.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::headings::{HeadingDescriptor, anchor_headings};
use crate::reading::{ReadTime, ReadTimeEstimator, word_count};
use crate::render::{HtmlRenderer, RenderOptions, render_toc_html};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    #[serde(default)]
    pub render: RenderOptions,
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

fn default_words_per_minute() -> u32 {
    crate::reading::DEFAULT_WORDS_PER_MINUTE
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            words_per_minute: default_words_per_minute(),
        }
    }
}

/// Everything the article view needs from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub html: String,
    pub toc_html: String,
    pub headings: Vec<HeadingDescriptor>,
    pub read_time: ReadTime,
    pub word_count: usize,
}

/// Compose a page from a persisted document.
///
/// # Examples
///
/// ```
/// use blogdoc::document::{Document, Node};
/// use blogdoc::page::{PageOptions, compose};
///
/// let doc = Document::new(vec![Node::heading(2, vec![Node::text("Intro")])]);
/// let page = compose(&doc, &PageOptions::default());
/// assert!(page.html.contains(r#"id="intro""#));
/// assert_eq!(page.headings[0].id, "intro");
/// assert_eq!(page.read_time.minutes(), 1);
/// ```
pub fn compose(doc: &Document, options: &PageOptions) -> RenderedPage {
    let mut anchored = doc.clone();
    let headings = anchor_headings(&mut anchored);
    let html = HtmlRenderer::with_options(options.render.clone()).render(&anchored);
    let words = word_count(&anchored);
    let read_time = ReadTimeEstimator::new(options.words_per_minute).for_words(words);

    tracing::debug!(
        headings = headings.len(),
        words,
        minutes = read_time.minutes(),
        "composed page"
    );

    RenderedPage {
        toc_html: render_toc_html(&headings),
        html,
        headings,
        read_time,
        word_count: words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;
    use crate::headings::extract_headings;
    use serde_json::json;

    #[test]
    fn test_compose_getting_started() {
        let doc = Document::from(json!({
            "type": "doc",
            "content": [
                {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Getting Started"}]},
                {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Getting Started"}]}
            ]
        }));
        let page = compose(&doc, &PageOptions::default());

        assert_eq!(page.headings, extract_headings(&doc));
        assert_eq!(page.word_count, 4);
        assert_eq!(page.read_time.minutes(), 1);
        assert!(page.html.contains(r#"<h2 id="getting-started" "#));
        assert!(page.html.contains(r#"<h2 id="getting-started-2" "#));
        assert!(page.toc_html.contains(r##"href="#getting-started-2""##));
    }

    #[test]
    fn test_compose_leaves_input_untouched() {
        let doc = Document::new(vec![Node::heading(2, vec![Node::text("Title")])]);
        let before = doc.clone();
        compose(&doc, &PageOptions::default());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_compose_uses_configured_speed() {
        let text = vec!["w"; 300].join(" ");
        let doc = Document::new(vec![Node::paragraph(vec![Node::text(text)])]);
        let options = PageOptions {
            words_per_minute: 100,
            ..PageOptions::default()
        };
        assert_eq!(compose(&doc, &options).read_time.minutes(), 3);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = compose(&Document::default(), &PageOptions::default());
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["readTime"], 1);
        assert_eq!(value["wordCount"], 0);
        assert_eq!(value["tocHtml"], "");
    }
}

//! Word counts and read-time estimates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::{Document, Node};

/// Average reading speed used when none is configured.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Estimated reading duration in whole minutes, never less than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadTime(u32);

impl ReadTime {
    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.0)
    }
}

/// Count whitespace-delimited words across every text node in the tree.
pub fn word_count(doc: &Document) -> usize {
    let mut words = 0;
    doc.walk(|node| {
        if let Node::Text(text) = node {
            words += text.as_str().split_whitespace().count();
        }
    });
    words
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTimeEstimator {
    words_per_minute: u32,
}

impl Default for ReadTimeEstimator {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

impl ReadTimeEstimator {
    /// A zero speed is treated as the default.
    pub fn new(words_per_minute: u32) -> Self {
        if words_per_minute == 0 {
            Self::default()
        } else {
            Self { words_per_minute }
        }
    }

    pub fn words_per_minute(&self) -> u32 {
        self.words_per_minute
    }

    pub fn for_words(&self, words: usize) -> ReadTime {
        let minutes = words.div_ceil(self.words_per_minute as usize);
        ReadTime(u32::try_from(minutes).unwrap_or(u32::MAX).max(1))
    }

    pub fn estimate(&self, doc: &Document) -> ReadTime {
        self.for_words(word_count(doc))
    }
}

/// Read time at the default speed of 200 words per minute.
///
/// # Examples
///
/// ```
/// use blogdoc::document::{Document, Node};
/// use blogdoc::reading::estimate_read_time;
///
/// let doc = Document::new(vec![Node::paragraph(vec![Node::text("short post")])]);
/// assert_eq!(estimate_read_time(&doc).to_string(), "1 min read");
/// ```
pub fn estimate_read_time(doc: &Document) -> ReadTime {
    ReadTimeEstimator::default().estimate(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn words_doc(words: usize) -> Document {
        let text = vec!["a"; words].join(" ");
        Document::new(vec![Node::paragraph(vec![Node::text(text)])])
    }

    #[test]
    fn test_empty_document_is_one_minute() {
        assert_eq!(estimate_read_time(&Document::default()).minutes(), 1);
        assert_eq!(word_count(&Document::default()), 0);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(estimate_read_time(&words_doc(200)).minutes(), 1);
        assert_eq!(estimate_read_time(&words_doc(201)).minutes(), 2);
        assert_eq!(estimate_read_time(&words_doc(400)).minutes(), 2);
        assert_eq!(estimate_read_time(&words_doc(401)).minutes(), 3);
    }

    #[test]
    fn test_counts_text_anywhere() {
        let doc = Document::from(json!({
            "type": "doc",
            "content": [
                {"type": "heading", "content": [{"type": "text", "text": "Two words"}]},
                {"type": "blockquote", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "  three   more words "}]}
                ]},
                {"type": "mystery", "content": [{"type": "text", "text": "one"}]},
                {"type": "codeBlock", "content": [{"type": "text", "text": "let x = 1;"}]}
            ]
        }));
        assert_eq!(word_count(&doc), 10);
    }

    #[test]
    fn test_whitespace_only_text_has_no_words() {
        let doc = Document::new(vec![Node::paragraph(vec![Node::text(" \n\t ")])]);
        assert_eq!(word_count(&doc), 0);
    }

    #[test]
    fn test_custom_speed() {
        let estimator = ReadTimeEstimator::new(100);
        assert_eq!(estimator.estimate(&words_doc(150)).minutes(), 2);
        assert_eq!(ReadTimeEstimator::new(0), ReadTimeEstimator::default());
    }

    #[test]
    fn test_display() {
        assert_eq!(estimate_read_time(&words_doc(450)).to_string(), "3 min read");
    }

    proptest! {
        #[test]
        fn prop_read_time_monotonic(a in 0usize..5000, b in 0usize..5000) {
            let estimator = ReadTimeEstimator::default();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(estimator.for_words(low) <= estimator.for_words(high));
            prop_assert!(estimator.for_words(low).minutes() >= 1);
        }
    }
}

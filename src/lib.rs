//! # blogdoc
//!
//! Document pipeline for a blogging platform whose posts are written in a
//! block-based rich-text editor and stored as JSON trees.
//!
//! This library validates submitted documents, renders them to HTML, derives
//! stable heading anchors for a table of contents, and estimates reading time.
//! All traversals are pure and never fail on well-formed JSON: unknown node
//! types and marks degrade gracefully instead of aborting a page.
//!
//! ## Features
//!
//! - Lenient typed document model over the editor's JSON shape
//! - Strict root check for submitted content
//! - HTML rendering with mark nesting and attribute escaping
//! - Unique, URL-safe heading ids shared by the renderer and the TOC
//! - Read-time estimation at a configurable reading speed
//! - Cached article pages with explicit invalidation
//!
//! ## Example
//!
//! ```rust
//! use blogdoc::{PageOptions, compose, validate_content};
//! use serde_json::json;
//!
//! let doc = validate_content(&json!({
//!     "type": "doc",
//!     "content": [
//!         {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Getting Started"}]},
//!         {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Getting Started"}]}
//!     ]
//! }))
//! .unwrap();
//!
//! let page = compose(&doc, &PageOptions::default());
//! let ids: Vec<_> = page.headings.iter().map(|h| h.id.as_str()).collect();
//! assert_eq!(ids, ["getting-started", "getting-started-2"]);
//! assert_eq!(page.read_time.to_string(), "1 min read");
//! ```

/// Blog posts and submission checks.
pub mod blog;

/// Cache capability used by the read path.
pub mod cache;

/// Configuration for reading speed, rendering and logging.
pub mod config;

/// Typed rich-text document tree.
pub mod document;

pub mod error;

/// Heading anchors and table-of-contents entries.
pub mod headings;

/// Reading documents from files and stdin.
pub mod input;

/// Composition of a full article page.
pub mod page;

/// Word counts and read-time estimates.
pub mod reading;

/// HTML rendering.
pub mod render;

/// Cached article reader.
pub mod service;

pub use blog::{Blog, BlogError, BlogInput, BlogStatus, BlogUpdate, unique_title_slug};
pub use cache::{Cache, MemoryCache, NoopCache};
pub use config::Config;
pub use document::{ContentError, Document, Mark, Node, validate_content};
pub use error::{Error, Result};
pub use headings::{HeadingDescriptor, anchor_headings, extract_headings, slugify};
pub use page::{PageOptions, RenderedPage, compose};
pub use reading::{ReadTime, estimate_read_time};
pub use render::{HtmlRenderer, RenderOptions, render_html, render_toc_html};
pub use service::BlogReader;

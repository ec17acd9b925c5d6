//! HTML rendering for document trees.
//!
//! The renderer is a single recursive descent with one case per node type.
//! It never fails: missing children render as empty containers, unknown
//! node types pass their children through, and unknown marks and non-object
//! children are skipped. Link hrefs go through [`safe_href`].
//! Heading anchors come from ids embedded on the heading nodes (see
//! [`crate::headings::anchor_headings`]); headings without an id render
//! without one.
//!
//! Class names follow the public site's utility-class stylesheet and can be
//! switched off with [`RenderOptions::classes`].

mod escape;
mod href;
mod toc;

pub use escape::escape_html;
pub use href::safe_href;
pub use toc::render_toc_html;

use serde::{Deserialize, Serialize};

use crate::document::{Document, Element, Mark, MarkKind, Node, Text};

const DOC_CLASS: &str = "blog-content";
const PARAGRAPH_CLASS: &str = "mb-4";
const BULLET_LIST_CLASS: &str = "list-disc list-inside mb-4 space-y-1";
const ORDERED_LIST_CLASS: &str = "list-decimal list-inside mb-4 space-y-1";
const LIST_ITEM_CLASS: &str = "pl-2";
const BLOCKQUOTE_CLASS: &str = "border-l-4 border-primary pl-4 italic my-4 text-muted-foreground";
const PRE_CLASS: &str = "bg-muted p-4 rounded-lg mb-4 overflow-x-auto text-sm font-mono";
const RULE_CLASS: &str = "my-8 border-border";
const FIGURE_CLASS: &str = "my-6";
const IMAGE_CLASS: &str = "max-w-full h-auto rounded-lg";
const CAPTION_CLASS: &str = "text-center text-sm text-muted-foreground mt-2";
const INLINE_CODE_CLASS: &str = "bg-muted px-1.5 py-0.5 rounded text-sm font-mono";
const LINK_CLASS: &str = "text-primary underline hover:no-underline";
const LINK_REL: &str = "noopener noreferrer";

/// Placeholder body for empty paragraphs so they keep their line.
pub const EMPTY_PARAGRAPH: &str = "&nbsp;";

fn heading_class(level: u8) -> &'static str {
    match level {
        1 => "text-3xl font-bold mt-8 mb-4",
        2 => "text-2xl font-bold mt-6 mb-3",
        3 => "text-xl font-semibold mt-5 mb-2",
        4 => "text-lg font-semibold mt-4 mb-2",
        5 => "text-base font-semibold mt-3 mb-2",
        _ => "text-sm font-semibold mt-3 mb-2",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Emit `class` attributes for styling
    #[serde(default = "default_classes")]
    pub classes: bool,

    /// Link target used when a link mark has none
    #[serde(default = "default_link_target")]
    pub link_target: String,
}

fn default_classes() -> bool {
    true
}

fn default_link_target() -> String {
    "_blank".to_string()
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            classes: default_classes(),
            link_target: default_link_target(),
        }
    }
}

/// Render a document with default options.
///
/// # Examples
///
/// ```
/// use blogdoc::document::{Document, Node};
/// use blogdoc::render::render_html;
///
/// let doc = Document::new(vec![Node::paragraph(vec![])]);
/// assert_eq!(
///     render_html(&doc),
///     r#"<div class="blog-content"><p class="mb-4">&nbsp;</p></div>"#
/// );
/// ```
pub fn render_html(doc: &Document) -> String {
    HtmlRenderer::default().render(doc)
}

#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, doc: &Document) -> String {
        let mut out = String::new();
        self.node(doc.root(), &mut out);
        out
    }

    /// Render a single subtree.
    pub fn render_node(&self, node: &Node) -> String {
        let mut out = String::new();
        self.node(node, &mut out);
        out
    }

    fn node(&self, node: &Node, out: &mut String) {
        match node {
            Node::Doc(body) => self.container(out, "div", Some(DOC_CLASS), &[], body.children()),
            Node::Paragraph(body) => {
                if body.children().is_empty() {
                    self.open(out, "p", Some(PARAGRAPH_CLASS), &[]);
                    out.push_str(EMPTY_PARAGRAPH);
                    close(out, "p");
                } else {
                    self.container(out, "p", Some(PARAGRAPH_CLASS), &[], body.children());
                }
            }
            Node::Heading(body) => self.heading(body, out),
            Node::BulletList(body) => {
                self.container(out, "ul", Some(BULLET_LIST_CLASS), &[], body.children())
            }
            Node::OrderedList(body) => self.ordered_list(body, out),
            Node::ListItem(body) => {
                self.open(out, "li", Some(LIST_ITEM_CLASS), &[]);
                for child in body.children() {
                    // Paragraph children are inlined to avoid extra spacing.
                    match child {
                        Node::Paragraph(inline) => self.children(inline.children(), out),
                        other => self.node(other, out),
                    }
                }
                close(out, "li");
            }
            Node::Blockquote(body) => self.container(
                out,
                "blockquote",
                Some(BLOCKQUOTE_CLASS),
                &[],
                body.children(),
            ),
            Node::CodeBlock(body) => self.code_block(body, out),
            Node::HorizontalRule(_) => self.void(out, "hr", Some(RULE_CLASS), &[]),
            Node::HardBreak(_) => self.void(out, "br", None, &[]),
            Node::Image(body) => self.image(body, out),
            Node::Text(text) => self.text(text, out),
            Node::Unknown(unknown) => {
                if let Some(content) = &unknown.element.content {
                    tracing::trace!(
                        kind = unknown.kind.as_deref().unwrap_or_default(),
                        "passing through unknown node"
                    );
                    self.children(content, out);
                }
            }
            Node::Opaque(_) => {}
        }
    }

    fn children(&self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            self.node(node, out);
        }
    }

    fn heading(&self, heading: &Element, out: &mut String) {
        let level = heading.level();
        let tag = format!("h{}", level);
        let mut attrs = Vec::new();
        if let Some(id) = heading.anchor_id().filter(|id| !id.is_empty()) {
            attrs.push(("id", id));
        }
        self.container(
            out,
            &tag,
            Some(heading_class(level)),
            &attrs,
            heading.children(),
        );
    }

    fn ordered_list(&self, list: &Element, out: &mut String) {
        let start = list
            .attrs
            .unsigned("start")
            .filter(|&start| start != 1)
            .map(|s| s.to_string());
        let mut attrs = Vec::new();
        if let Some(start) = start.as_deref() {
            attrs.push(("start", start));
        }
        self.container(out, "ol", Some(ORDERED_LIST_CLASS), &attrs, list.children());
    }

    fn code_block(&self, code: &Element, out: &mut String) {
        self.open(out, "pre", Some(PRE_CLASS), &[]);
        match code.attrs.string("language").filter(|lang| !lang.is_empty()) {
            Some(lang) => {
                let class = format!("language-{}", lang);
                push_open(out, "code", &[("class", class.as_str())]);
            }
            None => out.push_str("<code>"),
        }
        self.children(code.children(), out);
        close(out, "code");
        close(out, "pre");
    }

    fn image(&self, image: &Element, out: &mut String) {
        let title = image.attrs.string("title").unwrap_or_default();
        self.open(out, "figure", Some(FIGURE_CLASS), &[]);
        let mut attrs = Vec::new();
        if let Some(src) = image.attrs.string("src") {
            attrs.push(("src", src));
        }
        attrs.push(("alt", image.attrs.string("alt").unwrap_or_default()));
        attrs.push(("title", title));
        self.void(out, "img", Some(IMAGE_CLASS), &attrs);
        if !title.is_empty() {
            self.open(out, "figcaption", Some(CAPTION_CLASS), &[]);
            out.push_str(&escape_html(title));
            close(out, "figcaption");
        }
        close(out, "figure");
    }

    /// Marks wrap the text in array order, so the last mark is outermost.
    fn text(&self, text: &Text, out: &mut String) {
        let mut html = escape_html(text.as_str());
        for mark in text.marks() {
            html = match mark.kind() {
                MarkKind::Bold => self.wrap("strong", None, &[], &html),
                MarkKind::Italic => self.wrap("em", None, &[], &html),
                MarkKind::Strike => self.wrap("s", None, &[], &html),
                MarkKind::Code => self.wrap("code", Some(INLINE_CODE_CLASS), &[], &html),
                MarkKind::Link => self.link(mark, &html),
                MarkKind::Unknown => continue,
            };
        }
        out.push_str("<span>");
        out.push_str(&html);
        out.push_str("</span>");
    }

    /// Hrefs with a scheme other than http, https or mailto are dropped;
    /// the anchor itself is kept so the text still renders.
    fn link(&self, mark: &Mark, inner: &str) -> String {
        let mut attrs = Vec::new();
        if let Some(href) = mark.attr("href") {
            match safe_href(href) {
                Some(href) => attrs.push(("href", href)),
                None => tracing::debug!(href, "dropping link with disallowed scheme"),
            }
        }
        let target = mark
            .attr("target")
            .filter(|t| !t.is_empty())
            .unwrap_or(self.options.link_target.as_str());
        attrs.push(("target", target));
        attrs.push(("rel", LINK_REL));
        self.wrap("a", Some(LINK_CLASS), &attrs, inner)
    }

    fn wrap(&self, tag: &str, class: Option<&str>, attrs: &[(&str, &str)], inner: &str) -> String {
        let mut out = String::with_capacity(inner.len() + 32);
        self.open(&mut out, tag, class, attrs);
        out.push_str(inner);
        close(&mut out, tag);
        out
    }

    fn container(
        &self,
        out: &mut String,
        tag: &str,
        class: Option<&str>,
        attrs: &[(&str, &str)],
        content: &[Node],
    ) {
        self.open(out, tag, class, attrs);
        self.children(content, out);
        close(out, tag);
    }

    fn open(&self, out: &mut String, tag: &str, class: Option<&str>, attrs: &[(&str, &str)]) {
        push_tag_start(out, tag, self.class_attr(class), attrs);
        out.push('>');
    }

    fn void(&self, out: &mut String, tag: &str, class: Option<&str>, attrs: &[(&str, &str)]) {
        push_tag_start(out, tag, self.class_attr(class), attrs);
        out.push_str("/>");
    }

    fn class_attr<'a>(&self, class: Option<&'a str>) -> Option<&'a str> {
        class.filter(|_| self.options.classes)
    }
}

fn push_tag_start(out: &mut String, tag: &str, class: Option<&str>, attrs: &[(&str, &str)]) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        push_attr(out, name, value);
    }
    if let Some(class) = class {
        push_attr(out, "class", class);
    }
}

fn push_open(out: &mut String, tag: &str, attrs: &[(&str, &str)]) {
    push_tag_start(out, tag, None, attrs);
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

fn close(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

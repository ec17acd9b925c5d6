//! Typed node tree for rich-text documents.
//!
//! Every node keeps its `attrs` object and any fields the tree does not
//! interpret exactly as they were submitted, so a document converts back to
//! the same JSON it was read from. Typed values such as a heading's level
//! are derived from the raw attributes when they are read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Heading level used when a heading carries no usable `level` attribute.
pub const DEFAULT_HEADING_LEVEL: u8 = 2;

/// The recognized node vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Doc,
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    Blockquote,
    CodeBlock,
    HorizontalRule,
    HardBreak,
    Image,
    Text,
}

impl NodeKind {
    pub const ALL: [NodeKind; 12] = [
        NodeKind::Doc,
        NodeKind::Paragraph,
        NodeKind::Heading,
        NodeKind::BulletList,
        NodeKind::OrderedList,
        NodeKind::ListItem,
        NodeKind::Blockquote,
        NodeKind::CodeBlock,
        NodeKind::HorizontalRule,
        NodeKind::HardBreak,
        NodeKind::Image,
        NodeKind::Text,
    ];

    /// The `type` tag used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Doc => "doc",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::Blockquote => "blockquote",
            NodeKind::CodeBlock => "codeBlock",
            NodeKind::HorizontalRule => "horizontalRule",
            NodeKind::HardBreak => "hardBreak",
            NodeKind::Image => "image",
            NodeKind::Text => "text",
        }
    }

    /// Look up a wire tag. Matching is exact: `Heading` is not `heading`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Leaves never have children; a `content` field on them is kept as
    /// uninterpreted data.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::HorizontalRule | NodeKind::HardBreak | NodeKind::Image | NodeKind::Text
        )
    }
}

/// The `attrs` object of a node or mark, as submitted.
///
/// `None` means the field was absent; an empty object stays an empty object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attrs(Option<Map<String, Value>>);

impl Attrs {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(Some(map))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_ref().and_then(|attrs| attrs.get(key))
    }

    /// A string attribute. Values of any other JSON type read as absent.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// A non-negative integer, also accepted as a numeric string.
    pub fn unsigned(&self, key: &str) -> Option<u64> {
        match self.get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Heading level from `level`: numeric or numeric string, clamped to 6.
    /// Zero, negative and non-numeric values fall back to the default.
    pub fn level(&self) -> u8 {
        let level = match self.get("level") {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64)),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        match level {
            Some(0) | None => DEFAULT_HEADING_LEVEL,
            Some(n) => n.min(6) as u8,
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.as_mut().and_then(|attrs| attrs.remove(key))
    }

    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        self.0.as_ref()
    }

    pub fn into_map(self) -> Option<Map<String, Value>> {
        self.0
    }
}

/// Shared body of every non-text node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub attrs: Attrs,
    /// `None` when the source had no `content` array, which the renderer
    /// treats the same as an empty one but the wire shape does not.
    pub content: Option<Vec<Node>>,
    /// Fields the tree does not interpret, written back unchanged.
    pub extra: Map<String, Value>,
}

impl Element {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn children(&self) -> &[Node] {
        self.content.as_deref().unwrap_or_default()
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        self.content.as_deref_mut().unwrap_or_default()
    }

    /// Heading level, always within 1..=6.
    pub fn level(&self) -> u8 {
        self.attrs.level()
    }

    /// Anchor id embedded by [`crate::headings::anchor_headings`].
    pub fn anchor_id(&self) -> Option<&str> {
        self.attrs.string("id")
    }

    pub fn set_anchor_id(&mut self, id: Option<String>) {
        match id {
            Some(id) => self.attrs.set("id", id),
            None => {
                self.attrs.remove("id");
            }
        }
    }

    /// Plain-text label: the concatenated text of direct text children,
    /// ignoring marks, trimmed.
    pub fn label(&self) -> String {
        let mut label = String::new();
        for child in self.children() {
            if let Node::Text(text) = child {
                label.push_str(text.as_str());
            }
        }
        label.trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub text: Option<String>,
    pub marks: Option<Vec<Mark>>,
    pub attrs: Attrs,
    pub extra: Map<String, Value>,
}

impl Text {
    pub fn as_str(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Marks in application order; the first one wraps the text innermost.
    pub fn marks(&self) -> &[Mark] {
        self.marks.as_deref().unwrap_or_default()
    }
}

/// An object whose `type` is missing or not part of the known vocabulary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnknownNode {
    /// The `type` tag when it was a string.
    pub kind: Option<String>,
    pub element: Element,
}

/// A node in a rich-text document tree.
///
/// Deserialization is lenient: any JSON value becomes a node. Unrecognized
/// `type` tags become [`Node::Unknown`] so older renderers keep working when
/// the editor's vocabulary grows, and values that are not objects at all are
/// carried as [`Node::Opaque`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Node {
    Doc(Element),
    Paragraph(Element),
    Heading(Element),
    BulletList(Element),
    OrderedList(Element),
    ListItem(Element),
    Blockquote(Element),
    CodeBlock(Element),
    HorizontalRule(Element),
    HardBreak(Element),
    Image(Element),
    Text(Text),
    Unknown(UnknownNode),
    Opaque(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Bold,
    Italic,
    Strike,
    Code,
    Link,
    Unknown,
}

impl MarkKind {
    fn from_name(name: &str) -> Self {
        match name {
            "bold" => MarkKind::Bold,
            "italic" => MarkKind::Italic,
            "strike" => MarkKind::Strike,
            "code" => MarkKind::Code,
            "link" => MarkKind::Link,
            _ => MarkKind::Unknown,
        }
    }
}

/// Inline style annotation on a text node.
///
/// Marks are never rewritten, so each one holds its submitted value and
/// reads its kind and attributes from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct Mark {
    kind: MarkKind,
    value: Value,
}

impl Mark {
    fn named(name: &str) -> Self {
        Self::from(serde_json::json!({ "type": name }))
    }

    pub fn bold() -> Self {
        Self::named("bold")
    }

    pub fn italic() -> Self {
        Self::named("italic")
    }

    pub fn strike() -> Self {
        Self::named("strike")
    }

    pub fn code() -> Self {
        Self::named("code")
    }

    pub fn link(href: impl Into<String>) -> Self {
        Self::from(serde_json::json!({ "type": "link", "attrs": { "href": href.into() } }))
    }

    pub fn kind(&self) -> MarkKind {
        self.kind
    }

    /// A string attribute from the mark's `attrs` object.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.value.get("attrs")?.get(key)?.as_str()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl From<Value> for Mark {
    fn from(value: Value) -> Self {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .map_or(MarkKind::Unknown, MarkKind::from_name);
        Self { kind, value }
    }
}

impl From<Mark> for Value {
    fn from(mark: Mark) -> Self {
        mark.value
    }
}

impl Node {
    pub fn doc(content: Vec<Node>) -> Self {
        Node::Doc(Element::new(content))
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph(Element::new(content))
    }

    /// A heading with `attrs.level` set as given; out-of-range levels are
    /// stored unchanged and resolved by [`Attrs::level`] on read.
    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        let mut element = Element::new(content);
        element.attrs.set("level", level);
        Node::Heading(element)
    }

    pub fn bullet_list(items: Vec<Node>) -> Self {
        Node::BulletList(Element::new(items))
    }

    pub fn list_item(content: Vec<Node>) -> Self {
        Node::ListItem(Element::new(content))
    }

    pub fn blockquote(content: Vec<Node>) -> Self {
        Node::Blockquote(Element::new(content))
    }

    pub fn horizontal_rule() -> Self {
        Node::HorizontalRule(Element::default())
    }

    pub fn hard_break() -> Self {
        Node::HardBreak(Element::default())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text {
            text: Some(text.into()),
            ..Text::default()
        })
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text(Text {
            text: Some(text.into()),
            marks: Some(marks),
            ..Text::default()
        })
    }

    /// Recognized kind, or `None` for unknown and opaque nodes.
    pub fn kind(&self) -> Option<NodeKind> {
        Some(match self {
            Node::Doc(_) => NodeKind::Doc,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Heading(_) => NodeKind::Heading,
            Node::BulletList(_) => NodeKind::BulletList,
            Node::OrderedList(_) => NodeKind::OrderedList,
            Node::ListItem(_) => NodeKind::ListItem,
            Node::Blockquote(_) => NodeKind::Blockquote,
            Node::CodeBlock(_) => NodeKind::CodeBlock,
            Node::HorizontalRule(_) => NodeKind::HorizontalRule,
            Node::HardBreak(_) => NodeKind::HardBreak,
            Node::Image(_) => NodeKind::Image,
            Node::Text(_) => NodeKind::Text,
            Node::Unknown(_) | Node::Opaque(_) => return None,
        })
    }

    /// The wire `type` tag of this node, if it has one.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Node::Unknown(unknown) => unknown.kind.as_deref(),
            Node::Opaque(_) => None,
            other => other.kind().map(NodeKind::name),
        }
    }

    /// Shared body for every node other than text and opaque values.
    pub fn element(&self) -> Option<&Element> {
        match self {
            Node::Doc(element)
            | Node::Paragraph(element)
            | Node::Heading(element)
            | Node::BulletList(element)
            | Node::OrderedList(element)
            | Node::ListItem(element)
            | Node::Blockquote(element)
            | Node::CodeBlock(element)
            | Node::HorizontalRule(element)
            | Node::HardBreak(element)
            | Node::Image(element) => Some(element),
            Node::Unknown(unknown) => Some(&unknown.element),
            Node::Text(_) | Node::Opaque(_) => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Doc(element)
            | Node::Paragraph(element)
            | Node::Heading(element)
            | Node::BulletList(element)
            | Node::OrderedList(element)
            | Node::ListItem(element)
            | Node::Blockquote(element)
            | Node::CodeBlock(element)
            | Node::HorizontalRule(element)
            | Node::HardBreak(element)
            | Node::Image(element) => Some(element),
            Node::Unknown(unknown) => Some(&mut unknown.element),
            Node::Text(_) | Node::Opaque(_) => None,
        }
    }

    /// Child nodes in document order. Leaves return an empty slice.
    pub fn children(&self) -> &[Node] {
        self.element().map(Element::children).unwrap_or_default()
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        self.element_mut()
            .map(Element::children_mut)
            .unwrap_or_default()
    }

    /// Visit this node and all descendants in depth-first pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Mutable counterpart of [`Node::walk`], same visiting order.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Node)) {
        visit(self);
        for child in self.children_mut() {
            child.walk_mut(visit);
        }
    }
}

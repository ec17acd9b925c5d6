//! Conversion between the JSON wire shape and the typed node tree.
//!
//! The wire shape is the editor's format: every node is an object with a
//! `type` tag and optional `attrs`, `content`, `marks` and `text` fields.
//! Reading never fails and never drops data. A field is only lifted into the
//! typed tree when it has the expected JSON type; anything else stays in the
//! node's `extra` map and is written back unchanged.

use serde_json::{Map, Value};

use super::node::{Attrs, Element, Mark, Node, NodeKind, Text, UnknownNode};

fn take_if(
    map: &mut Map<String, Value>,
    key: &str,
    wanted: impl Fn(&Value) -> bool,
) -> Option<Value> {
    if map.get(key).is_some_and(wanted) {
        map.remove(key)
    } else {
        None
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match take_if(map, key, Value::is_string) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn take_array(map: &mut Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    match take_if(map, key, Value::is_array) {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn take_attrs(map: &mut Map<String, Value>) -> Attrs {
    match take_if(map, "attrs", Value::is_object) {
        Some(Value::Object(attrs)) => Attrs::new(attrs),
        _ => Attrs::default(),
    }
}

fn take_children(map: &mut Map<String, Value>) -> Option<Vec<Node>> {
    take_array(map, "content").map(|items| items.into_iter().map(Node::from).collect())
}

fn element(mut map: Map<String, Value>, with_children: bool) -> Element {
    let attrs = take_attrs(&mut map);
    let content = if with_children {
        take_children(&mut map)
    } else {
        None
    };
    Element {
        attrs,
        content,
        extra: map,
    }
}

fn text(mut map: Map<String, Value>) -> Text {
    let text = take_string(&mut map, "text");
    let marks =
        take_array(&mut map, "marks").map(|items| items.into_iter().map(Mark::from).collect());
    Text {
        text,
        marks,
        attrs: take_attrs(&mut map),
        extra: map,
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Node::Opaque(value);
        };

        let kind = take_string(&mut map, "type");
        let Some(known) = kind.as_deref().and_then(NodeKind::from_name) else {
            return Node::Unknown(UnknownNode {
                kind,
                element: element(map, true),
            });
        };

        let body = |map| element(map, !known.is_leaf());
        match known {
            NodeKind::Text => Node::Text(text(map)),
            NodeKind::Doc => Node::Doc(body(map)),
            NodeKind::Paragraph => Node::Paragraph(body(map)),
            NodeKind::Heading => Node::Heading(body(map)),
            NodeKind::BulletList => Node::BulletList(body(map)),
            NodeKind::OrderedList => Node::OrderedList(body(map)),
            NodeKind::ListItem => Node::ListItem(body(map)),
            NodeKind::Blockquote => Node::Blockquote(body(map)),
            NodeKind::CodeBlock => Node::CodeBlock(body(map)),
            NodeKind::HorizontalRule => Node::HorizontalRule(body(map)),
            NodeKind::HardBreak => Node::HardBreak(body(map)),
            NodeKind::Image => Node::Image(body(map)),
        }
    }
}

fn write_attrs(map: &mut Map<String, Value>, attrs: Attrs) {
    if let Some(attrs) = attrs.into_map() {
        map.insert("attrs".into(), Value::Object(attrs));
    }
}

fn write_element(element: Element) -> Map<String, Value> {
    let mut map = element.extra;
    write_attrs(&mut map, element.attrs);
    if let Some(content) = element.content {
        map.insert(
            "content".into(),
            Value::Array(content.into_iter().map(Value::from).collect()),
        );
    }
    map
}

fn write_text(text: Text) -> Map<String, Value> {
    let mut map = text.extra;
    write_attrs(&mut map, text.attrs);
    if let Some(value) = text.text {
        map.insert("text".into(), Value::String(value));
    }
    if let Some(marks) = text.marks {
        map.insert(
            "marks".into(),
            Value::Array(marks.into_iter().map(Value::from).collect()),
        );
    }
    map
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        let kind = node.type_name().map(str::to_string);
        let mut map = match node {
            Node::Opaque(value) => return value,
            Node::Text(text) => write_text(text),
            Node::Unknown(unknown) => write_element(unknown.element),
            Node::Doc(body)
            | Node::Paragraph(body)
            | Node::Heading(body)
            | Node::BulletList(body)
            | Node::OrderedList(body)
            | Node::ListItem(body)
            | Node::Blockquote(body)
            | Node::CodeBlock(body)
            | Node::HorizontalRule(body)
            | Node::HardBreak(body)
            | Node::Image(body) => write_element(body),
        };
        if let Some(kind) = kind {
            map.insert("type".into(), Value::String(kind));
        }
        Value::Object(map)
    }
}

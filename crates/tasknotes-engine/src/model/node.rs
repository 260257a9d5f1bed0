use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node attributes, keyed by name. Kept ordered so serialised output is stable.
pub type Attrs = BTreeMap<String, Value>;

/// The type tag of a node.
///
/// Tags the engine knows about get their own variant; anything else is kept
/// as `Other` so that documents written by a richer editor survive a load/save
/// cycle untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Doc,
    Paragraph,
    Heading,
    Text,
    BulletList,
    OrderedList,
    ListItem,
    TaskList,
    TaskItem,
    CompletedTasksSection,
    Blockquote,
    CodeBlock,
    HardBreak,
    HorizontalRule,
    Image,
    Other(String),
}

impl NodeType {
    /// The tag as it appears in the persisted record.
    pub fn name(&self) -> &str {
        match self {
            NodeType::Doc => "doc",
            NodeType::Paragraph => "paragraph",
            NodeType::Heading => "heading",
            NodeType::Text => "text",
            NodeType::BulletList => "bulletList",
            NodeType::OrderedList => "orderedList",
            NodeType::ListItem => "listItem",
            NodeType::TaskList => "taskList",
            NodeType::TaskItem => "taskItem",
            NodeType::CompletedTasksSection => "completedTasksSection",
            NodeType::Blockquote => "blockquote",
            NodeType::CodeBlock => "codeBlock",
            NodeType::HardBreak => "hardBreak",
            NodeType::HorizontalRule => "horizontalRule",
            NodeType::Image => "image",
            NodeType::Other(name) => name,
        }
    }

    /// Leaf nodes have no content and no open/close tokens; they occupy a
    /// single position.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeType::HardBreak | NodeType::HorizontalRule | NodeType::Image
        )
    }
}

impl From<String> for NodeType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "doc" => NodeType::Doc,
            "paragraph" => NodeType::Paragraph,
            "heading" => NodeType::Heading,
            "text" => NodeType::Text,
            "bulletList" => NodeType::BulletList,
            "orderedList" => NodeType::OrderedList,
            "listItem" => NodeType::ListItem,
            "taskList" => NodeType::TaskList,
            "taskItem" => NodeType::TaskItem,
            "completedTasksSection" => NodeType::CompletedTasksSection,
            "blockquote" => NodeType::Blockquote,
            "codeBlock" => NodeType::CodeBlock,
            "hardBreak" => NodeType::HardBreak,
            "horizontalRule" => NodeType::HorizontalRule,
            "image" => NodeType::Image,
            _ => NodeType::Other(name),
        }
    }
}

impl From<NodeType> for String {
    fn from(kind: NodeType) -> Self {
        match kind {
            NodeType::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An inline mark on a text node (bold, link, ...). Carried through edits
/// verbatim; the engine never interprets marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
}

/// A node of the document tree.
///
/// The serialised form is the editor's JSON record:
/// `{"type": "taskItem", "attrs": {"checked": true}, "content": [...]}`.
/// Text nodes carry `text` and optionally `marks` instead of `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Node {
    pub fn new(kind: NodeType, attrs: Attrs, content: Vec<Node>) -> Self {
        Self {
            kind,
            attrs,
            content,
            marks: Vec::new(),
            text: None,
        }
    }

    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeType::Text,
            attrs: Attrs::new(),
            content: Vec::new(),
            marks: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn is(&self, kind: &NodeType) -> bool {
        &self.kind == kind
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeType::Text
    }

    /// True for nodes that cannot be entered: text and atomic leaves.
    pub fn is_leaf(&self) -> bool {
        self.is_text() || self.kind.is_leaf()
    }

    pub fn child_count(&self) -> usize {
        self.content.len()
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.content.get(index)
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.content.first()
    }

    /// Size of this node in the linear coordinate space.
    ///
    /// Text counts UTF-16 code units (the unit the editor reports positions
    /// in), leaves count one, everything else counts its content plus an
    /// open and a close token.
    pub fn node_size(&self) -> usize {
        if self.is_text() {
            self.text.as_deref().map_or(0, |t| t.encode_utf16().count())
        } else if self.kind.is_leaf() {
            1
        } else {
            self.content_size() + 2
        }
    }

    /// Combined size of all children.
    pub fn content_size(&self) -> usize {
        self.content.iter().map(Node::node_size).sum()
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        self.attrs.get(key).and_then(Value::as_bool)
    }

    pub fn attr_u64(&self, key: &str) -> Option<u64> {
        self.attrs.get(key).and_then(Value::as_u64)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => self.content.iter().map(Node::text_content).collect(),
        }
    }
}

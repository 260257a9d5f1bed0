//! Constructors and typed attribute access for the node types the archive
//! logic cares about.

use super::node::{Attrs, Node, NodeType};

pub const CHECKED: &str = "checked";
pub const EXPANDED: &str = "expanded";
pub const COUNT: &str = "count";

pub fn doc(content: Vec<Node>) -> Node {
    Node::new(NodeType::Doc, Attrs::new(), content)
}

/// A paragraph holding a single text run (or nothing, for empty text).
pub fn paragraph(text: &str) -> Node {
    let content = if text.is_empty() {
        vec![]
    } else {
        vec![Node::text(text)]
    };
    Node::new(NodeType::Paragraph, Attrs::new(), content)
}

pub fn task_list(items: Vec<Node>) -> Node {
    Node::new(NodeType::TaskList, Attrs::new(), items)
}

pub fn task_item(checked: bool, content: Vec<Node>) -> Node {
    Node::new(NodeType::TaskItem, Attrs::new(), content).with_attr(CHECKED, checked)
}

/// A task item whose only content is a paragraph of `text`.
pub fn task(checked: bool, text: &str) -> Node {
    task_item(checked, vec![paragraph(text)])
}

pub fn completed_section(expanded: bool, count: usize, list: Node) -> Node {
    Node::new(NodeType::CompletedTasksSection, Attrs::new(), vec![list])
        .with_attr(EXPANDED, expanded)
        .with_attr(COUNT, count)
}

impl Node {
    pub fn is_task_item(&self) -> bool {
        self.kind == NodeType::TaskItem
    }

    pub fn is_task_list(&self) -> bool {
        self.kind == NodeType::TaskList
    }

    pub fn is_completed_section(&self) -> bool {
        self.kind == NodeType::CompletedTasksSection
    }

    /// `checked` flag of a task item; absent means unchecked.
    pub fn checked(&self) -> bool {
        self.attr_bool(CHECKED).unwrap_or(false)
    }

    /// `expanded` flag of a completed section; absent means expanded.
    pub fn expanded(&self) -> bool {
        self.attr_bool(EXPANDED).unwrap_or(true)
    }

    /// Declared `count` of a completed section; absent means zero.
    pub fn declared_count(&self) -> usize {
        self.attr_u64(COUNT).map_or(0, |n| n as usize)
    }

    /// Number of task items anywhere below this node.
    pub fn task_item_count(&self) -> usize {
        self.descendants().filter(|(_, n)| n.is_task_item()).count()
    }
}

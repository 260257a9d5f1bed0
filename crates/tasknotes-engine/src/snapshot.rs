//! Human-readable outline of a document tree, one node per line.
//!
//! ```text
//! doc
//!   taskList
//!     taskItem [ ] "Buy bread"
//!   completedTasksSection expanded=true count=1
//!     taskList
//!       taskItem [x] "Buy milk"
//! ```
//!
//! Paragraphs and headings that hold only text are folded onto one line, as
//! is the leading paragraph of a task item.

use crate::model::{Node, NodeType};

pub fn outline(node: &Node) -> String {
    let mut lines = Vec::new();
    write_node(node, 0, &mut lines);
    lines.join("\n")
}

fn write_node(node: &Node, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    let mut children: &[Node] = &node.content;

    let label = match &node.kind {
        NodeType::Text => format!("{:?}", node.text.as_deref().unwrap_or_default()),
        NodeType::TaskItem => {
            let mark = if node.checked() { "[x]" } else { "[ ]" };
            match children.first().and_then(inline_text) {
                Some(text) => {
                    children = &children[1..];
                    format!("taskItem {mark} {text:?}")
                }
                None => format!("taskItem {mark}"),
            }
        }
        NodeType::CompletedTasksSection => format!(
            "completedTasksSection expanded={} count={}",
            node.expanded(),
            node.declared_count()
        ),
        kind => match inline_text(node) {
            Some(text) if !text.is_empty() => {
                children = &[];
                format!("{kind} {text:?}")
            }
            _ => kind.to_string(),
        },
    };
    lines.push(format!("{indent}{label}"));

    for child in children {
        write_node(child, depth + 1, lines);
    }
}

/// Text of a paragraph or heading made only of text nodes.
fn inline_text(node: &Node) -> Option<String> {
    let textual = matches!(node.kind, NodeType::Paragraph | NodeType::Heading)
        && node.content.iter().all(Node::is_text);
    textual.then(|| node.text_content())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{completed_section, doc, paragraph, task, task_item, task_list};

    #[test]
    fn renders_tasks_and_section() {
        let d = doc(vec![
            paragraph("Groceries"),
            task_list(vec![
                task(false, "Buy bread"),
                task_item(
                    false,
                    vec![paragraph("Cheese"), task_list(vec![task(true, "Cheddar")])],
                ),
            ]),
            completed_section(true, 1, task_list(vec![task(true, "Buy milk")])),
        ]);

        insta::assert_snapshot!(outline(&d), @r#"
        doc
          paragraph "Groceries"
          taskList
            taskItem [ ] "Buy bread"
            taskItem [ ] "Cheese"
              taskList
                taskItem [x] "Cheddar"
          completedTasksSection expanded=true count=1
            taskList
              taskItem [x] "Buy milk"
        "#);
    }

    #[test]
    fn empty_paragraph_has_no_text() {
        let d = doc(vec![paragraph("")]);
        assert_eq!(outline(&d), "doc\n  paragraph");
    }
}

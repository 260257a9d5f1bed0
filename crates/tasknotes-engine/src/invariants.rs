use std::fmt;

use crate::model::Node;

/// A structural rule a committed note breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// More than one completed section, with their positions
    DuplicateSection(Vec<usize>),
    /// A task list with no children
    EmptyTaskList { pos: usize },
    /// A completed section whose `count` disagrees with its content
    CountMismatch {
        pos: usize,
        declared: usize,
        actual: usize,
    },
    /// A completed section with no task items left
    EmptySection { pos: usize },
    /// A completed section whose content is not exactly one task list
    MalformedSection { pos: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateSection(positions) => {
                write!(f, "more than one completed section at {positions:?}")
            }
            Violation::EmptyTaskList { pos } => write!(f, "empty task list at {pos}"),
            Violation::CountMismatch {
                pos,
                declared,
                actual,
            } => write!(
                f,
                "completed section at {pos} declares {declared} task(s) but holds {actual}"
            ),
            Violation::EmptySection { pos } => write!(f, "empty completed section at {pos}"),
            Violation::MalformedSection { pos } => write!(
                f,
                "completed section at {pos} must hold exactly one task list"
            ),
        }
    }
}

/// Every invariant the archive rule maintains that `doc` breaks.
pub fn violations(doc: &Node) -> Vec<Violation> {
    let mut found = Vec::new();

    let sections: Vec<(usize, &Node)> = doc
        .descendants()
        .filter(|(_, n)| n.is_completed_section())
        .collect();
    if sections.len() > 1 {
        found.push(Violation::DuplicateSection(
            sections.iter().map(|(pos, _)| *pos).collect(),
        ));
    }

    for (pos, section) in &sections {
        let pos = *pos;
        if section.child_count() != 1 || !section.content[0].is_task_list() {
            found.push(Violation::MalformedSection { pos });
        }
        let actual = section.task_item_count();
        if actual == 0 {
            found.push(Violation::EmptySection { pos });
        } else if section.declared_count() != actual {
            found.push(Violation::CountMismatch {
                pos,
                declared: section.declared_count(),
                actual,
            });
        }
    }

    found.extend(
        doc.descendants()
            .filter(|(_, n)| n.is_task_list() && n.content.is_empty())
            .map(|(pos, _)| Violation::EmptyTaskList { pos }),
    );
    found
}

/// Assert that `doc` satisfies every archive invariant.
///
/// # Panics
/// Panics listing each violation found.
pub fn check(doc: &Node) {
    let found = violations(doc);
    assert!(
        found.is_empty(),
        "document breaks archive invariants:\n{}",
        found
            .iter()
            .map(|v| format!("  - {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

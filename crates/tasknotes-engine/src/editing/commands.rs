use crate::editing::{EditError, Step};
use crate::model::{CHECKED, EXPANDED, Node, NodeType};

/// Edit commands accepted by `Document::apply`.
///
/// Positions refer to the document as it is when the command is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Set the `checked` flag of the task item starting at `at`
    SetChecked { at: usize, checked: bool },
    /// Flip the `checked` flag of the task item starting at `at`
    ToggleTask { at: usize },
    /// Insert a node at a child boundary
    InsertNode { at: usize, node: Node },
    /// Remove the sibling nodes spanning `from..to`
    DeleteRange { from: usize, to: usize },
    /// Show or hide the completed section's content
    SetSectionExpanded { expanded: bool },
    /// Flip the completed section's `expanded` flag (its header toggle)
    ToggleSectionExpanded,
}

impl Cmd {
    /// Compile the command into steps against `doc`.
    ///
    /// A command that would not change anything (checking an already
    /// checked task) compiles to no steps.
    pub fn compile(&self, doc: &Node) -> Result<Vec<Step>, EditError> {
        match self {
            Cmd::SetChecked { at, checked } => set_checked(doc, *at, |_| *checked),
            Cmd::ToggleTask { at } => set_checked(doc, *at, |was| !was),
            Cmd::InsertNode { at, node } => Ok(vec![Step::Insert {
                at: *at,
                node: node.clone(),
            }]),
            Cmd::DeleteRange { from, to } => Ok(vec![Step::Delete {
                from: *from,
                to: *to,
            }]),
            Cmd::SetSectionExpanded { expanded } => set_expanded(doc, |_| *expanded),
            Cmd::ToggleSectionExpanded => set_expanded(doc, |was| !was),
        }
    }
}

fn set_checked(
    doc: &Node,
    at: usize,
    next: impl FnOnce(bool) -> bool,
) -> Result<Vec<Step>, EditError> {
    let item = doc
        .resolve(at)
        .and_then(|r| r.node_after())
        .ok_or(EditError::NoNodeAt(at))?;
    if !item.is_task_item() {
        return Err(EditError::WrongNodeType {
            pos: at,
            expected: NodeType::TaskItem.to_string(),
            found: item.kind.to_string(),
        });
    }

    let was = item.checked();
    let checked = next(was);
    if checked == was {
        return Ok(vec![]);
    }
    let mut attrs = item.attrs.clone();
    attrs.insert(CHECKED.to_string(), checked.into());
    Ok(vec![Step::SetAttrs { pos: at, attrs }])
}

fn set_expanded(doc: &Node, next: impl FnOnce(bool) -> bool) -> Result<Vec<Step>, EditError> {
    let (pos, section) = doc
        .descendants()
        .find(|(_, n)| n.is_completed_section())
        .ok_or(EditError::NoCompletedSection)?;

    let was = section.expanded();
    let expanded = next(was);
    if expanded == was {
        return Ok(vec![]);
    }
    let mut attrs = section.attrs.clone();
    attrs.insert(EXPANDED.to_string(), expanded.into());
    Ok(vec![Step::SetAttrs { pos, attrs }])
}

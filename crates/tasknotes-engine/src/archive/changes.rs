use crate::model::Node;

/// Which way a task item's `checked` flag flipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// unchecked -> checked
    Completed,
    /// checked -> unchecked
    Reopened,
}

/// A task item whose `checked` flag differs between two snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedChange {
    pub pos: usize,
    pub node: Node,
    pub was_checked: bool,
    pub is_checked: bool,
}

impl CheckedChange {
    pub fn flip(&self) -> Option<Flip> {
        match (self.was_checked, self.is_checked) {
            (false, true) => Some(Flip::Completed),
            (true, false) => Some(Flip::Reopened),
            _ => None,
        }
    }
}

/// Task items whose `checked` flag differs between `old` and `new`, in
/// descending position order.
///
/// Items are matched by position, so `old` and `new` must be exactly one
/// edit apart. A position that holds something other than a task item in
/// `old` is not a change.
pub fn detect_changes(old: &Node, new: &Node) -> Vec<CheckedChange> {
    let mut changes: Vec<CheckedChange> = new
        .descendants()
        .filter(|(_, node)| node.is_task_item())
        .filter_map(|(pos, node)| {
            let before = old.node_at(pos).filter(|n| n.is_task_item())?;
            (before.checked() != node.checked()).then(|| CheckedChange {
                pos,
                node: node.clone(),
                was_checked: before.checked(),
                is_checked: node.checked(),
            })
        })
        .collect();

    changes.sort_by(|a, b| b.pos.cmp(&a.pos));
    log::trace!(
        "detected {} checked-state change(s) at {:?}",
        changes.len(),
        changes.iter().map(|c| c.pos).collect::<Vec<_>>()
    );
    changes
}

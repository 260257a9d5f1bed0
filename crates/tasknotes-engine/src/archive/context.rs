//! Read-only queries locating the structures a relocation works against.
//! All positions are in the coordinates of the tree passed in.

use std::ops::Range;

use crate::model::{Node, NodeType};

/// A node together with where it starts
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    pub pos: usize,
    pub node: &'a Node,
}

impl Located<'_> {
    pub fn range(&self) -> Range<usize> {
        self.pos..self.pos + self.node.node_size()
    }

    /// Position just before the closing token, where a new last child goes.
    pub fn content_end(&self) -> usize {
        self.pos + 1 + self.node.content_size()
    }
}

/// The task list directly holding a task item
#[derive(Debug, Clone, Copy)]
pub struct ParentList<'a> {
    pub list: Located<'a>,
    /// The item is the list's only child, so removing it would leave the
    /// list empty
    pub would_be_empty: bool,
}

/// The task item starting at `pos`, if there is one.
pub fn task_item_at(doc: &Node, pos: usize) -> Option<&Node> {
    doc.resolve(pos)?
        .node_after()
        .filter(|node| node.is_task_item())
}

/// The completed section, if the document has one. Stops at the first.
pub fn completed_section(doc: &Node) -> Option<Located<'_>> {
    doc.descendants()
        .find(|(_, node)| node.is_completed_section())
        .map(|(pos, node)| Located { pos, node })
}

/// The completed section's task list, if the section is well formed.
pub fn section_list<'a>(section: &Located<'a>) -> Option<Located<'a>> {
    section
        .node
        .first_child()
        .filter(|list| list.is_task_list())
        .map(|list| Located {
            pos: section.pos + 1,
            node: list,
        })
}

/// The task list directly containing the item at `item_pos`.
///
/// `None` when the item's parent is not a task list.
pub fn parent_list(doc: &Node, item_pos: usize) -> Option<ParentList<'_>> {
    let resolved = doc.resolve(item_pos)?;
    let depth = resolved.depth();
    let list = resolved.parent();
    if !list.is_task_list() {
        return None;
    }
    Some(ParentList {
        list: Located {
            pos: resolved.before(depth)?,
            node: list,
        },
        would_be_empty: list.child_count() == 1,
    })
}

/// Range to remove so that the item at `item_pos` leaves the tree without
/// leaving an empty task list behind: the parent list when the item is its
/// only child, the item alone otherwise.
pub fn removal_range(doc: &Node, item_pos: usize, item: &Node) -> Range<usize> {
    match parent_list(doc, item_pos) {
        Some(parent) if parent.would_be_empty => parent.list.range(),
        _ => item_pos..item_pos + item.node_size(),
    }
}

/// True when the position lies inside the completed section.
pub fn in_section(section: &Located<'_>, pos: usize) -> bool {
    section.range().contains(&pos)
}

/// The last task list before `limit` that belongs to the active region:
/// not nested inside a task item and not inside the completed section.
pub fn last_active_list_before(doc: &Node, limit: usize) -> Option<Located<'_>> {
    doc.descendants()
        .take_while(|(pos, _)| *pos < limit)
        .filter(|(_, node)| node.is_task_list())
        .filter(|(pos, _)| {
            doc.resolve(*pos).is_some_and(|r| {
                !r.ancestors().any(|a| {
                    matches!(a.kind, NodeType::TaskItem | NodeType::CompletedTasksSection)
                })
            })
        })
        .last()
        .map(|(pos, node)| Located { pos, node })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{completed_section as section, doc, paragraph, task, task_item, task_list};

    // 0 taskList
    //   1 A (1..6)
    //   6 B (6..25)
    //     10 taskList
    //       11 B1, 17 B2
    // 26 completedTasksSection
    //   27 taskList
    //     28 C
    fn sample() -> Node {
        doc(vec![
            task_list(vec![
                task(false, "A"),
                task_item(
                    false,
                    vec![paragraph("B"), task_list(vec![task(false, "B1"), task(false, "B2")])],
                ),
            ]),
            section(true, 1, task_list(vec![task(true, "C")])),
        ])
    }

    #[test]
    fn finds_section_and_its_list() {
        let d = sample();
        let found = completed_section(&d).unwrap();
        assert_eq!(found.pos, 26);

        let list = section_list(&found).unwrap();
        assert_eq!(list.pos, 27);
        assert_eq!(list.content_end(), 33);
        assert!(task_item_at(&d, 28).is_some());
    }

    #[test]
    fn parent_of_nested_item_is_the_nested_list() {
        let d = sample();
        let parent = parent_list(&d, 11).unwrap();
        assert_eq!(parent.list.pos, 10);
        assert!(!parent.would_be_empty);

        let sole = parent_list(&d, 28).unwrap();
        assert_eq!(sole.list.pos, 27);
        assert!(sole.would_be_empty);
    }

    #[test]
    fn removal_range_widens_to_sole_parent() {
        let d = sample();
        let c = task_item_at(&d, 28).unwrap();
        assert_eq!(removal_range(&d, 28, c), 27..34);

        let a = task_item_at(&d, 1).unwrap();
        assert_eq!(removal_range(&d, 1, a), 1..6);
    }

    #[test]
    fn active_list_skips_nested_and_archived_lists() {
        let d = sample();
        assert_eq!(last_active_list_before(&d, 26).unwrap().pos, 0);
        assert_eq!(last_active_list_before(&d, d.content_size()).unwrap().pos, 0);
        assert!(last_active_list_before(&d, 0).is_none());
    }

    #[test]
    fn task_item_at_rejects_other_nodes() {
        let d = sample();
        assert!(task_item_at(&d, 0).is_none());
        assert!(task_item_at(&d, 3).is_none());
    }
}

//! # Task Auto-Archiving
//!
//! A rewrite rule run after every edit of a note. When a task item's
//! `checked` flag flips, the item (with everything nested under it) moves
//! between the active task lists and a single collapsible
//! `completedTasksSection` at the end of the document.
//!
//! ## Per Edit
//!
//! 1. **Detect**: compare the pre- and post-edit trees position by position
//!    and collect task items whose `checked` flag differs
//! 2. **Order**: handle changes from the highest position down
//! 3. **Relocate**: checked items go to the end of the completed section
//!    (created on demand); unchecked items inside the section go to the end
//!    of the last active task list before it (created on demand). Each move
//!    runs against the tree left by the previous one, with the positions of
//!    the changes still to come mapped through the moves already made.
//! 4. **Maintain**: recount the section's task items into its `count`
//!    attribute and drop the section when it is empty
//!
//! ## Structural Invariants
//!
//! After every run:
//! - at most one completed section exists, and it is never empty
//! - its `count` equals the task items inside it
//! - no task list emptied by a move survives
//! - moved items are unchanged apart from their position
//!
//! ## Positional Identity
//!
//! Old and new items are matched purely by position. That is only sound
//! because the rule sees the two trees exactly one edit apart, which the
//! `AppendHook` contract guarantees.

pub mod changes;
pub mod context;
pub mod count;
pub mod relocate;

use crate::editing::{AppendHook, Assoc, Step, Transform};
use crate::model::Node;

pub use changes::{CheckedChange, Flip, detect_changes};
pub use count::refresh_completed_count;
pub use relocate::{move_to_active, move_to_completed};

/// What the archive rule decided for one edit
#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveOutcome {
    /// Commit the edited tree as it is
    NoChange,
    /// Commit this tree instead
    Replaced(Node),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Run the rule at all
    pub enabled: bool,
    /// `expanded` flag given to a newly created completed section
    pub expand_new_section: bool,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            expand_new_section: true,
        }
    }
}

/// The archive rule as an edit pipeline hook.
#[derive(Debug, Clone, Default)]
pub struct AutoArchive {
    options: ArchiveOptions,
}

impl AutoArchive {
    pub fn new(options: ArchiveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }

    /// Run the rule over one edit.
    ///
    /// `edits` are the steps that turned `old` into `new`; when there are
    /// none nothing is inspected. Changes whose relocation fails are logged
    /// and skipped; the others still apply.
    pub fn run(&self, old: &Node, new: &Node, edits: &[Step]) -> ArchiveOutcome {
        if !self.options.enabled || edits.is_empty() {
            return ArchiveOutcome::NoChange;
        }

        let changes = detect_changes(old, new);
        if changes.is_empty() {
            return ArchiveOutcome::NoChange;
        }

        let mut tr = Transform::new(new.clone());
        let base = tr.mapping().len();
        let mut modified = false;
        for change in &changes {
            // carry the position through the moves made for earlier records
            let mapped = tr.mapping().map_from(base, change.pos, Assoc::After);
            if mapped.deleted {
                log::debug!("task at {} was removed by an earlier move", change.pos);
                continue;
            }
            let moved = match change.flip() {
                Some(Flip::Completed) => move_to_completed(&mut tr, mapped.pos, &self.options),
                Some(Flip::Reopened) => move_to_active(&mut tr, mapped.pos),
                None => Ok(false),
            };
            match moved {
                Ok(moved) => modified |= moved,
                Err(e) => log::warn!("could not relocate task at {}: {e}", change.pos),
            }
        }
        if !modified {
            return ArchiveOutcome::NoChange;
        }

        if let Err(e) = refresh_completed_count(&mut tr) {
            log::warn!("could not update completed task count: {e}");
        }
        ArchiveOutcome::Replaced(tr.into_doc())
    }
}

impl ArchiveOutcome {
    /// The tree to commit instead of the edited one, if any.
    pub fn into_replacement(self) -> Option<Node> {
        match self {
            ArchiveOutcome::NoChange => None,
            ArchiveOutcome::Replaced(tree) => Some(tree),
        }
    }
}

impl AppendHook for AutoArchive {
    fn append(&self, old: &Node, new: &Node, steps: &[Step]) -> Option<Node> {
        self.run(old, new, steps).into_replacement()
    }
}

/// Run the archive rule with default options.
///
/// Returns the tree to commit in place of `new`, or `NoChange`.
pub fn try_archive(old: &Node, new: &Node, edits: &[Step]) -> ArchiveOutcome {
    AutoArchive::default().run(old, new, edits)
}

use std::ops::Range;

use crate::editing::{Assoc, EditError, Transform};
use crate::model::Node;

/// A batch of structural edits, all expressed in the coordinates of one
/// snapshot of the document.
///
/// Callers describe *what* to remove and *where* to put things as seen in
/// the tree they just inspected. `apply` works out the order and carries
/// insertion offsets through the deletions, so no call site adjusts
/// offsets by hand.
#[derive(Debug, Default)]
pub struct EditPlan {
    deletes: Vec<Range<usize>>,
    inserts: Vec<(usize, Node)>,
}

impl EditPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete(&mut self, range: Range<usize>) -> &mut Self {
        self.deletes.push(range);
        self
    }

    pub fn insert(&mut self, at: usize, node: Node) -> &mut Self {
        self.inserts.push((at, node));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.inserts.is_empty()
    }

    /// Apply the plan to `tr` atomically.
    ///
    /// Deletions run from the back of the document forwards, then
    /// insertions are mapped through them. Inserts planned at the same
    /// position keep their planned order. Overlapping deletions or an
    /// insertion target strictly inside a deleted range are rejected
    /// before anything is touched; a step failing midway rolls back.
    pub fn apply(self, tr: &mut Transform) -> Result<(), EditError> {
        let EditPlan {
            mut deletes,
            mut inserts,
        } = self;

        deletes.sort_by_key(|r| r.start);
        for pair in deletes.windows(2) {
            if pair[0].end > pair[1].start {
                return Err(EditError::OverlappingDeletes {
                    first: pair[0].clone(),
                    second: pair[1].clone(),
                });
            }
        }
        if let Some((at, _)) = inserts
            .iter()
            .find(|(at, _)| deletes.iter().any(|r| r.start < *at && *at < r.end))
        {
            return Err(EditError::TargetDeleted(*at));
        }

        let mut scratch = tr.clone();
        let base = scratch.mapping().len();
        for range in deletes.iter().rev() {
            scratch.delete(range.start, range.end)?;
        }

        inserts.sort_by_key(|(at, _)| *at);
        for (at, node) in inserts.into_iter().rev() {
            let mapped = scratch.mapping().map_from(base, at, Assoc::Before);
            scratch.insert(mapped.pos, node)?;
        }

        *tr = scratch;
        Ok(())
    }
}

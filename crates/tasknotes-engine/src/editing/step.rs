use serde::{Deserialize, Serialize};

use crate::editing::{EditError, StepMap};
use crate::model::{Attrs, Node, ResolvedPos};

/// A primitive structural edit, expressed in the coordinates of the tree it
/// is applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum Step {
    /// Remove the sibling nodes spanning `from..to`
    Delete { from: usize, to: usize },
    /// Insert `node` at a child boundary
    Insert { at: usize, node: Node },
    /// Replace the attributes of the node starting at `pos`
    SetAttrs { pos: usize, attrs: Attrs },
}

impl Step {
    /// Apply this step to `doc` in place.
    ///
    /// The tree is only touched once the step has been validated, so an
    /// error leaves `doc` as it was.
    pub fn apply(&self, doc: &mut Node) -> Result<StepMap, EditError> {
        match self {
            Step::Delete { from, to } => delete(doc, *from, *to),
            Step::Insert { at, node } => insert(doc, *at, node.clone()),
            Step::SetAttrs { pos, attrs } => set_attrs(doc, *pos, attrs.clone()),
        }
    }
}

fn resolve_boundary(doc: &Node, pos: usize) -> Result<ResolvedPos<'_>, EditError> {
    let resolved = doc.resolve(pos).ok_or(EditError::OutOfRange {
        pos,
        size: doc.content_size(),
    })?;
    if !resolved.is_boundary() {
        return Err(EditError::NotABoundary(pos));
    }
    Ok(resolved)
}

fn delete(doc: &mut Node, from: usize, to: usize) -> Result<StepMap, EditError> {
    if from > to {
        return Err(EditError::InvertedRange { from, to });
    }
    if from == to {
        return Ok(StepMap::identity());
    }

    let (indices, range) = {
        let start = resolve_boundary(doc, from)?;
        let end = resolve_boundary(doc, to)?;
        let depth = start.depth();
        if end.depth() != depth || end.start(depth) != start.start(depth) {
            return Err(EditError::CrossesParent { from, to });
        }
        (start.indices(), start.index(depth)..end.index(depth))
    };

    let parent = doc
        .descend_mut(&indices)
        .ok_or(EditError::NoNodeAt(from))?;
    parent.content.drain(range);

    Ok(StepMap {
        start: from,
        old_size: to - from,
        new_size: 0,
    })
}

fn insert(doc: &mut Node, at: usize, node: Node) -> Result<StepMap, EditError> {
    let (indices, index) = {
        let resolved = resolve_boundary(doc, at)?;
        if resolved.parent().is_leaf() {
            return Err(EditError::NotABoundary(at));
        }
        (resolved.indices(), resolved.index(resolved.depth()))
    };

    let size = node.node_size();
    let parent = doc.descend_mut(&indices).ok_or(EditError::NoNodeAt(at))?;
    parent.content.insert(index, node);

    Ok(StepMap {
        start: at,
        old_size: 0,
        new_size: size,
    })
}

fn set_attrs(doc: &mut Node, pos: usize, attrs: Attrs) -> Result<StepMap, EditError> {
    let (mut indices, index) = {
        let resolved = resolve_boundary(doc, pos)?;
        if resolved.node_after().is_none() {
            return Err(EditError::NoNodeAt(pos));
        }
        (resolved.indices(), resolved.index(resolved.depth()))
    };
    indices.push(index);

    let target = doc.descend_mut(&indices).ok_or(EditError::NoNodeAt(pos))?;
    target.attrs = attrs;
    Ok(StepMap::identity())
}

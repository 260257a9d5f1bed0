//! # Linear Coordinate Space
//!
//! Every position in a document is an offset into its depth-first token
//! stream: entering a non-leaf node consumes one position, leaving it
//! consumes another, each UTF-16 unit of text consumes one, and an atomic
//! leaf consumes one. Position `0` is the start of the root's content.
//!
//! ```text
//!  0   1   2           10   11
//!  <taskList><taskItem ... </taskItem></taskList>
//! ```
//!
//! A node "at" position `p` starts at `p`; its content starts at `p + 1`.

use super::node::Node;

/// One level of a resolved position's ancestry.
#[derive(Debug, Clone, Copy)]
struct PathStep<'a> {
    node: &'a Node,
    /// Index of the child the position falls in or before
    index: usize,
    /// Absolute position where `node`'s content starts
    start: usize,
    /// Absolute position of the start of child `index`
    child_start: usize,
}

/// A position together with the chain of nodes containing it.
///
/// Depth 0 is the root. `parent()` is the innermost node whose content
/// holds the position.
#[derive(Debug, Clone)]
pub struct ResolvedPos<'a> {
    pub pos: usize,
    path: Vec<PathStep<'a>>,
}

impl<'a> ResolvedPos<'a> {
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    /// The ancestor at `depth`. Panics if `depth > self.depth()`.
    pub fn node(&self, depth: usize) -> &'a Node {
        self.path[depth].node
    }

    pub fn parent(&self) -> &'a Node {
        self.node(self.depth())
    }

    /// Index into the ancestor at `depth` of the child leading to the position.
    pub fn index(&self, depth: usize) -> usize {
        self.path[depth].index
    }

    /// Where the content of the ancestor at `depth` starts.
    pub fn start(&self, depth: usize) -> usize {
        self.path[depth].start
    }

    /// Position directly before the ancestor at `depth`. The root has none.
    pub fn before(&self, depth: usize) -> Option<usize> {
        (depth > 0).then(|| self.path[depth].start - 1)
    }

    /// True when the position sits between two children of `parent()`
    /// rather than inside a text node.
    pub fn is_boundary(&self) -> bool {
        self.path
            .last()
            .is_some_and(|step| step.child_start == self.pos)
    }

    /// The child of `parent()` starting exactly at this position.
    pub fn node_after(&self) -> Option<&'a Node> {
        if !self.is_boundary() {
            return None;
        }
        let step = self.path.last()?;
        step.node.child(step.index)
    }

    /// Child indices leading from the root down to `parent()`.
    pub fn indices(&self) -> Vec<usize> {
        self.path[..self.depth()].iter().map(|s| s.index).collect()
    }

    /// Ancestors from the root downwards, excluding the root itself.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.path.iter().skip(1).map(|s| s.node)
    }
}

/// Pre-order walk over all descendants of a node, yielding each one with
/// its position.
pub struct Descendants<'a> {
    stack: Vec<(std::slice::Iter<'a, Node>, usize)>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (children, pos) = self.stack.last_mut()?;
            match children.next() {
                Some(node) => {
                    let at = *pos;
                    *pos += node.node_size();
                    if !node.content.is_empty() {
                        self.stack.push((node.content.iter(), at + 1));
                    }
                    return Some((at, node));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl Node {
    /// Find the child covering content offset `offset`.
    ///
    /// Returns the child index and the offset at which that child starts.
    /// An offset on a boundary resolves to the child after it; the end of
    /// the content resolves to `(child_count, content_size)`.
    pub(crate) fn find_index(&self, offset: usize) -> Option<(usize, usize)> {
        let mut cur = 0;
        for (index, child) in self.content.iter().enumerate() {
            if offset == cur {
                return Some((index, cur));
            }
            let end = cur + child.node_size();
            if end > offset {
                return Some((index, cur));
            }
            cur = end;
        }
        (offset == cur).then_some((self.content.len(), cur))
    }

    /// The node starting at `pos`, or failing that the innermost text or
    /// node whose extent covers it.
    pub fn node_at(&self, pos: usize) -> Option<&Node> {
        let mut node = self;
        let mut pos = pos;
        loop {
            let (index, offset) = node.find_index(pos)?;
            let child = node.child(index)?;
            if offset == pos || child.is_text() {
                return Some(child);
            }
            pos -= offset + 1;
            node = child;
        }
    }

    /// Resolve `pos` into its ancestry. `None` when out of range.
    pub fn resolve(&self, pos: usize) -> Option<ResolvedPos<'_>> {
        let mut path = Vec::new();
        let mut node = self;
        let mut start = 0;
        loop {
            let (index, offset) = node.find_index(pos - start)?;
            path.push(PathStep {
                node,
                index,
                start,
                child_start: start + offset,
            });
            if pos == start + offset {
                break;
            }
            let Some(child) = node.child(index) else {
                break;
            };
            if child.is_leaf() {
                break;
            }
            node = child;
            start += offset + 1;
        }
        Some(ResolvedPos { pos, path })
    }

    /// All descendants in document order with their positions. Positions are
    /// relative to the start of this node's content.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![(self.content.iter(), 0)],
        }
    }

    /// Mutable access to a descendant by child-index path.
    pub(crate) fn descend_mut(&mut self, indices: &[usize]) -> Option<&mut Node> {
        indices
            .iter()
            .try_fold(self, |node, &index| node.content.get_mut(index))
    }
}

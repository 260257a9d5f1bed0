use crate::editing::{EditError, Mapping, Step};
use crate::model::{Attrs, Node};

/// A working copy of a document plus the steps applied to it so far.
///
/// Every step is applied immediately, so `doc()` always reflects the
/// current state and positions for the next step are computed against it.
#[derive(Debug, Clone)]
pub struct Transform {
    doc: Node,
    steps: Vec<Step>,
    mapping: Mapping,
}

impl Transform {
    pub fn new(doc: Node) -> Self {
        Self {
            doc,
            steps: Vec::new(),
            mapping: Mapping::new(),
        }
    }

    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Apply a step; on error nothing is recorded and the tree is unchanged.
    pub fn step(&mut self, step: Step) -> Result<&mut Self, EditError> {
        let map = step.apply(&mut self.doc)?;
        self.mapping.push(map);
        self.steps.push(step);
        Ok(self)
    }

    pub fn delete(&mut self, from: usize, to: usize) -> Result<&mut Self, EditError> {
        self.step(Step::Delete { from, to })
    }

    pub fn insert(&mut self, at: usize, node: Node) -> Result<&mut Self, EditError> {
        self.step(Step::Insert { at, node })
    }

    pub fn set_node_attrs(&mut self, pos: usize, attrs: Attrs) -> Result<&mut Self, EditError> {
        self.step(Step::SetAttrs { pos, attrs })
    }

    pub fn into_doc(self) -> Node {
        self.doc
    }

    pub fn into_parts(self) -> (Node, Vec<Step>) {
        (self.doc, self.steps)
    }
}

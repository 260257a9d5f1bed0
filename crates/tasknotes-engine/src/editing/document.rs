use crate::archive::{ArchiveOptions, AutoArchive};
use crate::editing::{Cmd, EditError, Patch, Step, Transform};
use crate::model::{Node, NodeType};

/// A rule run after every accepted edit that may replace the edited tree.
///
/// Hooks run synchronously, before the edit is committed, with the tree as
/// it was before the edit, the tree after it and the steps in between. The
/// two trees are exactly one edit apart, which is what lets a hook correlate
/// nodes between them by position. `Some(tree)` replaces the edited tree,
/// `None` keeps it.
pub trait AppendHook {
    fn append(&self, old: &Node, new: &Node, steps: &[Step]) -> Option<Node>;
}

/// A task item as seen from outside the tree
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEntry {
    pub pos: usize,
    pub checked: bool,
    pub text: String,
    /// Lives inside the completed section
    pub archived: bool,
}

/// The committed state of one note and the pipeline edits go through.
///
/// ```rust
/// # use tasknotes_engine::editing::{Cmd, Document};
/// # use tasknotes_engine::model::{doc, task, task_list};
/// let mut note = Document::new(doc(vec![task_list(vec![task(false, "Buy milk")])])).unwrap();
///
/// let patch = note.apply(Cmd::ToggleTask { at: 1 }).unwrap();
///
/// // the checked task was filed into a new completed section
/// assert!(patch.replaced);
/// assert!(note.tree().child(0).unwrap().is_completed_section());
/// ```
pub struct Document {
    pub(crate) tree: Node,
    /// Incremented on each committed edit
    pub(crate) version: u64,
    hooks: Vec<Box<dyn AppendHook>>,
}

impl Document {
    /// Wrap a tree with the default pipeline (auto-archiving on).
    pub fn new(tree: Node) -> Result<Self, EditError> {
        Self::with_archive_options(tree, ArchiveOptions::default())
    }

    pub fn with_archive_options(tree: Node, options: ArchiveOptions) -> Result<Self, EditError> {
        Self::with_hooks(tree, vec![Box::new(AutoArchive::new(options))])
    }

    pub fn with_hooks(tree: Node, hooks: Vec<Box<dyn AppendHook>>) -> Result<Self, EditError> {
        if tree.kind != NodeType::Doc {
            return Err(EditError::NotADocument(tree.kind.to_string()));
        }
        Ok(Self {
            tree,
            version: 0,
            hooks,
        })
    }

    /// Parse a persisted note
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let tree: Node = serde_json::from_str(json)?;
        Ok(Self::new(tree)?)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.tree)
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn into_tree(self) -> Node {
        self.tree
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a command and run the append hooks over the result.
    ///
    /// Commands that change nothing skip the hooks and leave the version
    /// alone. A failing command leaves the document untouched.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let mut tr = Transform::new(self.tree.clone());
        for step in cmd.compile(&self.tree)? {
            tr.step(step)?;
        }
        if !tr.doc_changed() {
            return Ok(Patch {
                steps: vec![],
                replaced: false,
                version: self.version,
            });
        }

        let (mut next, steps) = tr.into_parts();
        let mut replaced = false;
        for hook in &self.hooks {
            if let Some(tree) = hook.append(&self.tree, &next, &steps) {
                next = tree;
                replaced = true;
            }
        }

        self.tree = next;
        self.version += 1;
        Ok(Patch {
            steps,
            replaced,
            version: self.version,
        })
    }

    /// Every task item in document order
    pub fn tasks(&self) -> Vec<TaskEntry> {
        let section = self
            .tree
            .descendants()
            .find(|(_, n)| n.is_completed_section())
            .map(|(pos, n)| pos..pos + n.node_size());

        self.tree
            .descendants()
            .filter(|(_, n)| n.is_task_item())
            .map(|(pos, n)| TaskEntry {
                pos,
                checked: n.checked(),
                text: n
                    .first_child()
                    .map(Node::text_content)
                    .unwrap_or_default(),
                archived: section.as_ref().is_some_and(|s| s.contains(&pos)),
            })
            .collect()
    }
}

/*!
 * # Editing Core
 *
 * The host side of the edit pipeline: how a user edit becomes a new
 * authoritative tree.
 *
 * ## Edit Loop
 *
 * 1. A `Cmd` is compiled against the current tree into primitive `Step`s
 * 2. The steps run on a `Transform`, which keeps the working tree and a
 *    `Mapping` of how each step shifted positions
 * 3. If the document changed, every registered `AppendHook` sees the
 *    pre-edit tree, the post-edit tree and the steps, and may hand back a
 *    replacement tree (this is where task auto-archiving plugs in)
 * 4. The final tree is committed and the version bumped
 *
 * ## Coordinates
 *
 * Steps address the linear coordinate space described in
 * [`crate::model::position`]. Steps only ever remove or insert whole
 * sibling nodes, so they never split text or leave half a node behind.
 * `EditPlan` lets callers describe several removals and insertions against
 * one snapshot without recomputing offsets between them.
 *
 * ## Module Structure
 *
 * - **`step`**: `Step` and its application to a tree
 * - **`mapping`**: `StepMap`/`Mapping` position transformation
 * - **`transform`**: `Transform`, a tree plus its applied steps
 * - **`plan`**: `EditPlan`, snapshot-relative batched edits
 * - **`commands`**: `Cmd` and its compilation to steps
 * - **`document`**: `Document`, the committed state and hook runner
 * - **`patch`**: `Patch`, what an applied command did
 */

pub mod commands;
pub mod document;
pub mod mapping;
pub mod patch;
pub mod plan;
pub mod step;
pub mod transform;

use std::ops::Range;

pub use commands::Cmd;
pub use document::{AppendHook, Document};
pub use mapping::{Assoc, MapResult, Mapping, StepMap};
pub use patch::Patch;
pub use plan::EditPlan;
pub use step::Step;
pub use transform::Transform;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("position {pos} is outside the document (content size {size})")]
    OutOfRange { pos: usize, size: usize },
    #[error("position {0} is not between two nodes")]
    NotABoundary(usize),
    #[error("range {from}..{to} spans more than one parent")]
    CrossesParent { from: usize, to: usize },
    #[error("range {from}..{to} ends before it starts")]
    InvertedRange { from: usize, to: usize },
    #[error("no node starts at position {0}")]
    NoNodeAt(usize),
    #[error("node at position {pos} is a {found}, expected a {expected}")]
    WrongNodeType {
        pos: usize,
        expected: String,
        found: String,
    },
    #[error("document has no completed tasks section")]
    NoCompletedSection,
    #[error("deletions {first:?} and {second:?} overlap")]
    OverlappingDeletes {
        first: Range<usize>,
        second: Range<usize>,
    },
    #[error("insertion target {0} lies inside a deleted range")]
    TargetDeleted(usize),
    #[error("document root must be a doc node, found {0}")]
    NotADocument(String),
}

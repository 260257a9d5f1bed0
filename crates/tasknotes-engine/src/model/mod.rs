//! # Document Model
//!
//! A note is an ordered, rooted tree of typed nodes, each with attributes
//! and ordered children, persisted as the editor's nested JSON records.
//!
//! ## Modules
//!
//! - **`node`**: `Node`, `NodeType`, `Attrs` and their serde representation
//! - **`schema`**: constructors and typed attribute access for task lists,
//!   task items and the completed section
//! - **`position`**: the linear coordinate space (`node_at`, `resolve`,
//!   `descendants`)

pub mod node;
pub mod position;
pub mod schema;

pub use node::{Attrs, Mark, Node, NodeType};
pub use position::{Descendants, ResolvedPos};
pub use schema::{
    CHECKED, COUNT, EXPANDED, completed_section, doc, paragraph, task, task_item, task_list,
};

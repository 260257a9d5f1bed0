pub mod archive;
pub mod editing;
pub mod invariants;
pub mod io;
pub mod model;
pub mod snapshot;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use archive::{ArchiveOptions, ArchiveOutcome, AutoArchive, try_archive};
pub use editing::{Cmd, Document, EditError, Patch, Step, Transform};
pub use model::{Node, NodeType};

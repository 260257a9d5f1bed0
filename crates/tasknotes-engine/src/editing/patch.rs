use crate::editing::Step;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Steps the command itself compiled to
    pub steps: Vec<Step>,
    /// An append hook replaced the edited tree
    pub replaced: bool,
    pub version: u64,
}

impl Patch {
    pub fn changed(&self) -> bool {
        !self.steps.is_empty()
    }
}

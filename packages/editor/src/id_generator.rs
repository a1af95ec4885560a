use crate::block::BlockId;
use crate::document::Document;

pub const DEFAULT_ID_PREFIX: &str = "block";

/// Sequential ID generator for blocks within one editor
///
/// IDs are `<prefix>-<n>` with `n` strictly increasing, so two blocks created
/// in quick succession can never collide. IDs already present in the target
/// document (e.g. from a loaded file) are skipped.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            count: 0,
        }
    }

    /// Generate the next ID not already used in `doc`
    pub fn next_id(&mut self, doc: &Document) -> BlockId {
        loop {
            self.count += 1;
            let id = BlockId::new(format!("{}-{}", self.prefix, self.count));
            if !doc.contains(&id) {
                return id;
            }
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_MAX_ENTRIES;
use crate::id_generator::DEFAULT_ID_PREFIX;

/// Editor tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum retained history snapshots (0 = unlimited)
    pub max_history: usize,

    /// Prefix of generated block ids
    pub id_prefix: String,

    /// Store the starting document as the first history entry, so the very
    /// first edit can be undone
    pub record_initial_snapshot: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_ENTRIES,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            record_initial_snapshot: true,
        }
    }
}

use tracing::debug;

use crate::block::BlockId;
use crate::document::Document;
use crate::mutations::SelectionHint;

/// The single block whose inline controls are shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    active: Option<BlockId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&BlockId> {
        self.active.as_ref()
    }

    pub fn is_selected(&self, id: &BlockId) -> bool {
        self.active.as_ref() == Some(id)
    }

    pub fn select(&mut self, id: BlockId) {
        self.active = Some(id);
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Clicking the selected block deselects it; clicking any other selects it
    pub fn click(&mut self, id: BlockId) {
        if self.is_selected(&id) {
            debug!(block_id = %id, "Deselecting block");
            self.active = None;
        } else {
            debug!(block_id = %id, "Selecting block");
            self.active = Some(id);
        }
    }

    /// Follow the outcome of a mutation
    pub fn apply_hint(&mut self, hint: &SelectionHint) {
        match hint {
            SelectionHint::Select(id) => self.active = Some(id.clone()),
            SelectionHint::Removed(id) => {
                if self.is_selected(id) {
                    self.active = None;
                }
            }
            SelectionHint::Keep => {}
        }
    }

    /// Drop the selection if it points at a block `doc` doesn't have
    pub fn retain_in(&mut self, doc: &Document) {
        if let Some(id) = &self.active {
            if !doc.contains(id) {
                debug!(block_id = %id, "Selected block vanished, clearing selection");
                self.active = None;
            }
        }
    }
}

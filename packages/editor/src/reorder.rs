//! # Drag Reordering
//!
//! Host drag gestures reduced to three calls:
//!
//! ```text
//! begin(source) ──► complete(target) ──► MoveBlockToPosition { source, target }
//!        │
//!        └────────► cancel()          ──► nothing
//! ```
//!
//! The controller never sees platform event objects. After `complete` or
//! `cancel` no source is pending, whatever the outcome.

use tracing::debug;

use crate::block::BlockId;
use crate::mutations::Mutation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderController {
    source: Option<BlockId>,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `source`. Replaces any drag already in flight.
    pub fn begin(&mut self, source: BlockId) {
        if let Some(previous) = self.source.replace(source.clone()) {
            debug!(previous = %previous, source = %source, "Drag restarted");
        } else {
            debug!(source = %source, "Drag started");
        }
    }

    /// Drop onto `target`, yielding the move to perform (if any)
    ///
    /// Returns `None` when no drag is pending or the block was dropped on
    /// itself. Existence of either block is checked by the mutation.
    pub fn complete(&mut self, target: BlockId) -> Option<Mutation> {
        let source = self.source.take()?;
        if source == target {
            debug!(source = %source, "Dropped onto itself");
            return None;
        }

        Some(Mutation::MoveBlockToPosition {
            source_id: source,
            target_id: target,
        })
    }

    /// Abandon the drag
    pub fn cancel(&mut self) {
        if let Some(source) = self.source.take() {
            debug!(source = %source, "Drag cancelled");
        }
    }

    pub fn pending(&self) -> Option<&BlockId> {
        self.source.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_produces_move() {
        let mut reorder = ReorderController::new();
        reorder.begin("a".into());

        assert_eq!(
            reorder.complete("b".into()),
            Some(Mutation::MoveBlockToPosition {
                source_id: "a".into(),
                target_id: "b".into(),
            })
        );
        assert!(!reorder.is_dragging());
    }

    #[test]
    fn test_complete_without_begin() {
        let mut reorder = ReorderController::new();
        assert_eq!(reorder.complete("b".into()), None);
    }

    #[test]
    fn test_drop_on_self_clears() {
        let mut reorder = ReorderController::new();
        reorder.begin("a".into());

        assert_eq!(reorder.complete("a".into()), None);
        assert_eq!(reorder.pending(), None);
    }

    #[test]
    fn test_second_begin_overwrites() {
        let mut reorder = ReorderController::new();
        reorder.begin("a".into());
        reorder.begin("c".into());

        assert_eq!(reorder.pending(), Some(&"c".into()));
        assert_eq!(
            reorder.complete("b".into()),
            Some(Mutation::MoveBlockToPosition {
                source_id: "c".into(),
                target_id: "b".into(),
            })
        );
    }

    #[test]
    fn test_cancel_clears() {
        let mut reorder = ReorderController::new();
        reorder.begin("a".into());
        reorder.cancel();

        assert!(!reorder.is_dragging());
        assert_eq!(reorder.complete("b".into()), None);
    }
}

//! # Editor
//!
//! One editing session over one document.
//!
//! The editor owns the live document and everything derived from editing
//! it: history, selection and the in-flight drag. Every structural edit goes
//! through [`Editor::apply`]:
//!
//! ```text
//! Mutation ──► apply(doc) ──► Ok(new doc) ──► history.push ──► selection update
//!                  │
//!                  └─ Err ──► state untouched, error returned to the host
//! ```

use tracing::{debug, info, instrument};

use crate::block::{BlockId, BlockType};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::errors::EditorError;
use crate::history::HistoryStack;
use crate::id_generator::IdGenerator;
use crate::mutations::{Direction, Mutation, MutationContext, MutationError};
use crate::patch::{BlockPatch, SettingsPatch};
use crate::registry::BlockRegistry;
use crate::reorder::ReorderController;
use crate::selection::Selection;

/// Callbacks supplied by the embedding application
///
/// Both receive the current document and cannot change it. The editor does
/// not wait on or inspect what the host does with it.
pub trait EditorHost {
    fn save(&self, document: &Document);
    fn preview(&self, document: &Document);
}

/// Host that ignores save and preview requests
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl EditorHost for NoopHost {
    fn save(&self, _document: &Document) {}
    fn preview(&self, _document: &Document) {}
}

/// Editing session over a single email document
pub struct Editor {
    document: Document,
    history: HistoryStack,
    selection: Selection,
    reorder: ReorderController,
    registry: BlockRegistry,
    ids: IdGenerator,
    config: EditorConfig,
    host: Box<dyn EditorHost>,
}

impl Editor {
    /// Editor with default configuration and no host callbacks
    pub fn new(initial: Option<Document>) -> Self {
        Self::with_config(initial, EditorConfig::default(), Box::new(NoopHost))
    }

    pub fn with_config(
        initial: Option<Document>,
        config: EditorConfig,
        host: Box<dyn EditorHost>,
    ) -> Self {
        let mut editor = Self {
            document: Document::default(),
            history: HistoryStack::with_max_entries(config.max_history),
            selection: Selection::new(),
            reorder: ReorderController::new(),
            registry: BlockRegistry::new(),
            ids: IdGenerator::new(config.id_prefix.clone()),
            config,
            host,
        };
        editor.load(initial.unwrap_or_default());
        editor
    }

    /// Build from untyped host input; anything malformed yields the default
    /// document
    pub fn from_json(
        initial: Option<serde_json::Value>,
        config: EditorConfig,
        host: Box<dyn EditorHost>,
    ) -> Self {
        Self::with_config(initial.map(Document::from_json), config, host)
    }

    /// Use custom block templates for subsequently added blocks
    pub fn with_registry(mut self, registry: BlockRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the document, starting a fresh history
    pub fn load(&mut self, mut document: Document) {
        document.repair_duplicate_ids(&mut self.ids);
        document.repair_out_of_range();

        self.history.clear();
        self.selection.clear();
        self.reorder.cancel();

        if self.config.record_initial_snapshot {
            self.history.push(document.clone(), None);
        }
        info!(blocks = document.len(), "Editor loaded document");
        self.document = document;
    }

    // ---- host-facing state ----

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selected_block(&self) -> Option<&BlockId> {
        self.selection.active()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.reorder.is_dragging()
    }

    // ---- mutations ----

    /// Apply a mutation, recording the result in history
    #[instrument(level = "debug", skip(self), fields(op = %mutation.label()))]
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), EditorError> {
        let mut ctx = MutationContext {
            registry: &self.registry,
            ids: &mut self.ids,
        };

        let outcome = match mutation.apply(&self.document, &mut ctx) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(error = %err, "Mutation rejected");
                return Err(err.into());
            }
        };

        self.history.push(outcome.document.clone(), Some(outcome.label));
        self.document = outcome.document;
        self.selection.apply_hint(&outcome.selection);

        debug!(
            blocks = self.document.len(),
            history = self.history.len(),
            "Mutation applied"
        );
        Ok(())
    }

    /// Append a block of the named type; it becomes selected
    pub fn add_block(&mut self, block_type: &str) -> Result<BlockId, EditorError> {
        self.apply(Mutation::AddBlock {
            block_type: block_type.to_string(),
        })?;

        // Added blocks are always appended
        let added = self.document.blocks.last().map(|block| block.id.clone());
        added.ok_or_else(|| MutationError::Unchanged.into())
    }

    pub fn update_block(&mut self, id: &BlockId, patch: BlockPatch) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateBlock {
            id: id.clone(),
            patch,
        })
    }

    /// Update from untyped fields, interpreted against the block's own type
    pub fn update_block_json(
        &mut self,
        id: &BlockId,
        fields: serde_json::Value,
    ) -> Result<(), EditorError> {
        let block_type = self.block_type_of(id)?;
        let patch = BlockPatch::from_json(block_type, fields)?;
        self.update_block(id, patch)
    }

    pub fn delete_block(&mut self, id: &BlockId) -> Result<(), EditorError> {
        self.apply(Mutation::DeleteBlock { id: id.clone() })
    }

    /// Copy a block; returns the id of the copy
    pub fn duplicate_block(&mut self, id: &BlockId) -> Result<BlockId, EditorError> {
        self.apply(Mutation::DuplicateBlock { id: id.clone() })?;

        let index = self
            .document
            .index_of(id)
            .ok_or_else(|| MutationError::BlockNotFound(id.clone()))?;
        Ok(self.document.blocks[index + 1].id.clone())
    }

    pub fn move_block(&mut self, id: &BlockId, direction: Direction) -> Result<(), EditorError> {
        self.apply(Mutation::MoveBlockAdjacent {
            id: id.clone(),
            direction,
        })
    }

    pub fn move_block_to_position(
        &mut self,
        source_id: &BlockId,
        target_id: &BlockId,
    ) -> Result<(), EditorError> {
        self.apply(Mutation::MoveBlockToPosition {
            source_id: source_id.clone(),
            target_id: target_id.clone(),
        })
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateSettings { patch })
    }

    // ---- history ----

    #[instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> Result<(), EditorError> {
        let snapshot = self.history.undo()?.clone();
        self.restore(snapshot);
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn redo(&mut self) -> Result<(), EditorError> {
        let snapshot = self.history.redo()?.clone();
        self.restore(snapshot);
        Ok(())
    }

    fn restore(&mut self, snapshot: Document) {
        self.document = snapshot;
        self.selection.retain_in(&self.document);
    }

    // ---- selection ----

    /// Toggle selection of a block, as when the user clicks it
    pub fn click_block(&mut self, id: &BlockId) -> Result<(), EditorError> {
        if !self.document.contains(id) {
            return Err(MutationError::BlockNotFound(id.clone()).into());
        }
        self.selection.click(id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ---- drag reordering ----

    pub fn begin_reorder(&mut self, source_id: &BlockId) {
        self.reorder.begin(source_id.clone());
    }

    /// Finish a drag over `target_id`
    ///
    /// Returns `Ok(true)` if a block moved, `Ok(false)` if no drag was
    /// pending or the block was dropped onto itself. The pending drag is
    /// cleared in every case.
    #[instrument(level = "debug", skip(self))]
    pub fn complete_reorder(&mut self, target_id: &BlockId) -> Result<bool, EditorError> {
        match self.reorder.complete(target_id.clone()) {
            Some(mutation) => self.apply(mutation).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn cancel_reorder(&mut self) {
        self.reorder.cancel();
    }

    // ---- host callbacks ----

    pub fn save(&self) {
        info!(blocks = self.document.len(), "Saving document");
        self.host.save(&self.document);
    }

    pub fn preview(&self) {
        debug!(blocks = self.document.len(), "Previewing document");
        self.host.preview(&self.document);
    }

    fn block_type_of(&self, id: &BlockId) -> Result<BlockType, MutationError> {
        self.document
            .block(id)
            .map(|block| block.block_type())
            .ok_or_else(|| MutationError::BlockNotFound(id.clone()))
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::TextPatch;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingHost {
        saved: Rc<RefCell<Vec<Document>>>,
        previewed: Rc<RefCell<usize>>,
    }

    impl EditorHost for RecordingHost {
        fn save(&self, document: &Document) {
            self.saved.borrow_mut().push(document.clone());
        }

        fn preview(&self, _document: &Document) {
            *self.previewed.borrow_mut() += 1;
        }
    }

    #[test]
    fn test_editor_starts_with_defaults() {
        let editor = Editor::new(None);
        assert_eq!(editor.document(), &Document::default());
        assert_eq!(editor.selected_block(), None);
        assert!(!editor.can_undo());
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_from_json_falls_back() {
        let editor = Editor::from_json(
            Some(serde_json::json!({ "blocks": "nope" })),
            EditorConfig::default(),
            Box::new(NoopHost),
        );
        assert_eq!(editor.document(), &Document::default());
    }

    #[test]
    fn test_rejected_mutation_leaves_state() {
        let mut editor = Editor::new(None);
        let id = editor.add_block("text").unwrap();
        let before = editor.document().clone();
        let history_len = editor.history().len();

        let err = editor.add_block("carousel").unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::InvalidInput);

        assert_eq!(editor.document(), &before);
        assert_eq!(editor.history().len(), history_len);
        assert_eq!(editor.selected_block(), Some(&id));
    }

    #[test]
    fn test_duplicate_returns_copy_id() {
        let mut editor = Editor::new(None);
        let id = editor.add_block("button").unwrap();
        let copy = editor.duplicate_block(&id).unwrap();

        assert_ne!(id, copy);
        assert_eq!(editor.document().index_of(&copy), Some(1));
    }

    #[test]
    fn test_update_block_json() {
        let mut editor = Editor::new(None);
        let id = editor.add_block("text").unwrap();

        editor
            .update_block_json(&id, serde_json::json!({ "content": "<p>Hi</p>" }))
            .unwrap();

        let err = editor
            .update_block_json(&id, serde_json::json!({ "label": "wrong shape" }))
            .unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_click_unknown_block() {
        let mut editor = Editor::new(None);
        let err = editor.click_block(&"ghost".into()).unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::NotFound);
        assert_eq!(editor.selected_block(), None);
    }

    #[test]
    fn test_undo_clears_vanished_selection() {
        let mut editor = Editor::new(None);
        let id = editor.add_block("text").unwrap();
        assert_eq!(editor.selected_block(), Some(&id));

        editor.undo().unwrap();
        assert_eq!(editor.selected_block(), None);
    }

    #[test]
    fn test_load_repairs_duplicate_ids() {
        let doc = Document::from_json(serde_json::json!({
            "blocks": [
                { "id": "block-1", "type": "spacer", "height": 10 },
                { "id": "block-1", "type": "spacer", "height": 20 }
            ],
            "settings": {}
        }));

        let editor = Editor::new(Some(doc));
        let ids: Vec<_> = editor.document().ids().cloned().collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_unknown_block_type_error_shape() {
        let mut editor = Editor::new(None);

        let err = editor.add_block("video").unwrap_err();

        assert_eq!(
            err,
            EditorError::Mutation(MutationError::Registry(
                crate::registry::RegistryError::UnknownBlockType("video".to_string())
            ))
        );
    }

    #[test]
    fn test_load_repairs_out_of_range_values() {
        let editor = Editor::from_json(
            Some(serde_json::json!({
                "blocks": [{ "id": "title", "type": "heading", "content": "Hi", "level": 0 }],
                "settings": { "fontSize": 0 }
            })),
            EditorConfig::default(),
            Box::new(NoopHost),
        );

        let doc = editor.document();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.settings.font_size, 16);
        match &doc.blocks[0].kind {
            crate::block::BlockKind::Heading(heading) => assert_eq!(heading.level, 1),
            other => panic!("Expected heading, got {:?}", other),
        }
        // The repaired document is the undo baseline
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_host_callbacks_receive_current_document() {
        let host = RecordingHost::default();
        let saved = Rc::clone(&host.saved);
        let previewed = Rc::clone(&host.previewed);

        let mut editor = Editor::with_config(None, EditorConfig::default(), Box::new(host));
        let id = editor.add_block("text").unwrap();
        editor
            .update_block(
                &id,
                BlockPatch::Text(TextPatch {
                    content: Some("<p>Saved</p>".into()),
                }),
            )
            .unwrap();

        editor.save();
        editor.preview();

        assert_eq!(*saved.borrow(), vec![editor.document().clone()]);
        assert_eq!(*previewed.borrow(), 1);
    }

    #[test]
    fn test_without_initial_snapshot_first_edit_is_permanent() {
        let config = EditorConfig {
            record_initial_snapshot: false,
            ..EditorConfig::default()
        };
        let mut editor = Editor::with_config(None, config, Box::new(NoopHost));

        editor.add_block("text").unwrap();
        assert!(!editor.can_undo());
        assert!(editor.undo().is_err());
        assert_eq!(editor.document().len(), 1);

        editor.add_block("image").unwrap();
        editor.undo().unwrap();
        assert_eq!(editor.document().len(), 1);
    }
}

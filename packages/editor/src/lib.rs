//! # Blockmail Editor
//!
//! Core editing engine for block-based email documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host UI: toolbar, inline widgets, save API  │
//! └─────────────────────────────────────────────┘
//!                     ↓ gestures
//! ┌─────────────────────────────────────────────┐
//! │ editor: one session over one document       │
//! │  - Mutations produce new documents          │
//! │  - Linear snapshot history (undo/redo)      │
//! │  - Single-block selection                   │
//! │  - Two-phase drag reordering                │
//! └─────────────────────────────────────────────┘
//!                     ↓ current document
//! ┌─────────────────────────────────────────────┐
//! │ host callbacks: save / preview              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Documents are values**: every edit yields a new `Document`
//! 2. **Closed block set**: blocks are a tagged union, matched exhaustively
//! 3. **Errors are diagnostics**: a rejected edit leaves all state untouched
//! 4. **No I/O**: persistence and rendering belong to the host
//!
//! ## Usage
//!
//! ```rust
//! use blockmail_editor::{BlockPatch, Editor, TextPatch};
//!
//! let mut editor = Editor::new(None);
//!
//! let id = editor.add_block("text")?;
//! editor.update_block(&id, BlockPatch::Text(TextPatch {
//!     content: Some("<p>Hello</p>".to_string()),
//! }))?;
//!
//! assert_eq!(editor.selected_block(), Some(&id));
//!
//! editor.undo()?;
//! editor.redo()?;
//! # Ok::<(), blockmail_editor::EditorError>(())
//! ```

mod block;
mod config;
mod document;
mod editor;
mod errors;
mod history;
mod id_generator;
mod mutations;
mod patch;
mod registry;
mod reorder;
mod selection;

pub use block::{
    Block, BlockId, BlockKind, BlockType, ButtonBlock, Column, ColumnsBlock, DividerBlock,
    HeadingBlock, ImageBlock, SocialBlock, SocialLink, SpacerBlock, TextBlock,
};
pub use config::EditorConfig;
pub use document::{Document, Settings};
pub use editor::{Editor, EditorHost, NoopHost};
pub use errors::{EditorError, ErrorKind};
pub use history::{HistoryEntry, HistoryError, HistoryStack, DEFAULT_MAX_ENTRIES};
pub use id_generator::IdGenerator;
pub use mutations::{
    Direction, Mutation, MutationContext, MutationError, MutationOutcome, SelectionHint,
};
pub use patch::{
    BlockPatch, ButtonPatch, ColumnsPatch, DividerPatch, HeadingPatch, ImagePatch, SettingsPatch,
    SocialPatch, SpacerPatch, TextPatch,
};
pub use registry::{BlockRegistry, RegistryError};
pub use reorder::ReorderController;
pub use selection::Selection;

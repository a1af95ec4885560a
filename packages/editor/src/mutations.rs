//! # Block Mutations
//!
//! Semantic operations on email documents.
//!
//! ## Design Principles
//!
//! 1. **Pure**: `apply` reads one document and returns a brand-new one
//! 2. **Validated**: invalid or pointless operations return an error and
//!    produce nothing, so callers never record a no-op in history
//! 3. **Minimal**: one variant per user-facing editing gesture
//!
//! ## Mutation Semantics
//!
//! ### AddBlock
//! - Appends a block built from the registry template with a fresh id
//! - The new block becomes the selection
//!
//! ### DuplicateBlock
//! - Copies every field except the id
//! - Inserted immediately after the source
//!
//! ### MoveBlockToPosition
//! - Removes the source and reinserts it at the target's former index
//! - Moving down lands after the target, moving up lands before it

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::block::{Block, BlockId, BlockType};
use crate::document::Document;
use crate::id_generator::IdGenerator;
use crate::patch::{BlockPatch, SettingsPatch};
use crate::registry::{BlockRegistry, RegistryError};

/// Direction for adjacent moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// Semantic mutations (one per editing gesture)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Append a new block of the named type
    #[serde(rename_all = "camelCase")]
    AddBlock { block_type: String },

    /// Shallow-merge fields into a block
    UpdateBlock { id: BlockId, patch: BlockPatch },

    /// Remove a block
    DeleteBlock { id: BlockId },

    /// Copy a block, placing the copy right after it
    DuplicateBlock { id: BlockId },

    /// Swap a block with its neighbour
    MoveBlockAdjacent { id: BlockId, direction: Direction },

    /// Drag-and-drop repositioning
    #[serde(rename_all = "camelCase")]
    MoveBlockToPosition {
        source_id: BlockId,
        target_id: BlockId,
    },

    /// Merge fields into the document settings
    UpdateSettings { patch: SettingsPatch },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Cannot apply a {patch} update to a {block} block")]
    PatchMismatch { block: BlockType, patch: BlockType },

    #[error("Malformed update: {0}")]
    MalformedPatch(String),

    #[error("Block {0} cannot move {1} any further")]
    AtBoundary(BlockId, Direction),

    #[error("Source and target are the same block: {0}")]
    SameBlock(BlockId),

    #[error("Mutation leaves the document unchanged")]
    Unchanged,
}

/// How the selection should follow a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionHint {
    /// Select this block
    Select(BlockId),

    /// This block no longer exists
    Removed(BlockId),

    /// Leave the selection alone
    Keep,
}

/// Collaborators a mutation may read from
pub struct MutationContext<'a> {
    pub registry: &'a BlockRegistry,
    pub ids: &'a mut IdGenerator,
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    /// The new document
    pub document: Document,

    pub selection: SelectionHint,

    /// Short description for history entries
    pub label: String,
}

impl Mutation {
    /// Apply to `doc`, producing a new document. `doc` is never modified.
    pub fn apply(
        &self,
        doc: &Document,
        ctx: &mut MutationContext<'_>,
    ) -> Result<MutationOutcome, MutationError> {
        let (document, selection) = match self {
            Mutation::AddBlock { block_type } => Self::apply_add(doc, ctx, block_type)?,
            Mutation::UpdateBlock { id, patch } => Self::apply_update(doc, id, patch)?,
            Mutation::DeleteBlock { id } => Self::apply_delete(doc, id)?,
            Mutation::DuplicateBlock { id } => Self::apply_duplicate(doc, ctx, id)?,
            Mutation::MoveBlockAdjacent { id, direction } => {
                Self::apply_move_adjacent(doc, id, *direction)?
            }
            Mutation::MoveBlockToPosition { source_id, target_id } => {
                Self::apply_move_to_position(doc, source_id, target_id)?
            }
            Mutation::UpdateSettings { patch } => Self::apply_update_settings(doc, patch)?,
        };

        if &document == doc {
            return Err(MutationError::Unchanged);
        }

        Ok(MutationOutcome {
            document,
            selection,
            label: self.label(),
        })
    }

    /// Human-readable description, e.g. "Add text block"
    pub fn label(&self) -> String {
        match self {
            Mutation::AddBlock { block_type } => format!("Add {} block", block_type),
            Mutation::UpdateBlock { patch, .. } => format!("Edit {} block", patch.block_type()),
            Mutation::DeleteBlock { .. } => "Delete block".to_string(),
            Mutation::DuplicateBlock { .. } => "Duplicate block".to_string(),
            Mutation::MoveBlockAdjacent { direction, .. } => format!("Move block {}", direction),
            Mutation::MoveBlockToPosition { .. } => "Reorder block".to_string(),
            Mutation::UpdateSettings { .. } => "Update settings".to_string(),
        }
    }

    fn apply_add(
        doc: &Document,
        ctx: &mut MutationContext<'_>,
        block_type: &str,
    ) -> Result<(Document, SelectionHint), MutationError> {
        let kind = ctx.registry.template_by_name(block_type)?;
        let id = ctx.ids.next_id(doc);

        let mut next = doc.clone();
        next.blocks.push(Block::new(id.clone(), kind));
        Ok((next, SelectionHint::Select(id)))
    }

    fn apply_update(
        doc: &Document,
        id: &BlockId,
        patch: &BlockPatch,
    ) -> Result<(Document, SelectionHint), MutationError> {
        let index = Self::require(doc, id)?;
        let kind = patch.apply_to(&doc.blocks[index].kind)?;

        let mut next = doc.clone();
        next.blocks[index].kind = kind;
        Ok((next, SelectionHint::Keep))
    }

    fn apply_delete(
        doc: &Document,
        id: &BlockId,
    ) -> Result<(Document, SelectionHint), MutationError> {
        let index = Self::require(doc, id)?;

        let mut next = doc.clone();
        next.blocks.remove(index);
        Ok((next, SelectionHint::Removed(id.clone())))
    }

    fn apply_duplicate(
        doc: &Document,
        ctx: &mut MutationContext<'_>,
        id: &BlockId,
    ) -> Result<(Document, SelectionHint), MutationError> {
        let index = Self::require(doc, id)?;
        let copy = Block::new(ctx.ids.next_id(doc), doc.blocks[index].kind.clone());

        let mut next = doc.clone();
        next.blocks.insert(index + 1, copy);
        Ok((next, SelectionHint::Keep))
    }

    fn apply_move_adjacent(
        doc: &Document,
        id: &BlockId,
        direction: Direction,
    ) -> Result<(Document, SelectionHint), MutationError> {
        let index = Self::require(doc, id)?;
        let neighbour = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|&i| i < doc.len()),
        }
        .ok_or_else(|| MutationError::AtBoundary(id.clone(), direction))?;

        let mut next = doc.clone();
        next.blocks.swap(index, neighbour);
        Ok((next, SelectionHint::Keep))
    }

    fn apply_move_to_position(
        doc: &Document,
        source_id: &BlockId,
        target_id: &BlockId,
    ) -> Result<(Document, SelectionHint), MutationError> {
        if source_id == target_id {
            return Err(MutationError::SameBlock(source_id.clone()));
        }

        let source = Self::require(doc, source_id)?;
        let target = Self::require(doc, target_id)?;

        let mut next = doc.clone();
        let block = next.blocks.remove(source);
        next.blocks.insert(target, block);
        Ok((next, SelectionHint::Keep))
    }

    fn apply_update_settings(
        doc: &Document,
        patch: &SettingsPatch,
    ) -> Result<(Document, SelectionHint), MutationError> {
        let settings = patch.apply_to(&doc.settings)?;

        let mut next = doc.clone();
        next.settings = settings;
        Ok((next, SelectionHint::Keep))
    }

    fn require(doc: &Document, id: &BlockId) -> Result<usize, MutationError> {
        doc.index_of(id)
            .ok_or_else(|| MutationError::BlockNotFound(id.clone()))
    }
}

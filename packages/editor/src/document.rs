//! # Document Model
//!
//! An email document is an ordered list of [`Block`]s plus global
//! [`Settings`]. Documents are plain values: every edit produces a new
//! `Document` and nothing ever mutates one that has been handed out.
//!
//! ## Loading
//!
//! ```text
//! JSON ──► Document::from_json ──► valid? ──► Document
//!                                    │
//!                                    └─ no ──► Document::default() (+ warning)
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::block::{Block, BlockId, BlockKind};
use crate::id_generator::IdGenerator;

/// Editable email document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub settings: Settings,
}

/// Document-wide styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub background_color: String,

    /// Pixels
    pub content_width: u32,

    pub font_family: String,

    /// Pixels
    pub font_size: u32,

    pub line_height: f32,
    pub text_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_color: "#f4f4f5".to_string(),
            content_width: 600,
            font_family: "Arial, sans-serif".to_string(),
            font_size: 16,
            line_height: 1.5,
            text_color: "#111827".to_string(),
        }
    }
}

impl Document {
    /// Build a document from host-supplied JSON, falling back to the default
    /// document when `blocks` or `settings` is missing or malformed
    pub fn from_json(value: serde_json::Value) -> Self {
        match Self::try_from_json(value) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(error = %err, "Malformed document, using defaults");
                Document::default()
            }
        }
    }

    /// Strict form of [`Document::from_json`]: reports why the input was
    /// rejected instead of substituting the default document
    pub fn try_from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let doc: Document = serde_json::from_value(value)?;
        debug!(blocks = doc.blocks.len(), "Loaded document");
        Ok(doc)
    }

    /// Same as [`Document::from_json`] for raw text
    pub fn from_json_str(source: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(source) {
            Ok(value) => Self::from_json(value),
            Err(err) => {
                warn!(error = %err, "Document is not valid JSON, using defaults");
                Document::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| &block.id == id)
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| &block.id == id)
    }

    /// Block ids in document order
    pub fn ids(&self) -> impl Iterator<Item = &BlockId> {
        self.blocks.iter().map(|block| &block.id)
    }

    /// Give every block after the first bearing a given id a fresh id.
    /// Returns the number of blocks renamed.
    pub(crate) fn repair_duplicate_ids(&mut self, ids: &mut IdGenerator) -> usize {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for (index, block) in self.blocks.iter().enumerate() {
            if !seen.insert(block.id.clone()) {
                duplicates.push(index);
            }
        }

        for &index in &duplicates {
            let fresh = ids.next_id(self);
            warn!(old_id = %self.blocks[index].id, new_id = %fresh, "Renaming duplicate block id");
            self.blocks[index].id = fresh;
        }

        duplicates.len()
    }

    /// Pull values that no edit could produce back into range: heading
    /// levels are clamped to 1..=6 and non-positive settings reset to their
    /// defaults. Returns the number of values changed.
    pub(crate) fn repair_out_of_range(&mut self) -> usize {
        let mut repaired = 0;

        for block in &mut self.blocks {
            if let BlockKind::Heading(heading) = &mut block.kind {
                let clamped = heading.level.clamp(1, 6);
                if clamped != heading.level {
                    warn!(id = %block.id, level = heading.level, "Clamping heading level");
                    heading.level = clamped;
                    repaired += 1;
                }
            }
        }

        let defaults = Settings::default();
        let settings = &mut self.settings;
        if settings.content_width == 0 {
            warn!("Content width of 0, using default");
            settings.content_width = defaults.content_width;
            repaired += 1;
        }
        if settings.font_size == 0 {
            warn!("Font size of 0, using default");
            settings.font_size = defaults.font_size;
            repaired += 1;
        }
        if !settings.line_height.is_finite() || settings.line_height <= 0.0 {
            warn!(line_height = settings.line_height, "Invalid line height, using default");
            settings.line_height = defaults.line_height;
            repaired += 1;
        }

        repaired
    }
}

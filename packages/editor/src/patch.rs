//! # Partial Updates
//!
//! Typed field subsets used by `UpdateBlock` and `UpdateSettings`.
//!
//! Every field is optional; `None` leaves the target field untouched and
//! `Some` replaces it wholesale (a shallow merge, so `columns` or `links`
//! are replaced as whole lists, never merged element-wise).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::block::{BlockKind, BlockType, Column, SocialLink};
use crate::document::Settings;
use crate::mutations::MutationError;

/// Field subset for one block variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockPatch {
    Text(TextPatch),
    Heading(HeadingPatch),
    Image(ImagePatch),
    Button(ButtonPatch),
    Divider(DividerPatch),
    Spacer(SpacerPatch),
    Columns(ColumnsPatch),
    Social(SocialPatch),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextPatch {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadingPatch {
    pub content: Option<String>,
    pub level: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagePatch {
    pub src: Option<String>,
    pub alt: Option<String>,

    /// An empty string removes the link
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ButtonPatch {
    pub label: Option<String>,
    pub link: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DividerPatch {
    pub color: Option<String>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpacerPatch {
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnsPatch {
    pub columns: Option<Vec<Column>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialPatch {
    pub links: Option<Vec<SocialLink>>,
}

/// Field subset of [`Settings`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SettingsPatch {
    pub background_color: Option<String>,
    pub content_width: Option<u32>,
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
    pub line_height: Option<f32>,
    pub text_color: Option<String>,
}

fn merge<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

fn parse_fields<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, MutationError> {
    serde_json::from_value(value).map_err(|e| MutationError::MalformedPatch(e.to_string()))
}

impl BlockPatch {
    /// Interpret a JSON object of block fields as a patch for `block_type`
    ///
    /// Keys are the block's serialized field names (camelCase). `id` and
    /// `type` are not patchable and are rejected like any unknown key.
    pub fn from_json(
        block_type: BlockType,
        value: serde_json::Value,
    ) -> Result<Self, MutationError> {
        if !value.is_object() {
            return Err(MutationError::MalformedPatch(
                "expected an object of block fields".to_string(),
            ));
        }

        Ok(match block_type {
            BlockType::Text => BlockPatch::Text(parse_fields(value)?),
            BlockType::Heading => BlockPatch::Heading(parse_fields(value)?),
            BlockType::Image => BlockPatch::Image(parse_fields(value)?),
            BlockType::Button => BlockPatch::Button(parse_fields(value)?),
            BlockType::Divider => BlockPatch::Divider(parse_fields(value)?),
            BlockType::Spacer => BlockPatch::Spacer(parse_fields(value)?),
            BlockType::Columns => BlockPatch::Columns(parse_fields(value)?),
            BlockType::Social => BlockPatch::Social(parse_fields(value)?),
        })
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockPatch::Text(_) => BlockType::Text,
            BlockPatch::Heading(_) => BlockType::Heading,
            BlockPatch::Image(_) => BlockType::Image,
            BlockPatch::Button(_) => BlockType::Button,
            BlockPatch::Divider(_) => BlockType::Divider,
            BlockPatch::Spacer(_) => BlockType::Spacer,
            BlockPatch::Columns(_) => BlockType::Columns,
            BlockPatch::Social(_) => BlockType::Social,
        }
    }

    /// Merge into `kind`, producing the updated fields
    pub fn apply_to(&self, kind: &BlockKind) -> Result<BlockKind, MutationError> {
        let mut updated = kind.clone();

        match (self, &mut updated) {
            (BlockPatch::Text(patch), BlockKind::Text(block)) => {
                merge(&mut block.content, &patch.content);
            }
            (BlockPatch::Heading(patch), BlockKind::Heading(block)) => {
                if let Some(level) = patch.level {
                    if !(1..=6).contains(&level) {
                        return Err(MutationError::MalformedPatch(format!(
                            "heading level must be 1-6, got {}",
                            level
                        )));
                    }
                }
                merge(&mut block.content, &patch.content);
                merge(&mut block.level, &patch.level);
            }
            (BlockPatch::Image(patch), BlockKind::Image(block)) => {
                merge(&mut block.src, &patch.src);
                merge(&mut block.alt, &patch.alt);
                if let Some(link) = &patch.link {
                    block.link = (!link.is_empty()).then(|| link.clone());
                }
            }
            (BlockPatch::Button(patch), BlockKind::Button(block)) => {
                merge(&mut block.label, &patch.label);
                merge(&mut block.link, &patch.link);
                merge(&mut block.background_color, &patch.background_color);
                merge(&mut block.text_color, &patch.text_color);
            }
            (BlockPatch::Divider(patch), BlockKind::Divider(block)) => {
                merge(&mut block.color, &patch.color);
                merge(&mut block.height, &patch.height);
            }
            (BlockPatch::Spacer(patch), BlockKind::Spacer(block)) => {
                merge(&mut block.height, &patch.height);
            }
            (BlockPatch::Columns(patch), BlockKind::Columns(block)) => {
                merge(&mut block.columns, &patch.columns);
            }
            (BlockPatch::Social(patch), BlockKind::Social(block)) => {
                merge(&mut block.links, &patch.links);
            }
            _ => {
                return Err(MutationError::PatchMismatch {
                    block: kind.block_type(),
                    patch: self.block_type(),
                })
            }
        }

        Ok(updated)
    }
}

impl SettingsPatch {
    /// Merge into `settings`, producing the updated settings
    pub fn apply_to(&self, settings: &Settings) -> Result<Settings, MutationError> {
        if self.content_width == Some(0) {
            return Err(MutationError::MalformedPatch(
                "contentWidth must be positive".to_string(),
            ));
        }
        if self.font_size == Some(0) {
            return Err(MutationError::MalformedPatch(
                "fontSize must be positive".to_string(),
            ));
        }
        if let Some(line_height) = self.line_height {
            if !line_height.is_finite() || line_height <= 0.0 {
                return Err(MutationError::MalformedPatch(format!(
                    "lineHeight must be a positive number, got {}",
                    line_height
                )));
            }
        }

        let mut updated = settings.clone();
        merge(&mut updated.background_color, &self.background_color);
        merge(&mut updated.content_width, &self.content_width);
        merge(&mut updated.font_family, &self.font_family);
        merge(&mut updated.font_size, &self.font_size);
        merge(&mut updated.line_height, &self.line_height);
        merge(&mut updated.text_color, &self.text_color);
        Ok(updated)
    }
}

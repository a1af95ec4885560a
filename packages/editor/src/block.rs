//! # Blocks
//!
//! The typed content units that make up a document.
//!
//! A block is a closed tagged union: the `type` tag selects one of the
//! variant structs below, and every site that inspects a block matches
//! exhaustively on [`BlockKind`]. The serialized form is a flat JSON object:
//!
//! ```json
//! { "id": "block-1", "type": "button", "label": "Buy", "link": "#", ... }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::registry::RegistryError;

/// Opaque block identifier, unique within a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Type tag of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Heading,
    Image,
    Button,
    Divider,
    Spacer,
    Columns,
    Social,
}

impl BlockType {
    pub const ALL: [BlockType; 8] = [
        BlockType::Text,
        BlockType::Heading,
        BlockType::Image,
        BlockType::Button,
        BlockType::Divider,
        BlockType::Spacer,
        BlockType::Columns,
        BlockType::Social,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Heading => "heading",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Divider => "divider",
            BlockType::Spacer => "spacer",
            BlockType::Columns => "columns",
            BlockType::Social => "social",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlockType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| RegistryError::UnknownBlockType(s.to_string()))
    }
}

/// A block inside a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,

    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    pub fn new(id: BlockId, kind: BlockKind) -> Self {
        Self { id, kind }
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }
}

/// Variant-specific block fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockKind {
    Text(TextBlock),
    Heading(HeadingBlock),
    Image(ImageBlock),
    Button(ButtonBlock),
    Divider(DividerBlock),
    Spacer(SpacerBlock),
    Columns(ColumnsBlock),
    Social(SocialBlock),
}

impl BlockKind {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Text(_) => BlockType::Text,
            BlockKind::Heading(_) => BlockType::Heading,
            BlockKind::Image(_) => BlockType::Image,
            BlockKind::Button(_) => BlockType::Button,
            BlockKind::Divider(_) => BlockType::Divider,
            BlockKind::Spacer(_) => BlockType::Spacer,
            BlockKind::Columns(_) => BlockType::Columns,
            BlockKind::Social(_) => BlockType::Social,
        }
    }
}

/// Opaque rich-text markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingBlock {
    pub content: String,

    /// 1..=6
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub src: String,
    pub alt: String,

    /// Optional click-through URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonBlock {
    pub label: String,
    pub link: String,
    pub background_color: String,
    pub text_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerBlock {
    pub color: String,

    /// Line thickness in pixels
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacerBlock {
    /// Pixels
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsBlock {
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub content: String,

    /// CSS width, e.g. "50%"
    pub width: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialBlock {
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_serializes_flat() {
        let block = Block::new(
            BlockId::from("block-1"),
            BlockKind::Button(ButtonBlock {
                label: "Buy".to_string(),
                link: "https://example.com".to_string(),
                background_color: "#000000".to_string(),
                text_color: "#ffffff".to_string(),
            }),
        );

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["id"], "block-1");
        assert_eq!(json["type"], "button");
        assert_eq!(json["backgroundColor"], "#000000");
    }

    #[test]
    fn test_block_deserializes_from_flat_object() {
        let json = r#"{ "id": "a", "type": "spacer", "height": 40 }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(block.id.as_str(), "a");
        assert_eq!(block.kind, BlockKind::Spacer(SpacerBlock { height: 40 }));
    }

    #[test]
    fn test_unknown_type_tag_is_rejected() {
        let json = r#"{ "id": "a", "type": "video", "src": "x" }"#;
        assert!(serde_json::from_str::<Block>(json).is_err());
    }

    #[test]
    fn test_block_type_from_str() {
        for ty in BlockType::ALL {
            assert_eq!(ty.name().parse::<BlockType>().unwrap(), ty);
        }

        assert_eq!(
            "carousel".parse::<BlockType>(),
            Err(RegistryError::UnknownBlockType("carousel".to_string()))
        );
    }
}

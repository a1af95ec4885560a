//! # Block Registry
//!
//! Default field templates for every block type.
//!
//! A template is handed out as an owned [`BlockKind`], so two blocks created
//! from the same template never share structure and can be edited
//! independently.

use std::collections::HashMap;
use thiserror::Error;

use crate::block::{
    BlockKind, BlockType, ButtonBlock, Column, ColumnsBlock, DividerBlock, HeadingBlock,
    ImageBlock, SocialBlock, SocialLink, SpacerBlock, TextBlock,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Template for {registered} cannot hold a {actual} block")]
    InvalidTemplate {
        registered: BlockType,
        actual: BlockType,
    },
}

/// Lookup table of default block contents
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    templates: HashMap<BlockType, BlockKind>,
}

impl BlockRegistry {
    /// Registry holding the built-in template for every block type
    pub fn new() -> Self {
        let templates = BlockType::ALL
            .into_iter()
            .map(|ty| (ty, default_template(ty)))
            .collect();

        Self { templates }
    }

    /// Replace the template for `block_type`
    pub fn with_template(
        mut self,
        block_type: BlockType,
        template: BlockKind,
    ) -> Result<Self, RegistryError> {
        if template.block_type() != block_type {
            return Err(RegistryError::InvalidTemplate {
                registered: block_type,
                actual: template.block_type(),
            });
        }

        self.templates.insert(block_type, template);
        Ok(self)
    }

    /// Fresh copy of the template for `block_type`
    pub fn template(&self, block_type: BlockType) -> BlockKind {
        self.templates
            .get(&block_type)
            .cloned()
            .unwrap_or_else(|| default_template(block_type))
    }

    /// Fresh copy of the template named `name`
    pub fn template_by_name(&self, name: &str) -> Result<BlockKind, RegistryError> {
        Ok(self.template(name.parse()?))
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn default_template(block_type: BlockType) -> BlockKind {
    match block_type {
        BlockType::Text => BlockKind::Text(TextBlock {
            content: "<p>Enter your text here</p>".to_string(),
        }),
        BlockType::Heading => BlockKind::Heading(HeadingBlock {
            content: "Your heading".to_string(),
            level: 2,
        }),
        BlockType::Image => BlockKind::Image(ImageBlock {
            src: "https://placehold.co/600x200".to_string(),
            alt: "Image".to_string(),
            link: None,
        }),
        BlockType::Button => BlockKind::Button(ButtonBlock {
            label: "Click me".to_string(),
            link: "#".to_string(),
            background_color: "#2563eb".to_string(),
            text_color: "#ffffff".to_string(),
        }),
        BlockType::Divider => BlockKind::Divider(DividerBlock {
            color: "#e5e7eb".to_string(),
            height: 1,
        }),
        BlockType::Spacer => BlockKind::Spacer(SpacerBlock { height: 24 }),
        BlockType::Columns => BlockKind::Columns(ColumnsBlock {
            columns: vec![
                Column {
                    content: "<p>Column 1</p>".to_string(),
                    width: "50%".to_string(),
                },
                Column {
                    content: "<p>Column 2</p>".to_string(),
                    width: "50%".to_string(),
                },
            ],
        }),
        BlockType::Social => BlockKind::Social(SocialBlock {
            links: ["facebook", "twitter", "instagram"]
                .into_iter()
                .map(|platform| SocialLink {
                    platform: platform.to_string(),
                    url: format!("https://{}.com/", platform),
                    icon: format!("{}.png", platform),
                })
                .collect(),
        }),
    }
}

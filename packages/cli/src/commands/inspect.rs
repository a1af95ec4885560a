use anyhow::{Context, Result};
use blockmail_editor::{Block, BlockKind, Document};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Document JSON file
    pub input: PathBuf,
}

pub fn inspect(args: InspectArgs, cwd: &Path) -> Result<()> {
    let path = cwd.join(&args.input);
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let doc = Document::from_json_str(&source);

    println!("📨 {} {}", "Document".green().bold(), path.display());
    print_outline(&doc);
    Ok(())
}

/// Print settings and one line per block
pub fn print_outline(doc: &Document) {
    let s = &doc.settings;
    println!(
        "   Settings: {}px wide, {} {}px/{}, text {}, background {}",
        s.content_width, s.font_family, s.font_size, s.line_height, s.text_color, s.background_color
    );
    println!("   Blocks: {}", doc.len());
    for (index, line) in outline(doc).into_iter().enumerate() {
        println!("   {:>3}. {}", index + 1, line);
    }
}

pub fn outline(doc: &Document) -> Vec<String> {
    doc.blocks.iter().map(describe).collect()
}

fn describe(block: &Block) -> String {
    let summary = match &block.kind {
        BlockKind::Text(text) => excerpt(&text.content),
        BlockKind::Heading(heading) => format!("h{} {}", heading.level, excerpt(&heading.content)),
        BlockKind::Image(image) => format!("{} ({})", image.src, image.alt),
        BlockKind::Button(button) => format!("\"{}\" → {}", button.label, button.link),
        BlockKind::Divider(divider) => format!("{}px {}", divider.height, divider.color),
        BlockKind::Spacer(spacer) => format!("{}px", spacer.height),
        BlockKind::Columns(columns) => {
            let widths: Vec<_> = columns.columns.iter().map(|c| c.width.as_str()).collect();
            format!("{} columns [{}]", columns.columns.len(), widths.join(", "))
        }
        BlockKind::Social(social) => {
            let platforms: Vec<_> = social.links.iter().map(|l| l.platform.as_str()).collect();
            platforms.join(", ")
        }
    };

    format!("{} {} {}", block.block_type().name().cyan(), block.id.to_string().dimmed(), summary)
}

fn excerpt(markup: &str) -> String {
    const MAX: usize = 40;
    let text: String = markup.chars().take(MAX).collect();
    if markup.chars().count() > MAX {
        format!("{}…", text)
    } else {
        text
    }
}

use crate::config::Config;
use crate::host::FileHost;
use crate::script::ScriptCommand;
use anyhow::{Context, Result};
use blockmail_editor::{Document, Editor, ErrorKind};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Document JSON file to edit
    pub input: PathBuf,

    /// Script of editing commands (JSON array)
    #[arg(short, long)]
    pub script: PathBuf,

    /// Write the result here instead of over the input
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the final document outline
    #[arg(short, long)]
    pub preview: bool,

    /// Overwrite the input even when it could not be loaded
    #[arg(short, long)]
    pub force: bool,
}

/// Counts of script outcomes
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub applied: usize,
    pub ignored: usize,
    pub rejected: usize,
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    println!("✏️  {} Blockmail editor", "Starting".green().bold());
    println!("   Input:  {}", args.input.display());
    println!("   Script: {}", args.script.display());
    println!();

    let config = Config::load(cwd)?;
    let input = cwd.join(&args.input);
    let out = cwd.join(args.out.as_ref().unwrap_or(&args.input));

    let source = fs::read_to_string(&input)
        .with_context(|| format!("Cannot read {}", input.display()))?;
    let initial = match parse_document(&source) {
        Ok(doc) => doc,
        Err(err) if args.out.is_none() && !args.force => {
            anyhow::bail!(
                "{} is not a valid document ({}); refusing to overwrite it. \
                 Use --out to write elsewhere or --force to replace it",
                input.display(),
                err
            );
        }
        Err(err) => {
            println!(
                "   {} {} is not a valid document ({}), starting from an empty document",
                "⚠️".yellow(),
                args.input.display(),
                err
            );
            Document::default()
        }
    };
    let script_source = fs::read_to_string(cwd.join(&args.script))
        .with_context(|| format!("Cannot read {}", args.script.display()))?;
    let script: Vec<ScriptCommand> = serde_json::from_str(&script_source)
        .with_context(|| format!("Invalid script {}", args.script.display()))?;

    let host = FileHost::new(out.clone(), config.clone());
    let save_failed = host.failure_flag();

    let mut editor = Editor::with_config(Some(initial), config.editor.clone(), Box::new(host));

    let summary = run_script(&mut editor, &script);

    editor.save();
    if args.preview {
        println!();
        editor.preview();
    }

    println!();
    println!(
        "✨ {} {} applied, {} ignored, {} rejected",
        if summary.rejected > 0 {
            "Done".yellow().bold()
        } else {
            "Done".green().bold()
        },
        summary.applied,
        summary.ignored,
        summary.rejected
    );
    println!("   Output: {}", out.display());

    if save_failed.get() {
        return Err(anyhow::anyhow!("Failed to save {}", out.display()));
    }
    Ok(())
}

fn parse_document(source: &str) -> serde_json::Result<Document> {
    Document::try_from_json(serde_json::from_str(source)?)
}

/// Replay `script`, printing one line per command
pub fn run_script(editor: &mut Editor, script: &[ScriptCommand]) -> ApplySummary {
    let mut summary = ApplySummary::default();

    for (index, command) in script.iter().enumerate() {
        match command.run(editor) {
            Ok(message) => {
                summary.applied += 1;
                println!("   {} {:>3} {}", "✓".green(), index + 1, message);
            }
            Err(err) => match err.kind() {
                ErrorKind::NoOp | ErrorKind::HistoryExhausted => {
                    summary.ignored += 1;
                    println!("   {} {:>3} {}", "·".dimmed(), index + 1, err);
                }
                ErrorKind::NotFound | ErrorKind::InvalidInput => {
                    summary.rejected += 1;
                    println!("   {} {:>3} {}", "✗".red(), index + 1, err);
                }
            },
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_script_summary() {
        let script: Vec<ScriptCommand> = serde_json::from_str(
            r#"[
                { "op": "addBlock", "blockType": "text" },
                { "op": "addBlock", "blockType": "video" },
                { "op": "moveBlock", "id": "block-1", "direction": "up" },
                { "op": "undo" },
                { "op": "undo" }
            ]"#,
        )
        .unwrap();

        let mut editor = Editor::new(None);
        let summary = run_script(&mut editor, &script);

        assert_eq!(
            summary,
            ApplySummary {
                applied: 2,
                ignored: 2,
                rejected: 1,
            }
        );
        assert!(editor.document().is_empty());
    }

    #[test]
    fn test_apply_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("doc.json"), "{}").unwrap();
        fs::write(
            dir.path().join("script.json"),
            r#"[{ "op": "addBlock", "blockType": "button" }]"#,
        )
        .unwrap();

        apply(
            ApplyArgs {
                input: PathBuf::from("doc.json"),
                script: PathBuf::from("script.json"),
                out: Some(PathBuf::from("out.json")),
                preview: false,
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        let written = fs::read_to_string(dir.path().join("out.json")).unwrap();
        let doc = Document::from_json_str(&written);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.blocks[0].block_type().name(), "button");
    }

    const DAMAGED_DOC: &str = r#"{
        "blocks": [
            { "id": "keep", "type": "text", "content": "<p>precious</p>" },
            { "id": "typo", "type": "buton", "label": "Buy" }
        ],
        "settings": {}
    }"#;

    fn write_damaged_input(dir: &Path) {
        fs::write(dir.join("doc.json"), DAMAGED_DOC).unwrap();
        fs::write(
            dir.join("script.json"),
            r#"[{ "op": "addBlock", "blockType": "spacer" }]"#,
        )
        .unwrap();
    }

    fn args(out: Option<&str>, force: bool) -> ApplyArgs {
        ApplyArgs {
            input: PathBuf::from("doc.json"),
            script: PathBuf::from("script.json"),
            out: out.map(PathBuf::from),
            preview: false,
            force,
        }
    }

    #[test]
    fn test_apply_keeps_unloadable_input() {
        let dir = tempfile::tempdir().unwrap();
        write_damaged_input(dir.path());

        let err = apply(args(None, false), dir.path()).unwrap_err();

        assert!(err.to_string().contains("refusing to overwrite"), "{}", err);
        let on_disk = fs::read_to_string(dir.path().join("doc.json")).unwrap();
        assert_eq!(on_disk, DAMAGED_DOC);
    }

    #[test]
    fn test_apply_unloadable_input_to_other_file() {
        let dir = tempfile::tempdir().unwrap();
        write_damaged_input(dir.path());

        apply(args(Some("out.json"), false), dir.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("doc.json")).unwrap(),
            DAMAGED_DOC
        );
        let written = fs::read_to_string(dir.path().join("out.json")).unwrap();
        assert_eq!(Document::from_json_str(&written).len(), 1);
    }

    #[test]
    fn test_apply_force_replaces_unloadable_input() {
        let dir = tempfile::tempdir().unwrap();
        write_damaged_input(dir.path());

        apply(args(None, true), dir.path()).unwrap();

        let written = fs::read_to_string(dir.path().join("doc.json")).unwrap();
        let doc = Document::from_json_str(&written);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.blocks[0].block_type().name(), "spacer");
    }
}

use crate::config::Config;
use anyhow::Result;
use blockmail_editor::Document;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Where to write the document
    #[arg(short, long, default_value = "email.json")]
    pub out: PathBuf,

    /// Force overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn new(args: NewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let out = cwd.join(&args.out);

    if out.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), out.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    fs::write(&out, config.to_json(&Document::default())?)?;

    println!("  {} Created {}", "✓".green(), out.display());
    println!();
    println!("Next steps:");
    println!("  1. Write an editing script (JSON array of commands)");
    println!("  2. Run: blockmail apply {} --script script.json", args.out.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_writes_default_document() {
        let dir = tempfile::tempdir().unwrap();
        new(
            NewArgs {
                out: PathBuf::from("doc.json"),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        let written = fs::read_to_string(dir.path().join("doc.json")).unwrap();
        assert_eq!(Document::from_json_str(&written), Document::default());
    }

    #[test]
    fn test_new_does_not_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("doc.json"), "keep me").unwrap();

        new(
            NewArgs {
                out: PathBuf::from("doc.json"),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("doc.json")).unwrap(), "keep me");
    }
}

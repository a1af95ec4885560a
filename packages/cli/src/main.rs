mod commands;
mod config;
mod host;
mod script;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, inspect, new, ApplyArgs, InspectArgs, NewArgs};

/// Blockmail CLI - edit block-based email documents from scripts
#[derive(Parser, Debug)]
#[command(name = "blockmail")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an empty email document
    New(NewArgs),

    /// Replay an editing script against a document
    Apply(ApplyArgs),

    /// Print a document's settings and blocks
    Inspect(InspectArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::New(args) => new(args, &cwd),
            Command::Apply(args) => apply(args, &cwd),
            Command::Inspect(args) => inspect(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

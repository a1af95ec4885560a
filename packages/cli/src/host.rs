use blockmail_editor::{Document, EditorHost};
use colored::Colorize;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{error, info};

use crate::commands::inspect::print_outline;
use crate::config::Config;

/// Host that saves to a JSON file and previews as a terminal outline
pub struct FileHost {
    path: PathBuf,
    config: Config,
    failed: Rc<Cell<bool>>,
}

impl FileHost {
    pub fn new(path: PathBuf, config: Config) -> Self {
        Self {
            path,
            config,
            failed: Rc::new(Cell::new(false)),
        }
    }

    /// Flag set once any save has failed
    pub fn failure_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.failed)
    }

    fn write(&self, document: &Document) -> anyhow::Result<()> {
        std::fs::write(&self.path, self.config.to_json(document)?)?;
        Ok(())
    }
}

impl EditorHost for FileHost {
    fn save(&self, document: &Document) {
        match self.write(document) {
            Ok(()) => info!(path = %self.path.display(), "Document written"),
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "Failed to write document");
                eprintln!("   {} Cannot save {}: {}", "✗".red(), self.path.display(), err);
                self.failed.set(true);
            }
        }
    }

    fn preview(&self, document: &Document) {
        print_outline(document);
    }
}

//! Charter lookup.
//!
//! Every document's glossary is checked against the glossary of a charter
//! document stored at a fixed path below the repository root. The root is
//! the nearest ancestor directory containing the root marker.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use soplint_ast::AstArena;
use soplint_parser::{MarkdownParser, Parser};
use tracing::debug;

use crate::glossary::{Glossary, parse_glossary};
use crate::{LinterError, SopConfig};

/// Loads charter glossaries, once per charter path for the whole run.
#[derive(Debug, Default)]
pub struct CharterCache {
    root_marker: String,
    charter_path: PathBuf,
    glossaries: HashMap<PathBuf, Glossary>,
}

impl CharterCache {
    pub fn new(config: &SopConfig) -> Self {
        Self {
            root_marker: config.root_marker.clone(),
            charter_path: PathBuf::from(&config.charter_path),
            glossaries: HashMap::new(),
        }
    }

    /// Repository root containing `document`.
    pub fn find_root(&self, document: &Path) -> Result<PathBuf, LinterError> {
        let absolute = fs::canonicalize(document).map_err(|e| {
            LinterError::file(format!("Cannot resolve '{}': {}", document.display(), e))
        })?;

        absolute
            .ancestors()
            .skip(1)
            .find(|dir| dir.join(&self.root_marker).exists())
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                LinterError::charter(format!(
                    "No repository root (a directory containing '{}') above '{}'",
                    self.root_marker,
                    document.display()
                ))
            })
    }

    /// Charter glossary that applies to `document`.
    pub fn glossary_for(&mut self, document: &Path) -> Result<&Glossary, LinterError> {
        let charter = self.find_root(document)?.join(&self.charter_path);

        if !self.glossaries.contains_key(&charter) {
            let glossary = load_charter(&charter)?;
            debug!(
                "Loaded {} glossary terms from {}",
                glossary.len(),
                charter.display()
            );
            self.glossaries.insert(charter.clone(), glossary);
        }

        self.glossaries.get(&charter).ok_or_else(|| {
            LinterError::charter(format!("Charter '{}' was not loaded", charter.display()))
        })
    }
}

fn load_charter(path: &Path) -> Result<Glossary, LinterError> {
    let source = fs::read_to_string(path).map_err(|e| {
        LinterError::charter(format!("Cannot read charter '{}': {}", path.display(), e))
    })?;

    let arena = AstArena::new();
    let root = MarkdownParser::new()
        .parse(&arena, &source)
        .map_err(|e| LinterError::parse(format!("{}: {}", path.display(), e)))?;

    Ok(parse_glossary(&root))
}

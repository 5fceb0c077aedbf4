//! SOP file discovery.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::LinterError;

/// Collects SOP documents from files and directories.
pub struct FileFinder {
    file_name: Regex,
    exclude_globs: Option<GlobSet>,
}

impl FileFinder {
    /// `identifier_prefix` selects file names inside walked directories
    /// (`<prefix>NNNN*.md`); `exclude` globs drop matching paths.
    pub fn new(identifier_prefix: &str, exclude: &[String]) -> Result<Self, LinterError> {
        let file_name = Regex::new(&format!(
            r"^{}\d{{4}}.*\.md$",
            regex::escape(identifier_prefix)
        ))
        .map_err(|e| LinterError::config(format!("Invalid identifier prefix: {}", e)))?;

        Ok(Self {
            file_name,
            exclude_globs: Self::build_globset(exclude)?,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, LinterError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| LinterError::config(format!("Invalid glob pattern: {}", e)))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Checks if a path matches one of the exclude patterns.
    pub fn should_ignore(&self, path: &Path) -> bool {
        self.exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(path))
    }

    fn is_sop_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.file_name.is_match(name))
    }

    /// Files are taken as given; directories are walked recursively for SOP
    /// file names. The result is sorted and free of duplicates.
    pub fn collect(&self, inputs: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for input in inputs {
            if input.is_file() {
                if !self.should_ignore(input) {
                    files.push(input.clone());
                }
            } else if input.is_dir() {
                for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
                    let path = entry.path();
                    if path.is_file() && self.is_sop_file(path) && !self.should_ignore(path) {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                warn!("Input '{}' does not exist, skipping", input.display());
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} SOP files", files.len());
        files
    }
}

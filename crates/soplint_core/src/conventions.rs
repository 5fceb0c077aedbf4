//! Naming conventions derived from the configuration.

use std::path::Path;

use regex::Regex;

use crate::document::{REQUIRED_SECTIONS, RequiredSection};
use crate::{LinterError, SopConfig};

/// Compiled patterns and constants shared by rules, the index and review.
#[derive(Debug, Clone)]
pub struct Conventions {
    pub title_prefix: String,
    pub images_dir: String,
    pub remote_hosts: Vec<String>,
    pub required_sections: Vec<RequiredSection>,
    /// Matches a value starting with an identifier, e.g. `GDI-SOP0001`.
    pub identifier: Regex,
    /// Matches a file stem, capturing the identifier and the title part.
    pub file_stem: Regex,
}

impl Conventions {
    pub fn from_config(config: &SopConfig) -> Result<Self, LinterError> {
        let prefix = regex::escape(&config.identifier_prefix);
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| {
                LinterError::config(format!("Invalid identifier prefix pattern: {}", e))
            })
        };

        Ok(Self {
            title_prefix: config.title_prefix.clone(),
            images_dir: config.images_dir.clone(),
            remote_hosts: config.remote_hosts.clone(),
            required_sections: REQUIRED_SECTIONS.to_vec(),
            identifier: compile(format!(r"^{prefix}\d{{4}}"))?,
            file_stem: compile(format!(r"^({prefix}\d{{4}})_(.+)$"))?,
        })
    }

    /// Identifier and title parts of a document file name.
    pub fn split_file_name<'p>(&self, path: &'p Path) -> Option<(&'p str, &'p str)> {
        let stem = path.file_stem()?.to_str()?;
        let captures = self.file_stem.captures(stem)?;
        let identifier = captures.get(1)?.as_str();
        let title = captures.get(2)?.as_str();
        Some((identifier, title))
    }

    /// Identifier of a document taken from its file name.
    pub fn file_identifier<'p>(&self, path: &'p Path) -> Option<&'p str> {
        self.split_file_name(path).map(|(identifier, _)| identifier)
    }
}

//! Linter configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::LinterError;

const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// File name looked up in the working directory when no config is given.
pub const CONFIG_FILE_NAME: &str = ".soplint.json";

/// Configuration for linting, indexing and review runs.
///
/// Every field has a default, so an empty object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SopConfig {
    /// Prefix every level-1 heading must start with.
    pub title_prefix: String,

    /// Identifier prefix, e.g. `GDI-SOP` for `GDI-SOP0001`.
    pub identifier_prefix: String,

    /// Path fragment every image URL must contain.
    pub images_dir: String,

    /// Charter location relative to the repository root.
    pub charter_path: String,

    /// Directory entry that marks the repository root.
    pub root_marker: String,

    /// Hosts whose links are probed remotely.
    pub remote_hosts: Vec<String>,

    /// Whether remote links are probed at all.
    pub check_remote: bool,

    /// Timeout applied to every remote request.
    pub request_timeout_secs: u64,

    /// Glob patterns excluded from directory discovery.
    pub exclude: Vec<String>,

    /// Days after which a document is due for review.
    pub review_days: i64,

    /// `owner/name` of the repository that receives review issues.
    pub repository: String,

    /// Directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl SopConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            title_prefix: "European GDI - ".to_string(),
            identifier_prefix: "GDI-SOP".to_string(),
            images_dir: "images/".to_string(),
            charter_path: "docs/GDI-SOP_charter.md".to_string(),
            root_marker: ".git".to_string(),
            remote_hosts: vec!["github.com".to_string()],
            check_remote: true,
            request_timeout_secs: 10,
            exclude: Vec::new(),
            review_days: 365,
            repository: "GenomicDataInfrastructure/standard-operating-procedures".to_string(),
            base_dir: None,
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinterError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_json(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSON with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?;

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(LinterError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Loads `explicit` when given, otherwise `.soplint.json` from `dir` if
    /// present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, LinterError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!("Using config file {}", candidate.display());
            Self::from_file(candidate)
        } else {
            Ok(Self::new())
        }
    }
}

impl Default for SopConfig {
    fn default() -> Self {
        Self::new()
    }
}

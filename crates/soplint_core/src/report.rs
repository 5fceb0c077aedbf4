//! Per-document findings and the aggregated lint report.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Errors and warnings recorded for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Findings {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Collects findings for a single document.
///
/// In strict mode every warning is recorded as an error.
#[derive(Debug)]
pub struct Reporter {
    strict: bool,
    findings: Findings,
}

impl Reporter {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            findings: Findings::default(),
        }
    }

    pub fn report(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Error => self.findings.errors.push(message),
            Severity::Warning if self.strict => self.findings.errors.push(message),
            Severity::Warning => self.findings.warnings.push(message),
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.report(Severity::Error, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.report(Severity::Warning, message);
    }

    /// Number of findings recorded so far.
    pub fn len(&self) -> usize {
        self.findings.errors.len() + self.findings.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn finish(self) -> Findings {
        self.findings
    }
}

/// Findings of a whole run, keyed by document path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LintReport {
    files: BTreeMap<String, Findings>,
}

impl LintReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &Path, findings: Findings) {
        self.files.insert(path.display().to_string(), findings);
    }

    pub fn get(&self, path: &Path) -> Option<&Findings> {
        self.files.get(&path.display().to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Findings)> {
        self.files.iter().map(|(path, findings)| (path.as_str(), findings))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// True if any document has at least one error.
    pub fn has_errors(&self) -> bool {
        self.files.values().any(Findings::has_errors)
    }

    pub fn error_count(&self) -> usize {
        self.files.values().map(|f| f.errors.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.files.values().map(|f| f.warnings.len()).sum()
    }

    /// Pretty-printed JSON, `{"<path>": {"errors": [...], "warnings": [...]}}`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

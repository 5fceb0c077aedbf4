//! Linter orchestrator.

use std::fs;
use std::path::{Path, PathBuf};

use soplint_ast::{AstArena, TreeNode};
use soplint_parser::{MarkdownParser, Parser};
use tracing::{debug, info};

use crate::charter::CharterCache;
use crate::conventions::Conventions;
use crate::document::SopDocument;
use crate::glossary::{Glossary, parse_glossary};
use crate::references::RemoteProbe;
use crate::report::{Findings, LintReport, Reporter};
use crate::rules::{Rule, RuleContext};
use crate::{LinterError, SopConfig};

/// State shared by every document of one run.
pub struct LintContext<'c> {
    /// All documents of the run, for cross-document checks.
    pub inputs: &'c [PathBuf],
    pub charters: CharterCache,
    /// Remote reference probe; `None` skips remote checks.
    pub probe: Option<&'c dyn RemoteProbe>,
}

impl<'c> LintContext<'c> {
    pub fn new(inputs: &'c [PathBuf], config: &SopConfig) -> Self {
        Self {
            inputs,
            charters: CharterCache::new(config),
            probe: None,
        }
    }

    pub fn with_probe(mut self, probe: Option<&'c dyn RemoteProbe>) -> Self {
        self.probe = probe;
        self
    }
}

/// Runs the rule set over SOP documents.
pub struct Linter {
    config: SopConfig,
    conventions: Conventions,
    parser: MarkdownParser,
    strict: bool,
}

impl Linter {
    pub fn new(config: SopConfig) -> Result<Self, LinterError> {
        let conventions = Conventions::from_config(&config)?;
        Ok(Self {
            config,
            conventions,
            parser: MarkdownParser::new(),
            strict: false,
        })
    }

    /// Records every warning as an error.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn config(&self) -> &SopConfig {
        &self.config
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Lints every path in `ctx.inputs`.
    pub fn lint_files(&self, ctx: &mut LintContext<'_>) -> Result<LintReport, LinterError> {
        let mut report = LintReport::new();
        let inputs = ctx.inputs;
        for path in inputs {
            let findings = self.lint_file(path, ctx)?;
            report.insert(path, findings);
        }

        info!(
            "Linted {} files: {} errors, {} warnings",
            report.len(),
            report.error_count(),
            report.warning_count()
        );
        Ok(report)
    }

    /// Reads, parses and lints a single file.
    pub fn lint_file(&self, path: &Path, ctx: &mut LintContext<'_>) -> Result<Findings, LinterError> {
        debug!("Linting {}", path.display());

        let source = fs::read_to_string(path)
            .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;
        let charter = ctx.charters.glossary_for(path)?;

        self.lint_source(path, &source, charter, ctx.inputs, ctx.probe)
    }

    /// Parses and lints an in-memory document.
    pub fn lint_source(
        &self,
        path: &Path,
        source: &str,
        charter: &Glossary,
        inputs: &[PathBuf],
        probe: Option<&dyn RemoteProbe>,
    ) -> Result<Findings, LinterError> {
        let arena = AstArena::with_capacity(source.len() * 4);
        let root = self
            .parser
            .parse(&arena, source)
            .map_err(|e| LinterError::parse(format!("{}: {}", path.display(), e)))?;

        Ok(self.lint_tree(path, &root, charter, inputs, probe))
    }

    /// Runs all rules against an already parsed tree.
    pub fn lint_tree<N: TreeNode>(
        &self,
        path: &Path,
        root: &N,
        charter: &Glossary,
        inputs: &[PathBuf],
        probe: Option<&dyn RemoteProbe>,
    ) -> Findings {
        let document = SopDocument::new(path, root);
        let glossary = parse_glossary(root);
        let ctx = RuleContext {
            document: &document,
            conventions: &self.conventions,
            inputs,
            glossary: &glossary,
            charter,
            probe,
        };

        let mut reporter = Reporter::new(self.strict);
        for rule in Rule::ALL {
            let before = reporter.len();
            rule.check(&ctx, &mut reporter);
            debug!(
                "{}: rule '{}' reported {} findings",
                path.display(),
                rule,
                reporter.len() - before
            );
        }

        reporter.finish()
    }
}

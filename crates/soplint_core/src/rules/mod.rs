//! The lint rules.
//!
//! Every rule reads the document through [`RuleContext`] and records its
//! findings on a [`Reporter`]. Rules never depend on each other; a rule whose
//! input is missing reports that once and returns.

mod filename;
mod glossary;
mod history;
mod images;
mod metadata;
pub(crate) mod procedure;
mod references;
mod roles;
mod sections;
mod title;

use std::fmt;
use std::path::PathBuf;

use soplint_ast::TreeNode;

use crate::conventions::Conventions;
use crate::document::SopDocument;
use crate::glossary::Glossary;
use crate::references::RemoteProbe;
use crate::report::Reporter;

/// Everything a rule may look at.
pub struct RuleContext<'r, 'd, N: TreeNode> {
    pub document: &'r SopDocument<'d, N>,
    pub conventions: &'r Conventions,
    /// Every path given to this run, for cross-document checks.
    pub inputs: &'r [PathBuf],
    /// The document's own glossary.
    pub glossary: &'r Glossary,
    /// The charter glossary.
    pub charter: &'r Glossary,
    /// `None` disables remote reference checks.
    pub probe: Option<&'r dyn RemoteProbe>,
}

/// A single lint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    TitleFormat,
    RequiredSections,
    NonEmptySections,
    MetadataTable,
    DocumentHistory,
    RolesAndResponsibilities,
    StepNumbering,
    StepTables,
    CharterGlossary,
    UndefinedAcronyms,
    References,
    FileName,
    TitleMatchesFileName,
    ImagePaths,
}

impl Rule {
    /// All rules in execution order.
    pub const ALL: [Rule; 14] = [
        Rule::TitleFormat,
        Rule::RequiredSections,
        Rule::NonEmptySections,
        Rule::MetadataTable,
        Rule::DocumentHistory,
        Rule::RolesAndResponsibilities,
        Rule::StepNumbering,
        Rule::StepTables,
        Rule::CharterGlossary,
        Rule::UndefinedAcronyms,
        Rule::References,
        Rule::FileName,
        Rule::TitleMatchesFileName,
        Rule::ImagePaths,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Rule::TitleFormat => "title-format",
            Rule::RequiredSections => "required-sections",
            Rule::NonEmptySections => "non-empty-sections",
            Rule::MetadataTable => "metadata-table",
            Rule::DocumentHistory => "document-history",
            Rule::RolesAndResponsibilities => "roles-and-responsibilities",
            Rule::StepNumbering => "step-numbering",
            Rule::StepTables => "step-tables",
            Rule::CharterGlossary => "charter-glossary",
            Rule::UndefinedAcronyms => "undefined-acronyms",
            Rule::References => "references",
            Rule::FileName => "file-name",
            Rule::TitleMatchesFileName => "title-matches-file-name",
            Rule::ImagePaths => "image-paths",
        }
    }

    pub fn check<N: TreeNode>(self, ctx: &RuleContext<'_, '_, N>, reporter: &mut Reporter) {
        match self {
            Rule::TitleFormat => title::check_title_format(ctx, reporter),
            Rule::RequiredSections => sections::check_required_sections(ctx, reporter),
            Rule::NonEmptySections => sections::check_non_empty_sections(ctx, reporter),
            Rule::MetadataTable => metadata::check_metadata_table(ctx, reporter),
            Rule::DocumentHistory => history::check_document_history(ctx, reporter),
            Rule::RolesAndResponsibilities => roles::check_roles(ctx, reporter),
            Rule::StepNumbering => procedure::check_step_numbering(ctx, reporter),
            Rule::StepTables => procedure::check_step_tables(ctx, reporter),
            Rule::CharterGlossary => glossary::check_charter_glossary(ctx, reporter),
            Rule::UndefinedAcronyms => glossary::check_undefined_acronyms(ctx, reporter),
            Rule::References => references::check_references(ctx, reporter),
            Rule::FileName => filename::check_file_name(ctx, reporter),
            Rule::TitleMatchesFileName => title::check_title_matches_file_name(ctx, reporter),
            Rule::ImagePaths => images::check_image_paths(ctx, reporter),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Runs single rules against in-memory sources.

    use std::path::{Path, PathBuf};

    use soplint_ast::TxtNode;

    use crate::conventions::Conventions;
    use crate::document::SopDocument;
    use crate::glossary::{Glossary, parse_glossary};
    use crate::references::RemoteProbe;
    use crate::report::{Findings, Reporter};
    use crate::test_utils::{CHARTER, table_tree, with_tree};
    use crate::SopConfig;

    use super::{Rule, RuleContext};

    pub struct RuleRun<'a> {
        pub path: &'a Path,
        pub inputs: Vec<PathBuf>,
        pub charter: Glossary,
        pub probe: Option<&'a dyn RemoteProbe>,
        pub strict: bool,
    }

    impl<'a> RuleRun<'a> {
        pub fn at(path: &'a Path) -> Self {
            Self {
                path,
                inputs: vec![path.to_path_buf()],
                charter: with_tree(CHARTER, |root| parse_glossary(root)),
                probe: None,
                strict: false,
            }
        }

        pub fn run(&self, rule: Rule, source: &str) -> Findings {
            with_tree(source, |root| self.run_tree(rule, root))
        }

        pub fn run_tree(&self, rule: Rule, root: &TxtNode<'_>) -> Findings {
            let conventions = Conventions::from_config(&SopConfig::default()).unwrap();
            let document = SopDocument::new(self.path, root);
            let glossary = parse_glossary(root);
            let ctx = RuleContext {
                document: &document,
                conventions: &conventions,
                inputs: &self.inputs,
                glossary: &glossary,
                charter: &self.charter,
                probe: self.probe,
            };
            let mut reporter = Reporter::new(self.strict);
            rule.check(&ctx, &mut reporter);
            reporter.finish()
        }
    }

    /// Runs `rule` on `source` stored at `path`, with default settings.
    pub fn run_rule(rule: Rule, path: &str, source: &str) -> Findings {
        RuleRun::at(Path::new(path)).run(rule, source)
    }

    /// Runs `rule` on a document made of one table.
    pub fn run_rule_on_table(rule: Rule, rows: &[&[&str]]) -> Findings {
        let arena = soplint_ast::AstArena::new();
        let root = table_tree(&arena, rows);
        RuleRun::at(Path::new("GDI-SOP0001_x.md")).run_tree(rule, &root)
    }
}

//! Staleness detection for periodic SOP review.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use soplint_ast::AstArena;
use soplint_parser::{MarkdownParser, Parser};
use tracing::debug;

use crate::LinterError;
use crate::history::most_recent_date;

/// Label carried by review reminder issues.
pub const REVIEW_LABEL: &str = "SOP-Review";

/// Date format used in reports and issue bodies.
const DATE_FORMAT: &str = "%Y.%m.%d";

/// An open issue on the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenIssue {
    pub number: u64,
    pub title: String,
    pub url: String,
}

/// `true` when more than `days` days have passed since `last_edit`.
pub fn is_due(last_edit: NaiveDate, today: NaiveDate, days: i64) -> bool {
    (today - last_edit).num_days() > days
}

/// The first open issue whose title mentions `identifier`.
pub fn find_existing_issue<'i>(identifier: &str, issues: &'i [OpenIssue]) -> Option<&'i OpenIssue> {
    issues.iter().find(|issue| issue.title.contains(identifier))
}

pub fn issue_title(file_name: &str) -> String {
    format!("[SOP Review] Review due: '{}'", file_name)
}

/// What goes into a reminder issue.
#[derive(Debug, Clone)]
pub struct ReminderContext<'a> {
    pub file_name: &'a str,
    pub file_path: &'a str,
    pub last_edit: NaiveDate,
    pub days: i64,
    /// `owner/name` of the hosting repository.
    pub repository: &'a str,
    pub charter_path: &'a str,
}

/// Markdown body of a reminder issue.
pub fn issue_body(ctx: &ReminderContext<'_>) -> String {
    let base = format!("https://github.com/{}/blob/main", ctx.repository);
    let file_path = ctx.file_path.trim_start_matches("./");
    format!(
        "## Periodic review due\n\
         \n\
         [`{name}`]({base}/{path}) was last edited on **{date}**, more than {days} days ago.\n\
         \n\
         The [SOP charter]({base}/{charter}) asks for every SOP to be reviewed at least once \
         every {days} days. Please check that the procedure still reflects current practice, \
         update it where needed and add a row to its Document History table.\n\
         \n\
         Close this issue once the review has been merged.\n",
        name = ctx.file_name,
        base = base,
        path = file_path,
        date = ctx.last_edit.format(DATE_FORMAT),
        days = ctx.days,
        charter = ctx.charter_path,
    )
}

/// Reads the newest Document History date of a document on disk.
#[derive(Debug, Default)]
pub struct HistoryReader {
    parser: MarkdownParser,
}

impl HistoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_edit_date(&self, path: &Path) -> Result<NaiveDate, LinterError> {
        debug!("Reading last edit date of {}", path.display());
        let source = fs::read_to_string(path)
            .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;

        let arena = AstArena::new();
        let root = self
            .parser
            .parse(&arena, &source)
            .map_err(|e| LinterError::parse(format!("{}: {}", path.display(), e)))?;

        most_recent_date(&root, &path.display().to_string())
    }
}

/// Review state of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReview {
    pub filepath: String,
    pub last_edit_date: String,
    pub due_review: bool,
    /// URL of an already open reminder.
    pub existing_issue: Option<String>,
    /// URL of the reminder created by this run.
    pub new_issue: Option<String>,
}

impl FileReview {
    pub fn new(path: &Path, last_edit: NaiveDate, due_review: bool) -> Self {
        Self {
            filepath: path.display().to_string(),
            last_edit_date: last_edit.format(DATE_FORMAT).to_string(),
            due_review,
            existing_issue: None,
            new_issue: None,
        }
    }
}

/// Summary of a review run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewReport {
    pub n_input_files: usize,
    pub n_files_due_review: usize,
    pub date_now: String,
    pub n_days_threshold: i64,
    pub n_created_issues: usize,
    pub all_files: Vec<FileReview>,
}

impl ReviewReport {
    pub fn new(today: NaiveDate, days: i64) -> Self {
        Self {
            n_input_files: 0,
            n_files_due_review: 0,
            date_now: today.format(DATE_FORMAT).to_string(),
            n_days_threshold: days,
            n_created_issues: 0,
            all_files: Vec::new(),
        }
    }

    pub fn push(&mut self, review: FileReview) {
        self.n_input_files += 1;
        if review.due_review {
            self.n_files_due_review += 1;
        }
        if review.new_issue.is_some() {
            self.n_created_issues += 1;
        }
        self.all_files.push(review);
    }

    pub fn due(&self) -> impl Iterator<Item = &FileReview> {
        self.all_files.iter().filter(|review| review.due_review)
    }
}

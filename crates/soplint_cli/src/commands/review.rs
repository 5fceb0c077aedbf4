//! Review command implementation

use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use miette::{IntoDiagnostic, Result, miette};
use soplint_core::review::{
    FileReview, HistoryReader, REVIEW_LABEL, ReminderContext, ReviewReport, find_existing_issue,
    is_due, issue_body, issue_title,
};
use soplint_core::Conventions;
use soplint_remote::GitHubClient;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::utils::{collect_inputs, create_tokio_runtime, load_config};

const TOKEN_VAR: &str = "GITHUB_TOKEN";

pub fn run_review(
    cli: &Cli,
    inputs: &[PathBuf],
    days_review: Option<i64>,
    create_issues: bool,
    repository: Option<&str>,
    api_url: &str,
) -> Result<bool> {
    let token = std::env::var(TOKEN_VAR).map_err(|_| {
        miette!(
            "GitHub token not found. Please set the '{}' environment variable.",
            TOKEN_VAR
        )
    })?;

    let config = load_config(cli)?;
    let days = days_review.unwrap_or(config.review_days);
    let repository = repository.unwrap_or(config.repository.as_str());
    let conventions = Conventions::from_config(&config).into_diagnostic()?;
    let files = collect_inputs(&config, inputs)?;

    let runtime = create_tokio_runtime()?;
    let client = GitHubClient::new(
        repository,
        &token,
        Duration::from_secs(config.request_timeout_secs),
    )
    .into_diagnostic()?
    .with_base_url(api_url);
    let issues = runtime
        .block_on(client.open_issues(REVIEW_LABEL))
        .into_diagnostic()?;
    debug!("{} open '{}' issues", issues.len(), REVIEW_LABEL);

    let today = Local::now().date_naive();
    let reader = HistoryReader::new();
    let mut report = ReviewReport::new(today, days);

    for path in &files {
        debug!("Checking {}", path.display());
        let last_edit = reader.last_edit_date(path).into_diagnostic()?;
        let due = is_due(last_edit, today, days);
        let mut review = FileReview::new(path, last_edit, due);

        if due {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let identifier = conventions
                .file_identifier(path)
                .unwrap_or(file_name.as_str());

            if let Some(issue) = find_existing_issue(identifier, &issues) {
                debug!("Existing issue for {}: {}", path.display(), issue.url);
                review.existing_issue = Some(issue.url.clone());
            } else if create_issues {
                let file_path = path.display().to_string();
                let body = issue_body(&ReminderContext {
                    file_name: &file_name,
                    file_path: &file_path,
                    last_edit,
                    days,
                    repository,
                    charter_path: &config.charter_path,
                });
                match runtime.block_on(client.create_issue(
                    &issue_title(&file_name),
                    &body,
                    &[REVIEW_LABEL],
                )) {
                    Ok(issue) => review.new_issue = Some(issue.url),
                    Err(e) => warn!("Failed to create issue for '{}': {}", path.display(), e),
                }
            }
        }

        report.push(review);
    }

    if cli.verbosity > 0 {
        println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    }

    Ok(false)
}

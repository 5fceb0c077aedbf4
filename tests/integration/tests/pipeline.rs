//! End-to-end tests across the core engine and the remote collaborators.
//!
//! Documents come from the CLI fixture repository, copied into a temporary
//! directory with a `.git` root marker.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use soplint_core::index::{IDENTIFIER_COLUMN, render};
use soplint_core::review::{
    HistoryReader, REVIEW_LABEL, find_existing_issue, is_due, issue_title,
};
use soplint_core::{
    Difference, FileFinder, IndexFormat, IndexGenerator, IndexTable, LintContext, Linter,
    ProbeOutcome, RemoteProbe, SopConfig, compare_indexes,
};
use soplint_remote::{GitHubClient, LinkChecker};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONFORMING: &str = "sops/european-level/GDI-SOP0001_data-access-request.md";

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn fixture_repo() -> TempDir {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../crates/soplint_cli/tests/fixtures/repo");
    let dir = tempfile::tempdir().unwrap();
    copy_dir(&fixtures, dir.path());
    fs::create_dir(dir.path().join(".git")).unwrap();
    dir
}

fn sop_files(config: &SopConfig, repo: &TempDir) -> Vec<PathBuf> {
    FileFinder::new(&config.identifier_prefix, &config.exclude)
        .unwrap()
        .collect(&[repo.path().join("sops")])
}

/// Waits on the async link checker from the synchronous linter.
struct RuntimeProbe<'r> {
    runtime: &'r Runtime,
    checker: LinkChecker,
}

impl RemoteProbe for RuntimeProbe<'_> {
    fn probe(&self, url: &str) -> ProbeOutcome {
        self.runtime.block_on(self.checker.check(url))
    }
}

mod lint {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fixture_repository_is_clean() {
        let repo = fixture_repo();
        let config = SopConfig::default();
        let files = sop_files(&config, &repo);
        assert_eq!(files.len(), 2);

        let linter = Linter::new(config).unwrap();
        let mut ctx = LintContext::new(&files, linter.config());
        let report = linter.lint_files(&mut ctx).unwrap();

        for (path, findings) in report.iter() {
            assert!(findings.is_empty(), "{}: {:?}", path, findings);
        }
    }

    #[test]
    fn remote_references_are_probed_over_http() {
        let runtime = Runtime::new().unwrap();
        let mock_server = runtime.block_on(MockServer::start());
        runtime.block_on(async {
            Mock::given(method("HEAD"))
                .and(path("/org/live"))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&mock_server)
                .await;
            Mock::given(method("HEAD"))
                .and(path("/org/gone"))
                .respond_with(ResponseTemplate::new(404))
                .expect(1)
                .mount(&mock_server)
                .await;
        });

        let repo = fixture_repo();
        let doc = repo.path().join(CONFORMING);
        let live = format!("{}/org/live", mock_server.uri());
        let gone = format!("{}/org/gone", mock_server.uri());
        let content = fs::read_to_string(&doc).unwrap().replace(
            "- [Project website](https://example.org/gdi)\n",
            &format!("- [Live]({live})\n- [Gone]({gone})\n- [Gone again]({gone})\n"),
        );
        fs::write(&doc, content).unwrap();

        let config = SopConfig {
            remote_hosts: vec!["127.0.0.1".to_string()],
            ..SopConfig::default()
        };
        let files = vec![doc.clone()];
        let probe = RuntimeProbe {
            runtime: &runtime,
            checker: LinkChecker::new(Duration::from_secs(5)).unwrap(),
        };

        let linter = Linter::new(config).unwrap();
        let mut ctx = LintContext::new(&files, linter.config()).with_probe(Some(&probe));
        let report = linter.lint_files(&mut ctx).unwrap();

        let findings = report.get(&doc).unwrap();
        let expected = format!("Reference '{gone}' could not be found (HTTP 404).");
        assert_eq!(findings.errors, vec![expected.clone(), expected]);
        assert!(findings.warnings.is_empty());

        runtime.block_on(mock_server.verify());
    }
}

mod index {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index_table(files: &[PathBuf]) -> IndexTable {
        let entries = IndexGenerator::new().parse_all(files).unwrap();
        let markdown = render(&entries, IndexFormat::Markdown).unwrap();
        IndexTable::parse_markdown(&format!("# SOP index\n\n{markdown}")).unwrap()
    }

    #[test]
    fn generated_index_compares_clean_against_itself() {
        let repo = fixture_repo();
        let files = sop_files(&SopConfig::default(), &repo);
        let existing = index_table(&files);

        let entries = IndexGenerator::new().parse_all(&files).unwrap();
        assert_eq!(entries[0].identifier, "GDI-SOP0001");
        assert_eq!(entries[1].steps, 3);
        assert_eq!(entries[1].gdi_node, "ESP");

        let comparison = compare_indexes(&existing, &IndexTable::from_entries(&entries));
        assert!(!comparison.has_differences(), "{:?}", comparison.differences);
        assert!(existing.columns().iter().any(|c| c == IDENTIFIER_COLUMN));
    }

    #[test]
    fn added_step_shows_as_column_difference() {
        let repo = fixture_repo();
        let files = sop_files(&SopConfig::default(), &repo);
        let existing = index_table(&files);

        let doc = repo.path().join(CONFORMING);
        let mut content = fs::read_to_string(&doc).unwrap();
        content = content.replace(
            "### References",
            "#### 8.3 Close the request\n\n| Step | Action | Responsible |\n|------|--------|-------------|\n| 3 | Archive the request. | Data steward |\n\n### References",
        );
        fs::write(&doc, content).unwrap();

        let new = IndexTable::from_entries(&IndexGenerator::new().parse_all(&files).unwrap());
        let comparison = compare_indexes(&existing, &new);

        assert_eq!(comparison.differences.len(), 1);
        match &comparison.differences[0] {
            Difference::Columns {
                identifier,
                columns,
            } => {
                assert_eq!(identifier, "GDI-SOP0001");
                assert_eq!(columns.len(), 1);
                assert_eq!(columns["Nº steps"].existing, "2");
                assert_eq!(columns["Nº steps"].new, "3");
            }
            other => panic!("Expected a column difference, got {:?}", other),
        }
    }
}

mod review {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn due_documents_are_matched_against_open_issues() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/sops/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "number": 9,
                "title": issue_title("GDI-SOP0002_data-transfer.md"),
                "html_url": "https://github.com/org/sops/issues/9"
            }])))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::new("org/sops", "secret", Duration::from_secs(5))
            .unwrap()
            .with_base_url(mock_server.uri());
        let issues = client.open_issues(REVIEW_LABEL).await.unwrap();

        let repo = fixture_repo();
        let files = sop_files(&SopConfig::default(), &repo);
        let reader = HistoryReader::new();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let due: Vec<(bool, Option<u64>)> = files
            .iter()
            .zip(["GDI-SOP0001", "GDI-SOP0002"])
            .map(|(path, identifier)| {
                let last_edit = reader.last_edit_date(path).unwrap();
                let due = is_due(last_edit, today, 365);
                let issue = find_existing_issue(identifier, &issues).map(|issue| issue.number);
                (due, issue)
            })
            .collect();

        // 2024.05.01 is recent; 2023.03.10 is more than a year old.
        assert_eq!(due, vec![(false, None), (true, Some(9))]);
    }
}

//! Integration tests for CLI behavior
//!
//! Every test runs the binary inside a copy of the fixture repository.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFORMING: &str = "sops/european-level/GDI-SOP0001_data-access-request.md";

fn soplint_cmd(repo: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_soplint"));
    cmd.current_dir(repo.path());
    cmd.env_remove("GITHUB_TOKEN");
    cmd
}

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

/// Copy of `tests/fixtures/repo` with a `.git` root marker.
fn fixture_repo() -> TempDir {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/repo");
    let dir = tempfile::tempdir().unwrap();
    copy_dir(&fixtures, dir.path());
    fs::create_dir(dir.path().join(".git")).unwrap();
    dir
}

fn edit(repo: &TempDir, relative: &str, from: &str, to: &str) {
    let path = repo.path().join(relative);
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(from), "fixture does not contain {from:?}");
    fs::write(&path, content.replace(from, to)).unwrap();
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        Command::new(env!("CARGO_BIN_EXE_soplint"))
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        Command::new(env!("CARGO_BIN_EXE_soplint"))
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod lint_command {
    use super::*;

    #[test]
    fn conforming_repository_passes() {
        let repo = fixture_repo();
        soplint_cmd(&repo)
            .args(["-v", "1", "lint", "sops", "--no-remote"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Checked 2 files, found 0 errors and 0 warnings",
            ));
    }

    #[test]
    fn step_gap_fails_with_exit_code_one() {
        let repo = fixture_repo();
        edit(&repo, CONFORMING, "#### 8.2 Assess", "#### 8.3 Assess");

        soplint_cmd(&repo)
            .args(["-v", "1", "lint", "sops", "--no-remote"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "is numbered 8.3 but 8.2 was expected",
            ));
    }

    #[test]
    fn json_report_lists_every_file() {
        let repo = fixture_repo();
        let output = soplint_cmd(&repo)
            .args(["-v", "1", "lint", "sops", "--no-remote", "-f", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let files = report.as_object().unwrap();
        assert_eq!(files.len(), 2);
        for findings in files.values() {
            assert_eq!(findings["errors"], serde_json::json!([]));
            assert_eq!(findings["warnings"], serde_json::json!([]));
        }
    }

    #[test]
    fn prints_nothing_by_default() {
        let repo = fixture_repo();
        soplint_cmd(&repo)
            .args(["lint", "sops", "--no-remote"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn strict_mode_turns_warnings_into_errors() {
        let repo = fixture_repo();
        edit(
            &repo,
            CONFORMING,
            "It applies to every node of the GDI.",
            "It applies to every node of the GDI and follows FAIR principles.",
        );

        soplint_cmd(&repo)
            .args(["-v", "1", "lint", "sops", "--no-remote"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "warning: Acronym 'FAIR' is not defined in the glossary.",
            ));

        soplint_cmd(&repo)
            .args(["-v", "1", "lint", "sops", "--no-remote", "--strict"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "error: Acronym 'FAIR' is not defined in the glossary.",
            ));
    }

    #[test]
    fn missing_charter_is_fatal() {
        let repo = fixture_repo();
        fs::remove_file(repo.path().join("docs/GDI-SOP_charter.md")).unwrap();

        soplint_cmd(&repo)
            .args(["lint", "sops", "--no-remote"])
            .assert()
            .code(2);
    }

    #[test]
    fn invalid_config_is_fatal() {
        let repo = fixture_repo();
        fs::write(repo.path().join(".soplint.json"), r#"{ "reviewDays": -1 }"#).unwrap();

        soplint_cmd(&repo)
            .args(["lint", "sops", "--no-remote"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("reviewDays"));
    }

    #[test]
    fn config_can_disable_remote_checks() {
        let repo = fixture_repo();
        fs::write(
            repo.path().join("soplint.json"),
            r#"{ "checkRemote": false, "exclude": ["**/node-specific/**"] }"#,
        )
        .unwrap();

        soplint_cmd(&repo)
            .args(["-c", "soplint.json", "-v", "1", "lint", "sops"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Checked 1 files"));
    }
}

mod index_command {
    use super::*;

    #[test]
    fn prints_markdown_index() {
        let repo = fixture_repo();
        soplint_cmd(&repo)
            .args(["index", "sops"])
            .assert()
            .success()
            .stdout(predicate::str::contains("| Identifier"))
            .stdout(predicate::str::contains("GDI-SOP0001"))
            .stdout(predicate::str::contains("GDI-SOP0002"));
    }

    #[test]
    fn prints_csv_index() {
        let repo = fixture_repo();
        soplint_cmd(&repo)
            .args(["index", "sops", "-f", "csv"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "Name,Identifier,Template version,Topic,Type,GDI Node,Instance version,Nº steps,Last modified",
            ));
    }

    #[test]
    fn refuses_to_overwrite_output() {
        let repo = fixture_repo();
        soplint_cmd(&repo)
            .args(["index", "sops", "-o", "index.md"])
            .assert()
            .success();
        assert!(repo.path().join("index.md").is_file());

        soplint_cmd(&repo)
            .args(["index", "sops", "-o", "index.md"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("overwritten"));
    }

    #[test]
    fn empty_input_is_fatal() {
        let repo = fixture_repo();
        fs::create_dir(repo.path().join("empty")).unwrap();
        soplint_cmd(&repo)
            .args(["index", "empty"])
            .assert()
            .code(2);
    }
}

mod compare_index_command {
    use super::*;

    fn write_index(repo: &TempDir) {
        soplint_cmd(repo)
            .args(["index", "sops", "-o", "index.md"])
            .assert()
            .success();
    }

    #[test]
    fn identical_index_passes() {
        let repo = fixture_repo();
        write_index(&repo);

        soplint_cmd(&repo)
            .args(["-v", "1", "compare-index", "index.md", "sops"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"differences\": []"));
    }

    #[test]
    fn stale_index_fails() {
        let repo = fixture_repo();
        write_index(&repo);
        edit(&repo, "index.md", "2024.05.01", "2024.04.01");

        soplint_cmd(&repo)
            .args(["-v", "1", "compare-index", "index.md", "sops"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("\"Last modified\""))
            .stdout(predicate::str::contains("\"existing\": \"2024.04.01\""));
    }

    #[test]
    fn missing_index_is_fatal() {
        let repo = fixture_repo();
        soplint_cmd(&repo)
            .args(["compare-index", "missing.md", "sops"])
            .assert()
            .code(2);
    }
}

mod review_command {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn requires_github_token() {
        let repo = fixture_repo();
        soplint_cmd(&repo)
            .args(["review", "sops"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("GITHUB_TOKEN"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn reports_and_creates_missing_reminders() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/sops/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "number": 5,
                "title": "[SOP Review] Review due: 'GDI-SOP0001_data-access-request.md'",
                "html_url": "https://github.com/org/sops/issues/5"
            }])))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/org/sops/issues"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "number": 6,
                "title": "[SOP Review] Review due: 'GDI-SOP0002_data-transfer.md'",
                "html_url": "https://github.com/org/sops/issues/6"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let repo = fixture_repo();
        let output = soplint_cmd(&repo)
            .env("GITHUB_TOKEN", "secret")
            .args([
                "-v",
                "1",
                "review",
                "sops",
                "--days-review",
                "0",
                "--create-issues",
                "-r",
                "org/sops",
                "--api-url",
            ])
            .arg(mock_server.uri())
            .output()
            .unwrap();
        assert!(output.status.success(), "{:?}", output);

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["n_input_files"], 2);
        assert_eq!(report["n_files_due_review"], 2);
        assert_eq!(report["n_created_issues"], 1);
        assert_eq!(
            report["all_files"][0]["existing_issue"],
            "https://github.com/org/sops/issues/5"
        );
        assert_eq!(
            report["all_files"][1]["new_issue"],
            "https://github.com/org/sops/issues/6"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn recent_documents_are_not_due() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let repo = fixture_repo();
        let output = soplint_cmd(&repo)
            .env("GITHUB_TOKEN", "secret")
            .args(["-v", "1", "review", "sops", "--days-review", "1000000", "--create-issues"])
            .args(["--api-url", mock_server.uri().as_str()])
            .output()
            .unwrap();
        assert!(output.status.success(), "{:?}", output);

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["n_files_due_review"], 0);
        assert_eq!(report["all_files"][1]["last_edit_date"], "2023.03.10");
    }
}

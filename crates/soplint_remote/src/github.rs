//! GitHub issue client for review reminders.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use soplint_core::OpenIssue;
use tracing::{debug, info};
use url::Url;

use crate::error::RemoteError;

pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Issues requested per page.
const PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct IssueResponse {
    number: u64,
    title: String,
    html_url: String,
    /// Present when the "issue" is a pull request.
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

impl From<IssueResponse> for OpenIssue {
    fn from(issue: IssueResponse) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            url: issue.html_url,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewIssue<'a> {
    title: &'a str,
    body: &'a str,
    labels: &'a [&'a str],
}

/// Client for the issues of one repository.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// `repository` is `owner/name`.
    pub fn new(repository: &str, token: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let (owner, repo) = repository
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| RemoteError::InvalidRepository(repository.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| RemoteError::ClientBuildError(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("soplint/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| RemoteError::ClientBuildError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: GITHUB_API_URL.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Set the API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn issues_url(&self) -> Result<Url, RemoteError> {
        let raw = format!(
            "{}/repos/{}/{}/issues",
            self.base_url.trim_end_matches('/'),
            self.owner,
            self.repo
        );
        Url::parse(&raw).map_err(|e| RemoteError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// All open issues carrying `label`. Pull requests are skipped.
    pub async fn open_issues(&self, label: &str) -> Result<Vec<OpenIssue>, RemoteError> {
        let mut issues = Vec::new();
        let mut page = 1usize;

        loop {
            let mut url = self.issues_url()?;
            url.query_pairs_mut()
                .append_pair("state", "open")
                .append_pair("labels", label)
                .append_pair("per_page", &PAGE_SIZE.to_string())
                .append_pair("page", &page.to_string());

            debug!("Listing issues: {}", url);
            let response = self.client.get(url.clone()).send().await?;
            if !response.status().is_success() {
                return Err(RemoteError::HttpError {
                    status: response.status(),
                    url: url.to_string(),
                });
            }

            let batch: Vec<IssueResponse> = response.json().await?;
            let count = batch.len();
            issues.extend(
                batch
                    .into_iter()
                    .filter(|issue| issue.pull_request.is_none())
                    .map(OpenIssue::from),
            );

            if count < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(issues)
    }

    /// Opens a new issue and returns it.
    pub async fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[&str],
    ) -> Result<OpenIssue, RemoteError> {
        let url = self.issues_url()?;
        let response = self
            .client
            .post(url.clone())
            .json(&NewIssue {
                title,
                body,
                labels,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::HttpError {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let issue: OpenIssue = response.json::<IssueResponse>().await?.into();
        info!("Created issue #{}: {}", issue.number, issue.url);
        Ok(issue)
    }
}

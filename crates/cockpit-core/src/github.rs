//! Blocking client for the tracker's issues API.
//!
//! Covers exactly the operations the jobs consume: list open issues,
//! edit body, change state, add an assignee, create a comment. Calls are
//! made one at a time; a 30-second timeout bounds each request.

use crate::config::CockpitConfig;
use crate::error::{CockpitError, Result};
use reqwest::Method;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("cockpit-sync/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: usize = 100;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub assignees: Vec<Account>,
    // The issues listing mixes pull requests in; they carry this key.
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    pub fn has_assignee(&self, login: &str) -> bool {
        self.assignees.iter().any(|account| account.login == login)
    }

    fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct IssueClient {
    http: reqwest::blocking::Client,
    api_base: String,
    repo: String,
    token: String,
}

impl IssueClient {
    pub fn new(config: &CockpitConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            repo: config.repo.clone(),
            token: config.token.clone(),
        })
    }

    fn issues_url(&self, tail: &str) -> String {
        format!("{}/repos/{}/issues{}", self.api_base, self.repo, tail)
    }

    fn request(&self, method: Method, url: &str) -> reqwest::blocking::RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
    }

    /// All open issues of the repository, paginated until a short page.
    /// Pull requests surfaced by the listing are dropped.
    pub fn list_open_issues(&self) -> Result<Vec<Issue>> {
        let url = self.issues_url("");
        let per_page = PER_PAGE.to_string();
        let mut issues = Vec::new();
        let mut page = 1u32;
        loop {
            let page_param = page.to_string();
            let resp = self
                .request(Method::GET, &url)
                .query(&[
                    ("state", "open"),
                    ("per_page", per_page.as_str()),
                    ("page", page_param.as_str()),
                ])
                .send()?;
            let resp = check("GET", &url, resp)?;
            let batch: Vec<Issue> = resp.json()?;
            let full_page = batch.len() == PER_PAGE;
            issues.extend(batch.into_iter().filter(|issue| !issue.is_pull_request()));
            if !full_page {
                break;
            }
            page += 1;
        }
        Ok(issues)
    }

    pub fn update_body(&self, number: u64, body: &str) -> Result<()> {
        let url = self.issues_url(&format!("/{number}"));
        let resp = self
            .request(Method::PATCH, &url)
            .json(&serde_json::json!({ "body": body }))
            .send()?;
        check("PATCH", &url, resp)?;
        Ok(())
    }

    pub fn set_state(&self, number: u64, state: IssueState) -> Result<()> {
        let url = self.issues_url(&format!("/{number}"));
        let resp = self
            .request(Method::PATCH, &url)
            .json(&serde_json::json!({ "state": state.as_str() }))
            .send()?;
        check("PATCH", &url, resp)?;
        Ok(())
    }

    pub fn add_assignee(&self, number: u64, login: &str) -> Result<()> {
        let url = self.issues_url(&format!("/{number}/assignees"));
        let resp = self
            .request(Method::POST, &url)
            .json(&serde_json::json!({ "assignees": [login] }))
            .send()?;
        check("POST", &url, resp)?;
        Ok(())
    }

    pub fn create_comment(&self, number: u64, body: &str) -> Result<()> {
        let url = self.issues_url(&format!("/{number}/comments"));
        let resp = self
            .request(Method::POST, &url)
            .json(&serde_json::json!({ "body": body }))
            .send()?;
        check("POST", &url, resp)?;
        Ok(())
    }
}

/// Turn a non-2xx response into a typed error carrying status and a
/// truncated response body.
fn check(
    method: &'static str,
    url: &str,
    resp: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message: String = resp
        .text()
        .unwrap_or_default()
        .trim()
        .chars()
        .take(200)
        .collect();
    Err(CockpitError::ApiStatus {
        status: status.as_u16(),
        method,
        url: url.to_string(),
        message,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

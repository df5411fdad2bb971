//! The Extras Notifier job: post blocker, asset-verification, and QA
//! status comments to matching open issues.
//!
//! Comments are always appended, never deduplicated; re-running on an
//! unchanged CSV posts the same comments again.

use crate::classify;
use crate::config::CockpitConfig;
use crate::error::Result;
use crate::github::IssueClient;
use crate::row;
use serde::Serialize;
use tracing::{debug, info};

/// What one notifier run did (or, under dry-run, would have done).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyReport {
    pub rows: usize,
    pub skipped: usize,
    pub matched_issues: usize,
    pub comments_posted: usize,
}

pub fn run(config: &CockpitConfig) -> Result<NotifyReport> {
    let client = IssueClient::new(config)?;
    let mut report = NotifyReport::default();
    for record in row::read_rows(&config.csv_path)? {
        let row = record?;
        report.rows += 1;
        if row.module.is_empty() {
            report.skipped += 1;
            debug!("skipping row with empty module");
            continue;
        }
        let title = row.issue_title();
        // Re-fetched once per row, same as the sync job.
        let issues = client.list_open_issues()?;
        let comments = classify::comments_for_row(&row);
        for issue in issues.iter().filter(|issue| issue.title == title) {
            report.matched_issues += 1;
            for comment in &comments {
                if config.dry_run {
                    info!(number = issue.number, comment = comment.as_str(), "dry-run: would comment");
                } else {
                    client.create_comment(issue.number, comment)?;
                    info!(number = issue.number, comment = comment.as_str(), "comment posted");
                }
                report.comments_posted += 1;
            }
        }
    }
    info!(
        rows = report.rows,
        comments = report.comments_posted,
        "notify complete"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{ASSET_PENDING_COMMENT, QA_FAILED_COMMENT, QA_PASSED_COMMENT};
    use mockito::Matcher;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("cockpit.csv");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn config_for(server: &mockito::Server, csv: &Path) -> CockpitConfig {
        CockpitConfig::new("octo/cockpit", csv, "test-token").with_api_base(server.url())
    }

    fn mock_open_issues(server: &mut mockito::Server, body: &str, hits: usize) -> mockito::Mock {
        server
            .mock("GET", "/repos/octo/cockpit/issues")
            .match_query(Matcher::UrlEncoded("state".into(), "open".into()))
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create()
    }

    fn comment_mock(
        server: &mut mockito::Server,
        number: u64,
        body: &str,
        hits: usize,
    ) -> mockito::Mock {
        server
            .mock("POST", format!("/repos/octo/cockpit/issues/{number}/comments").as_str())
            .match_body(Matcher::Json(serde_json::json!({ "body": body })))
            .with_body("{}")
            .expect(hits)
            .create()
    }

    #[test]
    fn pending_asset_and_passed_qa_post_exactly_two_comments() {
        let dir = TempDir::new().unwrap();
        let csv = write_csv(
            &dir,
            "Module,Blocker,Asset Verified,QA\nAuth,none,pending,passed\n",
        );
        let mut server = mockito::Server::new();
        mock_open_issues(
            &mut server,
            r#"[{"number": 1, "title": "Auth Module", "body": ""}]"#,
            1,
        );
        let pending = comment_mock(&mut server, 1, ASSET_PENDING_COMMENT, 1);
        let passed = comment_mock(&mut server, 1, QA_PASSED_COMMENT, 1);
        let blocker = server
            .mock("POST", "/repos/octo/cockpit/issues/1/comments")
            .match_body(Matcher::Regex("Blocker reported".to_string()))
            .expect(0)
            .create();

        let report = run(&config_for(&server, &csv)).unwrap();
        pending.assert();
        passed.assert();
        blocker.assert();
        assert_eq!(report.matched_issues, 1);
        assert_eq!(report.comments_posted, 2);
    }

    #[test]
    fn blocker_comment_carries_the_cell_text() {
        let dir = TempDir::new().unwrap();
        let csv = write_csv(&dir, "Module,Blocker\nAuth,waiting on infra\n");
        let mut server = mockito::Server::new();
        mock_open_issues(
            &mut server,
            r#"[{"number": 4, "title": "Auth Module", "body": ""}]"#,
            1,
        );
        let blocker = comment_mock(
            &mut server,
            4,
            "🚨 Blocker reported in Cockpit CSV: waiting on infra",
            1,
        );

        let report = run(&config_for(&server, &csv)).unwrap();
        blocker.assert();
        assert_eq!(report.comments_posted, 1);
    }

    #[test]
    fn rerunning_posts_duplicate_comments() {
        let dir = TempDir::new().unwrap();
        let csv = write_csv(&dir, "Module,QA\nAuth,ok\n");
        let mut server = mockito::Server::new();
        mock_open_issues(
            &mut server,
            r#"[{"number": 1, "title": "Auth Module", "body": ""}]"#,
            2,
        );
        let passed = comment_mock(&mut server, 1, QA_PASSED_COMMENT, 2);

        let config = config_for(&server, &csv);
        run(&config).unwrap();
        run(&config).unwrap();
        passed.assert();
    }

    #[test]
    fn unmatched_rows_post_nothing() {
        let dir = TempDir::new().unwrap();
        let csv = write_csv(&dir, "Module,QA\nAuth,ok\n");
        let mut server = mockito::Server::new();
        mock_open_issues(
            &mut server,
            r#"[{"number": 1, "title": "Billing Module", "body": ""}]"#,
            1,
        );
        let any_comment = server
            .mock("POST", "/repos/octo/cockpit/issues/1/comments")
            .expect(0)
            .create();

        let report = run(&config_for(&server, &csv)).unwrap();
        any_comment.assert();
        assert_eq!(report.matched_issues, 0);
        assert_eq!(report.comments_posted, 0);
    }

    #[test]
    fn empty_module_rows_do_no_lookup() {
        let dir = TempDir::new().unwrap();
        let csv = write_csv(&dir, "Module,QA\n,ok\n");
        let mut server = mockito::Server::new();
        let listing = mock_open_issues(&mut server, "[]", 0);

        let report = run(&config_for(&server, &csv)).unwrap();
        listing.assert();
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn every_issue_sharing_the_title_is_notified() {
        let dir = TempDir::new().unwrap();
        let csv = write_csv(&dir, "Module,QA\nAuth,fail\n");
        let mut server = mockito::Server::new();
        mock_open_issues(
            &mut server,
            r#"[{"number": 1, "title": "Auth Module", "body": ""},
               {"number": 2, "title": "Auth Module", "body": ""}]"#,
            1,
        );
        let first = comment_mock(&mut server, 1, QA_FAILED_COMMENT, 1);
        let second = comment_mock(&mut server, 2, QA_FAILED_COMMENT, 1);

        let report = run(&config_for(&server, &csv)).unwrap();
        first.assert();
        second.assert();
        assert_eq!(report.matched_issues, 2);
        assert_eq!(report.comments_posted, 2);
    }

    #[test]
    fn dry_run_posts_nothing() {
        let dir = TempDir::new().unwrap();
        let csv = write_csv(&dir, "Module,QA\nAuth,ok\n");
        let mut server = mockito::Server::new();
        mock_open_issues(
            &mut server,
            r#"[{"number": 1, "title": "Auth Module", "body": ""}]"#,
            1,
        );
        let any_comment = server
            .mock("POST", "/repos/octo/cockpit/issues/1/comments")
            .expect(0)
            .create();

        let report = run(&config_for(&server, &csv).with_dry_run(true)).unwrap();
        any_comment.assert();
        assert_eq!(report.comments_posted, 1);
    }
}

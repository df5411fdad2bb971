//! The Cockpit Sync job: push row metadata, ownership, and status from the
//! cockpit CSV into matching open issues.

use crate::config::CockpitConfig;
use crate::error::Result;
use crate::extras;
use crate::github::{Issue, IssueClient, IssueState};
use crate::row::{self, CockpitRow};
use serde::Serialize;
use tracing::{debug, info, warn};

/// What one sync run did (or, under dry-run, would have done).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub rows: usize,
    pub skipped: usize,
    pub matched_issues: usize,
    pub bodies_updated: usize,
    pub assignees_added: usize,
    pub closed: usize,
    pub reopened: usize,
}

pub fn run(config: &CockpitConfig) -> Result<SyncReport> {
    let client = IssueClient::new(config)?;
    let mut report = SyncReport::default();
    for record in row::read_rows(&config.csv_path)? {
        let row = record?;
        report.rows += 1;
        if row.module.is_empty() {
            report.skipped += 1;
            debug!("skipping row with empty module");
            continue;
        }
        sync_row(&client, config, &row, &mut report)?;
    }
    info!(
        rows = report.rows,
        matched = report.matched_issues,
        bodies = report.bodies_updated,
        "sync complete"
    );
    Ok(report)
}

fn sync_row(
    client: &IssueClient,
    config: &CockpitConfig,
    row: &CockpitRow,
    report: &mut SyncReport,
) -> Result<()> {
    let title = row.issue_title();
    // Open issues are re-fetched for every row so a state change made for
    // an earlier row is visible here.
    let issues = client.list_open_issues()?;
    let matched: Vec<&Issue> = issues.iter().filter(|issue| issue.title == title).collect();
    if matched.is_empty() {
        debug!(%title, "no open issue matches");
        return Ok(());
    }
    let extras = extras::render_extras(row);
    for issue in matched {
        report.matched_issues += 1;
        info!(number = issue.number, %title, "syncing issue");

        if let Some(block) = &extras {
            let body = extras::apply_extras(issue.body_text(), block);
            if config.dry_run {
                info!(number = issue.number, "dry-run: would update body");
            } else {
                client.update_body(issue.number, &body)?;
                info!(number = issue.number, "body updated");
            }
            report.bodies_updated += 1;
        }

        if !row.owner.is_empty() && !issue.has_assignee(&row.owner) {
            if config.dry_run {
                info!(number = issue.number, owner = %row.owner, "dry-run: would add assignee");
                report.assignees_added += 1;
            } else {
                // Unknown or departed accounts must not abort the run.
                match client.add_assignee(issue.number, &row.owner) {
                    Ok(()) => {
                        info!(number = issue.number, owner = %row.owner, "assignee added");
                        report.assignees_added += 1;
                    }
                    Err(err) => warn!(
                        number = issue.number,
                        owner = %row.owner,
                        error = %err,
                        "failed to add assignee"
                    ),
                }
            }
        }

        if let Some(state) = desired_state(&row.done) {
            if config.dry_run {
                info!(number = issue.number, %state, "dry-run: would set state");
            } else {
                client.set_state(issue.number, state)?;
                info!(number = issue.number, %state, "state set");
            }
            match state {
                IssueState::Closed => report.closed += 1,
                IssueState::Open => report.reopened += 1,
            }
        }
    }
    Ok(())
}

/// Done cell → desired issue state. Anything besides a case-insensitive
/// yes/no leaves the state alone.
fn desired_state(done: &str) -> Option<IssueState> {
    match done.to_lowercase().as_str() {
        "yes" => Some(IssueState::Closed),
        "no" => Some(IssueState::Open),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Status classification for the notifier: cell value → fixed comment.
//!
//! Each table maps a set of accepted (lowercased) values to one message;
//! first matching rule wins. Values are lowercased but never trimmed, so
//! `"Pending "` with a trailing space matches nothing.

use crate::row::CockpitRow;

pub const ASSET_PENDING_COMMENT: &str = "⚠️ Asset verification incomplete or pending.";
pub const ASSET_VERIFIED_COMMENT: &str = "✅ Asset verified.";
pub const QA_FAILED_COMMENT: &str = "❌ QA failed.";
pub const QA_PASSED_COMMENT: &str = "✔️ QA passed.";

struct StatusRule {
    values: &'static [&'static str],
    message: &'static str,
}

const ASSET_RULES: &[StatusRule] = &[
    StatusRule {
        values: &["no", "pending"],
        message: ASSET_PENDING_COMMENT,
    },
    StatusRule {
        values: &["yes"],
        message: ASSET_VERIFIED_COMMENT,
    },
];

const QA_RULES: &[StatusRule] = &[
    StatusRule {
        values: &["fail", "failed"],
        message: QA_FAILED_COMMENT,
    },
    StatusRule {
        values: &["pass", "passed", "ok"],
        message: QA_PASSED_COMMENT,
    },
];

fn lookup(rules: &[StatusRule], value: &str) -> Option<&'static str> {
    let value = value.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.values.contains(&value.as_str()))
        .map(|rule| rule.message)
}

/// Blocker cell → alert comment carrying the literal cell text.
/// Fires when the value is non-empty and not a case-insensitive "none".
pub fn blocker_comment(value: &str) -> Option<String> {
    if value.is_empty() || value.to_lowercase() == "none" {
        None
    } else {
        Some(format!("🚨 Blocker reported in Cockpit CSV: {value}"))
    }
}

pub fn asset_comment(value: &str) -> Option<&'static str> {
    lookup(ASSET_RULES, value)
}

pub fn qa_comment(value: &str) -> Option<&'static str> {
    lookup(QA_RULES, value)
}

/// Every comment a row produces, in posting order: blocker, asset, QA.
pub fn comments_for_row(row: &CockpitRow) -> Vec<String> {
    let mut comments = Vec::new();
    if let Some(comment) = blocker_comment(&row.blocker) {
        comments.push(comment);
    }
    if let Some(comment) = asset_comment(&row.asset_verified) {
        comments.push(comment.to_string());
    }
    if let Some(comment) = qa_comment(&row.qa) {
        comments.push(comment.to_string());
    }
    comments
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

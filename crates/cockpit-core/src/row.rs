//! The cockpit CSV row model.
//!
//! One `CockpitRow` per CSV line, mapped by header name. Cells are kept
//! verbatim (no trimming); columns absent from the header read as empty
//! strings and unknown columns are ignored, so the sheet can grow without
//! breaking either job.

use crate::error::{CockpitError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CockpitRow {
    #[serde(rename = "Module", default)]
    pub module: String,
    #[serde(rename = "Owner", default)]
    pub owner: String,
    #[serde(rename = "Done", default)]
    pub done: String,
    #[serde(rename = "Docs", default)]
    pub docs: String,
    #[serde(rename = "Assets", default)]
    pub assets: String,
    #[serde(rename = "Checklist", default)]
    pub checklist: String,
    #[serde(rename = "Blocker", default)]
    pub blocker: String,
    #[serde(rename = "Asset Verified", default)]
    pub asset_verified: String,
    #[serde(rename = "QA", default)]
    pub qa: String,
}

impl CockpitRow {
    /// Title of the tracker issue this row maps to.
    pub fn issue_title(&self) -> String {
        format!("{} Module", self.module)
    }
}

/// Open the cockpit CSV and iterate its rows. Rows are yielded one at a
/// time, so callers apply each row as it is read; a record that fails to
/// parse surfaces as that row's error, after the rows before it were
/// already handled. The reader is flexible: short records fill the
/// missing cells with empty strings instead of failing the run.
pub fn read_rows(path: &Path) -> Result<impl Iterator<Item = Result<CockpitRow>>> {
    if !path.exists() {
        return Err(CockpitError::CsvNotFound(path.display().to_string()));
    }
    let reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    Ok(reader
        .into_deserialize()
        .map(|record| record.map_err(CockpitError::from)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

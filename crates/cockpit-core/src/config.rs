//! Job configuration. Explicit values handed to each job at startup;
//! nothing reads global state except `token_from_env`.

use crate::error::{CockpitError, Result};
use std::path::PathBuf;

/// Repository the jobs target when no override is given.
pub const DEFAULT_REPO: &str = "LifeLoggerAI/UrAi";

/// Repository-relative location of the cockpit CSV.
pub const DEFAULT_CSV_PATH: &str = "assets/cockpit.csv";

/// Public GitHub REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Environment variable supplying the tracker token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone)]
pub struct CockpitConfig {
    /// Target repository as `owner/name`.
    pub repo: String,
    /// Path to the cockpit CSV.
    pub csv_path: PathBuf,
    /// Tracker authentication token.
    pub token: String,
    /// API base URL. Overridable so tests can point at a local server.
    pub api_base: String,
    /// Log mutations without performing them.
    pub dry_run: bool,
}

impl CockpitConfig {
    pub fn new(
        repo: impl Into<String>,
        csv_path: impl Into<PathBuf>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            repo: repo.into(),
            csv_path: csv_path.into(),
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            dry_run: false,
        }
    }

    /// Override the API base URL. A trailing slash is dropped so joined
    /// request paths stay well-formed.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let base: String = api_base.into();
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Read the tracker token from the environment.
/// An empty value counts as unset.
pub fn token_from_env() -> Result<String> {
    match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => Err(CockpitError::MissingToken),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Shared command-line surface for the two cockpit binaries.
//!
//! Both `cockpit-sync` and `notify-extras` take the same flags; each
//! binary flattens [`JobArgs`] into its own parser and hands the resolved
//! [`CockpitConfig`] to its job in `cockpit-core`.

pub mod output;

use anyhow::Result;
use clap::Args;
use cockpit_core::config::{self, CockpitConfig, DEFAULT_API_BASE, DEFAULT_CSV_PATH, DEFAULT_REPO};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct JobArgs {
    /// Target repository as owner/name
    #[arg(long, default_value = DEFAULT_REPO)]
    pub repo: String,

    /// Path to the cockpit CSV
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    pub csv: PathBuf,

    /// Tracker token (defaults to $GITHUB_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Tracker API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Log every mutation without performing any
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long, short = 'j')]
    pub json: bool,
}

impl JobArgs {
    /// Resolve the flags into the explicit config the jobs take.
    /// The token falls back to the environment; its absence is fatal.
    pub fn resolve(&self) -> Result<CockpitConfig> {
        let token = match &self.token {
            Some(token) => token.clone(),
            None => config::token_from_env()?,
        };
        Ok(CockpitConfig::new(self.repo.clone(), self.csv.clone(), token)
            .with_api_base(self.api_base.clone())
            .with_dry_run(self.dry_run))
    }

    /// Default log level for this invocation. Dry runs raise it to INFO so
    /// the would-be mutations show up; RUST_LOG overrides either way.
    pub fn default_log_level(&self) -> tracing::Level {
        if self.dry_run {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

pub fn init_tracing(default_level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CockpitError {
    #[error("GITHUB_TOKEN is not set")]
    MissingToken,

    #[error("cockpit CSV not found: {0}")]
    CsvNotFound(String),

    #[error("tracker API returned {status} for {method} {url}: {message}")]
    ApiStatus {
        status: u16,
        method: &'static str,
        url: String,
        message: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CockpitError>;

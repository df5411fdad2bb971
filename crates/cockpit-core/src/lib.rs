pub mod classify;
pub mod config;
pub mod error;
pub mod extras;
pub mod github;
pub mod notify;
pub mod row;
pub mod sync;

pub use error::{CockpitError, Result};

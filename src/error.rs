//! Crate error type
//!
//! The simulation never fails; errors only come from loading tuning data
//! and from wiring up the browser surface.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    InvalidTuning(&'static str),

    /// Browser environment missing something we need (window, canvas, 2d context)
    #[error("platform: {0}")]
    Platform(String),
}

pub type Result<T> = std::result::Result<T, Error>;

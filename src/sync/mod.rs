//! # Dataset Hub Sync
//!
//! Pushes the portfolio CSV to a Hugging Face dataset repository and
//! reads back repository metadata.

pub mod hf;

use thiserror::Error;

/// Hub sync errors
#[derive(Debug, Error)]
pub enum SyncError {
    /// No token passed and `HF_TOKEN` not set
    #[error("no hub token: pass --token or set HF_TOKEN")]
    MissingToken,
    /// Local CSV could not be read
    #[error("sync I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Request could not be sent
    #[error("hub request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Hub answered with a non-success status
    #[error("hub rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

pub use hf::{DatasetInfo, HfClient, PORTFOLIO_REMOTE_PATH, TOKEN_ENV_VAR};

//! CLI-specific error types
//!
//! Every command failure surfaces as a `CliError`; `main` prints it to
//! stderr and exits non-zero.

use std::fmt;
use std::io;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Schema could not be resolved or loaded
    SchemaError,
    /// CSV failed validation
    ValidationFailed,
    /// Portfolio CSV could not be loaded
    StoreError,
    /// HTTP server failed to start or crashed
    ServerError,
    /// Report rendering failed
    ReportError,
    /// Note generation failed
    NotesError,
    /// Hub sync failed
    SyncError,
    /// Database operation failed
    DbError,
    /// I/O error
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::SchemaError => "IMOBI_CLI_SCHEMA_ERROR",
            Self::ValidationFailed => "IMOBI_CLI_VALIDATION_FAILED",
            Self::StoreError => "IMOBI_CLI_STORE_ERROR",
            Self::ServerError => "IMOBI_CLI_SERVER_ERROR",
            Self::ReportError => "IMOBI_CLI_REPORT_ERROR",
            Self::NotesError => "IMOBI_CLI_NOTES_ERROR",
            Self::SyncError => "IMOBI_CLI_SYNC_ERROR",
            Self::DbError => "IMOBI_CLI_DB_ERROR",
            Self::IoError => "IMOBI_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Schema resolution or load failure
    pub fn schema_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SchemaError, msg)
    }

    /// Validation run found errors
    pub fn validation_failed(count: usize) -> Self {
        Self::new(
            CliErrorCode::ValidationFailed,
            format!("validation failed with {} error(s)", count),
        )
    }

    /// Portfolio load failure
    pub fn store_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StoreError, msg)
    }

    /// Server failure
    pub fn server_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServerError, msg)
    }

    /// Report failure
    pub fn report_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ReportError, msg)
    }

    /// Notes failure
    pub fn notes_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::NotesError, msg)
    }

    /// Sync failure
    pub fn sync_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SyncError, msg)
    }

    /// Database failure
    pub fn db_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::DbError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

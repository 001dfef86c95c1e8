//! Portfolio store error types

use std::fmt;
use std::io;

/// Store error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// CSV file unreadable
    LoadFailed,
    /// A row did not deserialize into a property record
    MalformedRecord,
}

impl StoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::LoadFailed => "IMOBI_STORE_LOAD_FAILED",
            StoreErrorCode::MalformedRecord => "IMOBI_STORE_MALFORMED_RECORD",
        }
    }
}

/// Portfolio store error
#[derive(Debug)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
}

impl StoreError {
    /// Create a load failure error
    pub fn load_failed(message: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::LoadFailed,
            message: message.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::MalformedRecord,
            message: message.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::load_failed(e.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

//! Validation and schema error types
//!
//! Two distinct failure surfaces live here:
//! - `ValidationError`: structured findings about the *input data*,
//!   accumulated by the validator and returned to the caller.
//! - `SchemaError`: failures of the *schema machinery itself* (malformed
//!   schema files, unknown record types), with `IMOBI_SCHEMA_*` codes.

use std::fmt;

use serde::Serialize;

/// Kind of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Input could not be opened or parsed at all; fatal for the run
    #[serde(rename = "file_error")]
    File,
    /// Header row is missing required columns; row validation skipped
    #[serde(rename = "header_error")]
    Header,
    /// One field in one row failed one rule; non-fatal, accumulated
    #[serde(rename = "validation_error")]
    Field,
}

impl ErrorKind {
    /// Returns the structured kind string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::File => "file_error",
            ErrorKind::Header => "header_error",
            ErrorKind::Field => "validation_error",
        }
    }
}

/// One validation finding.
///
/// Row numbers are 1-based counting the header line as row 1, so the
/// first data row is row 2.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Finding kind
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    /// 1-based row number; set only for field-level findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<u64>,
    /// Field name; set only for field-level findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl ValidationError {
    /// Create a file-level error (fatal for the run)
    pub fn file(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::File,
            row: None,
            field: None,
            message: message.into(),
        }
    }

    /// Create a header-level error (row validation skipped)
    pub fn header(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Header,
            row: None,
            field: None,
            message: message.into(),
        }
    }

    /// Create a field-level error for one (row, field) pair
    pub fn field(row: u64, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Field,
            row: Some(row),
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

// Display prefixes are the CLI contract: [FILE], [HEADER], [Row N].
impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::File => write!(f, "[FILE] {}", self.message),
            ErrorKind::Header => write!(f, "[HEADER] {}", self.message),
            ErrorKind::Field => write!(
                f,
                "[Row {}] {}: {}",
                self.row.unwrap_or(0),
                self.field.as_deref().unwrap_or("?"),
                self.message
            ),
        }
    }
}

/// Schema machinery error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema file unreadable or structurally invalid
    MalformedSchema,
    /// No schema registered for the requested record type
    UnknownRecordType,
    /// Attempt to register a record type twice
    DuplicateRecordType,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::MalformedSchema => "IMOBI_SCHEMA_MALFORMED",
            SchemaErrorCode::UnknownRecordType => "IMOBI_UNKNOWN_RECORD_TYPE",
            SchemaErrorCode::DuplicateRecordType => "IMOBI_SCHEMA_DUPLICATE",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema machinery error with full context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
}

impl SchemaError {
    /// Create a malformed schema error for a given source
    pub fn malformed_schema(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedSchema,
            message: format!("Malformed schema '{}': {}", source.into(), reason.into()),
        }
    }

    /// Create an unknown record type error
    pub fn unknown_record_type(record_type: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::UnknownRecordType,
            message: format!("No schema registered for '{}'", record_type.into()),
        }
    }

    /// Create a duplicate record type error
    pub fn duplicate_record_type(record_type: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::DuplicateRecordType,
            message: format!("Schema '{}' is already registered", record_type.into()),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema machinery operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings_match_structured_contract() {
        assert_eq!(ErrorKind::File.as_str(), "file_error");
        assert_eq!(ErrorKind::Header.as_str(), "header_error");
        assert_eq!(ErrorKind::Field.as_str(), "validation_error");
    }

    #[test]
    fn test_display_prefixes() {
        let e = ValidationError::file("File not found: x.csv");
        assert_eq!(e.to_string(), "[FILE] File not found: x.csv");

        let e = ValidationError::header("Missing required columns: status");
        assert_eq!(e.to_string(), "[HEADER] Missing required columns: status");

        let e = ValidationError::field(2, "tipo", "bad value");
        assert_eq!(e.to_string(), "[Row 2] tipo: bad value");
    }

    #[test]
    fn test_serialized_shape() {
        let e = ValidationError::field(3, "area_m2", "Invalid float value: abc");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "validation_error");
        assert_eq!(json["row"], 3);
        assert_eq!(json["field"], "area_m2");

        let e = ValidationError::file("nope");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "file_error");
        assert!(json.get("row").is_none());
    }

    #[test]
    fn test_schema_error_codes() {
        assert_eq!(
            SchemaError::malformed_schema("x.json", "bad").code().code(),
            "IMOBI_SCHEMA_MALFORMED"
        );
        assert_eq!(
            SchemaError::unknown_record_type("x").code().code(),
            "IMOBI_UNKNOWN_RECORD_TYPE"
        );
        assert_eq!(
            SchemaError::duplicate_record_type("x").code().code(),
            "IMOBI_SCHEMA_DUPLICATE"
        );
    }
}

//! Schema validation subsystem
//!
//! Declarative, per-field rule validation over delimited tabular input.
//!
//! # Design principles
//!
//! - Schemas are immutable values built once and passed explicitly
//! - Validation is exhaustive: errors accumulate, only the file and
//!   header gates short-circuit
//! - A run is valid iff its error list is empty
//! - The validator has no side effects and keeps no state across runs

pub mod errors;
pub mod registry;
pub mod reporter;
pub mod types;
pub mod validator;

pub use errors::{ErrorKind, SchemaError, SchemaErrorCode, SchemaResult, ValidationError};
pub use registry::{property_schema, SchemaRegistry, PROPERTY_RECORD_TYPE};
pub use reporter::ErrorReporter;
pub use types::{Field, FieldRule, FieldType, Schema};
pub use validator::{is_absent, CsvValidator, ValidationReport};

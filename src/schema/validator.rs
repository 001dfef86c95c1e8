//! Row/header validator for delimited tabular input
//!
//! Validation semantics:
//! - File gate: unreadable input yields a single file error and nothing else
//! - Header gate: missing required columns yield a single header error
//!   listing every missing name; no row is read
//! - Row loop: every data row is checked against every schema field in
//!   declaration order; errors accumulate, nothing is fail-fast past the
//!   two gates
//! - The validator never mutates its input, never substitutes defaults,
//!   and never logs
//!
//! Row numbers are 1-based counting the header as row 1.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::errors::ValidationError;
use super::types::{FieldType, Schema};

/// The literal value the surrounding import convention uses for
/// "not applicable". Treated exactly like an empty cell.
const ABSENT_SENTINEL: &str = "N/A";

/// Returns true if a raw cell value counts as absent.
///
/// A missing column, an empty or whitespace-only string, and the literal
/// "N/A" sentinel are equivalently absent. This predicate is the single
/// source of truth for absence; the database import uses it too.
pub fn is_absent(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == ABSENT_SENTINEL
}

/// Outcome of one validation run.
///
/// A run is valid iff the error list is empty. The list's order is
/// stable: at most one file error OR at most one header error, otherwise
/// field errors in row-then-field-declaration order.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Returns true iff no error was recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the accumulated errors in emission order
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes the report, yielding the error list
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    fn fatal(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Validates delimited input against a schema.
///
/// One instance per run is cheap; the validator holds no state between
/// runs, so validating the same input twice yields identical reports.
pub struct CsvValidator<'a> {
    schema: &'a Schema,
}

impl<'a> CsvValidator<'a> {
    /// Creates a validator for the given schema
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates a CSV file on disk.
    ///
    /// A nonexistent or unreadable path yields a report with a single
    /// file error; no other processing happens.
    pub fn validate_path(&self, path: &Path) -> ValidationReport {
        if !path.exists() {
            return ValidationReport::fatal(ValidationError::file(format!(
                "File not found: {}",
                path.display()
            )));
        }

        match File::open(path) {
            Ok(file) => self.validate_reader(file),
            Err(e) => ValidationReport::fatal(ValidationError::file(format!(
                "Error reading file: {}",
                e
            ))),
        }
    }

    /// Validates CSV content from any reader.
    pub fn validate_reader<R: Read>(&self, reader: R) -> ValidationReport {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = match csv_reader.headers() {
            Ok(headers) => headers.clone(),
            Err(e) => {
                return ValidationReport::fatal(ValidationError::file(format!(
                    "Error reading file: {}",
                    e
                )))
            }
        };

        // Header gate: one error listing all missing required columns.
        let missing: Vec<&str> = self
            .schema
            .required_field_names()
            .into_iter()
            .filter(|name| !headers.iter().any(|h| h == *name))
            .collect();
        if !missing.is_empty() {
            return ValidationReport::fatal(ValidationError::header(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        // Column positions resolved once; optional columns may be absent.
        let columns: Vec<Option<usize>> = self
            .schema
            .fields()
            .iter()
            .map(|field| headers.iter().position(|h| h == field.name))
            .collect();

        let mut report = ValidationReport::default();

        for (index, record) in csv_reader.records().enumerate() {
            // Header is row 1, so the first data row is row 2.
            let row = index as u64 + 2;

            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    // A parse failure is fatal for the whole run: the
                    // report degenerates to a single file error.
                    return ValidationReport::fatal(ValidationError::file(format!(
                        "Error reading file: {}",
                        e
                    )));
                }
            };

            for (field, column) in self.schema.fields().iter().zip(&columns) {
                let raw = column
                    .and_then(|i| record.get(i))
                    .unwrap_or("")
                    .trim();
                self.check_field(&mut report, row, &field.name, &field.rule, raw);
            }
        }

        report
    }

    /// Runs every applicable rule for one (row, field) pair.
    ///
    /// Required-ness is a gate: an absent required value yields exactly
    /// one error and nothing else for the pair. An absent optional value
    /// yields nothing. Past the gate, each rule checker runs
    /// independently; only a failed float parse suppresses its own bound
    /// checks.
    fn check_field(
        &self,
        report: &mut ValidationReport,
        row: u64,
        name: &str,
        rule: &super::types::FieldRule,
        raw: &str,
    ) {
        if is_absent(raw) {
            if rule.required {
                report.push(ValidationError::field(
                    row,
                    name,
                    format!("Required field '{}' is empty", name),
                ));
            }
            return;
        }

        if rule.field_type == FieldType::Float {
            match raw.parse::<f64>() {
                Ok(value) => {
                    if let Some(min) = rule.min {
                        if value < min {
                            report.push(ValidationError::field(
                                row,
                                name,
                                format!("Value {} is less than minimum {}", value, min),
                            ));
                        }
                    }
                    if let Some(max) = rule.max {
                        if value > max {
                            report.push(ValidationError::field(
                                row,
                                name,
                                format!("Value {} exceeds maximum {}", value, max),
                            ));
                        }
                    }
                }
                Err(_) => {
                    report.push(ValidationError::field(
                        row,
                        name,
                        format!("Invalid float value: {}", raw),
                    ));
                }
            }
        }

        if let Some(allowed) = &rule.allowed {
            if !allowed.iter().any(|v| v == raw) {
                report.push(ValidationError::field(
                    row,
                    name,
                    format!("Value '{}' not in allowed values: {}", raw, allowed.join(", ")),
                ));
            }
        }

        if let Some(pattern) = &rule.pattern {
            if !pattern.is_match(raw) {
                report.push(ValidationError::field(
                    row,
                    name,
                    format!(
                        "Value '{}' does not match pattern {}",
                        raw,
                        rule.pattern_source.as_deref().unwrap_or("")
                    ),
                ));
            }
        }

        let length = raw.chars().count();
        if let Some(min_length) = rule.min_length {
            if length < min_length {
                report.push(ValidationError::field(
                    row,
                    name,
                    format!("Value length {} is less than minimum {}", length, min_length),
                ));
            }
        }
        if let Some(max_length) = rule.max_length {
            if length > max_length {
                report.push(ValidationError::field(
                    row,
                    name,
                    format!("Value length {} exceeds maximum {}", length, max_length),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{Field, FieldRule, FieldType};
    use crate::schema::ErrorKind;

    fn test_schema() -> Schema {
        Schema::new(
            "sample",
            vec![
                Field::new(
                    "code",
                    FieldRule::required(FieldType::String)
                        .with_pattern(r"C\d{2}")
                        .unwrap(),
                ),
                Field::new(
                    "kind",
                    FieldRule::required(FieldType::String).with_allowed(["A", "B"]),
                ),
                Field::new("amount", FieldRule::required(FieldType::Float).with_min(0.0)),
                Field::new(
                    "note",
                    FieldRule::optional(FieldType::String).with_default(""),
                ),
            ],
        )
    }

    fn validate(csv: &str) -> ValidationReport {
        let schema = test_schema();
        let validator = CsvValidator::new(&schema);
        validator.validate_reader(csv.as_bytes())
    }

    #[test]
    fn test_valid_input_passes() {
        let report = validate("code,kind,amount,note\nC01,A,10.5,hello\n");
        assert!(report.is_valid());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn test_missing_required_column_is_single_header_error() {
        let report = validate("code,amount,note\nC01,10.5,x\n");
        assert!(!report.is_valid());
        assert_eq!(report.errors().len(), 1);
        let error = &report.errors()[0];
        assert_eq!(error.kind, ErrorKind::Header);
        assert!(error.message.contains("kind"));
    }

    #[test]
    fn test_header_error_lists_all_missing_names_once() {
        let report = validate("note\nx\n");
        assert_eq!(report.errors().len(), 1);
        let message = &report.errors()[0].message;
        assert!(message.contains("code"));
        assert!(message.contains("kind"));
        assert!(message.contains("amount"));
    }

    #[test]
    fn test_required_empty_gates_other_rules() {
        // Empty "code" must produce the required error only, not a
        // pattern error on top.
        let report = validate("code,kind,amount,note\n,A,1.0,\n");
        assert_eq!(report.errors().len(), 1);
        let error = &report.errors()[0];
        assert_eq!(error.field.as_deref(), Some("code"));
        assert!(error.message.contains("is empty"));
    }

    #[test]
    fn test_na_sentinel_counts_as_absent() {
        // Optional field: accepted silently. Required field: empty error.
        let report = validate("code,kind,amount,note\nC01,A,1.0,N/A\n");
        assert!(report.is_valid());

        let report = validate("code,kind,amount,note\nN/A,A,1.0,\n");
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors()[0].message.contains("is empty"));
    }

    #[test]
    fn test_invalid_float_suppresses_bound_check() {
        let report = validate("code,kind,amount,note\nC01,A,abc,\n");
        assert_eq!(report.errors().len(), 1);
        let error = &report.errors()[0];
        assert_eq!(error.field.as_deref(), Some("amount"));
        assert!(error.message.contains("Invalid float"));
    }

    #[test]
    fn test_min_bound_violation() {
        let report = validate("code,kind,amount,note\nC01,A,-3.5,\n");
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors()[0].message.contains("less than minimum 0"));
    }

    #[test]
    fn test_max_bound_symmetric() {
        let schema = Schema::new(
            "bounded",
            vec![Field::new(
                "v",
                FieldRule::required(FieldType::Float).with_max(10.0),
            )],
        );
        let validator = CsvValidator::new(&schema);
        let report = validator.validate_reader("v\n11\n".as_bytes());
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors()[0].message.contains("exceeds maximum 10"));
    }

    #[test]
    fn test_enum_violation_lists_allowed_set() {
        let report = validate("code,kind,amount,note\nC01,Z,1.0,\n");
        assert_eq!(report.errors().len(), 1);
        let message = &report.errors()[0].message;
        assert!(message.contains("A"));
        assert!(message.contains("B"));
    }

    #[test]
    fn test_pattern_violation_names_pattern() {
        let report = validate("code,kind,amount,note\nC1,A,1.0,\n");
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors()[0].message.contains(r"C\d{2}"));
    }

    #[test]
    fn test_errors_accumulate_across_rows_in_order() {
        let report = validate(
            "code,kind,amount,note\nC1,A,1.0,\nC02,Z,-1,\n",
        );
        let errors = report.errors();
        assert_eq!(errors.len(), 3);
        // Row 2: pattern on code. Row 3: enum on kind, then min on amount.
        assert_eq!(errors[0].row, Some(2));
        assert_eq!(errors[0].field.as_deref(), Some("code"));
        assert_eq!(errors[1].row, Some(3));
        assert_eq!(errors[1].field.as_deref(), Some("kind"));
        assert_eq!(errors[2].row, Some(3));
        assert_eq!(errors[2].field.as_deref(), Some("amount"));
    }

    #[test]
    fn test_row_numbering_starts_at_two() {
        let report = validate("code,kind,amount,note\nC01,A,1.0,\nC02,Z,1.0,\n");
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].row, Some(3));
    }

    #[test]
    fn test_nonexistent_path_is_single_file_error() {
        let schema = test_schema();
        let validator = CsvValidator::new(&schema);
        let report = validator.validate_path(Path::new("does/not/exist.csv"));
        assert!(!report.is_valid());
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].kind, ErrorKind::File);
    }

    #[test]
    fn test_idempotent_runs() {
        let input = "code,kind,amount,note\nC1,Z,-1,\n";
        let first = validate(input);
        let second = validate(input);
        assert_eq!(first.errors(), second.errors());
    }

    #[test]
    fn test_multiple_independent_rule_failures_same_field() {
        // A value can violate enum and length rules at once.
        let schema = Schema::new(
            "multi",
            vec![Field::new(
                "s",
                FieldRule::required(FieldType::String)
                    .with_allowed(["ok"])
                    .with_max_length(3),
            )],
        );
        let validator = CsvValidator::new(&schema);
        let report = validator.validate_reader("s\nwrong\n".as_bytes());
        assert_eq!(report.errors().len(), 2);
    }
}

//! Schema type definitions for tabular record validation
//!
//! Supported field types:
//! - string: UTF-8 string
//! - float: 64-bit floating point
//!
//! New types (integer, boolean, date) are added as `FieldType` variants
//! plus one parse arm in the validator; the rule engine itself is fixed.

use regex::Regex;
use serde::Deserialize;

/// Supported field types for CSV columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit floating point
    Float,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Float => "float",
        }
    }
}

/// Validation policy for one column.
///
/// Every rule except `required` is optional; an unset rule is a no-op
/// during validation. `default` is advisory metadata only: the validator
/// reports absence, it never substitutes values.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Field data type
    pub field_type: FieldType,
    /// Whether an absent value is itself an error
    pub required: bool,
    /// Advisory default for absent optional values (never applied)
    pub default: Option<String>,
    /// Full-match regular expression over the raw string value
    pub pattern: Option<Regex>,
    /// Original pattern source, kept verbatim for error messages
    pub pattern_source: Option<String>,
    /// Closed set of allowed raw string values
    pub allowed: Option<Vec<String>>,
    /// Inclusive numeric lower bound (float fields)
    pub min: Option<f64>,
    /// Inclusive numeric upper bound (float fields)
    pub max: Option<f64>,
    /// Inclusive minimum string length (in characters)
    pub min_length: Option<usize>,
    /// Inclusive maximum string length (in characters)
    pub max_length: Option<usize>,
}

impl FieldRule {
    /// Create a required field of the given type with no extra rules
    pub fn required(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: true,
            default: None,
            pattern: None,
            pattern_source: None,
            allowed: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Create an optional field of the given type with no extra rules
    pub fn optional(field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(field_type)
        }
    }

    /// Attach a full-match pattern rule.
    ///
    /// The pattern is compiled once here; a pattern that does not compile
    /// is a schema definition error, not a validation error.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, String> {
        let anchored = format!("^(?:{})$", pattern);
        let regex = Regex::new(&anchored)
            .map_err(|e| format!("Invalid pattern '{}': {}", pattern, e))?;
        self.pattern = Some(regex);
        self.pattern_source = Some(pattern.to_string());
        Ok(self)
    }

    /// Attach a closed-enumeration rule
    pub fn with_allowed<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Attach an inclusive numeric lower bound
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Attach an inclusive numeric upper bound
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Attach an inclusive minimum length rule
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Attach an inclusive maximum length rule
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Attach an advisory default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A named column with its rule set
#[derive(Debug, Clone)]
pub struct Field {
    /// Column name; doubles as the expected CSV header name
    pub name: String,
    /// Validation policy for this column
    pub rule: FieldRule,
}

impl Field {
    /// Create a new field definition
    pub fn new(name: impl Into<String>, rule: FieldRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }
}

/// Complete schema for one logical record type.
///
/// Fields keep declaration order: validation errors for a row are emitted
/// in this order, so the error list is deterministic for a given input.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Record type identifier (e.g. "property")
    record_type: String,
    /// Declaration-ordered field definitions
    fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from declaration-ordered fields
    pub fn new(record_type: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            record_type: record_type.into(),
            fields,
        }
    }

    /// Returns the record type identifier
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Returns the fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the names of all required fields, in declaration order
    pub fn required_field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.rule.required)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates the schema definition itself (not input data)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("Schema must define at least one field".into());
        }
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(format!("Duplicate field '{}'", field.name));
            }
            if let (Some(min), Some(max)) = (field.rule.min_length, field.rule.max_length) {
                if min > max {
                    return Err(format!(
                        "Field '{}': min_length {} exceeds max_length {}",
                        field.name, min, max
                    ));
                }
            }
        }
        Ok(())
    }

    /// Builds a schema from its serde representation, compiling patterns
    pub fn from_spec(spec: SchemaSpec) -> Result<Self, String> {
        let mut fields = Vec::with_capacity(spec.fields.len());
        for f in spec.fields {
            let mut rule = if f.required {
                FieldRule::required(f.field_type)
            } else {
                FieldRule::optional(f.field_type)
            };
            if let Some(pattern) = &f.pattern {
                rule = rule.with_pattern(pattern)?;
            }
            if let Some(values) = f.allowed {
                rule = rule.with_allowed(values);
            }
            if let Some(min) = f.min {
                rule = rule.with_min(min);
            }
            if let Some(max) = f.max {
                rule = rule.with_max(max);
            }
            if let Some(min_length) = f.min_length {
                rule = rule.with_min_length(min_length);
            }
            if let Some(max_length) = f.max_length {
                rule = rule.with_max_length(max_length);
            }
            if let Some(default) = f.default {
                rule = rule.with_default(default);
            }
            fields.push(Field::new(f.name, rule));
        }

        let schema = Schema::new(spec.record_type, fields);
        schema.validate_structure()?;
        Ok(schema)
    }
}

/// Raw serde form of a schema file
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaSpec {
    /// Record type identifier
    pub record_type: String,
    /// Declaration-ordered field specs
    pub fields: Vec<FieldSpec>,
}

/// Raw serde form of a single field rule
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    /// Column name
    pub name: String,
    /// Field data type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field is required
    #[serde(default)]
    pub required: bool,
    /// Advisory default value
    #[serde(default)]
    pub default: Option<String>,
    /// Full-match pattern source
    #[serde(default)]
    pub pattern: Option<String>,
    /// Closed set of allowed values
    #[serde(default, rename = "enum")]
    pub allowed: Option<Vec<String>>,
    /// Inclusive numeric lower bound
    #[serde(default)]
    pub min: Option<f64>,
    /// Inclusive numeric upper bound
    #[serde(default)]
    pub max: Option<f64>,
    /// Inclusive minimum length
    #[serde(default)]
    pub min_length: Option<usize>,
    /// Inclusive maximum length
    #[serde(default)]
    pub max_length: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema::new(
            "sample",
            vec![
                Field::new(
                    "code",
                    FieldRule::required(FieldType::String)
                        .with_pattern(r"C\d{2}")
                        .unwrap(),
                ),
                Field::new("amount", FieldRule::optional(FieldType::Float).with_min(0.0)),
            ],
        )
    }

    #[test]
    fn test_schema_structure_valid() {
        assert!(sample_schema().validate_structure().is_ok());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let schema = Schema::new(
            "dup",
            vec![
                Field::new("a", FieldRule::required(FieldType::String)),
                Field::new("a", FieldRule::optional(FieldType::String)),
            ],
        );
        let result = schema.validate_structure();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Duplicate"));
    }

    #[test]
    fn test_empty_schema_rejected() {
        let schema = Schema::new("empty", vec![]);
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_inverted_length_bounds_rejected() {
        let schema = Schema::new(
            "bad",
            vec![Field::new(
                "a",
                FieldRule::required(FieldType::String)
                    .with_min_length(5)
                    .with_max_length(2),
            )],
        );
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_pattern_is_anchored() {
        let rule = FieldRule::required(FieldType::String)
            .with_pattern(r"PROP\d{3}")
            .unwrap();
        let regex = rule.pattern.unwrap();
        assert!(regex.is_match("PROP001"));
        // Partial matches must not pass
        assert!(!regex.is_match("XPROP001"));
        assert!(!regex.is_match("PROP0012"));
    }

    #[test]
    fn test_invalid_pattern_is_schema_error() {
        let result = FieldRule::required(FieldType::String).with_pattern(r"PROP[");
        assert!(result.is_err());
    }

    #[test]
    fn test_required_field_names_in_declaration_order() {
        let schema = sample_schema();
        assert_eq!(schema.required_field_names(), vec!["code"]);
    }

    #[test]
    fn test_from_spec_round_trip() {
        let json = r#"{
            "record_type": "sample",
            "fields": [
                {"name": "code", "type": "string", "required": true, "pattern": "C\\d{2}"},
                {"name": "kind", "type": "string", "required": true, "enum": ["A", "B"]},
                {"name": "amount", "type": "float", "min": 0, "default": "0"}
            ]
        }"#;
        let spec: SchemaSpec = serde_json::from_str(json).unwrap();
        let schema = Schema::from_spec(spec).unwrap();
        assert_eq!(schema.record_type(), "sample");
        assert_eq!(schema.fields().len(), 3);
        assert_eq!(schema.required_field_names(), vec!["code", "kind"]);
        let amount = schema.field("amount").unwrap();
        assert!(!amount.rule.required);
        assert_eq!(amount.rule.min, Some(0.0));
        assert_eq!(amount.rule.default.as_deref(), Some("0"));
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::String.type_name(), "string");
        assert_eq!(FieldType::Float.type_name(), "float");
    }
}

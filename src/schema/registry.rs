//! Schema registry: canonical rule sets per record type
//!
//! Holds one declarative schema per logical record type. The built-in
//! property schema is registered at construction; additional schemas load
//! from JSON files, either explicitly or by the `<csv-stem>_schema.json`
//! filename convention with fallback to the default schema.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::{Field, FieldRule, FieldType, Schema, SchemaSpec};

/// Record type identifier of the built-in property schema
pub const PROPERTY_RECORD_TYPE: &str = "property";

/// The built-in schema for property records.
///
/// Field order here is the declaration order validation errors follow.
pub fn property_schema() -> Schema {
    // Patterns are static and covered by tests; compilation cannot fail.
    let pattern = |rule: Result<FieldRule, String>| {
        rule.expect("built-in pattern is valid")
    };

    Schema::new(
        PROPERTY_RECORD_TYPE,
        vec![
            Field::new(
                "id_propriedade",
                pattern(FieldRule::required(FieldType::String).with_pattern(r"PROP\d{3}")),
            ),
            Field::new(
                "nome",
                FieldRule::required(FieldType::String).with_min_length(1),
            ),
            Field::new(
                "tipo",
                FieldRule::required(FieldType::String)
                    .with_allowed(["Residencial", "Comercial", "Industrial", "Terreno"]),
            ),
            Field::new("endereco", FieldRule::required(FieldType::String)),
            Field::new("cidade", FieldRule::required(FieldType::String)),
            Field::new(
                "estado",
                FieldRule::required(FieldType::String)
                    .with_min_length(2)
                    .with_max_length(2),
            ),
            Field::new(
                "cep",
                pattern(FieldRule::required(FieldType::String).with_pattern(r"\d{5}-\d{3}")),
            ),
            Field::new(
                "area_m2",
                FieldRule::required(FieldType::Float).with_min(0.0),
            ),
            Field::new(
                "valor_aquisicao",
                FieldRule::required(FieldType::Float).with_min(0.0),
            ),
            Field::new(
                "data_aquisicao",
                pattern(
                    FieldRule::required(FieldType::String).with_pattern(r"\d{4}-\d{2}-\d{2}"),
                ),
            ),
            Field::new(
                "valor_atual",
                FieldRule::required(FieldType::Float).with_min(0.0),
            ),
            Field::new(
                "renda_mensal",
                FieldRule::optional(FieldType::Float)
                    .with_min(0.0)
                    .with_default("0"),
            ),
            Field::new(
                "inquilino",
                FieldRule::optional(FieldType::String).with_default(""),
            ),
            Field::new(
                "status",
                FieldRule::required(FieldType::String)
                    .with_allowed(["Ocupada", "Vaga", "Em Reforma", "À Venda"]),
            ),
        ],
    )
}

/// Registry of schemas keyed by record type.
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Creates a registry with the built-in property schema registered
    pub fn new() -> Self {
        let mut registry = Self {
            schemas: HashMap::new(),
        };
        // Built-in registration cannot collide in an empty registry.
        let _ = registry.register(property_schema());
        registry
    }

    /// Registers a schema; a record type can be registered only once
    pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema(schema.record_type(), e))?;

        if self.schemas.contains_key(schema.record_type()) {
            return Err(SchemaError::duplicate_record_type(schema.record_type()));
        }
        self.schemas
            .insert(schema.record_type().to_string(), schema);
        Ok(())
    }

    /// Returns the schema for a record type
    pub fn rules_for(&self, record_type: &str) -> SchemaResult<&Schema> {
        self.schemas
            .get(record_type)
            .ok_or_else(|| SchemaError::unknown_record_type(record_type))
    }

    /// Returns the number of registered schemas
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Loads a schema from a JSON file without registering it
    pub fn load_file(path: &Path) -> SchemaResult<Schema> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let spec: SchemaSpec = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Invalid JSON: {}", e),
            )
        })?;

        Schema::from_spec(spec)
            .map_err(|e| SchemaError::malformed_schema(path.display().to_string(), e))
    }

    /// Resolves the schema for a CSV file by filename convention.
    ///
    /// For `<dir>/<stem>.csv`, a sibling `<dir>/<stem>_schema.json` wins;
    /// otherwise the built-in property schema applies. A convention file
    /// that exists but does not parse is an error, not a silent fallback.
    pub fn schema_for_csv(&self, csv_path: &Path) -> SchemaResult<Schema> {
        let stem = csv_path.file_stem().and_then(|s| s.to_str());
        if let Some(stem) = stem {
            let sibling = csv_path.with_file_name(format!("{}_schema.json", stem));
            if sibling.exists() {
                return Self::load_file(&sibling);
            }
        }
        self.rules_for(PROPERTY_RECORD_TYPE).cloned()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

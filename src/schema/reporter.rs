//! Error reporter for validation runs
//!
//! Renders the validator's error list for humans and exposes the same
//! sequence structurally for programmatic callers. The reporter never
//! filters or reorders: what the validator emitted is what callers see.

use serde_json::Value;

use super::validator::ValidationReport;

/// Renders validation reports.
pub struct ErrorReporter;

impl ErrorReporter {
    /// Renders one line per error, prefixed by kind, in emission order
    pub fn render_lines(report: &ValidationReport) -> Vec<String> {
        report.errors().iter().map(|e| e.to_string()).collect()
    }

    /// Renders the full human-readable report including the summary line
    pub fn render(report: &ValidationReport) -> String {
        if report.is_valid() {
            return "Validation passed: no errors found".to_string();
        }

        let mut out = format!(
            "Validation failed: {} error(s) found\n",
            report.errors().len()
        );
        for line in Self::render_lines(report) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Returns the error sequence as a JSON array, order preserved
    pub fn to_json(report: &ValidationReport) -> Value {
        serde_json::to_value(report.errors()).unwrap_or_else(|_| Value::Array(vec![]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::property_schema;
    use crate::schema::validator::CsvValidator;

    fn failing_report() -> ValidationReport {
        let schema = property_schema();
        let validator = CsvValidator::new(&schema);
        validator.validate_reader("nome\nx\n".as_bytes())
    }

    #[test]
    fn test_render_valid_report() {
        let schema = property_schema();
        let validator = CsvValidator::new(&schema);
        let header = "id_propriedade,nome,tipo,endereco,cidade,estado,cep,area_m2,\
                      valor_aquisicao,data_aquisicao,valor_atual,renda_mensal,inquilino,status";
        let row = "PROP001,Casa,Residencial,Rua A,Recife,PE,50000-000,120.0,\
                   300000,2021-05-10,350000,2500,Maria,Ocupada";
        let report = validator.validate_reader(format!("{}\n{}\n", header, row).as_bytes());
        assert!(report.is_valid());
        assert!(ErrorReporter::render(&report).contains("passed"));
        assert_eq!(ErrorReporter::to_json(&report), serde_json::json!([]));
    }

    #[test]
    fn test_render_preserves_order_and_prefixes() {
        let report = failing_report();
        let lines = ErrorReporter::render_lines(&report);
        assert_eq!(lines.len(), report.errors().len());
        assert!(lines[0].starts_with("[HEADER]"));

        let rendered = ErrorReporter::render(&report);
        assert!(rendered.starts_with("Validation failed: 1 error(s) found"));
    }

    #[test]
    fn test_json_mirrors_error_list() {
        let report = failing_report();
        let json = ErrorReporter::to_json(&report);
        let array = json.as_array().unwrap();
        assert_eq!(array.len(), report.errors().len());
        assert_eq!(array[0]["type"], "header_error");
    }
}

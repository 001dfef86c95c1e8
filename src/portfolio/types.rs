//! Property record and aggregate types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One property record, mirroring the CSV columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Unique identifier, PROP followed by three digits
    pub id_propriedade: String,
    /// Display name
    pub nome: String,
    /// Residencial, Comercial, Industrial or Terreno
    pub tipo: String,
    /// Street address
    pub endereco: String,
    /// City
    pub cidade: String,
    /// Two-letter state code
    pub estado: String,
    /// Postal code, 00000-000
    pub cep: String,
    /// Area in square meters
    pub area_m2: f64,
    /// Acquisition value
    pub valor_aquisicao: f64,
    /// Acquisition date, YYYY-MM-DD
    pub data_aquisicao: String,
    /// Current market value
    pub valor_atual: f64,
    /// Monthly rental income; absent means zero
    #[serde(default)]
    pub renda_mensal: Option<f64>,
    /// Current tenant; absent means vacant of tenant
    #[serde(default)]
    pub inquilino: Option<String>,
    /// Ocupada, Vaga, Em Reforma or À Venda
    pub status: String,
}

impl Property {
    /// Monthly income with the absent-means-zero convention applied
    pub fn monthly_income(&self) -> f64 {
        self.renda_mensal.unwrap_or(0.0)
    }

    /// Tenant name, empty when absent
    pub fn tenant(&self) -> &str {
        self.inquilino.as_deref().unwrap_or("")
    }
}

/// Optional, ANDed filters over the property list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyFilter {
    /// Exact match on property type
    pub tipo: Option<String>,
    /// Exact match on state code
    pub estado: Option<String>,
    /// Exact match on status
    pub status: Option<String>,
    /// Inclusive lower bound on current value
    pub min_valor: Option<f64>,
    /// Inclusive upper bound on current value
    pub max_valor: Option<f64>,
}

impl PropertyFilter {
    /// True iff the property satisfies every set filter (AND semantics)
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(tipo) = &self.tipo {
            if &property.tipo != tipo {
                return false;
            }
        }
        if let Some(estado) = &self.estado {
            if &property.estado != estado {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if &property.status != status {
                return false;
            }
        }
        if let Some(min_valor) = self.min_valor {
            if property.valor_atual < min_valor {
                return false;
            }
        }
        if let Some(max_valor) = self.max_valor {
            if property.valor_atual > max_valor {
                return false;
            }
        }
        true
    }
}

/// Aggregate portfolio statistics.
///
/// Distribution maps are ordered so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioStats {
    /// Number of loaded properties
    pub total_properties: usize,
    /// Sum of current values
    pub total_value: f64,
    /// Sum of monthly incomes
    pub total_monthly_income: f64,
    /// Properties with status Ocupada
    pub occupied_count: usize,
    /// Properties with status Vaga
    pub vacant_count: usize,
    /// Property count per type
    pub types_distribution: BTreeMap<String, usize>,
    /// Property count per state
    pub states_distribution: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Property {
        Property {
            id_propriedade: "PROP001".into(),
            nome: "Casa Azul".into(),
            tipo: "Residencial".into(),
            endereco: "Rua A, 1".into(),
            cidade: "Recife".into(),
            estado: "PE".into(),
            cep: "50000-000".into(),
            area_m2: 120.0,
            valor_aquisicao: 300_000.0,
            data_aquisicao: "2021-05-10".into(),
            valor_atual: 350_000.0,
            renda_mensal: None,
            inquilino: None,
            status: "Vaga".into(),
        }
    }

    #[test]
    fn test_absent_income_is_zero() {
        let p = sample();
        assert_eq!(p.monthly_income(), 0.0);
        assert_eq!(p.tenant(), "");
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(PropertyFilter::default().matches(&sample()));
    }

    #[test]
    fn test_filters_are_anded() {
        let p = sample();
        let filter = PropertyFilter {
            tipo: Some("Residencial".into()),
            estado: Some("SP".into()),
            ..Default::default()
        };
        // tipo matches but estado does not
        assert!(!filter.matches(&p));
    }

    #[test]
    fn test_value_bounds_inclusive() {
        let p = sample();
        let filter = PropertyFilter {
            min_valor: Some(350_000.0),
            max_valor: Some(350_000.0),
            ..Default::default()
        };
        assert!(filter.matches(&p));

        let filter = PropertyFilter {
            min_valor: Some(350_000.01),
            ..Default::default()
        };
        assert!(!filter.matches(&p));
    }
}

//! In-memory property store
//!
//! Loaded wholesale from CSV once at startup and read-only afterwards.
//! There is no concurrent mutation path, so no locking: the store is
//! shared behind an `Arc` and only read.

use std::io::Read;
use std::path::Path;

use super::errors::{StoreError, StoreResult};
use super::types::{PortfolioStats, Property, PropertyFilter};

/// Read-only, in-memory collection of property records.
#[derive(Debug, Default)]
pub struct PortfolioStore {
    properties: Vec<Property>,
}

impl PortfolioStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads all records from a CSV file.
    pub fn load_csv(path: &Path) -> StoreResult<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| StoreError::load_failed(format!("{}: {}", path.display(), e)))?;
        Self::load_reader(file)
    }

    /// Loads all records from any CSV reader.
    pub fn load_reader<R: Read>(reader: R) -> StoreResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut properties = Vec::new();

        for record in csv_reader.deserialize() {
            let property: Property =
                record.map_err(|e| StoreError::malformed_record(e.to_string()))?;
            properties.push(property);
        }

        Ok(Self { properties })
    }

    /// Returns every property in load order
    pub fn all(&self) -> &[Property] {
        &self.properties
    }

    /// Returns the number of loaded properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true when no property is loaded
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Looks up a property by its identifier
    pub fn get(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id_propriedade == id)
    }

    /// Returns properties matching all set filters, in load order
    pub fn filter(&self, filter: &PropertyFilter) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| filter.matches(p))
            .collect()
    }

    /// Computes aggregate statistics over the whole portfolio
    pub fn stats(&self) -> PortfolioStats {
        let mut stats = PortfolioStats {
            total_properties: self.properties.len(),
            ..Default::default()
        };

        for property in &self.properties {
            stats.total_value += property.valor_atual;
            stats.total_monthly_income += property.monthly_income();
            match property.status.as_str() {
                "Ocupada" => stats.occupied_count += 1,
                "Vaga" => stats.vacant_count += 1,
                _ => {}
            }
            *stats
                .types_distribution
                .entry(property.tipo.clone())
                .or_insert(0) += 1;
            *stats
                .states_distribution
                .entry(property.estado.clone())
                .or_insert(0) += 1;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id_propriedade,nome,tipo,endereco,cidade,estado,cep,area_m2,\
                          valor_aquisicao,data_aquisicao,valor_atual,renda_mensal,inquilino,status";

    fn sample_store() -> PortfolioStore {
        let csv = format!(
            "{}\n{}\n{}\n{}\n",
            HEADER,
            "PROP001,Edificio Central,Comercial,Rua das Flores 123,Sao Paulo,SP,01234-567,\
             250.5,500000,2020-01-15,650000,5000,Empresa XYZ,Ocupada",
            "PROP002,Casa Azul,Residencial,Rua A 1,Recife,PE,50000-000,\
             120.0,300000,2021-05-10,350000,,,Vaga",
            "PROP003,Galpao Sul,Industrial,Av B 2,Sao Paulo,SP,04000-000,\
             900.0,1200000,2019-03-01,1500000,12000,Transportadora,Ocupada",
        );
        PortfolioStore::load_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_and_get() {
        let store = sample_store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("PROP002").unwrap().nome, "Casa Azul");
        assert!(store.get("PROP999").is_none());
    }

    #[test]
    fn test_optional_columns_default() {
        let store = sample_store();
        let p = store.get("PROP002").unwrap();
        assert_eq!(p.monthly_income(), 0.0);
        assert_eq!(p.tenant(), "");
    }

    #[test]
    fn test_filter_by_state_and_value() {
        let store = sample_store();
        let filter = PropertyFilter {
            estado: Some("SP".into()),
            min_valor: Some(1_000_000.0),
            ..Default::default()
        };
        let matched = store.filter(&filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id_propriedade, "PROP003");
    }

    #[test]
    fn test_stats() {
        let store = sample_store();
        let stats = store.stats();
        assert_eq!(stats.total_properties, 3);
        assert_eq!(stats.total_value, 2_500_000.0);
        assert_eq!(stats.total_monthly_income, 17_000.0);
        assert_eq!(stats.occupied_count, 2);
        assert_eq!(stats.vacant_count, 1);
        assert_eq!(stats.types_distribution["Comercial"], 1);
        assert_eq!(stats.states_distribution["SP"], 2);
    }

    #[test]
    fn test_malformed_record_is_error() {
        let csv = format!("{}\nPROP001,only,two\n", HEADER);
        let result = PortfolioStore::load_reader(csv.as_bytes());
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().code().code(),
            "IMOBI_STORE_MALFORMED_RECORD"
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = PortfolioStore::load_csv(Path::new("no/such/file.csv"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code().code(), "IMOBI_STORE_LOAD_FAILED");
    }
}

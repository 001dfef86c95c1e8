//! Portfolio store query tests
//!
//! The query API handlers delegate straight to the store, so these
//! exercise the same filter and aggregation semantics the HTTP
//! endpoints expose.

use std::io::Write;

use tempfile::NamedTempFile;

use imobi::portfolio::{PortfolioStore, PropertyFilter};

const HEADER: &str = "id_propriedade,nome,tipo,endereco,cidade,estado,cep,area_m2,\
                      valor_aquisicao,data_aquisicao,valor_atual,renda_mensal,inquilino,status";

fn sample_store() -> PortfolioStore {
    let csv = format!(
        "{}\n{}\n{}\n{}\n",
        HEADER,
        "PROP001,Edificio Central,Comercial,Rua X 1,Sao Paulo,SP,01234-567,\
         250.5,500000,2020-01-15,600000,5000,Empresa,Ocupada",
        "PROP002,Casa Azul,Residencial,Rua A 1,Recife,PE,50000-000,\
         120.0,300000,2021-05-10,400000,,,Vaga",
        "PROP003,Galpao Sul,Industrial,Av B 9,Recife,PE,51000-000,\
         900.0,800000,2019-07-01,1000000,12000,Transportadora,Ocupada",
    );
    PortfolioStore::load_reader(csv.as_bytes()).unwrap()
}

fn load_from_file() -> PortfolioStore {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "{}\n{}\n",
        HEADER,
        "PROP001,Casa,Residencial,Rua A,Recife,PE,50000-000,120.0,\
         300000,2021-05-10,350000,2500,Maria,Ocupada"
    )
    .unwrap();
    file.flush().unwrap();
    PortfolioStore::load_csv(file.path()).unwrap()
}

#[test]
fn test_load_from_csv_file() {
    let store = load_from_file();
    assert_eq!(store.len(), 1);
    assert!(store.get("PROP001").is_some());
    assert!(store.get("PROP999").is_none());
}

#[test]
fn test_empty_filter_returns_everything() {
    let store = sample_store();
    let all = store.filter(&PropertyFilter::default());
    assert_eq!(all.len(), 3);
}

#[test]
fn test_filters_combine_with_and() {
    let store = sample_store();
    let filter = PropertyFilter {
        estado: Some("PE".to_string()),
        status: Some("Ocupada".to_string()),
        ..Default::default()
    };
    let matched = store.filter(&filter);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id_propriedade, "PROP003");
}

#[test]
fn test_value_bounds_are_inclusive() {
    let store = sample_store();

    let filter = PropertyFilter {
        min_valor: Some(600000.0),
        ..Default::default()
    };
    assert_eq!(store.filter(&filter).len(), 2);

    let filter = PropertyFilter {
        max_valor: Some(400000.0),
        ..Default::default()
    };
    let matched = store.filter(&filter);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id_propriedade, "PROP002");

    let filter = PropertyFilter {
        min_valor: Some(400000.0),
        max_valor: Some(600000.0),
        ..Default::default()
    };
    assert_eq!(store.filter(&filter).len(), 2);
}

#[test]
fn test_stats_aggregates() {
    let store = sample_store();
    let stats = store.stats();

    assert_eq!(stats.total_properties, 3);
    assert_eq!(stats.total_value, 2_000_000.0);
    // missing renda_mensal counts as zero
    assert_eq!(stats.total_monthly_income, 17_000.0);
    assert_eq!(stats.occupied_count, 2);
    assert_eq!(stats.vacant_count, 1);
    assert_eq!(stats.types_distribution.get("Comercial"), Some(&1));
    assert_eq!(stats.types_distribution.get("Residencial"), Some(&1));
    assert_eq!(stats.states_distribution.get("PE"), Some(&2));
}

#[test]
fn test_missing_optional_fields_default() {
    let store = sample_store();
    let property = store.get("PROP002").unwrap();
    assert_eq!(property.monthly_income(), 0.0);
    assert_eq!(property.tenant(), "");
}

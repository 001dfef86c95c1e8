//! Obsidian vault note generation
//!
//! Writes one markdown note per property plus a portfolio dashboard.
//! Notes are rendered from the embedded templates with a string context
//! of raw and derived fields.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;

use crate::portfolio::{PortfolioStore, Property};

use super::template::{render, DASHBOARD_TEMPLATE, PROPERTY_TEMPLATE};
use super::{NotesError, NotesResult};

/// Name of the dashboard note, without extension
pub const DASHBOARD_NOTE: &str = "Portfolio_Dashboard";

/// Generates markdown notes for a portfolio into an output directory.
pub struct NoteGenerator<'a> {
    store: &'a PortfolioStore,
    output_dir: PathBuf,
}

impl<'a> NoteGenerator<'a> {
    pub fn new(store: &'a PortfolioStore, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            output_dir: output_dir.into(),
        }
    }

    /// Writes one note per property plus the dashboard.
    ///
    /// Returns the number of notes written, dashboard included.
    pub fn generate_all(&self) -> NotesResult<usize> {
        if self.store.is_empty() {
            return Err(NotesError::EmptyPortfolio);
        }
        fs::create_dir_all(&self.output_dir)?;

        let mut count = 0;
        for property in self.store.all() {
            self.write_property_note(property)?;
            count += 1;
        }
        self.write_dashboard()?;
        Ok(count + 1)
    }

    /// Writes the note for a single property, returning its path.
    pub fn write_property_note(&self, property: &Property) -> NotesResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let context = property_context(property);
        let content = render(PROPERTY_TEMPLATE, &context);
        let path = self.output_dir.join(note_filename(property));
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Writes the portfolio dashboard note, returning its path.
    pub fn write_dashboard(&self) -> NotesResult<PathBuf> {
        if self.store.is_empty() {
            return Err(NotesError::EmptyPortfolio);
        }
        fs::create_dir_all(&self.output_dir)?;
        let context = dashboard_context(self.store);
        let content = render(DASHBOARD_TEMPLATE, &context);
        let path = self.output_dir.join(format!("{}.md", DASHBOARD_NOTE));
        fs::write(&path, content)?;
        Ok(path)
    }
}

/// Builds the note filename `<id>_<sanitized nome>.md`.
pub fn note_filename(property: &Property) -> String {
    format!(
        "{}_{}.md",
        property.id_propriedade,
        sanitize_name(&property.nome)
    )
}

/// Strips characters unsafe for filenames and replaces spaces with
/// underscores.
fn sanitize_name(name: &str) -> String {
    let stripped = Regex::new(r"[^\w\s-]")
        .expect("filename pattern is valid")
        .replace_all(name, "");
    stripped.trim().replace(' ', "_")
}

fn fmt_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, f),
        None => (formatted.as_str(), "00"),
    };
    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

fn fmt_pct(value: f64) -> String {
    format!("{:.2}", value)
}

fn property_context(property: &Property) -> BTreeMap<String, String> {
    let valorizacao = property.valor_atual - property.valor_aquisicao;
    let valorizacao_pct = if property.valor_aquisicao > 0.0 {
        valorizacao / property.valor_aquisicao * 100.0
    } else {
        0.0
    };
    let renda_mensal = property.monthly_income();
    let renda_anual = renda_mensal * 12.0;
    let yield_anual = if property.valor_atual > 0.0 {
        renda_anual / property.valor_atual * 100.0
    } else {
        0.0
    };

    let mut context = BTreeMap::new();
    context.insert("id_propriedade".into(), property.id_propriedade.clone());
    context.insert("nome".into(), property.nome.clone());
    context.insert("tipo".into(), property.tipo.clone());
    context.insert("endereco".into(), property.endereco.clone());
    context.insert("cidade".into(), property.cidade.clone());
    context.insert("estado".into(), property.estado.clone());
    context.insert("cep".into(), property.cep.clone());
    context.insert("area_m2".into(), format!("{:.2}", property.area_m2));
    context.insert(
        "valor_aquisicao".into(),
        fmt_money(property.valor_aquisicao),
    );
    context.insert("valor_atual".into(), fmt_money(property.valor_atual));
    context.insert("data_aquisicao".into(), property.data_aquisicao.clone());
    context.insert("renda_mensal".into(), fmt_money(renda_mensal));
    context.insert("renda_anual".into(), fmt_money(renda_anual));
    context.insert("valorizacao".into(), fmt_money(valorizacao));
    context.insert("valorizacao_pct".into(), fmt_pct(valorizacao_pct));
    context.insert("yield_anual".into(), fmt_pct(yield_anual));
    let tenant = property.tenant();
    context.insert(
        "inquilino".into(),
        if tenant.is_empty() {
            "-".to_string()
        } else {
            tenant.to_string()
        },
    );
    context.insert("status".into(), property.status.clone());
    context.insert(
        "date".into(),
        Local::now().format("%Y-%m-%d").to_string(),
    );
    context
}

fn dashboard_context(store: &PortfolioStore) -> BTreeMap<String, String> {
    let properties = store.all();
    let total = properties.len();
    let total_value: f64 = properties.iter().map(|p| p.valor_atual).sum();
    let total_acquisition: f64 = properties.iter().map(|p| p.valor_aquisicao).sum();
    let monthly_income: f64 = properties.iter().map(|p| p.monthly_income()).sum();
    let annual_income = monthly_income * 12.0;
    let average_yield = if total_value > 0.0 {
        annual_income / total_value * 100.0
    } else {
        0.0
    };

    let status_count = |status: &str| properties.iter().filter(|p| p.status == status).count();
    let occupied = status_count("Ocupada");
    let vacant = status_count("Vaga");
    let reform = status_count("Em Reforma");
    let sale = status_count("À Venda");
    let pct_of_total = |count: usize| {
        if total > 0 {
            count as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    };

    let appreciation = total_value - total_acquisition;
    let appreciation_pct = if total_acquisition > 0.0 {
        appreciation / total_acquisition * 100.0
    } else {
        0.0
    };

    let mut context = BTreeMap::new();
    context.insert("date".into(), Local::now().format("%Y-%m-%d").to_string());
    context.insert("next_update".into(), first_of_next_month());
    context.insert("total_properties".into(), total.to_string());
    context.insert("total_value".into(), fmt_money(total_value));
    context.insert("monthly_income".into(), fmt_money(monthly_income));
    context.insert("annual_income".into(), fmt_money(annual_income));
    context.insert("average_yield".into(), fmt_pct(average_yield));
    context.insert("occupied_count".into(), occupied.to_string());
    context.insert("occupied_pct".into(), fmt_pct(pct_of_total(occupied)));
    context.insert("vacant_count".into(), vacant.to_string());
    context.insert("vacant_pct".into(), fmt_pct(pct_of_total(vacant)));
    context.insert("reform_count".into(), reform.to_string());
    context.insert("sale_count".into(), sale.to_string());
    context.insert("total_acquisition".into(), fmt_money(total_acquisition));
    context.insert("total_current".into(), fmt_money(total_value));
    context.insert("total_appreciation".into(), fmt_money(appreciation));
    context.insert("appreciation_pct".into(), fmt_pct(appreciation_pct));

    for (prefix, tipo) in [
        ("res", "Residencial"),
        ("com", "Comercial"),
        ("ind", "Industrial"),
        ("ter", "Terreno"),
    ] {
        let of_type: Vec<&Property> =
            properties.iter().filter(|p| p.tipo == tipo).collect();
        let value: f64 = of_type.iter().map(|p| p.valor_atual).sum();
        let income: f64 = of_type.iter().map(|p| p.monthly_income()).sum();
        context.insert(format!("{}_count", prefix), of_type.len().to_string());
        context.insert(format!("{}_value", prefix), fmt_money(value));
        context.insert(format!("{}_income", prefix), fmt_money(income));
    }

    let mut by_value: Vec<&Property> = properties.iter().collect();
    by_value.sort_by(|a, b| {
        b.valor_atual
            .partial_cmp(&a.valor_atual)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for i in 0..5 {
        let (name, value) = match by_value.get(i) {
            Some(p) => (p.nome.clone(), fmt_money(p.valor_atual)),
            None => ("-".to_string(), "0.00".to_string()),
        };
        context.insert(format!("top{}_name", i + 1), name);
        context.insert(format!("top{}_value", i + 1), value);
    }

    let mut by_income: Vec<&Property> = properties.iter().collect();
    by_income.sort_by(|a, b| {
        b.monthly_income()
            .partial_cmp(&a.monthly_income())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for i in 0..5 {
        let (name, value) = match by_income.get(i) {
            Some(p) => (p.nome.clone(), fmt_money(p.monthly_income())),
            None => ("-".to_string(), "0.00".to_string()),
        };
        context.insert(format!("income_top{}_name", i + 1), name);
        context.insert(format!("income_top{}_value", i + 1), value);
    }

    context
}

/// First day of the month after today, formatted YYYY-MM-DD.
fn first_of_next_month() -> String {
    let today = Local::now().date_naive();
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => today.format("%Y-%m-%d").to_string(),
    }
}

//! IFRS report rendering
//!
//! Renders the loaded portfolio into PDF and Excel reports: an executive
//! summary plus a per-property detail listing. Direct library calls over
//! aggregated sums; no layout engine.

pub mod excel;
pub mod pdf;

use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

use crate::portfolio::PortfolioStore;

/// Report rendering errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Output directory or file could not be written
    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// PDF rendering failed
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
    /// Excel rendering failed
    #[error("Excel rendering failed: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
    /// Nothing to report on
    #[error("no property data loaded")]
    EmptyPortfolio,
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Which report files to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Excel,
    Both,
}

impl ReportFormat {
    fn wants_pdf(self) -> bool {
        matches!(self, ReportFormat::Pdf | ReportFormat::Both)
    }

    fn wants_excel(self) -> bool {
        matches!(self, ReportFormat::Excel | ReportFormat::Both)
    }
}

/// Executive summary figures shared by both renderers
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    /// Number of properties in the portfolio
    pub total_properties: usize,
    /// Sum of current values
    pub total_value: f64,
    /// Mean current value per property
    pub mean_value: f64,
    /// Reporting period, YYYY-MM
    pub period: String,
}

impl ReportSummary {
    /// Computes summary figures for the current period
    pub fn from_store(store: &PortfolioStore) -> Self {
        let total_properties = store.len();
        let total_value: f64 = store.all().iter().map(|p| p.valor_atual).sum();
        let mean_value = if total_properties > 0 {
            total_value / total_properties as f64
        } else {
            0.0
        };

        Self {
            total_properties,
            total_value,
            mean_value,
            period: Local::now().format("%Y-%m").to_string(),
        }
    }
}

/// Renders the requested report files into `output_dir`.
///
/// Filenames are timestamped `ifrs_report_<YYYYmmdd_HHMMSS>.{pdf,xlsx}`;
/// the directory is created on demand. Returns the written paths.
pub fn generate_reports(
    store: &PortfolioStore,
    output_dir: &Path,
    format: ReportFormat,
) -> ReportResult<Vec<PathBuf>> {
    if store.is_empty() {
        return Err(ReportError::EmptyPortfolio);
    }

    std::fs::create_dir_all(output_dir)?;

    let summary = ReportSummary::from_store(store);
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let mut written = Vec::new();

    if format.wants_pdf() {
        let path = output_dir.join(format!("ifrs_report_{}.pdf", timestamp));
        pdf::render_pdf(store, &summary, &path)?;
        written.push(path);
    }

    if format.wants_excel() {
        let path = output_dir.join(format!("ifrs_report_{}.xlsx", timestamp));
        excel::render_excel(store, &summary, &path)?;
        written.push(path);
    }

    Ok(written)
}

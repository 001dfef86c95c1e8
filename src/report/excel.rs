//! Excel report renderer
//!
//! Two worksheets: "Resumo" with the executive summary, "Propriedades"
//! with one row per property.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::portfolio::PortfolioStore;

use super::{ReportResult, ReportSummary};

/// Renders the IFRS report as an Excel workbook at `path`.
pub fn render_excel(
    store: &PortfolioStore,
    summary: &ReportSummary,
    path: &Path,
) -> ReportResult<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    // Summary sheet
    let sheet = workbook.add_worksheet();
    sheet.set_name("Resumo")?;
    sheet.write_string_with_format(0, 0, "Metrica", &header_format)?;
    sheet.write_string_with_format(0, 1, "Valor", &header_format)?;
    sheet.write_string(1, 0, "Total de Propriedades")?;
    sheet.write_number(1, 1, summary.total_properties as f64)?;
    sheet.write_string(2, 0, "Valor Total do Portfolio")?;
    sheet.write_number(2, 1, summary.total_value)?;
    sheet.write_string(3, 0, "Valor Medio por Propriedade")?;
    sheet.write_number(3, 1, summary.mean_value)?;
    sheet.set_column_width(0, 30)?;
    sheet.set_column_width(1, 20)?;

    // Detail sheet
    let sheet = workbook.add_worksheet();
    sheet.set_name("Propriedades")?;

    let columns = [
        "id_propriedade",
        "nome",
        "tipo",
        "cidade",
        "estado",
        "area_m2",
        "valor_aquisicao",
        "valor_atual",
        "renda_mensal",
        "status",
    ];
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (i, property) in store.all().iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &property.id_propriedade)?;
        sheet.write_string(row, 1, &property.nome)?;
        sheet.write_string(row, 2, &property.tipo)?;
        sheet.write_string(row, 3, &property.cidade)?;
        sheet.write_string(row, 4, &property.estado)?;
        sheet.write_number(row, 5, property.area_m2)?;
        sheet.write_number(row, 6, property.valor_aquisicao)?;
        sheet.write_number(row, 7, property.valor_atual)?;
        sheet.write_number(row, 8, property.monthly_income())?;
        sheet.write_string(row, 9, &property.status)?;
    }
    sheet.set_column_width(1, 32)?;

    workbook.save(path)?;
    Ok(())
}

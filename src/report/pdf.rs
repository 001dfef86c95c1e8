//! PDF report renderer
//!
//! A4 pages, builtin Helvetica fonts, y-cursor text placement. Content:
//! title, executive summary, per-property detail lines, generation
//! footer.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::Local;
use printpdf::{BuiltinFont, Mm, PdfDocument, PdfLayerReference};

use crate::portfolio::PortfolioStore;

use super::{ReportError, ReportResult, ReportSummary};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT_MARGIN: f32 = 20.0;
const TOP_START: f32 = 277.0;
const BOTTOM_LIMIT: f32 = 25.0;
const LINE_STEP: f32 = 6.0;

/// Renders the IFRS report as a PDF at `path`.
pub fn render_pdf(store: &PortfolioStore, summary: &ReportSummary, path: &Path) -> ReportResult<()> {
    let (doc, page1, layer1) = PdfDocument::new(
        "Relatorio IFRS - Portfolio Imobiliario",
        Mm(PAGE_WIDTH.into()),
        Mm(PAGE_HEIGHT.into()),
        "Layer 1",
    );

    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    let font_regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut y = TOP_START;

    // Title
    layer.use_text(
        format!("Relatorio IFRS - Portfolio Imobiliario ({})", summary.period),
        16.0,
        Mm(LEFT_MARGIN.into()),
        Mm(y.into()),
        &font_bold,
    );
    y -= 14.0;

    // Executive summary
    layer.use_text("RESUMO EXECUTIVO", 13.0, Mm(LEFT_MARGIN.into()), Mm(y.into()), &font_bold);
    y -= 8.0;

    let summary_lines = [
        format!("Total de propriedades: {}", summary.total_properties),
        format!("Valor total do portfolio: R$ {:.2}", summary.total_value),
        format!("Valor medio por propriedade: R$ {:.2}", summary.mean_value),
    ];
    for line in &summary_lines {
        layer.use_text(line, 11.0, Mm(LEFT_MARGIN.into()), Mm(y.into()), &font_regular);
        y -= LINE_STEP;
    }
    y -= 8.0;

    // Per-property detail
    layer.use_text(
        "DETALHAMENTO POR PROPRIEDADE",
        13.0,
        Mm(LEFT_MARGIN.into()),
        Mm(y.into()),
        &font_bold,
    );
    y -= 8.0;

    for property in store.all() {
        if y < BOTTOM_LIMIT {
            let (page, inner_layer) =
                doc.add_page(Mm(PAGE_WIDTH.into()), Mm(PAGE_HEIGHT.into()), "Layer 1");
            layer = doc.get_page(page).get_layer(inner_layer);
            y = TOP_START;
        }

        let name: String = property.nome.chars().take(40).collect();
        let line = format!(
            "{}  {}  R$ {:.2}",
            property.id_propriedade, name, property.valor_atual
        );
        layer.use_text(&line, 9.0, Mm(LEFT_MARGIN.into()), Mm(y.into()), &font_regular);
        y -= LINE_STEP;
    }

    // Footer
    write_footer(&layer, &font_regular);

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    Ok(())
}

fn write_footer(layer: &PdfLayerReference, font: &printpdf::IndirectFontRef) {
    let footer = format!("Gerado em: {}", Local::now().format("%d/%m/%Y %H:%M:%S"));
    layer.use_text(footer, 8.0, Mm(LEFT_MARGIN.into()), Mm(12.0), font);
}

//! CSV import with upsert semantics
//!
//! Reads raw CSV records (the file may still contain `N/A` cells the
//! store would reject), normalizes absence to NULL and upserts by
//! `codigo`. The whole batch runs in one transaction: commit only after
//! the last row, rollback on any error.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::schema::is_absent;

use super::{DbError, DbResult};

const UPSERT_SQL: &str = "INSERT INTO propriedades (
        codigo, nome, tipo, endereco, cidade, estado, cep,
        area_m2, valor_aquisicao, data_aquisicao, valor_atual,
        renda_mensal, inquilino, status
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
    ON CONFLICT (codigo) DO UPDATE SET
        nome = EXCLUDED.nome,
        tipo = EXCLUDED.tipo,
        endereco = EXCLUDED.endereco,
        cidade = EXCLUDED.cidade,
        estado = EXCLUDED.estado,
        cep = EXCLUDED.cep,
        area_m2 = EXCLUDED.area_m2,
        valor_aquisicao = EXCLUDED.valor_aquisicao,
        data_aquisicao = EXCLUDED.data_aquisicao,
        valor_atual = EXCLUDED.valor_atual,
        renda_mensal = EXCLUDED.renda_mensal,
        inquilino = EXCLUDED.inquilino,
        status = EXCLUDED.status,
        updated_at = NOW()
    RETURNING (xmax = 0) AS inserted";

/// One normalized CSV row ready for the database
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRecord {
    pub codigo: String,
    pub nome: String,
    pub tipo: Option<String>,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub area_m2: Option<f64>,
    pub valor_aquisicao: Option<f64>,
    pub data_aquisicao: Option<NaiveDate>,
    pub valor_atual: Option<f64>,
    pub renda_mensal: Option<f64>,
    pub inquilino: Option<String>,
    pub status: Option<String>,
}

impl ImportRecord {
    /// One-line preview used by dry runs.
    pub fn preview_line(&self) -> String {
        let valor = match self.valor_atual {
            Some(v) => format!("R$ {:.2}", v),
            None => "N/A".to_string(),
        };
        format!(
            "{} {} ({}) {}",
            self.codigo,
            self.nome,
            self.status.as_deref().unwrap_or("N/A"),
            valor
        )
    }
}

/// Outcome of an import run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub total: usize,
    pub inserted: usize,
    pub updated: usize,
    pub dry_run: bool,
}

fn normalize_text(raw: &str) -> Option<String> {
    if is_absent(raw) {
        None
    } else {
        Some(raw.trim().to_string())
    }
}

fn normalize_number(raw: &str) -> Option<f64> {
    let text = normalize_text(raw)?;
    text.replace(',', ".").parse().ok()
}

fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let text = normalize_text(raw)?;
    NaiveDate::parse_from_str(&text, "%Y-%m-%d").ok()
}

/// Parses the CSV into normalized records, keeping column lookup by
/// header name so column order does not matter.
pub fn read_records<R: Read>(reader: R) -> DbResult<Vec<ImportRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let codigo_col = column("id_propriedade");
    let nome_col = column("nome");

    let mut records = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let row = i as u64 + 2;
        let record = result?;
        let cell = |idx: Option<usize>| idx.and_then(|c| record.get(c)).unwrap_or("");

        let codigo = normalize_text(cell(codigo_col)).ok_or_else(|| {
            DbError::MissingColumn {
                row,
                column: "id_propriedade".to_string(),
            }
        })?;
        let nome = normalize_text(cell(nome_col)).ok_or_else(|| DbError::MissingColumn {
            row,
            column: "nome".to_string(),
        })?;

        records.push(ImportRecord {
            codigo,
            nome,
            tipo: normalize_text(cell(column("tipo"))),
            endereco: normalize_text(cell(column("endereco"))),
            cidade: normalize_text(cell(column("cidade"))),
            estado: normalize_text(cell(column("estado"))),
            cep: normalize_text(cell(column("cep"))),
            area_m2: normalize_number(cell(column("area_m2"))),
            valor_aquisicao: normalize_number(cell(column("valor_aquisicao"))),
            data_aquisicao: normalize_date(cell(column("data_aquisicao"))),
            valor_atual: normalize_number(cell(column("valor_atual"))),
            renda_mensal: normalize_number(cell(column("renda_mensal"))),
            inquilino: normalize_text(cell(column("inquilino"))),
            status: normalize_text(cell(column("status"))),
        });
    }
    Ok(records)
}

/// Imports the CSV at `path` into the `propriedades` table.
///
/// With `dry_run` the database is never touched; the returned summary
/// reports zero inserts and updates.
pub async fn import_csv(pool: &PgPool, path: &Path, dry_run: bool) -> DbResult<ImportSummary> {
    let file = std::fs::File::open(path)?;
    let records = read_records(file)?;

    if dry_run {
        return Ok(ImportSummary {
            total: records.len(),
            inserted: 0,
            updated: 0,
            dry_run: true,
        });
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    let mut updated = 0;

    for record in &records {
        let was_insert: bool = sqlx::query_scalar(UPSERT_SQL)
            .bind(&record.codigo)
            .bind(&record.nome)
            .bind(&record.tipo)
            .bind(&record.endereco)
            .bind(&record.cidade)
            .bind(&record.estado)
            .bind(&record.cep)
            .bind(record.area_m2)
            .bind(record.valor_aquisicao)
            .bind(record.data_aquisicao)
            .bind(record.valor_atual)
            .bind(record.renda_mensal)
            .bind(&record.inquilino)
            .bind(&record.status)
            .fetch_one(&mut *tx)
            .await?;
        if was_insert {
            inserted += 1;
        } else {
            updated += 1;
        }
    }

    tx.commit().await?;

    Ok(ImportSummary {
        total: records.len(),
        inserted,
        updated,
        dry_run: false,
    })
}

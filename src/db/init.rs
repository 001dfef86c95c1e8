//! Database schema initialization
//!
//! One statement per entry so failures point at a specific command.
//! Everything is `IF NOT EXISTS`, so init is safe to re-run.

use sqlx::PgPool;

use super::DbResult;

/// DDL statements executed in order by [`init_database`]
pub const INIT_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS propriedades (
        id SERIAL PRIMARY KEY,
        codigo TEXT NOT NULL UNIQUE,
        nome TEXT NOT NULL,
        tipo TEXT,
        endereco TEXT,
        cidade TEXT,
        estado TEXT,
        cep TEXT,
        area_m2 DOUBLE PRECISION,
        valor_aquisicao DOUBLE PRECISION,
        data_aquisicao DATE,
        valor_atual DOUBLE PRECISION,
        renda_mensal DOUBLE PRECISION,
        inquilino TEXT,
        status TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS transacoes (
        id SERIAL PRIMARY KEY,
        propriedade_id INTEGER NOT NULL REFERENCES propriedades(id),
        tipo TEXT NOT NULL,
        valor DOUBLE PRECISION NOT NULL,
        data DATE NOT NULL,
        descricao TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS relatorios_ifrs (
        id SERIAL PRIMARY KEY,
        periodo TEXT NOT NULL,
        arquivo_pdf TEXT,
        arquivo_excel TEXT,
        total_propriedades INTEGER,
        valor_total DOUBLE PRECISION,
        gerado_em TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE INDEX IF NOT EXISTS idx_propriedades_codigo ON propriedades (codigo)",
    "CREATE INDEX IF NOT EXISTS idx_propriedades_tipo ON propriedades (tipo)",
    "CREATE INDEX IF NOT EXISTS idx_propriedades_status ON propriedades (status)",
    "CREATE INDEX IF NOT EXISTS idx_transacoes_propriedade ON transacoes (propriedade_id)",
];

/// Creates the portfolio tables and indexes.
///
/// Returns the number of statements executed.
pub async fn init_database(pool: &PgPool) -> DbResult<usize> {
    for statement in INIT_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(INIT_STATEMENTS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddl_covers_all_tables() {
        let ddl = INIT_STATEMENTS.join("\n");
        for table in ["propriedades", "transacoes", "relatorios_ifrs"] {
            assert!(
                ddl.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "missing table {}",
                table
            );
        }
    }

    #[test]
    fn test_ddl_is_rerunnable() {
        for statement in INIT_STATEMENTS {
            assert!(statement.contains("IF NOT EXISTS"));
        }
    }
}

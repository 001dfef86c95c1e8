//! CLI command implementations
//!
//! Each command loads what it needs, does its work and returns a
//! `CliResult`. Commands stay synchronous; the ones that need async
//! collaborators (server, hub sync, database) spin up a tokio runtime
//! locally.

use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::db;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::notes::NoteGenerator;
use crate::observability::Logger;
use crate::portfolio::PortfolioStore;
use crate::report::{generate_reports, ReportFormat};
use crate::schema::{CsvValidator, ErrorReporter, Schema, SchemaRegistry};
use crate::sync::HfClient;

use super::args::{Command, FormatArg};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate { csv, schema } => validate(&csv, schema.as_deref()),
        Command::Serve { data, host, port } => serve(&data, &host, port),
        Command::Report {
            csv,
            format,
            output_dir,
        } => report(&csv, format, &output_dir),
        Command::Obsidian { csv, output_dir } => obsidian(&csv, &output_dir),
        Command::Sync {
            csv,
            dataset,
            token,
        } => sync(&csv, &dataset, token),
        Command::DbInit { database_url } => db_init(database_url),
        Command::DbImport {
            csv,
            dry_run,
            database_url,
        } => db_import(&csv, dry_run, database_url),
    }
}

fn resolve_schema(csv: &Path, schema_path: Option<&Path>) -> CliResult<Schema> {
    match schema_path {
        Some(path) => SchemaRegistry::load_file(path),
        None => SchemaRegistry::new().schema_for_csv(csv),
    }
    .map_err(|e| CliError::schema_error(e.to_string()))
}

fn load_store(csv: &Path) -> CliResult<PortfolioStore> {
    PortfolioStore::load_csv(csv).map_err(|e| CliError::store_error(e.to_string()))
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new().map_err(|e| CliError::io_error(format!("tokio runtime: {}", e)))
}

/// Validate a portfolio CSV against its schema
///
/// Prints the full report to stdout. Exit status reflects validity:
/// any error in the report makes the run fail.
pub fn validate(csv: &Path, schema_path: Option<&Path>) -> CliResult<()> {
    let schema = resolve_schema(csv, schema_path)?;
    let validator = CsvValidator::new(&schema);
    let report = validator.validate_path(csv);

    println!("{}", ErrorReporter::render(&report));

    if report.is_valid() {
        Ok(())
    } else {
        Err(CliError::validation_failed(report.errors().len()))
    }
}

/// Serve the read-only query API over the loaded portfolio
pub fn serve(data: &Path, host: &str, port: u16) -> CliResult<()> {
    let store = load_store(data)?;
    Logger::info(
        "portfolio_loaded",
        &[
            ("path", &data.display().to_string()),
            ("properties", &store.len().to_string()),
        ],
    );

    let config = HttpServerConfig::new(host, port);
    let server = HttpServer::new(config, Arc::new(store));
    runtime()?
        .block_on(server.start())
        .map_err(|e| CliError::server_error(e.to_string()))
}

/// Generate IFRS reports from a portfolio CSV
pub fn report(csv: &Path, format: FormatArg, output_dir: &Path) -> CliResult<()> {
    let store = load_store(csv)?;
    let format = match format {
        FormatArg::Pdf => ReportFormat::Pdf,
        FormatArg::Excel => ReportFormat::Excel,
        FormatArg::Both => ReportFormat::Both,
    };

    let written = generate_reports(&store, output_dir, format)
        .map_err(|e| CliError::report_error(e.to_string()))?;

    for path in &written {
        println!("{}", path.display());
    }
    Logger::info(
        "reports_generated",
        &[
            ("count", &written.len().to_string()),
            ("output_dir", &output_dir.display().to_string()),
        ],
    );
    Ok(())
}

/// Export Obsidian vault notes for the portfolio
pub fn obsidian(csv: &Path, output_dir: &Path) -> CliResult<()> {
    let store = load_store(csv)?;
    let generator = NoteGenerator::new(&store, output_dir);
    let count = generator
        .generate_all()
        .map_err(|e| CliError::notes_error(e.to_string()))?;

    Logger::info(
        "notes_generated",
        &[
            ("count", &count.to_string()),
            ("output_dir", &output_dir.display().to_string()),
        ],
    );
    Ok(())
}

/// Push the portfolio CSV to a Hugging Face dataset
pub fn sync(csv: &Path, dataset: &str, token: Option<String>) -> CliResult<()> {
    if !csv.exists() {
        return Err(CliError::io_error(format!(
            "File not found: {}",
            csv.display()
        )));
    }

    let client = HfClient::new(token).map_err(|e| CliError::sync_error(e.to_string()))?;
    let rt = runtime()?;

    rt.block_on(client.sync_portfolio(dataset, csv))
        .map_err(|e| CliError::sync_error(e.to_string()))?;

    let info = rt
        .block_on(client.dataset_info(dataset))
        .map_err(|e| CliError::sync_error(e.to_string()))?;

    Logger::info(
        "portfolio_synced",
        &[
            ("dataset", &info.id),
            ("private", if info.private { "true" } else { "false" }),
        ],
    );
    Ok(())
}

/// Create the PostgreSQL tables and indexes
pub fn db_init(database_url: Option<String>) -> CliResult<()> {
    let url = db::resolve_database_url(database_url)
        .map_err(|e| CliError::db_error(e.to_string()))?;

    let rt = runtime()?;
    let executed = rt
        .block_on(async {
            let pool = db::connect(&url).await?;
            db::init_database(&pool).await
        })
        .map_err(|e| CliError::db_error(e.to_string()))?;

    Logger::info("database_initialized", &[("statements", &executed.to_string())]);
    Ok(())
}

/// Import a portfolio CSV into PostgreSQL
pub fn db_import(csv: &Path, dry_run: bool, database_url: Option<String>) -> CliResult<()> {
    if dry_run {
        let file = std::fs::File::open(csv)?;
        let records =
            db::import::read_records(file).map_err(|e| CliError::db_error(e.to_string()))?;

        println!("Dry run: {} record(s) would be imported", records.len());
        for record in records.iter().take(5) {
            println!("  {}", record.preview_line());
        }
        if records.len() > 5 {
            println!("  ... and {} more", records.len() - 5);
        }
        return Ok(());
    }

    let url = db::resolve_database_url(database_url)
        .map_err(|e| CliError::db_error(e.to_string()))?;

    let rt = runtime()?;
    let summary = rt
        .block_on(async {
            let pool = db::connect(&url).await?;
            db::import_csv(&pool, csv, false).await
        })
        .map_err(|e| CliError::db_error(e.to_string()))?;

    Logger::info(
        "import_finished",
        &[
            ("total", &summary.total.to_string()),
            ("inserted", &summary.inserted.to_string()),
            ("updated", &summary.updated.to_string()),
        ],
    );
    Ok(())
}

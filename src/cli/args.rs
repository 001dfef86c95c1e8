//! CLI argument definitions using clap
//!
//! Commands:
//! - imobi validate <csv> [--schema <json>]
//! - imobi serve --data <csv> [--host] [--port]
//! - imobi report <csv> [--format] [--output-dir]
//! - imobi obsidian <csv> [--output-dir]
//! - imobi sync <csv> <dataset> [--token]
//! - imobi db-init / db-import <csv> [--dry-run]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// imobi - real-estate portfolio validation, query API and reporting
#[derive(Parser, Debug)]
#[command(name = "imobi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Report output selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Pdf,
    Excel,
    Both,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a portfolio CSV against its schema
    Validate {
        /// Path to the CSV file
        csv: PathBuf,

        /// Explicit schema JSON; defaults to the sibling
        /// <name>_schema.json convention, then the built-in schema
        #[arg(long)]
        schema: Option<PathBuf>,
    },

    /// Serve the read-only portfolio query API
    Serve {
        /// Path to the CSV file to load
        #[arg(long)]
        data: PathBuf,

        /// Bind address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Bind port
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },

    /// Generate IFRS reports from a portfolio CSV
    Report {
        /// Path to the CSV file
        csv: PathBuf,

        /// Which report files to produce
        #[arg(long, value_enum, default_value_t = FormatArg::Both)]
        format: FormatArg,

        /// Directory the reports are written into
        #[arg(long, default_value = "./reports")]
        output_dir: PathBuf,
    },

    /// Export Obsidian vault notes for the portfolio
    Obsidian {
        /// Path to the CSV file
        csv: PathBuf,

        /// Vault directory the notes are written into
        #[arg(long, default_value = "./vault")]
        output_dir: PathBuf,
    },

    /// Push the portfolio CSV to a Hugging Face dataset
    Sync {
        /// Path to the CSV file
        csv: PathBuf,

        /// Dataset repository, owner/name
        dataset: String,

        /// Hub token; defaults to the HF_TOKEN environment variable
        #[arg(long)]
        token: Option<String>,
    },

    /// Create the PostgreSQL tables and indexes
    DbInit {
        /// Connection URL; defaults to the DATABASE_URL environment variable
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Import a portfolio CSV into PostgreSQL
    DbImport {
        /// Path to the CSV file
        csv: PathBuf,

        /// Preview the rows without touching the database
        #[arg(long)]
        dry_run: bool,

        /// Connection URL; defaults to the DATABASE_URL environment variable
        #[arg(long)]
        database_url: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

//! CLI module for imobi
//!
//! Provides command-line interface for:
//! - validate: Check a portfolio CSV against its schema
//! - serve: Boot the read-only query API
//! - report: Generate IFRS reports
//! - obsidian: Export vault notes
//! - sync: Push the CSV to a Hugging Face dataset
//! - db-init / db-import: PostgreSQL schema and import

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, FormatArg};
pub use commands::{db_import, db_init, obsidian, report, run, run_command, serve, sync, validate};
pub use errors::{CliError, CliErrorCode, CliResult};

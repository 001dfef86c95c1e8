//! # Obsidian Notes
//!
//! Markdown note generation for an Obsidian vault: one note per
//! property plus a portfolio dashboard, rendered from embedded
//! `{{placeholder}}` templates.

pub mod generator;
pub mod template;

use thiserror::Error;

/// Note generation errors
#[derive(Debug, Error)]
pub enum NotesError {
    /// Vault directory or note file could not be written
    #[error("notes I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Nothing to generate notes for
    #[error("no property data loaded")]
    EmptyPortfolio,
}

/// Result type for note operations
pub type NotesResult<T> = Result<T, NotesError>;

pub use generator::{note_filename, NoteGenerator, DASHBOARD_NOTE};
pub use template::{render, DASHBOARD_TEMPLATE, PROPERTY_TEMPLATE};

//! Error types for roster parsing and sheet updates
//!
//! Every failure that aborts a run lives here. Lines that merely fail to
//! match the roster pattern are not errors; they are counted in
//! [`RosterReport`](crate::types::RosterReport).

use std::path::PathBuf;

use thiserror::Error;

/// Error type for roster operations
#[derive(Error, Debug)]
pub enum RosterError {
    /// The input document could not be read or converted to text
    #[error("Failed to read document {path:?}: {reason}")]
    DocumentRead { path: PathBuf, reason: String },

    /// The requested worksheet does not exist in the workbook
    #[error("Sheet '{name}' does not exist (available: {})", available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },

    /// A cell reference was not in A1 notation
    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    /// The workbook file could not be loaded or saved
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// Score input was not valid JSON
    #[error("Invalid score data: {0}")]
    Json(#[from] serde_json::Error),

    /// Parser settings are inconsistent
    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;

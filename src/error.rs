//! Error types for the scheduler.
//!
//! Each layer has its own enum so callers can tell an engine refusal apart
//! from a bad names file or a failed export.

use thiserror::Error;

/// Failures from the assignment engine. Raised before any randomness is drawn.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignError {
    /// More people per floor than there are names at all
    #[error("people per floor ({people_per_floor}) exceeds available names ({available})")]
    InsufficientRosterSize { people_per_floor: usize, available: usize },

    /// Reuse not allowed and the roster can't cover every slot
    #[error("not enough unique names ({available} < {needed}); add names or allow reuse")]
    InsufficientUniqueNames { needed: usize, available: usize },
}

impl AssignError {
    /// Stable machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            AssignError::InsufficientRosterSize { .. } => "insufficient_roster_size",
            AssignError::InsufficientUniqueNames { .. } => "insufficient_unique_names",
        }
    }
}

/// Failures while reading a list of names
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("unsupported file type: {0:?}")]
    UnsupportedFormat(String),

    #[error("error reading file: {0}")]
    Read(#[from] std::io::Error),

    #[error("error reading CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("error reading spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("no names found")]
    Empty,
}

/// Failures while writing a generated schedule
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export type: {0:?}")]
    UnsupportedFormat(String),

    #[error("save failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("save failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("save failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Top-level error for the CLI and web layers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Assign(#[from] AssignError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Roster(RosterError::UnsupportedFormat(_)) => "unsupported_format",
            AppError::Roster(RosterError::Empty) => "empty_roster",
            AppError::Roster(_) => "unreadable_roster",
            AppError::Assign(e) => e.kind(),
            AppError::Export(_) => "export_failed",
        }
    }
}

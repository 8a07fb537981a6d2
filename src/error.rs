use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Dataset loading errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning a CSV file into a [`Dataset`].
///
/// [`Dataset`]: crate::data::model::Dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("column '{0}' appears more than once in the header")]
    DuplicateColumn(String),

    #[error("row {row}, column '{column}': {reason} (got '{value}')")]
    InvalidField {
        row: usize,
        column: String,
        value: String,
        reason: &'static str,
    },

    #[error("row {row}: duplicate movie '{title}' ({year})")]
    DuplicateMovie { row: usize, title: String, year: i32 },
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write CSV to {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("nothing to export: the current view is empty")]
    NothingToExport,
}

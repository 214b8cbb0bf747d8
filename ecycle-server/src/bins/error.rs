//! Data pipeline error types.

use std::path::PathBuf;

/// Errors from loading the bin location source file.
///
/// Missing columns are deliberately not represented here: the cleaning
/// steps narrow themselves to the columns actually present instead of
/// failing.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Source file does not exist
    #[error("source file not found: {}", .0.display())]
    Unavailable(PathBuf),

    /// Reading the file failed after it was found
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV syntax error
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

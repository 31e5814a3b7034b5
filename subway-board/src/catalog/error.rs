//! Stop catalog error types.

use std::path::PathBuf;

/// Errors that can occur while loading the static stop file.
///
/// Every variant means the source is unusable; no partial catalog is built.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The stop file could not be opened
    #[error("failed to open stop file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be read or parsed
    #[error("malformed stop file: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks a required column
    #[error("malformed stop file: missing required column `{0}`")]
    MissingColumn(&'static str),

    /// A row has a blank stop_id
    #[error("malformed stop file: blank stop_id on line {line}")]
    BlankStopId { line: u64 },
}

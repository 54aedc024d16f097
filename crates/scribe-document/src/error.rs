//! Error types for notebook reading.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when reading source and target notebooks.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A notebook file is not valid notebook JSON.
    #[error("failed to parse notebook {path}: {source}")]
    ParseNotebook {
        /// Path to the malformed notebook.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A tab-separated line has no identifier column.
    #[error("{path}:{line}: expected `ID<TAB>text`")]
    MalformedLine {
        /// Path to the tabular file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
    },
}

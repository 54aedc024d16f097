//! Error types for the scribe-index crate.

use std::io;

use scribe_config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building or querying the indexes.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to create an index.
    #[error("failed to create index: {0}")]
    CreateIndex(String),

    /// Failed to write to an index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to an index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// Failed to execute a search or read stored fields.
    #[error("search failed: {0}")]
    Search(String),

    /// Search options that can never produce a meaningful query.
    #[error("invalid search options: {0}")]
    InvalidSearchOptions(String),

    /// Invalid stemmer language.
    #[error("unsupported stemmer language: {0}")]
    InvalidLanguage(String),

    /// Configuration could not be compiled.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error while reading the term dictionary.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl IndexError {
    /// Creates a `CreateIndex` error from a Tantivy error.
    pub(crate) fn create(source: &tantivy::TantivyError) -> Self {
        Self::CreateIndex(source.to_string())
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }

    /// Creates a `Search` error from a Tantivy error.
    pub(crate) fn search(source: &tantivy::TantivyError) -> Self {
        Self::Search(source.to_string())
    }
}

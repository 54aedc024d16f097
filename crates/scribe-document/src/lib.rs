//! Notebook reading for scribe.
//!
//! This crate turns project files into the cell model the indexes consume:
//! - JSON notebooks (`.source`, `.codex`) whose cells carry a type tag and a verse id
//! - Tab-separated `ID<TAB>text` files for plain-text sources
//! - Verse references (`GEN 1:1`) split into book, chapter and verse

#![warn(missing_docs)]

mod error;
mod notebook;
mod tabular;
mod verse;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub use error::DocumentError;
pub use notebook::parse_notebook;
pub use tabular::parse_tabular;
pub use verse::{VerseRef, VerseRefError};

/// Extensions read as tab-separated text instead of notebook JSON.
const TABULAR_EXTENSIONS: &[&str] = &["tsv", "txt"];

/// One cell of a notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Cell type tag (`metadata.type`), if present.
    pub kind: Option<String>,
    /// Cell identifier (`metadata.id`), usually a verse reference.
    pub id: Option<String>,
    /// Cell text.
    pub value: String,
}

impl Cell {
    /// Creates a cell with a type tag and identifier.
    pub fn new(kind: &str, id: &str, value: &str) -> Self {
        Self {
            kind: Some(kind.to_string()),
            id: Some(id.to_string()),
            value: value.to_string(),
        }
    }

    /// Returns true if the cell carries translatable text under the given type tag.
    ///
    /// The cell must have the tag, an identifier, and a value that is not blank.
    pub fn is_text(&self, text_cell_type: &str) -> bool {
        self.kind.as_deref() == Some(text_cell_type)
            && self.id.is_some()
            && !self.value.trim().is_empty()
    }
}

/// A source or target file with its cells, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path of the file on disk.
    pub path: PathBuf,
    /// Cells in file order.
    pub cells: Vec<Cell>,
}

impl SourceFile {
    /// Returns the file name without its final extension (`en.source` -> `en`).
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Reads a file from disk into a `SourceFile`.
///
/// Files with a `tsv` or `txt` extension are read as `ID<TAB>text` lines, with each line
/// becoming a cell tagged `text_cell_type`. Everything else is parsed as notebook JSON.
pub fn read_source_file(path: &Path, text_cell_type: &str) -> Result<SourceFile, DocumentError> {
    let contents = fs::read_to_string(path).map_err(|source| DocumentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let is_tabular = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| TABULAR_EXTENSIONS.contains(&e.to_lowercase().as_str()));

    let cells = if is_tabular {
        parse_tabular(&contents, path, text_cell_type)?
    } else {
        parse_notebook(&contents, path)?
    };

    Ok(SourceFile {
        path: path.to_path_buf(),
        cells,
    })
}

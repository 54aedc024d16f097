//! JSON notebook parsing.
//!
//! Notebooks are objects with a `cells` array. Each cell has a `value` and an optional
//! `metadata` object holding the cell `type` and `id`. Other keys are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::{Cell, DocumentError};

/// Notebook file layout.
#[derive(Debug, Deserialize)]
struct RawNotebook {
    /// Cells in file order.
    #[serde(default)]
    cells: Vec<RawCell>,
}

/// A cell as stored on disk.
#[derive(Debug, Deserialize)]
struct RawCell {
    /// Cell text.
    #[serde(default)]
    value: String,
    /// Cell metadata.
    #[serde(default)]
    metadata: Option<RawMetadata>,
}

/// Cell metadata as stored on disk.
#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    /// Cell type tag.
    #[serde(rename = "type")]
    kind: Option<String>,
    /// Cell identifier.
    id: Option<String>,
}

/// Parses notebook JSON into cells.
///
/// The `path` parameter is used for error reporting.
pub fn parse_notebook(contents: &str, path: &Path) -> Result<Vec<Cell>, DocumentError> {
    let notebook: RawNotebook =
        serde_json::from_str(contents).map_err(|source| DocumentError::ParseNotebook {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(notebook
        .cells
        .into_iter()
        .map(|cell| {
            let metadata = cell.metadata.unwrap_or_default();
            Cell {
                kind: metadata.kind,
                id: metadata.id,
                value: cell.value,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cells_in_order() {
        let json = r#"{
            "cells": [
                {"kind": 2, "value": "Genesis", "metadata": {"type": "paratext", "id": "GEN 1:0"}},
                {"kind": 2, "value": "In the beginning", "metadata": {"type": "text", "id": "GEN 1:1"}},
                {"kind": 2, "value": "no metadata"}
            ]
        }"#;

        let cells = parse_notebook(json, Path::new("en.source")).unwrap();

        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0], Cell::new("paratext", "GEN 1:0", "Genesis"));
        assert_eq!(cells[1], Cell::new("text", "GEN 1:1", "In the beginning"));
        assert_eq!(cells[2].kind, None);
        assert_eq!(cells[2].id, None);
    }

    #[test]
    fn test_missing_cells_is_empty() {
        let cells = parse_notebook("{}", Path::new("empty.codex")).unwrap();
        assert!(cells.is_empty());
    }

    #[test]
    fn test_malformed_json_reports_path() {
        let err = parse_notebook("{\"cells\": [", Path::new("broken.codex")).unwrap_err();
        assert!(matches!(err, DocumentError::ParseNotebook { .. }));
        assert!(err.to_string().contains("broken.codex"));
    }
}

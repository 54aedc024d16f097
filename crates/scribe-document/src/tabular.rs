//! Tab-separated `ID<TAB>text` parsing.

use std::path::Path;

use crate::{Cell, DocumentError};

/// Parses `ID<TAB>text` lines into cells tagged `text_cell_type`.
///
/// Blank lines and lines starting with `#` are skipped. A non-blank line without a tab is an
/// error, reported with its one-based line number.
pub fn parse_tabular(
    contents: &str,
    path: &Path,
    text_cell_type: &str,
) -> Result<Vec<Cell>, DocumentError> {
    let mut cells = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((id, text)) = line.split_once('\t') else {
            return Err(DocumentError::MalformedLine {
                path: path.to_path_buf(),
                line: idx + 1,
            });
        };
        let id = id.trim();
        if id.is_empty() {
            return Err(DocumentError::MalformedLine {
                path: path.to_path_buf(),
                line: idx + 1,
            });
        }
        cells.push(Cell::new(text_cell_type, id, text));
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let input = "# greek source\nGEN 1:1\tEn arche\n\nGEN 1:2\the de ge\n";
        let cells = parse_tabular(input, Path::new("grc.tsv"), "text").unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::new("text", "GEN 1:1", "En arche"),
                Cell::new("text", "GEN 1:2", "he de ge"),
            ]
        );
    }

    #[test]
    fn test_keeps_tabs_inside_text() {
        let cells = parse_tabular("JHN 1:1\ta\tb", Path::new("x.tsv"), "verse").unwrap();
        assert_eq!(cells, vec![Cell::new("verse", "JHN 1:1", "a\tb")]);
    }

    #[test]
    fn test_line_without_tab_is_error() {
        let err = parse_tabular("GEN 1:1\tok\nbroken line\n", Path::new("x.tsv"), "text")
            .unwrap_err();
        assert!(matches!(err, DocumentError::MalformedLine { line: 2, .. }));
    }
}

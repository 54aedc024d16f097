//! Project file discovery and loading.
//!
//! Walks the project root to find source and target notebooks, applying the configured
//! exclude patterns and skipping hidden entries and symlinks, then reads them into
//! [`SourceFile`]s.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use scribe_config::{CompiledPatterns, FileRole};
use scribe_document::{SourceFile, read_source_file};
use tracing::warn;
use walkdir::WalkDir;

use crate::build::ProgressReporter;

/// Source and target files found under a project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFiles {
    /// Source notebooks, sorted by path.
    pub sources: Vec<PathBuf>,
    /// Target notebooks, sorted by path.
    pub targets: Vec<PathBuf>,
}

impl ProjectFiles {
    /// Returns every discovered path, sources first.
    pub fn all(&self) -> impl Iterator<Item = &PathBuf> {
        self.sources.iter().chain(self.targets.iter())
    }
}

/// Discovers source and target files under `root`.
///
/// Returns files that:
/// - Carry a source or target extension
/// - Don't match any exclude pattern (matched against the path relative to `root`)
/// - Are regular files, not hidden and not reached through a hidden directory
///
/// Paths are sorted so that builds see files in a stable order.
pub fn discover_project_files(root: &Path, patterns: &CompiledPatterns) -> ProjectFiles {
    let mut files = ProjectFiles::default();
    if !root.exists() {
        return files;
    }

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let abs_path = entry.path();
        let Ok(rel_path) = abs_path.strip_prefix(root) else {
            continue;
        };
        if patterns.is_excluded(rel_path) {
            continue;
        }

        match patterns.classify(abs_path) {
            Some(FileRole::Source) => files.sources.push(abs_path.to_path_buf()),
            Some(FileRole::Target) => files.targets.push(abs_path.to_path_buf()),
            None => {}
        }
    }

    files.sources.sort();
    files.targets.sort();
    files
}

/// Checks if a filename represents a hidden file (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

/// Reads files into `SourceFile`s, skipping any that fail.
///
/// Failures are logged and reported; the remaining files are still returned.
pub fn load_source_files<'a, R: ProgressReporter>(
    paths: impl IntoIterator<Item = &'a PathBuf>,
    text_cell_type: &str,
    reporter: &mut R,
) -> Vec<SourceFile> {
    let mut files = Vec::new();
    for path in paths {
        match read_source_file(path, text_cell_type) {
            Ok(file) => files.push(file),
            Err(e) => {
                let message = e.to_string();
                warn!(path = %path.display(), error = %message, "failed to read notebook");
                reporter.on_file_error(path, &message);
            }
        }
    }
    files
}

#[cfg(test)]
mod test {
    use std::fs;

    use scribe_config::IndexSettings;
    use tempfile::TempDir;

    use super::*;
    use crate::build::SilentReporter;

    const NOTEBOOK: &str =
        r#"{"cells":[{"value":"In the beginning","metadata":{"type":"text","id":"GEN 1:1"}}]}"#;

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn patterns() -> CompiledPatterns {
        CompiledPatterns::compile(&IndexSettings::default()).unwrap()
    }

    #[test]
    fn finds_sources_and_targets() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".project/sourceTexts/fr.source", NOTEBOOK);
        let en = write(temp.path(), "sourceTexts/en.source", NOTEBOOK);
        let gen_target = write(temp.path(), "files/target/GEN.codex", NOTEBOOK);
        write(temp.path(), "notes.md", "# notes");
        write(temp.path(), "node_modules/pkg/x.codex", NOTEBOOK);

        let files = discover_project_files(temp.path(), &patterns());

        assert_eq!(files.sources, vec![en]);
        assert_eq!(files.targets, vec![gen_target]);
    }

    #[test]
    fn missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let files = discover_project_files(&temp.path().join("nope"), &patterns());
        assert_eq!(files, ProjectFiles::default());
    }

    #[test]
    fn load_skips_broken_files() {
        let temp = TempDir::new().unwrap();
        let good = write(temp.path(), "en.source", NOTEBOOK);
        let bad = write(temp.path(), "fr.source", "{ not json");

        let files = load_source_files([&good, &bad], "text", &mut SilentReporter);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, good);
    }
}

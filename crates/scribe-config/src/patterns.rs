//! Exclude pattern compilation and file classification.
//!
//! Compiles the configured exclude globs into a single matcher and classifies
//! project files as source or target documents by extension.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{ConfigError, IndexSettings};

/// Role a project file plays in index population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// Source-language document.
    Source,
    /// Target-language (translation) document.
    Target,
}

/// Compiled patterns for efficient file matching.
#[derive(Debug)]
pub struct CompiledPatterns {
    /// Compiled exclude patterns.
    exclude: GlobSet,
    /// Source extensions, lowercased.
    source_extensions: Vec<String>,
    /// Target extensions, lowercased.
    target_extensions: Vec<String>,
}

impl CompiledPatterns {
    /// Compiles exclude patterns and extension lists from index settings.
    pub fn compile(settings: &IndexSettings) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &settings.exclude {
            builder.add(compile_glob(pattern)?);
        }
        let exclude = builder.build().map_err(|e| ConfigError::InvalidPattern {
            pattern: "<combined exclude patterns>".to_string(),
            source: e,
        })?;

        Ok(Self {
            exclude,
            source_extensions: lowercase_all(&settings.source_extensions),
            target_extensions: lowercase_all(&settings.target_extensions),
        })
    }

    /// Returns true if the path (relative to the project root) is excluded.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.is_match(path)
    }

    /// Classifies a path by its extension.
    ///
    /// Source extensions take precedence when an extension is listed in both.
    pub fn classify(&self, path: &Path) -> Option<FileRole> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if self.source_extensions.contains(&ext) {
            Some(FileRole::Source)
        } else if self.target_extensions.contains(&ext) {
            Some(FileRole::Target)
        } else {
            None
        }
    }

    /// Returns true if the path carries a source extension.
    pub fn is_source(&self, path: &Path) -> bool {
        self.classify(path) == Some(FileRole::Source)
    }

    /// Returns true if the path carries a target extension.
    pub fn is_target(&self, path: &Path) -> bool {
        self.classify(path) == Some(FileRole::Target)
    }
}

/// Lowercases every entry of an extension list.
fn lowercase_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

/// Compiles a single glob pattern.
fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

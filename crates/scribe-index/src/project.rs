//! Whole-project index population.
//!
//! [`ProjectIndexes::build`] runs the complete flow:
//! 1. Discover source and target files under the project root
//! 2. Read them into cells, skipping files that fail to parse
//! 3. Build the source text index from the source files
//! 4. Build the translation pair index from sources and targets

use std::path::{Path, PathBuf};

use scribe_config::Config;
use tracing::info;

use crate::{
    IndexError,
    build::{BuildStats, ProgressReporter, build_source_text_index, build_translation_pair_index},
    discovery::{ProjectFiles, discover_project_files, load_source_files},
    pairs::TranslationPairIndex,
    source::SourceTextIndex,
};

/// Both indexes of a project, populated from its files.
pub struct ProjectIndexes {
    /// Directory that was scanned.
    pub root: PathBuf,
    /// Files found under the root.
    pub files: ProjectFiles,
    /// Source text index.
    pub source: SourceTextIndex,
    /// Translation pair index.
    pub pairs: TranslationPairIndex,
    /// Statistics from the source text build.
    pub source_stats: BuildStats,
    /// Statistics from the translation pair build.
    pub pair_stats: BuildStats,
}

impl ProjectIndexes {
    /// Discovers, reads and indexes every project file under `root`.
    ///
    /// Returns an error for an invalid configuration (bad exclude glob or stemmer) or an
    /// index failure. Unreadable files are reported and skipped.
    pub fn build<R: ProgressReporter>(
        config: &Config,
        root: &Path,
        reporter: &mut R,
    ) -> Result<Self, IndexError> {
        let patterns = config.compile_patterns()?;
        let files = discover_project_files(root, &patterns);
        info!(
            root = %root.display(),
            sources = files.sources.len(),
            targets = files.targets.len(),
            "discovered project files"
        );

        let loaded = load_source_files(files.all(), &config.index.text_cell_type, reporter);

        let mut source = SourceTextIndex::new(&config.index.stemmer)?;
        let source_stats = build_source_text_index(&mut source, &loaded, &config.index, reporter)?;

        let mut pairs = TranslationPairIndex::new(&config.index.stemmer)?;
        let pair_stats = build_translation_pair_index(&mut pairs, &loaded, &config.index, reporter)?;

        Ok(Self {
            root: root.to_path_buf(),
            files,
            source,
            pairs,
            source_stats,
            pair_stats,
        })
    }
}

//! Index population from source and target files.
//!
//! Both builders follow the same flow:
//! 1. Keep the files whose extension marks them as source (or target) documents
//! 2. Collect the text cells of those files, merging per identifier
//! 3. Write each merged entry unless the stored entry already covers it
//! 4. Commit once, then report statistics

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::Path,
};

use scribe_config::IndexSettings;
use scribe_document::SourceFile;
use tracing::{debug, info, warn};

use crate::{
    IndexError,
    pairs::{TranslationPairEntry, TranslationPairIndex},
    source::{IndexedDocument, SourceTextIndex, Upsert},
};

/// Statistics from an index build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Files whose extension qualified them for this index.
    pub files_indexed: usize,
    /// Files passed in that did not qualify.
    pub files_ignored: usize,
    /// Text cells read from qualifying files.
    pub cells_indexed: usize,
    /// Entries written for identifiers not yet indexed.
    pub entries_added: usize,
    /// Entries that replaced a stored entry.
    pub entries_replaced: usize,
    /// Entries skipped because the stored entry already covered them.
    pub entries_unchanged: usize,
}

impl BuildStats {
    /// Returns the number of entries written.
    pub fn entries_written(&self) -> usize {
        self.entries_added + self.entries_replaced
    }

    /// Counts the outcome of one upsert.
    fn record(&mut self, outcome: Upsert) {
        match outcome {
            Upsert::Added => self.entries_added += 1,
            Upsert::Replaced => self.entries_replaced += 1,
            Upsert::Unchanged => self.entries_unchanged += 1,
        }
    }
}

/// Callback for reporting build progress.
pub trait ProgressReporter {
    /// Called when starting to process a file.
    fn on_file_start(&mut self, path: &Path, current: usize, total: usize);

    /// Called when a file's text cells were collected.
    fn on_file_done(&mut self, path: &Path, cells: usize);

    /// Called when a file could not be read.
    fn on_file_error(&mut self, path: &Path, error: &str);

    /// Called when a build found no qualifying files.
    fn on_no_input(&mut self, index: &str);

    /// Called when a build is complete.
    fn on_complete(&mut self, index: &str, stats: &BuildStats);
}

/// A no-op progress reporter for silent builds.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_file_start(&mut self, _path: &Path, _current: usize, _total: usize) {}
    fn on_file_done(&mut self, _path: &Path, _cells: usize) {}
    fn on_file_error(&mut self, _path: &Path, _error: &str) {}
    fn on_no_input(&mut self, _index: &str) {}
    fn on_complete(&mut self, _index: &str, _stats: &BuildStats) {}
}

/// A progress reporter that emits `tracing` events.
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn on_file_start(&mut self, path: &Path, current: usize, total: usize) {
        debug!(path = %path.display(), current, total, "reading file");
    }

    fn on_file_done(&mut self, path: &Path, cells: usize) {
        debug!(path = %path.display(), cells, "collected text cells");
    }

    fn on_file_error(&mut self, path: &Path, error: &str) {
        warn!(path = %path.display(), error, "skipping unreadable file");
    }

    fn on_no_input(&mut self, index: &str) {
        warn!(index, "no qualifying files");
    }

    fn on_complete(&mut self, index: &str, stats: &BuildStats) {
        info!(
            index,
            files = stats.files_indexed,
            written = stats.entries_written(),
            unchanged = stats.entries_unchanged,
            "index build complete"
        );
    }
}

/// Index name used in reports for the source text index.
const SOURCE_INDEX: &str = "source text";

/// Index name used in reports for the translation pair index.
const PAIR_INDEX: &str = "translation pair";

/// Populates the source text index from source files.
///
/// Content is last-write-wins across files; version labels accumulate. Files whose
/// extension is not a source extension are ignored. With no source files at all, the
/// index is left unchanged and the empty input is reported.
pub fn build_source_text_index<R: ProgressReporter>(
    index: &mut SourceTextIndex,
    files: &[SourceFile],
    settings: &IndexSettings,
    reporter: &mut R,
) -> Result<BuildStats, IndexError> {
    let sources: Vec<&SourceFile> = files
        .iter()
        .filter(|f| has_extension(&f.path, &settings.source_extensions))
        .collect();
    let mut stats = BuildStats {
        files_indexed: sources.len(),
        files_ignored: files.len() - sources.len(),
        ..BuildStats::default()
    };

    if sources.is_empty() {
        warn!("no source files found; source text index left unchanged");
        reporter.on_no_input(SOURCE_INDEX);
        reporter.on_complete(SOURCE_INDEX, &stats);
        return Ok(stats);
    }

    let mut merged: BTreeMap<String, IndexedDocument> = BTreeMap::new();
    for (idx, file) in sources.iter().enumerate() {
        reporter.on_file_start(&file.path, idx + 1, sources.len());
        let version = file.stem();
        let mut cells = 0;
        for (id, value) in text_cells(file, &settings.text_cell_type) {
            cells += 1;
            let doc = merged
                .entry(id.to_string())
                .or_insert_with(|| IndexedDocument {
                    identifier: id.to_string(),
                    content: String::new(),
                    versions: BTreeSet::new(),
                });
            doc.content = value.to_string();
            doc.versions.insert(version.clone());
        }
        stats.cells_indexed += cells;
        reporter.on_file_done(&file.path, cells);
    }

    for doc in merged.values() {
        let outcome = match index.get(&doc.identifier)? {
            Some(stored) if doc.is_subsumed_by(&stored) => Upsert::Unchanged,
            Some(_) => Upsert::Replaced,
            None => Upsert::Added,
        };
        if outcome != Upsert::Unchanged {
            index.stage_upsert(doc)?;
        }
        stats.record(outcome);
    }
    index.commit()?;

    info!(
        verses = merged.len(),
        written = stats.entries_written(),
        "built source text index"
    );
    reporter.on_complete(SOURCE_INDEX, &stats);
    Ok(stats)
}

/// Populates the translation pair index from source and target files.
///
/// Every text cell of a target file becomes one entry, paired with the source text for
/// the same identifier (last-write-wins across source files, empty if none). The entry
/// records the target file path and the cell's position in it. With no target files at
/// all, the index is left unchanged and the empty input is reported.
pub fn build_translation_pair_index<R: ProgressReporter>(
    index: &mut TranslationPairIndex,
    files: &[SourceFile],
    settings: &IndexSettings,
    reporter: &mut R,
) -> Result<BuildStats, IndexError> {
    let mut source_text: HashMap<&str, &str> = HashMap::new();
    for file in files
        .iter()
        .filter(|f| has_extension(&f.path, &settings.source_extensions))
    {
        for (id, value) in text_cells(file, &settings.text_cell_type) {
            source_text.insert(id, value);
        }
    }

    let targets: Vec<&SourceFile> = files
        .iter()
        .filter(|f| {
            !has_extension(&f.path, &settings.source_extensions)
                && has_extension(&f.path, &settings.target_extensions)
        })
        .collect();
    let mut stats = BuildStats {
        files_indexed: targets.len(),
        files_ignored: files.len() - targets.len(),
        ..BuildStats::default()
    };

    if targets.is_empty() {
        warn!("no target files found; translation pair index left unchanged");
        reporter.on_no_input(PAIR_INDEX);
        reporter.on_complete(PAIR_INDEX, &stats);
        return Ok(stats);
    }

    let mut entries: BTreeMap<String, TranslationPairEntry> = BTreeMap::new();
    for (idx, file) in targets.iter().enumerate() {
        reporter.on_file_start(&file.path, idx + 1, targets.len());
        let uri = file.path.to_string_lossy();
        let mut cells = 0;
        for (position, cell) in file.cells.iter().enumerate() {
            let Some(id) = cell.id.as_deref() else {
                continue;
            };
            if !cell.is_text(&settings.text_cell_type) {
                continue;
            }
            cells += 1;
            let source = source_text.get(id).copied().unwrap_or_default();
            entries.insert(
                id.to_string(),
                TranslationPairEntry::new(id, source, &cell.value, &uri, position as u64),
            );
        }
        stats.cells_indexed += cells;
        reporter.on_file_done(&file.path, cells);
    }

    for entry in entries.values() {
        let outcome = match index.get(&entry.identifier)? {
            Some(stored) if &stored == entry => Upsert::Unchanged,
            Some(_) => Upsert::Replaced,
            None => Upsert::Added,
        };
        if outcome != Upsert::Unchanged {
            index.stage_upsert(entry)?;
        }
        stats.record(outcome);
    }
    index.commit()?;

    info!(
        pairs = entries.len(),
        written = stats.entries_written(),
        "built translation pair index"
    );
    reporter.on_complete(PAIR_INDEX, &stats);
    Ok(stats)
}

/// Yields `(identifier, value)` for each text cell of a file.
fn text_cells<'a>(
    file: &'a SourceFile,
    text_cell_type: &'a str,
) -> impl Iterator<Item = (&'a str, &'a str)> {
    file.cells
        .iter()
        .filter(move |cell| cell.is_text(text_cell_type))
        .filter_map(|cell| Some((cell.id.as_deref()?, cell.value.as_str())))
}

/// Returns true if the path's extension is one of `extensions`, ignoring case.
pub(crate) fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

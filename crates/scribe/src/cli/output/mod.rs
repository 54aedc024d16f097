//! Rendering and JSON serialization for CLI output.

mod style;

use std::{path::Path, process::ExitCode};

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use scribe_index::{MinimalVerseResult, PairHit, SourceVerseVersions, TranslationPair};
use serde::Serialize;
pub use style::{dim, header, subheader, warning};

/// JSON output for a query's results.
#[derive(Serialize)]
struct JsonQueryResults<'a, T> {
    /// The query string.
    query: &'a str,
    /// Results in rank order.
    results: &'a [T],
    /// Total results returned.
    total_matches: usize,
}

/// A ranked result with its relevance score and the indexed terms it matched.
#[derive(Serialize)]
struct Ranked<'a, T> {
    /// The result itself.
    #[serde(flatten)]
    result: T,
    /// Relevance score.
    score: f32,
    /// Matched indexed terms.
    terms: &'a [String],
}

impl<'a, T> Ranked<'a, T> {
    /// Pairs a projection of a hit with the hit's score and terms.
    fn new(hit: &'a PairHit, result: T) -> Self {
        Self {
            result,
            score: hit.score,
            terms: &hit.terms,
        }
    }
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Formats a document URI relative to the project root when it lies inside it.
pub fn display_uri(uri: &str, root: &Path) -> String {
    Path::new(uri)
        .strip_prefix(root)
        .map_or_else(|_| uri.to_string(), |rel| rel.display().to_string())
}

/// Formats the location of a verse as `uri:line`.
fn location(verse: &MinimalVerseResult, root: &Path) -> String {
    format!("{}:{}", display_uri(&verse.document_uri, root), verse.line_number)
}

/// Creates a table with the shared preset.
fn table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.to_vec());
    table
}

/// Prints the "no results" line.
fn print_no_results() -> ExitCode {
    println!("{}", dim("No results found."));
    ExitCode::SUCCESS
}

/// Outputs ranked verses from a target-text search.
pub fn output_verses(hits: &[PairHit], query: &str, json: bool, root: &Path) -> ExitCode {
    let verses: Vec<MinimalVerseResult> = hits.iter().map(|h| h.entry.target_verse()).collect();
    if json {
        let results: Vec<_> = hits
            .iter()
            .zip(verses)
            .map(|(hit, verse)| Ranked::new(hit, verse))
            .collect();
        return print_json(&JsonQueryResults {
            query,
            results: &results,
            total_matches: results.len(),
        });
    }
    if verses.is_empty() {
        return print_no_results();
    }

    let mut table = table(&["Verse", "Translation", "Location"]);
    for verse in &verses {
        table.add_row(vec![
            Cell::new(&verse.identifier),
            Cell::new(&verse.content),
            Cell::new(location(verse, root)),
        ]);
    }
    println!("{table}");
    ExitCode::SUCCESS
}

/// Outputs ranked translation pairs from a source-text search.
pub fn output_pairs(hits: &[PairHit], query: &str, json: bool, root: &Path) -> ExitCode {
    if json {
        let results: Vec<_> = hits
            .iter()
            .map(|hit| Ranked::new(hit, hit.entry.to_pair()))
            .collect();
        return print_json(&JsonQueryResults {
            query,
            results: &results,
            total_matches: results.len(),
        });
    }
    if hits.is_empty() {
        return print_no_results();
    }

    let mut table = table(&["Verse", "Source", "Translation", "Location"]);
    for pair in hits.iter().map(|h| h.entry.to_pair()) {
        table.add_row(vec![
            Cell::new(&pair.identifier),
            Cell::new(&pair.source_verse.content),
            Cell::new(&pair.target_verse.content),
            Cell::new(location(&pair.target_verse, root)),
        ]);
    }
    println!("{table}");
    ExitCode::SUCCESS
}

/// Outputs a single target verse.
pub fn output_verse(verse: &MinimalVerseResult, json: bool, root: &Path) -> ExitCode {
    if json {
        return print_json(verse);
    }
    println!("{}", header(&verse.identifier));
    println!("{}", verse.content);
    println!("{}", dim(&location(verse, root)));
    ExitCode::SUCCESS
}

/// Outputs a source verse with its versions.
pub fn output_source_verse(verse: &SourceVerseVersions, json: bool) -> ExitCode {
    if json {
        return print_json(verse);
    }
    println!("{}", header(&verse.identifier));
    println!("{}", verse.content);
    println!("{}", dim(&format!("versions: {}", verse.versions.join(", "))));
    ExitCode::SUCCESS
}

/// Outputs one translation pair.
pub fn output_pair(pair: &TranslationPair, json: bool, root: &Path) -> ExitCode {
    if json {
        return print_json(pair);
    }
    println!("{}", header(&pair.identifier));
    println!("{} {}", subheader("Source:"), pair.source_verse.content);
    println!("{} {}", subheader("Translation:"), pair.target_verse.content);
    println!("{}", dim(&location(&pair.target_verse, root)));
    ExitCode::SUCCESS
}

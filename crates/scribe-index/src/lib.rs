//! Translation-pair indexes and retrieval for scribe.
//!
//! This crate keeps two in-memory Tantivy indexes over a translation project:
//! - The [`SourceTextIndex`] maps each verse identifier to its source text and the source
//!   versions that carry it
//! - The [`TranslationPairIndex`] holds one entry per translated verse, joining target text
//!   with source text and recording where the target cell lives
//!
//! On top of these, [`retrieval`] answers the lookups a translation editor needs: verse by
//! identifier, target text search, and source text search that widens through fuzzier
//! tiers until something is found.
//!
//! # Example
//!
//! ```no_run
//! use scribe_index::{TranslationPairEntry, TranslationPairIndex, retrieval};
//!
//! let mut index = TranslationPairIndex::new("none").unwrap();
//! index
//!     .upsert(&TranslationPairEntry::new(
//!         "GEN 1:1",
//!         "In the beginning",
//!         "Au commencement",
//!         "target/GEN.codex",
//!         0,
//!     ))
//!     .unwrap();
//!
//! let pairs = retrieval::get_translation_pairs_from_source_query(&index, "beginning", 5).unwrap();
//! assert_eq!(pairs[0].target_verse.content, "Au commencement");
//! ```

#![warn(missing_docs)]

mod analyzer;
mod build;
mod discovery;
mod error;
mod pairs;
mod project;
mod result;
pub mod retrieval;
mod schema;
mod search;
mod source;
mod store;

pub use analyzer::{NO_STEMMER, build_analyzer_from_name, parse_language, tokenize};
pub use build::{
    BuildStats, ProgressReporter, SilentReporter, TracingReporter, build_source_text_index,
    build_translation_pair_index,
};
pub use discovery::{ProjectFiles, discover_project_files, load_source_files};
pub use error::IndexError;
pub use pairs::{TranslationPairEntry, TranslationPairIndex};
pub use project::ProjectIndexes;
pub use result::{MinimalVerseResult, SourceVerseVersions, TranslationPair};
pub use retrieval::{
    DEFAULT_FALLBACK_FUZZINESS, DEFAULT_FUZZINESS, DEFAULT_LIMIT, RunCondition, SourceQueryTier,
    TierQuery, default_source_tiers, get_source_verse_by_vref, get_target_verse_by_vref,
    get_translation_pair_by_vref, get_translation_pairs_from_source_query,
    get_translation_pairs_with_tiers, handle_text_selection, rank_pairs_with_tiers,
    rank_target_verses, search_target_verses_by_query, tiers_from_settings,
};
pub use search::{
    Combine, FieldBoosts, MAX_EDIT_DISTANCE, PairHit, RankedSearch, SearchField, SearchOptions,
    VerseScope, WILDCARD,
};
pub use source::{IndexedDocument, SourceTextIndex, Upsert};

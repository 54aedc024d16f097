//! Retrieval operations over the source text and translation pair indexes.
//!
//! None of these operations fail for a missing verse: absence is `None` or an empty list.
//! Errors come only from the search capability itself.
//!
//! Source-text queries run through an ordered list of [`SourceQueryTier`]s. Each tier
//! states when it runs given the results so far; a tier that runs replaces the results
//! of the tiers before it.

use scribe_config::SearchSettings;
use tracing::debug;

use crate::{
    IndexError,
    result::{MinimalVerseResult, SourceVerseVersions, TranslationPair},
    search::{
        Combine, FieldBoosts, PairHit, RankedSearch, SearchField, SearchOptions, VerseScope,
        WILDCARD,
    },
    source::SourceTextIndex,
};

/// Default number of results.
pub const DEFAULT_LIMIT: usize = 5;

/// Default fuzziness for target searches and the precise source tier.
pub const DEFAULT_FUZZINESS: f32 = 0.2;

/// Default fuzziness for the lenient source tier.
pub const DEFAULT_FALLBACK_FUZZINESS: f32 = 0.4;

/// Boost for the content field being searched.
const CONTENT_BOOST: f32 = 2.0;

/// When a tier runs, given the number of results so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCondition {
    /// Always runs.
    Always,
    /// Runs if fewer than `k` results were found.
    FewerThanLimit,
    /// Runs if nothing was found.
    NoResults,
}

impl RunCondition {
    /// Returns true if a tier with this condition runs after `found` results.
    pub fn applies(self, found: usize, k: usize) -> bool {
        match self {
            Self::Always => true,
            Self::FewerThanLimit => found < k,
            Self::NoResults => found == 0,
        }
    }
}

/// What a tier searches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierQuery {
    /// The user's query text.
    Text,
    /// Every entry, in index order.
    Wildcard,
}

/// One step of the widening source-text search.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceQueryTier {
    /// Name used in logs.
    pub name: &'static str,
    /// What the tier searches for.
    pub query: TierQuery,
    /// Fuzziness of the tier.
    pub fuzziness: f32,
    /// Field boosts of the tier.
    pub boosts: FieldBoosts,
    /// When the tier runs.
    pub run: RunCondition,
}

impl SourceQueryTier {
    /// Builds the search options for this tier.
    ///
    /// Every tier searches the source field with OR-combined, prefix-matched terms.
    pub fn options(&self, k: usize) -> SearchOptions<'static> {
        SearchOptions {
            fields: vec![SearchField::Source],
            combine: Combine::Or,
            prefix: true,
            fuzziness: self.fuzziness,
            boosts: self.boosts,
            limit: Some(k),
            filter: None,
            scope: None,
        }
    }

    /// Runs the tier, optionally confined to a book or chapter.
    pub fn search<S: RankedSearch + ?Sized>(
        &self,
        index: &S,
        query: &str,
        k: usize,
        scope: Option<&VerseScope>,
    ) -> Result<Vec<PairHit>, IndexError> {
        let query = match self.query {
            TierQuery::Text => query,
            TierQuery::Wildcard => WILDCARD,
        };
        index.search(query, &self.options(k).within(scope.cloned()))
    }
}

/// Returns the default tiers: precise, lenient, then the wildcard fallback.
pub fn default_source_tiers() -> Vec<SourceQueryTier> {
    source_tiers(DEFAULT_FUZZINESS, DEFAULT_FALLBACK_FUZZINESS, true)
}

/// Returns the tiers described by the search settings.
pub fn tiers_from_settings(settings: &SearchSettings) -> Vec<SourceQueryTier> {
    source_tiers(
        settings.fuzziness,
        settings.fallback_fuzziness,
        settings.wildcard_fallback,
    )
}

/// Builds the tier list.
fn source_tiers(fuzziness: f32, fallback_fuzziness: f32, wildcard: bool) -> Vec<SourceQueryTier> {
    let mut tiers = vec![
        SourceQueryTier {
            name: "precise",
            query: TierQuery::Text,
            fuzziness,
            boosts: FieldBoosts {
                source: CONTENT_BOOST,
                ..FieldBoosts::default()
            },
            run: RunCondition::Always,
        },
        SourceQueryTier {
            name: "lenient",
            query: TierQuery::Text,
            fuzziness: fallback_fuzziness,
            boosts: FieldBoosts {
                source: CONTENT_BOOST,
                identifier: 1.0,
                ..FieldBoosts::default()
            },
            run: RunCondition::FewerThanLimit,
        },
    ];
    if wildcard {
        tiers.push(SourceQueryTier {
            name: "wildcard",
            query: TierQuery::Wildcard,
            fuzziness: 0.0,
            boosts: FieldBoosts {
                identifier: 1.0,
                ..FieldBoosts::default()
            },
            run: RunCondition::NoResults,
        });
    }
    tiers
}

/// Searches target text, returning at most `k` verses.
///
/// Terms are OR-combined and prefix-matched, with the given fuzziness.
pub fn search_target_verses_by_query<S: RankedSearch + ?Sized>(
    index: &S,
    query: &str,
    k: usize,
    fuzziness: f32,
) -> Result<Vec<MinimalVerseResult>, IndexError> {
    let hits = rank_target_verses(index, query, k, fuzziness, None)?;
    Ok(hits.iter().map(|hit| hit.entry.target_verse()).collect())
}

/// Ranks entries by target text, keeping scores and matched terms.
pub fn rank_target_verses<S: RankedSearch + ?Sized>(
    index: &S,
    query: &str,
    k: usize,
    fuzziness: f32,
    scope: Option<&VerseScope>,
) -> Result<Vec<PairHit>, IndexError> {
    let options = SearchOptions {
        fields: vec![SearchField::Target],
        combine: Combine::Or,
        prefix: true,
        fuzziness,
        boosts: FieldBoosts {
            target: CONTENT_BOOST,
            identifier: 1.0,
            ..FieldBoosts::default()
        },
        limit: Some(k),
        filter: None,
        scope: scope.cloned(),
    };
    let mut hits = index.search(query, &options)?;
    hits.truncate(k);
    Ok(hits)
}

/// Looks up a source verse and its versions by exact identifier.
pub fn get_source_verse_by_vref(
    index: &SourceTextIndex,
    identifier: &str,
) -> Result<Option<SourceVerseVersions>, IndexError> {
    Ok(index.get(identifier)?.map(SourceVerseVersions::from))
}

/// Looks up the target verse with exactly this identifier.
///
/// Uses the stored-field lookup, so an existing verse is always found.
pub fn get_target_verse_by_vref<S: RankedSearch + ?Sized>(
    index: &S,
    identifier: &str,
) -> Result<Option<MinimalVerseResult>, IndexError> {
    Ok(index
        .stored_fields(identifier)?
        .map(|entry| entry.target_verse()))
}

/// Looks up the translation pair with exactly this identifier.
///
/// Searches the identifier field with every term required, keeping only the hit whose
/// identifier equals the request.
pub fn get_translation_pair_by_vref<S: RankedSearch + ?Sized>(
    index: &S,
    identifier: &str,
) -> Result<Option<TranslationPair>, IndexError> {
    let exact = |hit: &PairHit| hit.entry.identifier == identifier;
    let options = SearchOptions {
        combine: Combine::And,
        ..SearchOptions::in_fields(&[SearchField::Identifier])
    }
    .with_filter(&exact)
    .with_limit(1);
    let hits = index.search(identifier, &options)?;
    Ok(hits.first().map(|hit| hit.entry.to_pair()))
}

/// Finds translation pairs whose source text matches a query, widening until something
/// is found.
pub fn get_translation_pairs_from_source_query<S: RankedSearch + ?Sized>(
    index: &S,
    query: &str,
    k: usize,
) -> Result<Vec<TranslationPair>, IndexError> {
    get_translation_pairs_with_tiers(index, query, k, &default_source_tiers())
}

/// Runs the given tiers in order and projects the final results into pairs.
pub fn get_translation_pairs_with_tiers<S: RankedSearch + ?Sized>(
    index: &S,
    query: &str,
    k: usize,
    tiers: &[SourceQueryTier],
) -> Result<Vec<TranslationPair>, IndexError> {
    let hits = rank_pairs_with_tiers(index, query, k, tiers, None)?;
    Ok(hits.iter().map(|hit| hit.entry.to_pair()).collect())
}

/// Runs the given tiers in order, keeping the final tier's scores and matched terms.
///
/// With a scope, every tier (the wildcard fallback included) stays inside it.
pub fn rank_pairs_with_tiers<S: RankedSearch + ?Sized>(
    index: &S,
    query: &str,
    k: usize,
    tiers: &[SourceQueryTier],
    scope: Option<&VerseScope>,
) -> Result<Vec<PairHit>, IndexError> {
    let mut hits: Vec<PairHit> = Vec::new();
    for tier in tiers {
        if !tier.run.applies(hits.len(), k) {
            debug!(tier = tier.name, found = hits.len(), "skipping tier");
            continue;
        }
        hits = tier.search(index, query, k, scope)?;
        debug!(tier = tier.name, found = hits.len(), "ran tier");
    }
    hits.truncate(k);
    Ok(hits)
}

/// Searches target text for a selection with the default limit and fuzziness.
pub fn handle_text_selection<S: RankedSearch + ?Sized>(
    index: &S,
    selected_text: &str,
) -> Result<Vec<MinimalVerseResult>, IndexError> {
    search_target_verses_by_query(index, selected_text, DEFAULT_LIMIT, DEFAULT_FUZZINESS)
}

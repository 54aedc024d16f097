//! Ranked search over the translation pair index.
//!
//! Provides the [`RankedSearch`] capability the query layer is written against, and its
//! implementation for [`TranslationPairIndex`].
//!
//! # Search Algorithm
//!
//! 1. **Tokenize**: Run the query through the index analyzer. No tokens means no results.
//!    A bare `*` skips everything below and scans the corpus instead.
//!
//! 2. **Expand**: Match each token against the term dictionary of every searched field,
//!    collecting exact, prefix and fuzzy expansions with their weights. See [`expand`].
//!
//! 3. **Score**: Each expansion becomes a BM25 term clause boosted by its weight times the
//!    field boost. A token matches if any of its clauses match; with [`Combine::And`] every
//!    token must match.
//!
//! 4. **Scope**: With a [`VerseScope`], the query also requires the book (and chapter)
//!    fields to match. These clauses do not change scores.
//!
//! 5. **Filter and limit**: Ranked hits pass through the optional filter, then the limit.

mod expand;
mod params;

use std::collections::BTreeSet;

pub use expand::FuzzyBuilders;
use expand::expand_term;
pub use params::{
    Combine, FieldBoosts, MAX_EDIT_DISTANCE, SearchField, SearchOptions, VerseScope,
};
use serde::Serialize;
use tantivy::{
    Term,
    collector::TopDocs,
    query::{AllQuery, BooleanQuery, BoostQuery, Occur, Query, TermQuery},
    schema::{Field, IndexRecordOption},
};
use tracing::trace;

use crate::{
    IndexError,
    analyzer::tokenize,
    pairs::{TranslationPairEntry, TranslationPairIndex},
    store::load_doc,
};

/// Query text that matches every entry.
pub const WILDCARD: &str = "*";

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairHit {
    /// The matching entry.
    pub entry: TranslationPairEntry,
    /// Relevance score.
    pub score: f32,
    /// Indexed terms of the searched fields that the query matched.
    pub terms: Vec<String>,
}

/// Ranked search with stored-field lookup.
pub trait RankedSearch {
    /// Runs a ranked search.
    fn search(&self, query: &str, options: &SearchOptions<'_>) -> Result<Vec<PairHit>, IndexError>;

    /// Returns the stored entry whose identifier equals `identifier` exactly.
    fn stored_fields(&self, identifier: &str) -> Result<Option<TranslationPairEntry>, IndexError>;
}

impl RankedSearch for TranslationPairIndex {
    fn search(&self, query: &str, options: &SearchOptions<'_>) -> Result<Vec<PairHit>, IndexError> {
        options.validate()?;
        if query.trim() == WILDCARD {
            return self.run(Box::new(AllQuery), &BTreeSet::new(), options);
        }

        let tokens = tokenize(self.store.analyzer(), query);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let searcher = self.store.searcher();
        let occur = match options.combine {
            Combine::Or => Occur::Should,
            Combine::And => Occur::Must,
        };
        let mut token_queries: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        let mut matched_terms: BTreeSet<String> = BTreeSet::new();

        for token in &tokens {
            let distance = options.edit_distance(token.chars().count());
            let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();

            for &field in &options.fields {
                let tantivy_field = self.tantivy_field(field);
                let expansions = expand_term(
                    &searcher,
                    tantivy_field,
                    token,
                    options.prefix,
                    distance,
                    &self.fuzzy,
                )?;
                let boost = options.boosts.get(field);
                for (indexed, weight) in expansions {
                    let term = Term::from_field_text(tantivy_field, &indexed);
                    let clause = TermQuery::new(term, IndexRecordOption::WithFreqs);
                    clauses.push((
                        Occur::Should,
                        Box::new(BoostQuery::new(Box::new(clause), weight * boost)),
                    ));
                    matched_terms.insert(indexed);
                }
            }

            trace!(token = %token, clauses = clauses.len(), "expanded query token");
            if clauses.is_empty() {
                if options.combine == Combine::And {
                    return Ok(Vec::new());
                }
                continue;
            }
            token_queries.push((occur, Box::new(BooleanQuery::new(clauses))));
        }

        if token_queries.is_empty() {
            return Ok(Vec::new());
        }
        self.run(
            Box::new(BooleanQuery::new(token_queries)),
            &matched_terms,
            options,
        )
    }

    fn stored_fields(&self, identifier: &str) -> Result<Option<TranslationPairEntry>, IndexError> {
        self.get(identifier)
    }
}

#[allow(clippy::multiple_inherent_impl)]
impl TranslationPairIndex {
    /// Maps a search field to its Tantivy field.
    fn tantivy_field(&self, field: SearchField) -> Field {
        match field {
            SearchField::Identifier => self.schema.vref_text,
            SearchField::Source => self.schema.source_content,
            SearchField::Target => self.schema.target_content,
        }
    }

    /// Requires every hit to lie within a scope, leaving scores unchanged.
    fn scoped(&self, query: Box<dyn Query>, scope: &VerseScope) -> Box<dyn Query> {
        let mut terms = vec![Term::from_field_text(self.schema.book, &scope.book)];
        if let Some(chapter) = scope.chapter {
            terms.push(Term::from_field_text(
                self.schema.chapter,
                &chapter.to_string(),
            ));
        }
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = vec![(Occur::Must, query)];
        for term in terms {
            let clause = TermQuery::new(term, IndexRecordOption::Basic);
            clauses.push((
                Occur::Must,
                Box::new(BoostQuery::new(Box::new(clause), 0.0)),
            ));
        }
        Box::new(BooleanQuery::new(clauses))
    }

    /// Executes a query, then applies the filter and limit.
    fn run(
        &self,
        query: Box<dyn Query>,
        matched_terms: &BTreeSet<String>,
        options: &SearchOptions<'_>,
    ) -> Result<Vec<PairHit>, IndexError> {
        let query = match &options.scope {
            Some(scope) => self.scoped(query, scope),
            None => query,
        };
        let searcher = self.store.searcher();
        let num_docs = usize::try_from(searcher.num_docs()).unwrap_or(usize::MAX);
        let limit = options.limit.unwrap_or(num_docs);
        // The filter may reject any hit, so it sees the full ranking.
        let fetch = if options.filter.is_some() {
            num_docs
        } else {
            limit.min(num_docs)
        };
        if fetch == 0 || limit == 0 {
            return Ok(Vec::new());
        }

        let top_docs = searcher
            .search(query.as_ref(), &TopDocs::with_limit(fetch))
            .map_err(|e| IndexError::search(&e))?;

        let mut hits = Vec::new();
        for (score, address) in top_docs {
            let doc = load_doc(&searcher, address)?;
            let entry = self.read_doc(&doc);
            let terms = self.terms_in_entry(&entry, matched_terms, &options.fields);
            let hit = PairHit {
                entry,
                score,
                terms,
            };
            if options.filter.is_some_and(|keep| !keep(&hit)) {
                continue;
            }
            hits.push(hit);
            if hits.len() == limit {
                break;
            }
        }
        Ok(hits)
    }

    /// Returns the matched terms that occur in the searched fields of an entry.
    fn terms_in_entry(
        &self,
        entry: &TranslationPairEntry,
        matched_terms: &BTreeSet<String>,
        fields: &[SearchField],
    ) -> Vec<String> {
        if matched_terms.is_empty() {
            return Vec::new();
        }
        let mut found: Vec<String> = Vec::new();
        for &field in fields {
            let text = match field {
                SearchField::Identifier => &entry.identifier,
                SearchField::Source => &entry.source_content,
                SearchField::Target => &entry.target_content,
            };
            for token in tokenize(self.store.analyzer(), text) {
                if matched_terms.contains(&token) && !found.contains(&token) {
                    found.push(token);
                }
            }
        }
        found
    }
}

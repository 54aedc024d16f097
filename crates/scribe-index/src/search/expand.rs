//! Query term expansion against the term dictionary.
//!
//! Each query term is matched against the indexed terms of a field in three ways,
//! each carrying its own weight:
//! - exact: the indexed term equals the query term (weight 1.0)
//! - prefix: the query term is a prefix of the indexed term,
//!   weight `0.375 * len / (len + 0.3 * extra)`
//! - fuzzy: the indexed term is within the edit distance budget,
//!   weight `0.45 * len / (len + distance)`
//!
//! An indexed term reached in several ways keeps the first one in that order.

use std::{collections::BTreeMap, str, sync::OnceLock};

use levenshtein_automata::{DFA, Distance, LevenshteinAutomatonBuilder, SINK_STATE};
use tantivy::{Searcher as TvSearcher, schema::Field};
use tantivy_fst::Automaton;

use super::MAX_EDIT_DISTANCE;
use crate::IndexError;

/// Weight of a prefix expansion before length scaling.
const PREFIX_WEIGHT: f32 = 0.375;

/// Weight of a fuzzy expansion before length scaling.
const FUZZY_WEIGHT: f32 = 0.45;

/// Penalty per extra character of a prefix expansion.
const PREFIX_EXTRA_PENALTY: f32 = 0.3;

/// Wrapper that implements `tantivy_fst::Automaton` for `levenshtein_automata::DFA`.
struct LevenshteinDfa<'a>(&'a DFA);

impl Automaton for LevenshteinDfa<'_> {
    type State = u32;

    fn start(&self) -> Self::State {
        self.0.initial_state()
    }

    fn is_match(&self, state: &Self::State) -> bool {
        matches!(self.0.distance(*state), Distance::Exact(_))
    }

    fn can_match(&self, state: &Self::State) -> bool {
        *state != SINK_STATE
    }

    fn accept(&self, state: &Self::State, byte: u8) -> Self::State {
        self.0.transition(*state, byte)
    }
}

/// Automaton matching every key that starts with a byte prefix.
struct PrefixAutomaton<'a>(&'a [u8]);

impl Automaton for PrefixAutomaton<'_> {
    /// Number of prefix bytes matched so far, or `None` after a mismatch.
    type State = Option<usize>;

    fn start(&self) -> Self::State {
        Some(0)
    }

    fn is_match(&self, state: &Self::State) -> bool {
        *state == Some(self.0.len())
    }

    fn can_match(&self, state: &Self::State) -> bool {
        state.is_some()
    }

    fn accept(&self, state: &Self::State, byte: u8) -> Self::State {
        match *state {
            Some(matched) if matched == self.0.len() => Some(matched),
            Some(matched) if self.0[matched] == byte => Some(matched + 1),
            _ => None,
        }
    }
}

/// Lazily built Levenshtein automaton builders, one per edit distance.
#[derive(Default)]
pub struct FuzzyBuilders {
    /// Builders for distances 1 and 2.
    builders: [OnceLock<LevenshteinAutomatonBuilder>; MAX_EDIT_DISTANCE as usize],
}

impl FuzzyBuilders {
    /// Builds a DFA for `term` at the given distance, or `None` for distance 0.
    fn dfa(&self, term: &str, distance: u8) -> Option<DFA> {
        let distance = distance.min(MAX_EDIT_DISTANCE);
        if distance == 0 {
            return None;
        }
        let builder = self.builders[usize::from(distance) - 1]
            .get_or_init(|| LevenshteinAutomatonBuilder::new(distance, true));
        Some(builder.build_dfa(term))
    }
}

/// Expands one query term against a field, returning indexed terms with their weights.
pub fn expand_term(
    searcher: &TvSearcher,
    field: Field,
    term: &str,
    prefix: bool,
    distance: u8,
    builders: &FuzzyBuilders,
) -> Result<BTreeMap<String, f32>, IndexError> {
    let term_len = term.chars().count() as f32;
    let dfa = builders.dfa(term, distance);
    let mut expansions: BTreeMap<String, f32> = BTreeMap::new();

    let inverted_indexes = searcher
        .segment_readers()
        .iter()
        .map(|reader| reader.inverted_index(field))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| IndexError::search(&e))?;

    for inverted_index in &inverted_indexes {
        if inverted_index.terms().get(term.as_bytes())?.is_some() {
            expansions.insert(term.to_string(), 1.0);
        }
    }

    if prefix {
        for inverted_index in &inverted_indexes {
            let automaton = PrefixAutomaton(term.as_bytes());
            let mut stream = inverted_index.terms().search(automaton).into_stream()?;
            while stream.advance() {
                let Ok(indexed) = str::from_utf8(stream.key()) else {
                    continue;
                };
                if expansions.contains_key(indexed) {
                    continue;
                }
                let extra = indexed.chars().count() as f32 - term_len;
                let weight = PREFIX_WEIGHT * term_len / (term_len + PREFIX_EXTRA_PENALTY * extra);
                expansions.insert(indexed.to_string(), weight);
            }
        }
    }

    if let Some(dfa) = &dfa {
        for inverted_index in &inverted_indexes {
            let mut stream = inverted_index.terms().search(LevenshteinDfa(dfa)).into_stream()?;
            while stream.advance() {
                let Ok(indexed) = str::from_utf8(stream.key()) else {
                    continue;
                };
                if expansions.contains_key(indexed) {
                    continue;
                }
                let Distance::Exact(edits) = dfa.eval(indexed) else {
                    continue;
                };
                let weight = FUZZY_WEIGHT * term_len / (term_len + f32::from(edits));
                expansions.insert(indexed.to_string(), weight);
            }
        }
    }

    Ok(expansions)
}

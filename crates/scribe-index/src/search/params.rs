//! Option types for ranked search.

use std::fmt;

use super::PairHit;
use crate::IndexError;

/// Highest edit distance the Levenshtein automata support.
pub const MAX_EDIT_DISTANCE: u8 = 2;

/// A searchable field of the translation pair index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// Verse identifier, tokenized.
    Identifier,
    /// Source-language text.
    Source,
    /// Target-language text.
    Target,
}

impl SearchField {
    /// Every searchable field.
    pub const ALL: [Self; 3] = [Self::Identifier, Self::Source, Self::Target];
}

/// How per-term matches combine into a document match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combine {
    /// A document matches if any query term matches.
    #[default]
    Or,
    /// A document matches only if every query term matches in some searched field.
    And,
}

/// Per-field score multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBoosts {
    /// Identifier field boost. Default: 1.0.
    pub identifier: f32,
    /// Source field boost. Default: 1.0.
    pub source: f32,
    /// Target field boost. Default: 1.0.
    pub target: f32,
}

impl Default for FieldBoosts {
    fn default() -> Self {
        Self {
            identifier: 1.0,
            source: 1.0,
            target: 1.0,
        }
    }
}

impl FieldBoosts {
    /// Returns the boost for a field.
    pub fn get(&self, field: SearchField) -> f32 {
        match field {
            SearchField::Identifier => self.identifier,
            SearchField::Source => self.source,
            SearchField::Target => self.target,
        }
    }
}

/// A book, or one chapter of a book, that a search is confined to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseScope {
    /// Book code, uppercased.
    pub book: String,
    /// Chapter number, or `None` for the whole book.
    pub chapter: Option<u32>,
}

impl VerseScope {
    /// Parses `BOOK` or `BOOK CHAPTER`, such as `GEN` or `gen 1`.
    pub fn parse(scope: &str) -> Result<Self, IndexError> {
        let invalid = || {
            IndexError::InvalidSearchOptions(format!(
                "scope must be BOOK or BOOK CHAPTER, got '{scope}'"
            ))
        };
        let mut parts = scope.split_whitespace();
        let book = parts.next().ok_or_else(invalid)?;
        if !book.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid());
        }
        let chapter = match parts.next() {
            Some(chapter) => Some(chapter.parse::<u32>().map_err(|_| invalid())?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self {
            book: book.to_ascii_uppercase(),
            chapter,
        })
    }
}

/// Options for one ranked search.
///
/// A boost for a field that is not in `fields` has no effect.
#[derive(Clone)]
pub struct SearchOptions<'a> {
    /// Fields to search. Must not be empty.
    pub fields: Vec<SearchField>,
    /// How term matches combine. Default: `Or`.
    pub combine: Combine,
    /// Whether query terms also match indexed terms they are a prefix of. Default: false.
    pub prefix: bool,
    /// Edit-distance budget. Below 1.0 it is a fraction of the term length; from 1.0 up it
    /// is an absolute distance. Capped at [`MAX_EDIT_DISTANCE`]. Default: 0.0.
    pub fuzziness: f32,
    /// Per-field score multipliers.
    pub boosts: FieldBoosts,
    /// Maximum hits returned. `None` returns every match.
    pub limit: Option<usize>,
    /// Predicate applied to ranked hits before the limit.
    pub filter: Option<&'a dyn Fn(&PairHit) -> bool>,
    /// Book or chapter every hit must belong to.
    pub scope: Option<VerseScope>,
}

impl Default for SearchOptions<'_> {
    fn default() -> Self {
        Self {
            fields: SearchField::ALL.to_vec(),
            combine: Combine::Or,
            prefix: false,
            fuzziness: 0.0,
            boosts: FieldBoosts::default(),
            limit: None,
            filter: None,
            scope: None,
        }
    }
}

impl fmt::Debug for SearchOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOptions")
            .field("fields", &self.fields)
            .field("combine", &self.combine)
            .field("prefix", &self.prefix)
            .field("fuzziness", &self.fuzziness)
            .field("boosts", &self.boosts)
            .field("limit", &self.limit)
            .field("filter", &self.filter.is_some())
            .field("scope", &self.scope)
            .finish()
    }
}

impl<'a> SearchOptions<'a> {
    /// Creates options that search only the given fields.
    pub fn in_fields(fields: &[SearchField]) -> Self {
        Self {
            fields: fields.to_vec(),
            ..Self::default()
        }
    }

    /// Sets the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the post-ranking filter.
    pub fn with_filter(mut self, filter: &'a dyn Fn(&PairHit) -> bool) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Confines the search to a book or chapter.
    pub fn within(mut self, scope: Option<VerseScope>) -> Self {
        self.scope = scope;
        self
    }

    /// Checks that the options can produce a query.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.fields.is_empty() {
            return Err(IndexError::InvalidSearchOptions(
                "no fields to search".to_string(),
            ));
        }
        if !self.fuzziness.is_finite() || self.fuzziness < 0.0 {
            return Err(IndexError::InvalidSearchOptions(format!(
                "fuzziness must be a non-negative number, got {}",
                self.fuzziness
            )));
        }
        Ok(())
    }

    /// Maximum edit distance for a query term of `term_len` characters.
    pub fn edit_distance(&self, term_len: usize) -> u8 {
        let distance = if self.fuzziness >= 1.0 {
            self.fuzziness.floor()
        } else {
            (term_len as f32 * self.fuzziness).round()
        };
        // Saturating float-to-int cast; the value is already non-negative.
        (distance as u8).min(MAX_EDIT_DISTANCE)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fuzzy(fuzziness: f32) -> SearchOptions<'static> {
        SearchOptions {
            fuzziness,
            ..SearchOptions::default()
        }
    }

    #[test]
    fn fractional_fuzziness_scales_with_length() {
        let options = fuzzy(0.2);
        assert_eq!(options.edit_distance(2), 0);
        assert_eq!(options.edit_distance(3), 1);
        assert_eq!(options.edit_distance(7), 1);
        assert_eq!(options.edit_distance(8), 2);
        assert_eq!(options.edit_distance(40), MAX_EDIT_DISTANCE);
    }

    #[test]
    fn absolute_fuzziness_is_capped() {
        assert_eq!(fuzzy(1.0).edit_distance(1), 1);
        assert_eq!(fuzzy(1.5).edit_distance(10), 1);
        assert_eq!(fuzzy(5.0).edit_distance(10), MAX_EDIT_DISTANCE);
        assert_eq!(fuzzy(0.0).edit_distance(10), 0);
    }

    #[test]
    fn validate_rejects_empty_fields_and_bad_fuzziness() {
        assert!(SearchOptions::in_fields(&[]).validate().is_err());
        assert!(fuzzy(-0.1).validate().is_err());
        assert!(fuzzy(f32::NAN).validate().is_err());
        assert!(fuzzy(f32::INFINITY).validate().is_err());
        assert!(fuzzy(0.4).validate().is_ok());
    }

    #[test]
    fn scope_parses_book_and_chapter() {
        assert_eq!(
            VerseScope::parse("gen").unwrap(),
            VerseScope {
                book: "GEN".into(),
                chapter: None
            }
        );
        assert_eq!(VerseScope::parse(" 1CO 13 ").unwrap().chapter, Some(13));
        for input in ["", "GEN x", "GEN 1 2", "G-N"] {
            assert!(VerseScope::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn boosts_default_to_one() {
        let boosts = FieldBoosts::default();
        for field in SearchField::ALL {
            assert!((boosts.get(field) - 1.0).abs() < f32::EPSILON);
        }
    }
}

//! The translation pair index: one entry per target cell, with the matching source text.

use scribe_document::VerseRef;
use serde::{Deserialize, Serialize};
use tantivy::{TantivyDocument, Term};

use crate::{
    IndexError,
    analyzer::build_analyzer_from_name,
    schema::PairSchema,
    search::FuzzyBuilders,
    source::Upsert,
    store::{IndexStore, text_field, u64_field},
};

/// A verse of the parallel corpus.
#[allow(clippy::multiple_inherent_impl)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationPairEntry {
    /// Verse identifier.
    pub identifier: String,
    /// Source-language text, empty when no source has the verse.
    pub source_content: String,
    /// Target-language text.
    pub target_content: String,
    /// Target document the entry came from.
    pub document_uri: String,
    /// Cell position within that document.
    pub line_number: u64,
    /// Book code, empty if the identifier is not a verse reference.
    pub book: String,
    /// Chapter number, empty if the identifier is not a verse reference.
    pub chapter: String,
}

impl TranslationPairEntry {
    /// Creates an entry, deriving book and chapter from the identifier.
    pub fn new(
        identifier: &str,
        source_content: &str,
        target_content: &str,
        document_uri: &str,
        line_number: u64,
    ) -> Self {
        let (book, chapter) = VerseRef::parse(identifier)
            .map(|vref| (vref.book, vref.chapter.to_string()))
            .unwrap_or_default();
        Self {
            identifier: identifier.to_string(),
            source_content: source_content.to_string(),
            target_content: target_content.to_string(),
            document_uri: document_uri.to_string(),
            line_number,
            book,
            chapter,
        }
    }
}

/// Index of translation pairs keyed by identifier.
#[allow(clippy::multiple_inherent_impl)]
pub struct TranslationPairIndex {
    /// Field handles.
    pub(crate) schema: PairSchema,
    /// Backing Tantivy index.
    pub(crate) store: IndexStore,
    /// Levenshtein automaton builders for fuzzy search.
    pub(crate) fuzzy: FuzzyBuilders,
}

impl TranslationPairIndex {
    /// Creates an empty index using the given stemmer setting.
    pub fn new(stemmer: &str) -> Result<Self, IndexError> {
        let schema = PairSchema::new();
        let store = IndexStore::create(schema.schema(), build_analyzer_from_name(stemmer)?)?;
        Ok(Self {
            schema,
            store,
            fuzzy: FuzzyBuilders::default(),
        })
    }

    /// Writes an entry unless an identical one is already stored.
    pub fn upsert(&mut self, entry: &TranslationPairEntry) -> Result<Upsert, IndexError> {
        let outcome = match self.get(&entry.identifier)? {
            Some(stored) if &stored == entry => return Ok(Upsert::Unchanged),
            Some(_) => Upsert::Replaced,
            None => Upsert::Added,
        };
        self.stage_upsert(entry)?;
        self.store.commit()?;
        Ok(outcome)
    }

    /// Stages removal of any previous entry and the addition of `entry`.
    pub(crate) fn stage_upsert(&mut self, entry: &TranslationPairEntry) -> Result<(), IndexError> {
        let term = self.id_term(&entry.identifier);
        self.store.delete(term);

        let s = &self.schema;
        let mut doc = TantivyDocument::new();
        doc.add_text(s.vref, &entry.identifier);
        doc.add_text(s.vref_text, &entry.identifier);
        doc.add_text(s.source_content, &entry.source_content);
        doc.add_text(s.target_content, &entry.target_content);
        doc.add_text(s.uri, &entry.document_uri);
        doc.add_u64(s.line, entry.line_number);
        doc.add_text(s.book, &entry.book);
        doc.add_text(s.chapter, &entry.chapter);
        self.store.add(doc)
    }

    /// Commits staged writes.
    pub(crate) fn commit(&mut self) -> Result<(), IndexError> {
        self.store.commit()
    }

    /// Removes the entry for an identifier. Returns true if one existed.
    pub fn remove(&mut self, identifier: &str) -> Result<bool, IndexError> {
        if self.get(identifier)?.is_none() {
            return Ok(false);
        }
        let term = self.id_term(identifier);
        self.store.delete(term);
        self.store.commit()?;
        Ok(true)
    }

    /// Removes every entry that came from a target document. Returns the number removed.
    pub fn remove_document(&mut self, document_uri: &str) -> Result<u64, IndexError> {
        let before = self.len();
        self.store
            .delete(Term::from_field_text(self.schema.uri, document_uri));
        self.store.commit()?;
        Ok(before - self.len())
    }

    /// Looks up the stored entry for an identifier.
    pub fn get(&self, identifier: &str) -> Result<Option<TranslationPairEntry>, IndexError> {
        let docs = self.store.find_exact(self.id_term(identifier), 1)?;
        Ok(docs.first().map(|doc| self.read_doc(doc)))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> u64 {
        self.store.num_docs()
    }

    /// Returns true if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds the exact-match term for an identifier.
    fn id_term(&self, identifier: &str) -> Term {
        Term::from_field_text(self.schema.vref, identifier)
    }

    /// Reads an entry back from its stored fields.
    pub(crate) fn read_doc(&self, doc: &TantivyDocument) -> TranslationPairEntry {
        let s = &self.schema;
        TranslationPairEntry {
            identifier: text_field(doc, s.vref),
            source_content: text_field(doc, s.source_content),
            target_content: text_field(doc, s.target_content),
            document_uri: text_field(doc, s.uri),
            line_number: u64_field(doc, s.line),
            book: text_field(doc, s.book),
            chapter: text_field(doc, s.chapter),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn entry(identifier: &str, target: &str, uri: &str, line: u64) -> TranslationPairEntry {
        TranslationPairEntry::new(identifier, "source text", target, uri, line)
    }

    #[test]
    fn new_derives_book_and_chapter() {
        let e = entry("JHN 3:16", "t", "JHN.codex", 0);
        assert_eq!(e.book, "JHN");
        assert_eq!(e.chapter, "3");

        let odd = entry("intro-1", "t", "JHN.codex", 0);
        assert!(odd.book.is_empty());
        assert!(odd.chapter.is_empty());
    }

    #[test]
    fn upsert_round_trips_stored_fields() {
        let mut index = TranslationPairIndex::new("none").unwrap();
        let e = entry("GEN 1:1", "Au commencement", "GEN.codex", 4);

        assert_eq!(index.upsert(&e).unwrap(), Upsert::Added);
        assert_eq!(index.upsert(&e).unwrap(), Upsert::Unchanged);
        assert_eq!(index.get("GEN 1:1").unwrap(), Some(e));
    }

    #[test]
    fn upsert_replaces_changed_entry() {
        let mut index = TranslationPairIndex::new("none").unwrap();
        index.upsert(&entry("GEN 1:1", "old", "GEN.codex", 1)).unwrap();

        let outcome = index
            .upsert(&entry("GEN 1:1", "new", "GEN.codex", 1))
            .unwrap();

        assert_eq!(outcome, Upsert::Replaced);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("GEN 1:1").unwrap().unwrap().target_content, "new");
    }

    #[test]
    fn remove_document_drops_only_its_entries() {
        let mut index = TranslationPairIndex::new("none").unwrap();
        index.upsert(&entry("GEN 1:1", "a", "GEN.codex", 1)).unwrap();
        index.upsert(&entry("GEN 1:2", "b", "GEN.codex", 2)).unwrap();
        index.upsert(&entry("EXO 1:1", "c", "EXO.codex", 1)).unwrap();

        assert_eq!(index.remove_document("GEN.codex").unwrap(), 2);
        assert_eq!(index.len(), 1);
        assert!(index.get("EXO 1:1").unwrap().is_some());
    }

    #[test]
    fn remove_single_entry() {
        let mut index = TranslationPairIndex::new("none").unwrap();
        index.upsert(&entry("GEN 1:1", "a", "GEN.codex", 1)).unwrap();

        assert!(index.remove("GEN 1:1").unwrap());
        assert!(index.get("GEN 1:1").unwrap().is_none());
    }
}

//! The source text index: verse identifier to source content and version labels.

use std::collections::BTreeSet;

use tantivy::{TantivyDocument, Term};

use crate::{
    IndexError,
    analyzer::build_analyzer_from_name,
    schema::SourceSchema,
    store::{IndexStore, text_field, text_values},
};

/// One verse of source text, merged across source versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedDocument {
    /// Verse identifier.
    pub identifier: String,
    /// Source text (from the last source file that had this verse).
    pub content: String,
    /// Labels of every source version that has this verse.
    pub versions: BTreeSet<String>,
}

impl IndexedDocument {
    /// Returns true if `self` would add nothing to `stored`.
    ///
    /// That is the case when the content is identical and every version is already recorded.
    pub fn is_subsumed_by(&self, stored: &Self) -> bool {
        self.content == stored.content && self.versions.is_subset(&stored.versions)
    }
}

/// Outcome of writing one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// No entry existed for the identifier.
    Added,
    /// An existing entry was replaced.
    Replaced,
    /// The stored entry already covered the new one.
    Unchanged,
}

/// Index of source verses keyed by identifier.
pub struct SourceTextIndex {
    /// Field handles.
    schema: SourceSchema,
    /// Backing Tantivy index.
    store: IndexStore,
}

impl SourceTextIndex {
    /// Creates an empty index using the given stemmer setting.
    pub fn new(stemmer: &str) -> Result<Self, IndexError> {
        let schema = SourceSchema::new();
        let store = IndexStore::create(schema.schema(), build_analyzer_from_name(stemmer)?)?;
        Ok(Self { schema, store })
    }

    /// Writes an entry unless the stored entry already covers it.
    ///
    /// A changed entry is removed and re-added, never edited in place.
    pub fn upsert(&mut self, doc: &IndexedDocument) -> Result<Upsert, IndexError> {
        let outcome = match self.get(&doc.identifier)? {
            Some(stored) if doc.is_subsumed_by(&stored) => return Ok(Upsert::Unchanged),
            Some(_) => Upsert::Replaced,
            None => Upsert::Added,
        };
        self.stage_upsert(doc)?;
        self.store.commit()?;
        Ok(outcome)
    }

    /// Stages removal of any previous entry and the addition of `doc`.
    pub(crate) fn stage_upsert(&mut self, doc: &IndexedDocument) -> Result<(), IndexError> {
        let term = self.id_term(&doc.identifier);
        self.store.delete(term);

        let mut tantivy_doc = TantivyDocument::new();
        tantivy_doc.add_text(self.schema.vref, &doc.identifier);
        tantivy_doc.add_text(self.schema.content, &doc.content);
        for version in &doc.versions {
            tantivy_doc.add_text(self.schema.versions, version);
        }
        self.store.add(tantivy_doc)
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

    /// Looks up the stored entry for an identifier.
    pub fn get(&self, identifier: &str) -> Result<Option<IndexedDocument>, IndexError> {
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
    fn read_doc(&self, doc: &TantivyDocument) -> IndexedDocument {
        IndexedDocument {
            identifier: text_field(doc, self.schema.vref),
            content: text_field(doc, self.schema.content),
            versions: text_values(doc, self.schema.versions)
                .into_iter()
                .collect(),
        }
    }
}

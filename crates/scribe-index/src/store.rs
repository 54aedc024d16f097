//! In-memory Tantivy index with a single writer and a manually reloaded reader.
//!
//! Both scribe indexes are rebuilt from project files on startup, so they live
//! in RAM. Writes are staged on the writer and become visible to searches after
//! [`IndexStore::commit`], which also reloads the reader.

use tantivy::{
    DocAddress, Index, IndexReader, IndexWriter as TantivyIndexWriter, ReloadPolicy,
    Searcher as TvSearcher, TantivyDocument, Term,
    collector::TopDocs,
    query::TermQuery,
    schema::{Field, IndexRecordOption, Schema, Value},
    tokenizer::TextAnalyzer,
};

use crate::{IndexError, analyzer::SCRIBE_TOKENIZER};

/// Heap size for the index writer (20 MB).
const WRITER_HEAP_SIZE: usize = 20_000_000;

/// A Tantivy index held in memory, with its writer and reader.
pub struct IndexStore {
    /// The underlying Tantivy writer.
    writer: TantivyIndexWriter,
    /// Reader reloaded after every commit.
    reader: IndexReader,
    /// Analyzer registered as the scribe tokenizer.
    analyzer: TextAnalyzer,
}

impl IndexStore {
    /// Creates an empty in-memory index with the given schema and analyzer.
    pub fn create(schema: &Schema, analyzer: TextAnalyzer) -> Result<Self, IndexError> {
        let index = Index::create_in_ram(schema.clone());
        index
            .tokenizers()
            .register(SCRIBE_TOKENIZER, analyzer.clone());

        let writer = index
            .writer_with_num_threads(1, WRITER_HEAP_SIZE)
            .map_err(|e| IndexError::create(&e))?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| IndexError::create(&e))?;

        Ok(Self {
            writer,
            reader,
            analyzer,
        })
    }

    /// Stages a document for writing.
    pub fn add(&mut self, doc: TantivyDocument) -> Result<(), IndexError> {
        self.writer
            .add_document(doc)
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Stages deletion of every document containing `term`.
    pub fn delete(&mut self, term: Term) {
        self.writer.delete_term(term);
    }

    /// Commits staged changes and makes them visible to searches.
    pub fn commit(&mut self) -> Result<(), IndexError> {
        self.writer.commit().map_err(|e| IndexError::commit(&e))?;
        self.reader.reload().map_err(|e| IndexError::commit(&e))?;
        Ok(())
    }

    /// Returns a searcher over the last committed state.
    pub fn searcher(&self) -> TvSearcher {
        self.reader.searcher()
    }

    /// Returns the analyzer used for tokenized fields.
    pub fn analyzer(&self) -> &TextAnalyzer {
        &self.analyzer
    }

    /// Returns the number of committed documents.
    pub fn num_docs(&self) -> u64 {
        self.searcher().num_docs()
    }

    /// Finds committed documents containing the exact `term`, up to `limit`.
    pub fn find_exact(
        &self,
        term: Term,
        limit: usize,
    ) -> Result<Vec<TantivyDocument>, IndexError> {
        let searcher = self.searcher();
        let query = TermQuery::new(term, IndexRecordOption::Basic);
        let hits = searcher
            .search(&query, &TopDocs::with_limit(limit.max(1)))
            .map_err(|e| IndexError::search(&e))?;
        hits.into_iter()
            .map(|(_, address)| load_doc(&searcher, address))
            .collect()
    }
}

/// Loads a stored document from a searcher.
pub fn load_doc(searcher: &TvSearcher, address: DocAddress) -> Result<TantivyDocument, IndexError> {
    searcher
        .doc::<TantivyDocument>(address)
        .map_err(|e| IndexError::search(&e))
}

/// Reads a text field from a document, returning an empty string if missing.
pub fn text_field(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Reads every value of a multi-valued text field.
pub fn text_values(doc: &TantivyDocument, field: Field) -> Vec<String> {
    doc.get_all(field)
        .filter_map(|v| v.as_str().map(|s| s.to_string()))
        .collect()
}

/// Reads a u64 field from a document, returning zero if missing.
pub fn u64_field(doc: &TantivyDocument, field: Field) -> u64 {
    doc.get_first(field).and_then(|v| v.as_u64()).unwrap_or(0)
}

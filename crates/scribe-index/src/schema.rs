//! Index schema definitions for the scribe indexes.
//!
//! The source text index holds one document per verse:
//! - `vref`: Verse identifier (string, stored)
//! - `content`: Source text (text, stored)
//! - `versions`: Source version labels (string, stored, multi-valued)
//!
//! The translation pair index holds one document per target cell:
//! - `vref`: Verse identifier for exact lookup and deletion (string, stored)
//! - `vref_text`: Verse identifier tokenized for free-text search (text)
//! - `source_content` / `target_content`: Parallel texts (text, stored)
//! - `uri`: Target document the entry came from (string, stored)
//! - `line`: Cell position within the target document (u64, stored)
//! - `book` / `chapter`: Parsed from the identifier (string, stored)

use tantivy::schema::{
    Field, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing, TextOptions,
};

use crate::analyzer::SCRIBE_TOKENIZER;

/// Text options for a field tokenized with the scribe analyzer.
fn analyzed_text(stored: bool) -> TextOptions {
    let options = TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(SCRIBE_TOKENIZER)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions),
    );
    if stored { options.set_stored() } else { options }
}

/// Handles to the fields of the source text index.
#[derive(Debug, Clone)]
pub struct SourceSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Verse identifier.
    pub vref: Field,
    /// Source text.
    pub content: Field,
    /// Version labels, one value per version.
    pub versions: Field,
}

impl SourceSchema {
    /// Creates the source text schema.
    pub fn new() -> Self {
        let mut builder = Schema::builder();
        let vref = builder.add_text_field("vref", STRING | STORED);
        let content = builder.add_text_field("content", analyzed_text(true));
        let versions = builder.add_text_field("versions", STRING | STORED);
        Self {
            schema: builder.build(),
            vref,
            content,
            versions,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for SourceSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles to the fields of the translation pair index.
#[derive(Debug, Clone)]
pub struct PairSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Verse identifier, untokenized.
    pub vref: Field,
    /// Verse identifier, tokenized.
    pub vref_text: Field,
    /// Source-language text.
    pub source_content: Field,
    /// Target-language text.
    pub target_content: Field,
    /// Target document URI.
    pub uri: Field,
    /// Cell position in the target document.
    pub line: Field,
    /// Book code.
    pub book: Field,
    /// Chapter number.
    pub chapter: Field,
}

impl PairSchema {
    /// Creates the translation pair schema.
    pub fn new() -> Self {
        let mut builder = Schema::builder();
        let vref = builder.add_text_field("vref", STRING | STORED);
        // Not stored: the raw `vref` field carries the value.
        let vref_text = builder.add_text_field("vref_text", analyzed_text(false));
        let source_content = builder.add_text_field("source_content", analyzed_text(true));
        let target_content = builder.add_text_field("target_content", analyzed_text(true));
        let uri = builder.add_text_field("uri", STRING | STORED);
        let line = builder.add_u64_field("line", STORED);
        let book = builder.add_text_field("book", STRING | STORED);
        let chapter = builder.add_text_field("chapter", STRING | STORED);
        Self {
            schema: builder.build(),
            vref,
            vref_text,
            source_content,
            target_content,
            uri,
            line,
            book,
            chapter,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for PairSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use tantivy::schema::FieldType;

    use super::*;

    fn tokenizer_of(schema: &Schema, field: Field) -> Option<String> {
        match schema.get_field_entry(field).field_type() {
            FieldType::Str(options) => options
                .get_indexing_options()
                .map(|i| i.tokenizer().to_string()),
            _ => None,
        }
    }

    #[test]
    fn source_schema_fields() {
        let s = SourceSchema::new();
        assert_eq!(s.schema().get_field("vref").unwrap(), s.vref);
        assert_eq!(
            tokenizer_of(s.schema(), s.content).as_deref(),
            Some(SCRIBE_TOKENIZER)
        );
        assert_eq!(tokenizer_of(s.schema(), s.versions).as_deref(), Some("raw"));
    }

    #[test]
    fn pair_identifier_is_indexed_twice() {
        let s = PairSchema::new();
        assert_eq!(tokenizer_of(s.schema(), s.vref).as_deref(), Some("raw"));
        assert_eq!(
            tokenizer_of(s.schema(), s.vref_text).as_deref(),
            Some(SCRIBE_TOKENIZER)
        );
        assert!(s.schema().get_field_entry(s.vref).is_stored());
        assert!(!s.schema().get_field_entry(s.vref_text).is_stored());
    }

    #[test]
    fn pair_content_fields_are_stored() {
        let s = PairSchema::new();
        for field in [s.source_content, s.target_content, s.uri, s.line] {
            assert!(s.schema().get_field_entry(field).is_stored());
        }
    }
}

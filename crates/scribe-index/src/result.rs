//! Read-only result projections returned by the query layer.

use serde::{Deserialize, Serialize};

use crate::{pairs::TranslationPairEntry, source::IndexedDocument};

/// One verse of text with the provenance of the entry it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalVerseResult {
    /// Verse identifier.
    pub identifier: String,
    /// Verse text.
    pub content: String,
    /// Target document the entry came from.
    pub document_uri: String,
    /// Cell position within that document.
    pub line_number: u64,
}

/// Source and target views of the same verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationPair {
    /// Verse identifier.
    pub identifier: String,
    /// Source-language text.
    pub source_verse: MinimalVerseResult,
    /// Target-language text.
    pub target_verse: MinimalVerseResult,
}

/// A source verse with every version label that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceVerseVersions {
    /// Verse identifier.
    pub identifier: String,
    /// Source text.
    pub content: String,
    /// Version labels, sorted.
    pub versions: Vec<String>,
}

#[allow(clippy::multiple_inherent_impl)]
impl TranslationPairEntry {
    /// Projects the entry onto its source text.
    pub fn source_verse(&self) -> MinimalVerseResult {
        self.verse(&self.source_content)
    }

    /// Projects the entry onto its target text.
    pub fn target_verse(&self) -> MinimalVerseResult {
        self.verse(&self.target_content)
    }

    /// Projects the entry onto both texts.
    pub fn to_pair(&self) -> TranslationPair {
        TranslationPair {
            identifier: self.identifier.clone(),
            source_verse: self.source_verse(),
            target_verse: self.target_verse(),
        }
    }

    /// Builds a verse view over one of the entry's texts.
    fn verse(&self, content: &str) -> MinimalVerseResult {
        MinimalVerseResult {
            identifier: self.identifier.clone(),
            content: content.to_string(),
            document_uri: self.document_uri.clone(),
            line_number: self.line_number,
        }
    }
}

impl From<IndexedDocument> for SourceVerseVersions {
    fn from(doc: IndexedDocument) -> Self {
        Self {
            identifier: doc.identifier,
            content: doc.content,
            versions: doc.versions.into_iter().collect(),
        }
    }
}

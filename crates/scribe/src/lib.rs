//! scribe: translation-pair lookup and search.
//!
//! scribe indexes a translation project made of verse-aligned notebooks: source-language
//! notebooks and the target-language notebooks translated from them. It answers the
//! lookups a translator needs while drafting: the source and target text of a verse,
//! verses whose translation contains some words, and translation pairs whose source
//! text resembles a query.

#![warn(missing_docs)]

pub mod cli;

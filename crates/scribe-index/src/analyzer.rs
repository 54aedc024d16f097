//! Text analysis pipeline for the scribe indexes.
//!
//! Implements the text analysis pipeline:
//! 1. `SimpleTokenizer` - splits on whitespace and punctuation
//! 2. `LowerCaser` - converts tokens to lowercase
//! 3. `Stemmer` - applies language-specific stemming, unless the stemmer is `none`
//!
//! Tokens are never dropped for length: identifiers can be long opaque ids, and words in
//! multi-byte scripts run to many bytes.
//!
//! The stemmer language is configurable via the `index.stemmer` setting in `.scribe.toml`.

use tantivy::tokenizer::{Language, LowerCaser, SimpleTokenizer, Stemmer, TextAnalyzer, TokenStream};

use crate::IndexError;

/// Name of the custom tokenizer registered with Tantivy.
pub const SCRIBE_TOKENIZER: &str = "scribe_text";

/// Stemmer setting that disables stemming.
pub const NO_STEMMER: &str = "none";

/// Parses a stemmer setting into a Tantivy `Language`.
///
/// Returns `None` for `none`, and an error if the language is not recognized.
pub fn parse_language(name: &str) -> Result<Option<Language>, IndexError> {
    let language = match name.to_lowercase().as_str() {
        NO_STEMMER => return Ok(None),
        "arabic" => Language::Arabic,
        "danish" => Language::Danish,
        "dutch" => Language::Dutch,
        "english" => Language::English,
        "finnish" => Language::Finnish,
        "french" => Language::French,
        "german" => Language::German,
        "greek" => Language::Greek,
        "hungarian" => Language::Hungarian,
        "italian" => Language::Italian,
        "norwegian" => Language::Norwegian,
        "portuguese" => Language::Portuguese,
        "romanian" => Language::Romanian,
        "russian" => Language::Russian,
        "spanish" => Language::Spanish,
        "swedish" => Language::Swedish,
        "tamil" => Language::Tamil,
        "turkish" => Language::Turkish,
        other => return Err(IndexError::InvalidLanguage(other.to_string())),
    };
    Ok(Some(language))
}

/// Builds the scribe text analyzer, stemming only when a language is given.
pub fn build_analyzer(language: Option<Language>) -> TextAnalyzer {
    let builder = TextAnalyzer::builder(SimpleTokenizer::default()).filter(LowerCaser);
    match language {
        Some(language) => builder.filter(Stemmer::new(language)).build(),
        None => builder.build(),
    }
}

/// Builds the scribe text analyzer from a stemmer setting.
///
/// Convenience function combining [`parse_language`] and [`build_analyzer`].
pub fn build_analyzer_from_name(language_name: &str) -> Result<TextAnalyzer, IndexError> {
    let language = parse_language(language_name)?;
    Ok(build_analyzer(language))
}

/// Runs text through an analyzer and collects the distinct tokens in order.
pub fn tokenize(analyzer: &TextAnalyzer, text: &str) -> Vec<String> {
    let mut analyzer = analyzer.clone();
    let mut stream = analyzer.token_stream(text);
    let mut tokens: Vec<String> = Vec::new();
    while let Some(token) = stream.next() {
        if !tokens.contains(&token.text) {
            tokens.push(token.text.clone());
        }
    }
    tokens
}

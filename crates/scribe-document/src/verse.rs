//! Verse references.
//!
//! References have the form `BOOK C:V`, where `BOOK` is a book code such as `GEN` or `1CO`,
//! `C` is a chapter number, and `V` is a verse number or range (`1-3`).

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors that can occur when parsing verse references.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerseRefError {
    /// The input did not match the expected `BOOK C:V` format.
    #[error("invalid verse reference: {0}")]
    InvalidFormat(String),
}

/// A parsed `BOOK C:V` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseRef {
    /// Book code, uppercased.
    pub book: String,
    /// Chapter number.
    pub chapter: u32,
    /// Verse number or range, as written.
    pub verse: String,
}

impl VerseRef {
    /// Parses a reference from `BOOK C:V` format.
    pub fn parse(reference: &str) -> Result<Self, VerseRefError> {
        let invalid = || VerseRefError::InvalidFormat(reference.to_string());

        let (book, location) = reference.trim().split_once(' ').ok_or_else(invalid)?;
        let (chapter, verse) = location.trim().split_once(':').ok_or_else(invalid)?;

        if book.is_empty() || !book.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid());
        }
        let chapter: u32 = chapter.parse().map_err(|_| invalid())?;
        if !is_verse_spec(verse) {
            return Err(invalid());
        }

        Ok(Self {
            book: book.to_ascii_uppercase(),
            chapter,
            verse: verse.to_string(),
        })
    }
}

/// Returns true for `N` or `N-M`.
fn is_verse_spec(verse: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    match verse.split_once('-') {
        Some((start, end)) => digits(start) && digits(end),
        None => digits(verse),
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

impl FromStr for VerseRef {
    type Err = VerseRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

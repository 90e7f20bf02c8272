// Word tokenization and stop words for term weighting.

use std::collections::HashSet;
use std::path::Path;

use stop_words::{get, LANGUAGE};

use crate::error::Result;

/// Shortest token kept by default. Single characters ("a", "s" from "tenant's")
/// carry no salience.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

/// Split `text` into lowercased alphanumeric runs of at least `min_len` chars.
pub fn tokenize(text: &str, min_len: usize) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(move |token| !token.is_empty() && token.chars().count() >= min_len)
        .map(str::to_lowercase)
}

/// Case-insensitive set of terms excluded from the ranking vocabulary.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The English list shipped with the `stop-words` crate.
    pub fn english() -> Self {
        let words: Vec<String> = get(LANGUAGE::English);
        Self::from_words(words)
    }

    /// No stop words at all; every token counts.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Load a newline-separated list. Blank lines and `#` comments are skipped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = crate::document::read_text(path)?;
        Ok(Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        ))
    }

    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(&term.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

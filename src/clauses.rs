// Obligation clause extraction.
//
// A clause starts at a modal keyword (shall, must, may, will, should) and
// runs to the next period on the same line. This is a lexical scan, not a
// legal reading: "may" in "May 2024." matches too. Keywords must stand as
// whole words, with letters from any script counting as word chars, so
// "émay" or "mayé" is not a keyword.

use regex_lite::{escape, Regex};

use crate::error::{AnalysisError, Result};

pub const DEFAULT_KEYWORDS: &[&str] = &["shall", "must", "may", "will", "should"];

/// Finds keyword-to-period spans in a text.
#[derive(Debug, Clone)]
pub struct ClauseExtractor {
    pattern: Regex,
}

impl ClauseExtractor {
    pub fn new() -> Result<Self> {
        Self::with_keywords(DEFAULT_KEYWORDS)
    }

    /// Build an extractor for a custom keyword set (matched as whole words,
    /// case-insensitively).
    pub fn with_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let mut keywords: Vec<&str> = keywords
            .iter()
            .map(|k| k.as_ref().trim())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Err(AnalysisError::InvalidArgument(
                "clause keyword list is empty".to_string(),
            ));
        }

        // Longest first, so "willing" is tried before "will".
        keywords.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternatives: Vec<String> = keywords.into_iter().map(escape).collect();

        // regex-lite's \b only knows ASCII; boundaries are checked in extract.
        let source = format!(r"(?i)({}).*?\.", alternatives.join("|"));
        let pattern = Regex::new(&source).map_err(|e| {
            AnalysisError::InvalidArgument(format!("bad clause pattern {source}: {e}"))
        })?;
        Ok(Self { pattern })
    }

    /// All non-overlapping clauses, left to right, duplicates kept.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut clauses = Vec::new();
        let mut pos = 0;

        while let Some(caps) = self.pattern.captures_at(text, pos) {
            let (Some(clause), Some(keyword)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            if is_word_boundary(text, keyword.start()) && is_word_boundary(text, keyword.end()) {
                clauses.push(clause.as_str().to_string());
                pos = clause.end();
            } else {
                let step = keyword.as_str().chars().next().map_or(1, char::len_utf8);
                pos = keyword.start() + step;
            }
        }

        clauses
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A word char on exactly one side of byte offset `at`.
fn is_word_boundary(text: &str, at: usize) -> bool {
    let before = text[..at].chars().next_back().is_some_and(is_word_char);
    let after = text[at..].chars().next().is_some_and(is_word_char);
    before != after
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_each_obligation_to_its_period() {
        let extractor = ClauseExtractor::new().unwrap();
        let clauses = extractor.extract("The tenant shall pay rent. The landlord may inspect.");
        assert_eq!(clauses, vec!["shall pay rent.", "may inspect."]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let extractor = ClauseExtractor::new().unwrap();
        let clauses = extractor.extract("Buyer MUST notify Seller. Seller Should respond.");
        assert_eq!(clauses, vec!["MUST notify Seller.", "Should respond."]);
    }

    #[test]
    fn keywords_must_be_whole_words() {
        let extractor = ClauseExtractor::new().unwrap();
        assert!(extractor.extract("Goodwill is mustered. Mayhem ensued.").is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let extractor = ClauseExtractor::new().unwrap();
        let clauses = extractor.extract("You must sign. You must sign.");
        assert_eq!(clauses, vec!["must sign.", "must sign."]);
    }

    #[test]
    fn no_terminating_period_means_no_clause() {
        let extractor = ClauseExtractor::new().unwrap();
        assert!(extractor.extract("The tenant shall pay rent").is_empty());
    }

    #[test]
    fn clause_does_not_cross_lines() {
        let extractor = ClauseExtractor::new().unwrap();
        let clauses = extractor.extract("Tenant shall pay\nrent monthly. Landlord will repair.");
        assert_eq!(clauses, vec!["will repair."]);
    }

    #[test]
    fn custom_keywords() {
        let extractor = ClauseExtractor::with_keywords(&["agrees to"]).unwrap();
        let clauses = extractor.extract("Tenant agrees to vacate. Tenant shall pay.");
        assert_eq!(clauses, vec!["agrees to vacate."]);
    }

    #[test]
    fn empty_keyword_list_is_invalid() {
        let err = ClauseExtractor::with_keywords(&["", "  "]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidArgument(_)));
    }

    #[test]
    fn accented_letters_are_word_chars() {
        let extractor = ClauseExtractor::new().unwrap();
        assert!(extractor.extract("émay be.").is_empty());
        assert_eq!(extractor.extract("émay shall pay."), vec!["shall pay."]);
        assert_eq!(extractor.extract("mayé go. must go."), vec!["must go."]);
    }

    #[test]
    fn keywords_next_to_non_latin_text() {
        let extractor = ClauseExtractor::new().unwrap();
        assert!(extractor.extract("Правоshall быть.").is_empty());
        assert_eq!(extractor.extract("«shall pay» in full."), vec!["shall pay» in full."]);
    }

    #[test]
    fn longer_keyword_wins_over_its_prefix() {
        let extractor = ClauseExtractor::with_keywords(&["will", "willing"]).unwrap();
        let clauses = extractor.extract("Tenant is willing to pay. Landlord will repair.");
        assert_eq!(clauses, vec!["willing to pay.", "will repair."]);
    }
}

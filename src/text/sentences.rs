// Sentence splitting.
//
// The ranker never splits text on its own. It is handed sentences produced by
// a SentenceSplitter, so callers can swap in different boundary rules. The
// default splitter is punctuation-based and knows the abbreviations that turn
// up in contracts and statutes ("Inc.", "Sec.", "No.", initials, "U.S.").

use std::collections::HashSet;

/// Splits raw text into ordered, non-overlapping sentences.
pub trait SentenceSplitter {
    /// Every returned sentence is trimmed, non-empty, and a verbatim slice of
    /// `text`; sentences come back in document order.
    fn split(&self, text: &str) -> Vec<String>;
}

/// Lowercased, without the trailing period.
const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co", "corp",
    "llc", "llp", "plc", "art", "arts", "sec", "secs", "para", "paras", "cl", "ch", "pp", "cf",
    "al", "approx", "dept", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
    "nov", "dec",
];

/// Abbreviations only when a number follows ("No. 5", "Nos. 3-4").
const NUMERAL_ABBREVIATIONS: &[&str] = &["no", "nos"];

/// Nouns that take a letter label ("Exhibit A", "Schedule B").
const LABEL_NOUNS: &[&str] = &[
    "exhibit", "schedule", "appendix", "annex", "attachment", "addendum", "article", "section",
    "clause", "part", "paragraph", "item", "rider", "form", "class", "series", "tier", "phase",
    "option", "plan", "grade", "type", "unit", "building", "lot", "tract", "parcel", "zone",
];

/// Words that usually open a sentence rather than continue a name.
const SENTENCE_STARTERS: &[&str] = &[
    "the", "this", "that", "these", "those", "a", "an", "it", "its", "in", "on", "at", "if",
    "each", "any", "all", "such", "no", "none", "neither", "either", "there", "then",
    "thereafter", "upon", "for", "as", "we", "you", "he", "she", "they", "our", "his", "her",
    "their", "after", "before", "when", "where", "while", "notwithstanding", "subject", "unless",
    "except", "however",
];

/// Punctuation-driven splitter with abbreviation awareness.
///
/// A boundary is a run of `.`, `!` or `?` (plus any closing quotes or
/// brackets) followed by whitespace or the end of the text. A period does not
/// end a sentence when it closes an abbreviation, when the next word starts
/// in lowercase, or when it follows an initial. A lone letter counts as an
/// initial unless it labels an exhibit or schedule, or the next word is a
/// usual sentence opener ("The", "Each").
#[derive(Debug, Clone)]
pub struct PunctuationSplitter {
    abbreviations: HashSet<String>,
}

impl Default for PunctuationSplitter {
    fn default() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl PunctuationSplitter {
    /// Add extra abbreviations. Case and a trailing period are ignored.
    pub fn with_abbreviations<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.abbreviations.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().trim_end_matches('.').to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    /// Byte ranges of each sentence in `text`, already trimmed.
    pub fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut spans = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];
            if !is_terminal(c) {
                i += 1;
                continue;
            }

            // Swallow "?!", "..." and closing quotes or brackets.
            let mut j = i + 1;
            while j < chars.len() && (is_terminal(chars[j].1) || is_closing(chars[j].1)) {
                j += 1;
            }

            let end = chars.get(j).map_or(text.len(), |&(offset, _)| offset);
            let followed_by_space = chars.get(j).map_or(true, |&(_, next)| next.is_whitespace());

            if followed_by_space && !(c == '.' && self.is_false_period(text, start, pos, end)) {
                push_trimmed(text, start, end, &mut spans);
                start = end;
            }
            i = j;
        }

        push_trimmed(text, start, text.len(), &mut spans);
        spans
    }

    fn is_false_period(&self, text: &str, start: usize, dot: usize, end: usize) -> bool {
        let mut words = text[start..dot].rsplit(char::is_whitespace);
        let word = words
            .next()
            .unwrap_or("")
            .trim_start_matches(|ch: char| !ch.is_alphanumeric());
        let previous = words
            .find(|w| !w.is_empty())
            .unwrap_or("")
            .trim_matches(|ch: char| !ch.is_alphanumeric())
            .to_lowercase();
        let next = text[end..].trim_start();

        if next.chars().next().is_some_and(char::is_lowercase) {
            return true;
        }
        if word.is_empty() {
            return false;
        }

        let lower = word.to_lowercase();
        if NUMERAL_ABBREVIATIONS.contains(&lower.as_str()) {
            // "No. 5", but not "the answer is no."
            return next.starts_with(|ch: char| ch.is_ascii_digit());
        }
        if self.abbreviations.contains(&lower) {
            return true;
        }
        if is_single_letter(&lower) {
            // "Exhibit A." and "Schedule B." are labels, not initials.
            if LABEL_NOUNS.contains(&previous.as_str()) {
                return false;
            }
            return starts_with_initial(next) || !starts_common_sentence(next);
        }

        // Dotted forms ("u.s", "e.g").
        lower.contains('.') && lower.split('.').all(is_single_letter)
    }
}

impl SentenceSplitter for PunctuationSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        self.spans(text)
            .into_iter()
            .map(|(start, end)| text[start..end].to_string())
            .collect()
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{2019}' | '\u{201D}' | '\u{BB}')
}

fn is_single_letter(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(ch), None) if ch.is_alphabetic())
}

/// `text` opens with another initial ("R. Smith").
fn starts_with_initial(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(ch), Some('.')) if ch.is_alphabetic())
}

fn starts_common_sentence(text: &str) -> bool {
    let first = text
        .split(|ch: char| !ch.is_alphanumeric())
        .next()
        .unwrap_or("")
        .to_lowercase();
    SENTENCE_STARTERS.contains(&first.as_str())
}

fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<(usize, usize)>) {
    let slice = &text[start..end];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return;
    }
    let offset = start + (slice.len() - slice.trim_start().len());
    spans.push((offset, offset + trimmed.len()));
}

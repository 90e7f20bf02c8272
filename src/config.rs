use std::env;
use std::path::PathBuf;

use crate::analysis::{AnalysisOptions, DEFAULT_SUMMARY_LENGTH};
use crate::clauses::DEFAULT_KEYWORDS;
use crate::error::{AnalysisError, Result};
use crate::summary::tfidf::Normalization;
use crate::text::tokenize::{StopWords, DEFAULT_MIN_TOKEN_LEN};

pub const DEFAULT_OUTPUT: &str = "analysis.json";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy; command-line flags
/// override anything set here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Sentences in the summary (QUILL_SUMMARY_LENGTH)
    pub summary_length: usize,
    /// Where the JSON result goes (QUILL_OUTPUT)
    pub output_path: PathBuf,
    /// Custom stop-word list, one word per line (QUILL_STOPWORDS).
    /// Unset means the built-in English list.
    pub stopwords_path: Option<PathBuf>,
    /// Comma-separated obligation keywords (QUILL_CLAUSE_KEYWORDS)
    pub clause_keywords: Vec<String>,
    /// "none" or "l2" (QUILL_NORMALIZE)
    pub normalization: Normalization,
    /// Shortest token that counts as a term (QUILL_MIN_TOKEN_LEN)
    pub min_token_len: usize,
    /// Autojunk heuristic for document comparison (QUILL_AUTOJUNK)
    pub autojunk: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary_length: DEFAULT_SUMMARY_LENGTH,
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            stopwords_path: None,
            clause_keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            normalization: Normalization::Raw,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            autojunk: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key -> value source. Unset or blank keys fall
    /// back to defaults; malformed values are an `InvalidArgument`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let summary_length = match get("QUILL_SUMMARY_LENGTH") {
            Some(v) => parse_count("QUILL_SUMMARY_LENGTH", &v)?,
            None => defaults.summary_length,
        };
        let min_token_len = match get("QUILL_MIN_TOKEN_LEN") {
            Some(v) => parse_count("QUILL_MIN_TOKEN_LEN", &v)?,
            None => defaults.min_token_len,
        };
        let normalization = match get("QUILL_NORMALIZE") {
            Some(v) => v.parse()?,
            None => defaults.normalization,
        };
        let autojunk = match get("QUILL_AUTOJUNK") {
            Some(v) => parse_flag("QUILL_AUTOJUNK", &v)?,
            None => defaults.autojunk,
        };
        let clause_keywords = match get("QUILL_CLAUSE_KEYWORDS") {
            Some(v) => v
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect(),
            None => defaults.clause_keywords,
        };

        Ok(Self {
            summary_length,
            output_path: get("QUILL_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            stopwords_path: get("QUILL_STOPWORDS").map(PathBuf::from),
            clause_keywords,
            normalization,
            min_token_len,
            autojunk,
        })
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            summary_length: self.summary_length,
            normalization: self.normalization,
            min_token_len: self.min_token_len,
            autojunk: self.autojunk,
        }
    }

    /// The configured stop-word list, or the built-in English one.
    pub fn stopwords(&self) -> Result<StopWords> {
        match &self.stopwords_path {
            Some(path) => StopWords::from_file(path),
            None => Ok(StopWords::english()),
        }
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        AnalysisError::InvalidArgument(format!(
            "{key} must be a non-negative integer, got '{value}'"
        ))
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AnalysisError::InvalidArgument(format!(
            "{key} must be true or false, got '{value}'"
        ))),
    }
}

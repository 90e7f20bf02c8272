// Analysis pipeline.
//
// Each step is a function of the document(s) that returns its own piece of
// the result; the caller merges the pieces into one AnalysisResult and saves
// it once. Nothing here holds mutable state between steps.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clauses::ClauseExtractor;
use crate::document::{read_text, Document};
use crate::error::{AnalysisError, Result};
use crate::similarity::SimilarityScorer;
use crate::summary::tfidf::{Normalization, TfIdfRanker};
use crate::summary::traits::SentenceRanker;
use crate::text::tokenize::{StopWords, DEFAULT_MIN_TOKEN_LEN};

pub const DEFAULT_SUMMARY_LENGTH: usize = 5;

/// Tunables for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Number of sentences in the summary.
    pub summary_length: usize,
    pub normalization: Normalization,
    pub min_token_len: usize,
    /// Use the autojunk heuristic when comparing documents.
    pub autojunk: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            summary_length: DEFAULT_SUMMARY_LENGTH,
            normalization: Normalization::Raw,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            autojunk: false,
        }
    }
}

impl AnalysisOptions {
    /// Reject options that would make the run meaningless. Called before
    /// any input is read.
    pub fn validate(&self) -> Result<()> {
        if self.summary_length == 0 {
            return Err(AnalysisError::InvalidArgument(
                "summary length must be at least 1".to_string(),
            ));
        }
        if self.min_token_len == 0 {
            return Err(AnalysisError::InvalidArgument(
                "minimum token length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// The persisted output of a run.
///
/// `similarity_score` is omitted from the JSON when no comparison was asked
/// for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub clauses: Vec<String>,
    pub summary: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

impl AnalysisResult {
    pub fn new(clauses: Vec<String>, summary: Vec<String>) -> Self {
        Self {
            clauses,
            summary,
            similarity_score: None,
        }
    }

    /// Merge a comparison score into the result.
    pub fn with_similarity(self, score: f64) -> Self {
        Self {
            similarity_score: Some(score),
            ..self
        }
    }

    /// UTF-8 JSON with 4-space indentation.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(buf)
    }

    /// Write the result to `path`.
    ///
    /// The JSON goes to a sibling temp file that is then renamed over
    /// `path`, so a failed run never leaves a truncated snapshot behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let tmp = temp_path(path);
        let write_err = |source| AnalysisError::Write {
            path: path.to_path_buf(),
            source,
        };

        fs::write(&tmp, json).map_err(write_err)?;
        if let Err(source) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(source));
        }

        info!(path = %path.display(), "Saved analysis");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = read_text(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "analysis.json".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Runs clause extraction, summarization, and comparison with fixed settings.
pub struct Analyzer {
    ranker: Box<dyn SentenceRanker>,
    extractor: ClauseExtractor,
    scorer: SimilarityScorer,
    summary_length: usize,
}

impl Analyzer {
    /// Build an analyzer with the TF-IDF ranker.
    ///
    /// Fails with `InvalidArgument` on bad options or an empty keyword list.
    pub fn new<S: AsRef<str>>(
        options: AnalysisOptions,
        stopwords: StopWords,
        clause_keywords: &[S],
    ) -> Result<Self> {
        let ranker = TfIdfRanker::new(stopwords)
            .with_normalization(options.normalization)
            .with_min_token_len(options.min_token_len);
        Self::with_ranker(options, Box::new(ranker), clause_keywords)
    }

    /// Build an analyzer around any sentence ranker.
    pub fn with_ranker<S: AsRef<str>>(
        options: AnalysisOptions,
        ranker: Box<dyn SentenceRanker>,
        clause_keywords: &[S],
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            ranker,
            extractor: ClauseExtractor::with_keywords(clause_keywords)?,
            scorer: SimilarityScorer::new(options.autojunk),
            summary_length: options.summary_length,
        })
    }

    pub fn extract_clauses(&self, document: &Document) -> Vec<String> {
        self.extractor.extract(document.text())
    }

    /// Top sentences by descending score.
    pub fn summarize(&self, document: &Document) -> Result<Vec<String>> {
        let ranked = self.ranker.rank(document.sentences(), self.summary_length)?;
        Ok(ranked.into_iter().map(|r| r.text).collect())
    }

    /// Character-level similarity of the two raw texts.
    pub fn compare(&self, document: &Document, other: &Document) -> f64 {
        self.scorer.score(document.text(), other.text())
    }

    /// Clauses and summary for one document. Merge a comparison in with
    /// `AnalysisResult::with_similarity`.
    pub fn run_analysis(&self, document: &Document) -> Result<AnalysisResult> {
        let clauses = self.extract_clauses(document);
        let summary = self.summarize(document)?;
        info!(
            sentences = document.sentence_count(),
            clauses = clauses.len(),
            summary = summary.len(),
            "Analyzed document"
        );
        Ok(AnalysisResult::new(clauses, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clauses::DEFAULT_KEYWORDS;
    use crate::text::sentences::PunctuationSplitter;

    fn analyzer(summary_length: usize) -> Analyzer {
        let options = AnalysisOptions {
            summary_length,
            ..AnalysisOptions::default()
        };
        Analyzer::new(options, StopWords::english(), DEFAULT_KEYWORDS).unwrap()
    }

    #[test]
    fn options_reject_zero_summary_length() {
        let options = AnalysisOptions {
            summary_length: 0,
            ..AnalysisOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(AnalysisError::InvalidArgument(_))
        ));
        assert!(Analyzer::new(options, StopWords::none(), DEFAULT_KEYWORDS).is_err());
    }

    #[test]
    fn run_analysis_fills_clauses_and_summary() {
        let doc = Document::new(
            "The tenant shall pay rent. The landlord may inspect. Utilities are included.",
            &PunctuationSplitter::default(),
        );
        let result = analyzer(5).run_analysis(&doc).unwrap();

        assert_eq!(result.clauses, vec!["shall pay rent.", "may inspect."]);
        assert_eq!(result.summary.len(), 3);
        assert!(result.similarity_score.is_none());
    }

    #[test]
    fn json_omits_similarity_when_absent() {
        let result = AnalysisResult::new(vec![], vec!["One.".to_string()]);
        let json = String::from_utf8(result.to_json().unwrap()).unwrap();
        assert!(!json.contains("similarity_score"));
        assert_eq!(json, "{\n    \"clauses\": [],\n    \"summary\": [\n        \"One.\"\n    ]\n}");
    }

    #[test]
    fn json_includes_similarity_when_merged() {
        let result = AnalysisResult::new(vec![], vec![]).with_similarity(1.0);
        let json = String::from_utf8(result.to_json().unwrap()).unwrap();
        assert!(json.contains("\"similarity_score\": 1.0"));
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        AnalysisResult::new(vec!["must sign.".to_string()], vec![])
            .save(&path)
            .unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(path.exists());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("analysis.json");
        let err = AnalysisResult::new(vec![], vec![]).save(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::Write { .. }), "got {err:?}");
    }
}

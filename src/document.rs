// Document loading.
//
// A Document is the raw text plus its sentences, computed once when the
// document is built and never changed afterwards. Files are read whole; the
// handle lives only for the duration of `read_text`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::text::sentences::SentenceSplitter;

/// Read a UTF-8 file to completion.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => AnalysisError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => AnalysisError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    String::from_utf8(bytes).map_err(|source| AnalysisError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}

/// Immutable text with its ordered sentences.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    text: String,
    sentences: Vec<String>,
}

impl Document {
    pub fn new(text: impl Into<String>, splitter: &dyn SentenceSplitter) -> Self {
        let text = text.into();
        let sentences = splitter.split(&text);
        Self { text, sentences }
    }

    pub fn load(path: &Path, splitter: &dyn SentenceSplitter) -> Result<Self> {
        let document = Self::new(read_text(path)?, splitter);
        debug!(
            path = %path.display(),
            chars = document.text.chars().count(),
            sentences = document.sentences.len(),
            "Loaded document"
        );
        Ok(document)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

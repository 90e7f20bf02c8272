// Error taxonomy for the analysis pipeline.
//
// Every failure is fatal for the run: nothing is retried and no partial
// result is ever written. The binary wraps these in anyhow at the boundary.

use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Everything that can go wrong while loading, analyzing, or saving.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input document does not exist.
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The input document exists but could not be read.
    #[error("could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input bytes are not valid UTF-8.
    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    /// A caller-supplied value is out of range or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The output snapshot could not be written.
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding of a result failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

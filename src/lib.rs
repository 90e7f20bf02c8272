// Quill: obligation clauses, extractive summaries and document similarity
// for legal texts.
//
// This is the library root. The binary in main.rs only parses arguments,
// loads files and hands them to the analysis pipeline defined here.

pub mod analysis;
pub mod clauses;
pub mod config;
pub mod document;
pub mod error;
pub mod output;
pub mod similarity;
pub mod summary;
pub mod text;

pub use error::{AnalysisError, Result};

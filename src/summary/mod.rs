// Extractive summarization: TF-IDF sentence ranking.

pub mod traits;
pub mod tfidf;

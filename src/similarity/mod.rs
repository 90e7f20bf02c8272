// Document similarity: Ratcliff/Obershelp matching over characters.

pub mod matcher;

use tracing::debug;

use matcher::{match_ratio, SequenceMatcher};

/// Scores how much of two texts is made of shared character runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    /// Skip very frequent characters when seeding matches in long texts.
    pub autojunk: bool,
}

impl SimilarityScorer {
    pub fn new(autojunk: bool) -> Self {
        Self { autojunk }
    }

    /// Similarity ratio in [0.0, 1.0].
    ///
    /// The greedy matcher prefers the earliest match in its first input, so
    /// the pair is put in lexical order first and the score does not depend
    /// on argument order.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let matcher = SequenceMatcher::with_autojunk(first, second, self.autojunk);
        let matched = matcher.matched_len();
        let total = matcher.total_len();
        let ratio = match_ratio(matched, total);
        debug!(matched, total, ratio, "Compared documents");
        ratio
    }
}

/// Similarity of two whole texts with plain Ratcliff/Obershelp matching.
pub fn similarity(a: &str, b: &str) -> f64 {
    SimilarityScorer::default().score(a, b)
}

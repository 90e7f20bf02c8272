// Colored terminal output for an analysis result.

use colored::Colorize;

use super::preview;
use crate::analysis::AnalysisResult;

const PREVIEW_CHARS: usize = 100;

/// Print the summary, clauses and similarity of a finished run.
pub fn display_analysis(result: &AnalysisResult) {
    println!("\n{}", format!("=== Summary ({} sentences) ===", result.summary.len()).bold());
    if result.summary.is_empty() {
        println!("  {}", "(document has no sentences)".dimmed());
    }
    for (i, sentence) in result.summary.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, preview(sentence, PREVIEW_CHARS));
    }

    println!("\n{}", format!("=== Clauses ({}) ===", result.clauses.len()).bold());
    if result.clauses.is_empty() {
        println!("  {}", "No obligation clauses found.".dimmed());
    }
    for clause in &result.clauses {
        println!("  {} {}", "-".dimmed(), preview(clause, PREVIEW_CHARS));
    }

    if let Some(score) = result.similarity_score {
        println!(
            "\n{} {}",
            "Similarity:".bold(),
            colorize_similarity(score)
        );
    }
    println!();
}

fn colorize_similarity(score: f64) -> colored::ColoredString {
    let text = format!("{:.1}%", score * 100.0);
    if score >= 0.9 {
        text.green().bold()
    } else if score >= 0.5 {
        text.yellow()
    } else {
        text.red()
    }
}

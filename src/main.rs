use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use quill::analysis::Analyzer;
use quill::config::Config;
use quill::document::Document;
use quill::summary::tfidf::Normalization;
use quill::text::sentences::PunctuationSplitter;

/// Quill: find obligation clauses in a legal document, summarize it, and
/// optionally measure how close it is to another document.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    /// Path to the legal document file
    file: PathBuf,

    /// Path to another document for comparison
    #[arg(long)]
    compare: Option<PathBuf>,

    /// File to save the analysis to (default: analysis.json)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Number of sentences in the summary (default: 5)
    #[arg(short = 'n', long)]
    sentences: Option<usize>,

    /// Stop-word list to use instead of the built-in English one
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Score sentences on L2-normalized term vectors
    #[arg(long)]
    normalize: bool,

    /// Ignore very frequent characters when seeding document matches
    #[arg(long)]
    autojunk: bool,

    /// Also print the analysis to the terminal
    #[arg(long)]
    print: bool,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quill=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = apply_flags(Config::load()?, &cli);

    // Bad options fail here, before any document is touched.
    let options = config.analysis_options();
    options.validate()?;
    let stopwords = config.stopwords()?;
    let analyzer = Analyzer::new(options, stopwords, config.clause_keywords.as_slice())?;

    let splitter = PunctuationSplitter::default();
    let document = Document::load(&cli.file, &splitter)
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;
    let other = cli
        .compare
        .as_deref()
        .map(|path| {
            Document::load(path, &splitter)
                .with_context(|| format!("Failed to load comparison document {}", path.display()))
        })
        .transpose()?;

    info!(
        file = %cli.file.display(),
        sentences = document.sentence_count(),
        compare = other.is_some(),
        "Analyzing document"
    );

    let mut result = analyzer.run_analysis(&document)?;
    if let Some(other) = &other {
        result = result.with_similarity(analyzer.compare(&document, other));
    }

    result.save(&config.output_path)?;

    if cli.print {
        quill::output::terminal::display_analysis(&result);
    }
    println!("Analysis saved to {}", config.output_path.display());
    Ok(())
}

/// Command-line flags win over environment configuration.
fn apply_flags(mut config: Config, cli: &Cli) -> Config {
    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }
    if let Some(sentences) = cli.sentences {
        config.summary_length = sentences;
    }
    if let Some(stopwords) = &cli.stopwords {
        config.stopwords_path = Some(stopwords.clone());
    }
    if cli.normalize {
        config.normalization = Normalization::L2;
    }
    if cli.autojunk {
        config.autojunk = true;
    }
    config
}

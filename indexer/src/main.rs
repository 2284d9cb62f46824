use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use toprank_core::ingest::load_dir;
use toprank_core::{CorpusBuilder, CorpusIndex, QueryEngine, RankError, ScoringConfig, TopMatch};
use tracing_subscriber::{fmt, EnvFilter};

const DEMO_QUERIES: &[&str] = &["cool facts about space", "american history"];

#[derive(Parser)]
#[command(name = "toprank")]
#[command(about = "Find the best TF-IDF match for a query in a directory of text files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a corpus and print the top document for each query
    Query {
        /// Directory whose files make up the corpus
        #[arg(long)]
        corpus: PathBuf,
        /// Use smoothed IDF = log10(1 + N/df) instead of log10(N/df)
        #[arg(long, default_value_t = false)]
        smoothed_idf: bool,
        /// Queries to answer; runs the demo queries when omitted
        queries: Vec<String>,
    },
    /// Print corpus statistics, or the heaviest terms of one document
    Stats {
        #[arg(long)]
        corpus: PathBuf,
        #[arg(long, default_value_t = false)]
        smoothed_idf: bool,
        /// Document name to inspect
        #[arg(long)]
        document: Option<String>,
        /// Number of terms to list for --document
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { corpus, smoothed_idf, queries } => {
            let index = load_index(&corpus, smoothed_idf)?;
            run_queries(QueryEngine::new(Arc::new(index)), &queries)
        }
        Commands::Stats { corpus, smoothed_idf, document, top } => {
            let index = load_index(&corpus, smoothed_idf)?;
            print_stats(&index, document.as_deref(), top)
        }
    }
}

fn load_index(corpus: &Path, smoothed_idf: bool) -> Result<CorpusIndex> {
    let config = if smoothed_idf { ScoringConfig::smoothed() } else { ScoringConfig::default() };
    let mut builder = CorpusBuilder::english().with_config(config);
    load_dir(corpus, &mut builder)?;
    Ok(builder.build())
}

fn run_queries(engine: QueryEngine, queries: &[String]) -> Result<()> {
    let queries: Vec<&str> = if queries.is_empty() {
        DEMO_QUERIES.to_vec()
    } else {
        queries.iter().map(String::as_str).collect()
    };
    for q in queries {
        match engine.rank(q) {
            Ok(top) => println!("{}", format_match(&top)),
            Err(RankError::EmptyQuery) => {
                tracing::warn!(query = q, "query has no searchable terms");
                println!("(None, -inf)");
            }
            Err(e) => return Err(e).with_context(|| format!("ranking {q:?}")),
        }
    }
    Ok(())
}

fn format_match(top: &TopMatch) -> String {
    match &top.document {
        Some(name) => format!("({}, {:.12})", name, top.score),
        None => "(None, -inf)".to_string(),
    }
}

fn print_stats(index: &CorpusIndex, document: Option<&str>, top: usize) -> Result<()> {
    match document {
        Some(name) => {
            let (doc, vector) = index
                .document_with_vector(name)
                .with_context(|| format!("no document named {name:?}"))?;
            println!("{}: {} tokens, {} distinct terms", doc.name, doc.tokens.len(), doc.counts.len());
            for (term, weight) in vector.top_terms(top) {
                println!("  {term:<20} {weight:.6}");
            }
        }
        None => {
            println!("documents:  {}", index.len());
            println!("vocabulary: {}", index.vocabulary_size());
            println!("idf:        {:?}", index.config().idf_formula);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_score_with_twelve_decimals() {
        let top = TopMatch { document: Some("doc1".into()), score: 2.0 / 3.0 };
        assert_eq!(format_match(&top), "(doc1, 0.666666666667)");
        assert_eq!(format_match(&TopMatch::none()), "(None, -inf)");
    }

    #[test]
    fn cli_parses_query_subcommand() {
        let cli = Cli::try_parse_from(["toprank", "query", "--corpus", "docs", "space", "history"]).unwrap();
        match cli.command {
            Commands::Query { corpus, smoothed_idf, queries } => {
                assert_eq!(corpus, PathBuf::from("docs"));
                assert!(!smoothed_idf);
                assert_eq!(queries, vec!["space", "history"]);
            }
            _ => panic!("expected query"),
        }
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use textscout_core::{AnalyzerConfig, Operator, SearchEngine};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "textscout")]
#[command(about = "Build an in-memory inverted index over a movie snapshot and query it", long_about = None)]
struct Cli {
    /// Movie snapshot (JSON object with a `results` array)
    #[arg(long, global = true, default_value = "./sample.json")]
    snapshot: PathBuf,
    /// Index stopwords instead of dropping them
    #[arg(long, global = true, default_value_t = false)]
    keep_stopwords: bool,
    /// Disable English stemming
    #[arg(long, global = true, default_value_t = false)]
    no_stem: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Op {
    And,
    Or,
}

impl From<Op> for Operator {
    fn from(op: Op) -> Self {
        match op {
            Op::And => Operator::And,
            Op::Or => Operator::Or,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print corpus and index statistics
    Stats {
        /// How many of the most frequent terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Run a query and print matching movies as JSON lines
    Query {
        #[arg(long, value_enum, default_value_t = Op::And)]
        op: Op,
        /// Query words
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print the corpus-wide occurrence count of a word
    Freq {
        word: String,
    },
}

#[derive(Serialize)]
struct Stats<'a> {
    num_docs: usize,
    num_terms: usize,
    top_terms: Vec<(&'a str, u32)>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let config = AnalyzerConfig { remove_stopwords: !cli.keep_stopwords, stem: !cli.no_stem, ..Default::default() };
    let engine = SearchEngine::open(&cli.snapshot, config)?;

    let mut out = BufWriter::new(io::stdout().lock());
    match cli.command {
        Commands::Stats { top } => {
            let stats = Stats {
                num_docs: engine.store().len(),
                num_terms: engine.index().num_terms(),
                top_terms: engine.index().top_terms(top),
            };
            serde_json::to_writer_pretty(&mut out, &stats)?;
            writeln!(out)?;
        }
        Commands::Query { op, words } => {
            let query = words.join(" ");
            let hits = engine.search(&query, op.into())?;
            tracing::info!(query = %query, hits = hits.len(), "query complete");
            for doc in hits {
                serde_json::to_writer(&mut out, doc)?;
                writeln!(out)?;
            }
        }
        Commands::Freq { word } => {
            writeln!(out, "{}\t{}", word, engine.word_frequency(&word))?;
        }
    }
    out.flush()?;
    Ok(())
}

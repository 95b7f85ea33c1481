use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ragkit_vector_store::{MetadataFilter, MetadataValue, SearchOutput, SearchResults, Similarity};
use serde::Serialize;
use std::env;
use std::io;
use std::path::PathBuf;

mod corpus;

use corpus::SourceOptions;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "ragkit")]
#[command(about = "In-memory semantic retrieval over local documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (logs go to stderr, JSON to stdout)
    #[arg(long, global = true)]
    quiet: bool,

    /// Embedding dimension (overrides RAGKIT_EMBEDDING_DIM)
    #[arg(long, global = true)]
    dimension: Option<usize>,

    /// Texts per embedding batch (overrides RAGKIT_EMBEDDING_BATCH)
    #[arg(long, global = true)]
    batch_size: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest documents and search them by text
    Search(SearchArgs),

    /// Ingest documents and print the metadata summary
    Summary(SummaryArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Text file or directory of .txt files (repeatable)
    #[arg(long = "text", value_name = "PATH")]
    texts: Vec<PathBuf>,

    /// WebVTT transcript file (repeatable)
    #[arg(long = "transcript", value_name = "PATH")]
    transcripts: Vec<PathBuf>,

    /// Characters per text chunk
    #[arg(long, default_value_t = 1000)]
    chunk_size: usize,

    /// Characters shared by consecutive text chunks
    #[arg(long, default_value_t = 200)]
    chunk_overlap: usize,

    /// Transcript cues joined into one chunk
    #[arg(long, default_value_t = 20)]
    cues_per_chunk: usize,

    /// Embed each transcript as a single chunk
    #[arg(long, conflicts_with = "cues_per_chunk")]
    whole_transcripts: bool,
}

impl SourceArgs {
    fn into_options(self) -> SourceOptions {
        SourceOptions {
            texts: self.texts,
            transcripts: self.transcripts,
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
            cues_per_chunk: self.cues_per_chunk,
            whole_transcripts: self.whole_transcripts,
        }
    }
}

#[derive(Args)]
struct SearchArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Search query
    #[arg(long)]
    query: String,

    /// Maximum number of results
    #[arg(short, default_value_t = 4)]
    k: usize,

    /// Scoring function
    #[arg(long, value_enum, default_value_t = Measure::Cosine)]
    measure: Measure,

    /// Exact-match metadata constraint (repeatable)
    #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_filter_pair)]
    filters: Vec<(String, MetadataValue)>,

    /// Result shape
    #[arg(long, value_enum, default_value_t = OutputMode::Full)]
    output: OutputMode,
}

#[derive(Args)]
struct SummaryArgs {
    #[command(flatten)]
    sources: SourceArgs,
}

#[derive(Copy, Clone, ValueEnum)]
enum Measure {
    Cosine,
    Euclidean,
    Manhattan,
}

impl Measure {
    fn as_similarity(self) -> Similarity {
        match self {
            Self::Cosine => Similarity::Cosine,
            Self::Euclidean => Similarity::Euclidean,
            Self::Manhattan => Similarity::Manhattan,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum OutputMode {
    Keys,
    Scored,
    Full,
}

impl OutputMode {
    const fn as_domain(self) -> SearchOutput {
        match self {
            Self::Keys => SearchOutput::Keys,
            Self::Scored => SearchOutput::Scored,
            Self::Full => SearchOutput::Full,
        }
    }
}

/// Parses `field=value`; the value becomes an integer, float or bool when it
/// parses as one, text otherwise.
fn parse_filter_pair(raw: &str) -> std::result::Result<(String, MetadataValue), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("empty field name in '{raw}'"));
    }
    Ok((field.to_string(), parse_filter_value(value)))
}

fn parse_filter_value(raw: &str) -> MetadataValue {
    if let Ok(value) = raw.parse::<i64>() {
        return MetadataValue::Integer(value);
    }
    if let Ok(value) = raw.parse::<f64>() {
        return MetadataValue::Float(value);
    }
    match raw {
        "true" => MetadataValue::Bool(true),
        "false" => MetadataValue::Bool(false),
        _ => MetadataValue::Text(raw.to_string()),
    }
}

#[derive(Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    measure: &'static str,
    k: usize,
    count: usize,
    results: SearchResults,
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    if let Some(dimension) = cli.dimension {
        env::set_var("RAGKIT_EMBEDDING_DIM", dimension.to_string());
    }
    if let Some(batch_size) = cli.batch_size {
        env::set_var("RAGKIT_EMBEDDING_BATCH", batch_size.to_string());
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Summary(args) => run_summary(args).await,
    }
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let db = corpus::build_database(&args.sources.into_options()).await?;

    let similarity = args.measure.as_similarity();
    let filter: MetadataFilter = args.filters.into_iter().collect();
    let filter = (!filter.is_empty()).then_some(filter);

    let results = db
        .search_by_text(
            &args.query,
            args.k,
            &similarity,
            filter.as_ref(),
            args.output.as_domain(),
        )
        .await
        .context("Search failed")?;

    let report = SearchReport {
        query: &args.query,
        measure: similarity.name(),
        k: args.k,
        count: results.len(),
        results,
    };
    print_stdout(&serde_json::to_string_pretty(&report)?)
}

async fn run_summary(args: SummaryArgs) -> Result<()> {
    let db = corpus::build_database(&args.sources.into_options()).await?;
    print_stdout(&serde_json::to_string_pretty(&db.summarize())?)
}

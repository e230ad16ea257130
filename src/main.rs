use analytics::{CorrelationMatrix, aggregate_daily, derive_insights, merge_on_date, summarize_by_class};
use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::Config;
use ingest::{load_sentiment, load_trades};
use report::DatasetOverview;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Meridian sentiment analysis pipeline.
fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = configuration::load_config().context("Failed to load configuration")?;

    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, config),
        Commands::Overview(args) => handle_overview(args, config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Batch analysis of a daily market-sentiment index against a trade log.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: aggregate, merge, correlate, summarize, and
    /// write the flat-file outputs.
    Analyze(AnalyzeArgs),
    /// Load both datasets and report record counts, date coverage, and the
    /// day overlap without writing any output.
    Overview(OverviewArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Path to the sentiment index CSV (overrides config.toml).
    #[arg(long)]
    sentiment: Option<PathBuf>,

    /// Path to the trade log CSV (overrides config.toml).
    #[arg(long)]
    trades: Option<PathBuf>,

    /// Directory for the output CSVs (overrides config.toml).
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Parser)]
struct OverviewArgs {
    /// Path to the sentiment index CSV (overrides config.toml).
    #[arg(long)]
    sentiment: Option<PathBuf>,

    /// Path to the trade log CSV (overrides config.toml).
    #[arg(long)]
    trades: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Handles the orchestration of the full analysis run.
fn handle_analyze(args: AnalyzeArgs, config: Config) -> anyhow::Result<()> {
    let sentiment_path = args.sentiment.unwrap_or(config.inputs.sentiment_csv);
    let trades_path = args.trades.unwrap_or(config.inputs.trades_csv);
    let output_dir = args.output_dir.unwrap_or(config.outputs.directory);

    let sentiment = load_sentiment(&sentiment_path)
        .with_context(|| format!("Failed to load sentiment index from {sentiment_path:?}"))?;
    let trades = load_trades(&trades_path)
        .with_context(|| format!("Failed to load trade log from {trades_path:?}"))?;

    let aggregates = aggregate_daily(&trades.records);
    let merged = merge_on_date(&sentiment.records, &aggregates);
    info!(merged_days = merged.len(), "pipeline core complete");

    let matrix = CorrelationMatrix::compute(&merged);
    let summaries = summarize_by_class(&merged);
    let insights = derive_insights(&matrix, &summaries);

    let merged_path = report::write_merged_csv(&output_dir, &merged)
        .context("Failed to write the merged dataset")?;
    let summary_path = report::write_summary_csv(&output_dir, &summaries)
        .context("Failed to write the summary statistics")?;

    println!("Correlation matrix ({} merged days):", merged.len());
    println!("{}", report::correlation_table(&matrix));
    println!();
    println!("Summary statistics by sentiment classification:");
    println!("{}", report::summary_table(&summaries));

    let lines = report::insight_lines(&insights);
    if !lines.is_empty() {
        println!();
        println!("Key insights:");
        for line in lines {
            println!("- {line}");
        }
    }

    println!();
    println!("Wrote {} and {}", merged_path.display(), summary_path.display());
    Ok(())
}

/// Handles the lightweight dataset overview.
fn handle_overview(args: OverviewArgs, config: Config) -> anyhow::Result<()> {
    let sentiment_path = args.sentiment.unwrap_or(config.inputs.sentiment_csv);
    let trades_path = args.trades.unwrap_or(config.inputs.trades_csv);

    let sentiment = load_sentiment(&sentiment_path)
        .with_context(|| format!("Failed to load sentiment index from {sentiment_path:?}"))?;
    let trades = load_trades(&trades_path)
        .with_context(|| format!("Failed to load trade log from {trades_path:?}"))?;

    let aggregates = aggregate_daily(&trades.records);
    let overlap = merge_on_date(&sentiment.records, &aggregates).len();

    let overview = DatasetOverview::build(&sentiment.records, &trades.records, overlap);
    println!("{}", overview.table());
    println!("Overlapping days: {}", overview.overlapping_days);
    Ok(())
}

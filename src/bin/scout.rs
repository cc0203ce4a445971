//! CLI binary for resource-scout.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use resource_scout::export::csv::{load_csv, save_csv, save_workbook};
use resource_scout::pipeline::dedup::merge;
use resource_scout::pipeline::rank::{categorize, sort_by_score_desc, summarize, top_n};
use resource_scout::{PipelineOutcome, ScoutConfig, SummaryStats};
use tracing_subscriber::EnvFilter;

/// resource-scout: collect, classify, and rank learning resources.
#[derive(Parser)]
#[command(name = "scout", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline and export the results.
    Search {
        /// Extra keywords searched in addition to the configured lists.
        #[arg(short, long, num_args = 1..)]
        keywords: Vec<String>,
    },

    /// Collect new resources and merge them into an existing export.
    Update {
        /// Existing CSV file (relative to the output directory).
        #[arg(short, long)]
        file: String,
    },

    /// Summarise an existing export without collecting anything.
    Stats,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("resource_scout=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = if let Some(ref path) = cli.config {
        ScoutConfig::from_file(path)?
    } else {
        ScoutConfig::default()
    };
    config.validate()?;

    match cli.command {
        Command::Search { keywords } => run_search(&config, &keywords).await,
        Command::Update { file } => run_update(&config, &file).await,
        Command::Stats => run_stats(&config),
    }
}

async fn run_search(config: &ScoutConfig, extra_keywords: &[String]) -> anyhow::Result<()> {
    let outcome = collect_with_spinner(config, extra_keywords).await?;

    print_summary(&outcome.summary);
    print_top(&outcome, 5);
    export(config, &outcome)?;
    Ok(())
}

async fn run_update(config: &ScoutConfig, file: &str) -> anyhow::Result<()> {
    let existing = load_csv(&config.output.dir.join(file))?;
    println!("loaded {} existing records", existing.len());

    let outcome = collect_with_spinner(config, &[]).await?;

    let mut records = merge(existing, outcome.records);
    sort_by_score_desc(&mut records);
    let merged = PipelineOutcome {
        categorized: categorize(&records),
        summary: summarize(&records),
        records,
    };

    print_summary(&merged.summary);
    export(config, &merged)?;
    Ok(())
}

fn run_stats(config: &ScoutConfig) -> anyhow::Result<()> {
    let path = config
        .output
        .dir
        .join(format!("{}_workbook", config.output.basename))
        .join("all.csv");
    let records = load_csv(&path)?;
    if records.is_empty() {
        println!("no records found at {}", path.display());
        return Ok(());
    }
    print_summary(&summarize(&records));
    Ok(())
}

async fn collect_with_spinner(
    config: &ScoutConfig,
    extra_keywords: &[String],
) -> anyhow::Result<PipelineOutcome> {
    let spinner =
        ProgressBar::new_spinner().with_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("collecting resources...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let outcome = resource_scout::run(config, extra_keywords).await?;

    spinner.finish_with_message(format!("collected {} unique resources", outcome.records.len()));
    Ok(outcome)
}

fn export(config: &ScoutConfig, outcome: &PipelineOutcome) -> anyhow::Result<()> {
    let workbook = config
        .output
        .dir
        .join(format!("{}_workbook", config.output.basename));
    save_workbook(&workbook, outcome)?;
    println!("workbook: {}", workbook.display());

    if config.output.flat_csv {
        let flat = config
            .output
            .dir
            .join(format!("{}.csv", config.output.basename));
        save_csv(&flat, &outcome.records)?;
        println!("flat CSV: {}", flat.display());
    }
    Ok(())
}

fn print_summary(summary: &SummaryStats) {
    println!("\ncollection summary");
    println!("  total records: {}", summary.total);

    println!("  by category:");
    for (category, count) in &summary.per_category {
        if *count > 0 {
            println!("    {category}: {count}");
        }
    }

    println!(
        "  by language: zh {} / en {} / mixed {}",
        summary.zh_count, summary.en_count, summary.mixed_count
    );

    println!("  by source:");
    for (source, count) in &summary.per_source {
        println!("    {source}: {count}");
    }

    if summary.total > 0 {
        println!(
            "  scores: mean {:.2}, max {:.1}, min {:.1}, {} at 4.0+",
            summary.mean_score, summary.max_score, summary.min_score, summary.above_four
        );
    }
}

fn print_top(outcome: &PipelineOutcome, n: usize) {
    println!("\ntop {n} resources");
    for (i, record) in top_n(&outcome.records, n).iter().enumerate() {
        println!("{}. {}", i + 1, record.raw.title);
        println!("   url: {}", record.raw.url);
        println!(
            "   score: {:.1} | type: {} | language: {}",
            record.quality_score, record.category, record.language_detected
        );
        println!("   why: {}", record.recommendation);
    }
}

use anyhow::Result;
use catalog::{PipelineConfig, RunSummary};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::debug;

/// Movie catalog enrichment: weighted ratings and similar titles
#[derive(Parser)]
#[command(name = "movie-catalog")]
#[command(about = "Builds a ranked movie catalog with weighted ratings and similar titles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline once
    Run {
        /// CSV export with Movie Name, Genre, Plot, Rating and Votes columns
        #[arg(short, long, default_value = "data/movies.csv")]
        input: PathBuf,

        /// Where to write the JSON catalog
        #[arg(short, long, default_value = "data/movies.json")]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { input, output } => handle_run(input, output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "✗ Aborted:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Handle the 'run' command
fn handle_run(input: PathBuf, output: PathBuf) -> Result<()> {
    println!("Building catalog from {}...", input.display());
    let start = Instant::now();

    let config = PipelineConfig::default();
    debug!(?config, "Using pipeline configuration");

    let summary = catalog::run(&input, &output, &config)?;

    println!(
        "{} Wrote {} entries to {} in {:?}",
        "✓".green(),
        summary.entries,
        output.display(),
        start.elapsed()
    );
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let report = &summary.report;
    let sanitize = &report.sanitize;

    print!("{}", "Run summary:\n".bold().blue());
    println!("{}Input records: {}", "• ".green(), summary.input_records);
    println!(
        "{}Dropped while sanitizing: {} (missing {}, bad rating {}, bad votes {}, duplicate {})",
        "• ".green(),
        sanitize.dropped(),
        sanitize.missing_fields,
        sanitize.invalid_rating,
        sanitize.invalid_votes,
        sanitize.duplicates
    );
    println!("{}Ranked catalog: {} rows", "• ".green(), report.ranked_rows);
    println!(
        "{}Mean rating C: {:.4}, vote floor m: {:.1}",
        "• ".cyan(),
        report.stats.mean_rating,
        report.stats.vote_floor
    );
    println!("{}Vocabulary: {} terms", "• ".cyan(), report.vocabulary_size);
    if report.duplicate_titles > 0 {
        println!(
            "{}{} duplicate titles resolved to their first occurrence",
            "• ".yellow(),
            report.duplicate_titles
        );
    }
}

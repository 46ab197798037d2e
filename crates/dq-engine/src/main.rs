//! CLI entry point for the data quality engine.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use dq_engine::{
    Aggregator, MissingValueStrategy, QualityConfig, QualityReport, RemediationEngine,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// CLI-compatible missing-value strategy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMissingStrategy {
    /// Remove any row with a null in any column
    Drop,
    /// Fill numeric nulls with the column mean
    FillMean,
    /// Fill numeric nulls with the column median
    FillMedian,
    /// Leave missing values untouched
    None,
}

impl From<CliMissingStrategy> for MissingValueStrategy {
    fn from(cli: CliMissingStrategy) -> Self {
        match cli {
            CliMissingStrategy::Drop => MissingValueStrategy::Drop,
            CliMissingStrategy::FillMean => MissingValueStrategy::FillMean,
            CliMissingStrategy::FillMedian => MissingValueStrategy::FillMedian,
            CliMissingStrategy::None => MissingValueStrategy::None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Data quality profiling, scoring and remediation for CSV datasets",
    long_about = "Profile a CSV dataset, score it against configured quality rules,\n\
                  and optionally write a remediated copy.\n\n\
                  EXAMPLES:\n  \
                  # Descriptive profile only (no rule configuration needed)\n  \
                  dq-engine -i data.csv\n\n  \
                  # Score against a rule configuration\n  \
                  dq-engine -i data.csv --config rules.json\n\n  \
                  # Remediate and write fixed/faulty CSVs\n  \
                  dq-engine -i data.csv --config rules.json --fix -o results/\n\n  \
                  # Machine-readable output\n  \
                  dq-engine -i data.csv --config rules.json --json | jq .dq_score"
)]
struct Args {
    /// Path to the CSV file to assess
    #[arg(short, long)]
    input: String,

    /// Path to a JSON rule configuration file
    ///
    /// Without it only the descriptive profile is produced; every rule
    /// reports unavailable.
    #[arg(short, long)]
    config: Option<String>,

    /// Output directory for remediated data
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Run remediation and write <input>_fixed.csv and <input>_faulty.csv
    #[arg(long)]
    fix: bool,

    /// Strategy for missing values during --fix (overrides the config file)
    #[arg(long, value_enum)]
    handle_missing: Option<CliMissingStrategy>,

    /// Keep duplicate rows during --fix (overrides the config file)
    #[arg(long)]
    keep_duplicates: bool,

    /// Output JSON to stdout instead of a human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(strategy) = args.handle_missing {
        config.remediation.handle_missing = strategy.into();
    }
    if args.keep_duplicates {
        config.remediation.drop_duplicates = false;
    }

    info!("Loading dataset from: {}", args.input);
    let df = load_csv(&args.input)?;
    info!("Dataset loaded: {:?}", df.shape());

    let report = Aggregator::evaluate(&df, &config).map_err(|e| anyhow!(e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args.input, &report);
    }

    if args.fix {
        run_fix(&args, &config, &df)?;
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<QualityConfig> {
    let Some(path) = path else {
        return Ok(QualityConfig::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path))?;
    let config: QualityConfig = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse configuration file: {}", path))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path))?;
    Ok(config)
}

fn load_csv(path: &str) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))
        .with_context(|| format!("Failed to open CSV file: {}", path))?
        .finish()
        .with_context(|| format!("Failed to parse CSV file: {}", path))?;
    Ok(df)
}

fn run_fix(args: &Args, config: &QualityConfig, df: &DataFrame) -> Result<()> {
    let output_dir = Path::new(&args.output);
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir)?;
        info!("Created output directory: {}", args.output);
    }

    let engine = RemediationEngine::new(config.remediation);
    let mut outcome = engine.remediate(df).map_err(|e| anyhow!(e))?;

    for action in &outcome.actions {
        info!("{}", action);
    }

    let stem = Path::new(&args.input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");

    let fixed_path = output_dir.join(format!("{}_fixed.csv", stem));
    let faulty_path = output_dir.join(format!("{}_faulty.csv", stem));

    write_csv(&fixed_path, &mut outcome.remediated)?;
    write_csv(&faulty_path, &mut outcome.faulty)?;

    if !args.json {
        println!();
        println!("Remediated data written to: {}", fixed_path.display());
        println!("Faulty rows written to:     {}", faulty_path.display());
    }

    Ok(())
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
    Ok(())
}

/// Print the human-readable report.
///
/// Uses `println!` intentionally for user-facing CLI output; unlike
/// logging, this should always be visible regardless of log level.
fn print_report(input: &str, report: &QualityReport) {
    println!("\n{}", "=".repeat(80));
    println!("DATA QUALITY REPORT");
    println!("{}\n", "=".repeat(80));

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  File: {}", input);
    println!("  Rows: {}", report.profile.shape.0);
    println!("  Columns: {}", report.profile.shape.1);
    println!(
        "  Duplicate rows: {} ({:.1}%)",
        report.profile.duplicate_count, report.profile.duplicate_percentage
    );
    println!();

    println!("COLUMN PROFILES");
    println!("{}", "-".repeat(40));
    println!(
        "{:<20} {:<12} {:<10} {:<10} {:<10}",
        "Column", "Kind", "Nulls %", "Distinct", "Mode/Mean"
    );
    println!("{}", "-".repeat(70));

    for col in &report.profile.column_profiles {
        let central = col
            .numeric
            .as_ref()
            .map(|n| format!("{:.2}", n.mean))
            .or_else(|| col.categorical.as_ref().map(|c| c.mode.clone()))
            .unwrap_or_default();
        println!(
            "{:<20} {:<12} {:<10.1} {:<10} {:<10}",
            truncate_str(&col.name, 19),
            col.kind.display_name(),
            col.null_percentage,
            col.distinct_count,
            truncate_str(&central, 10)
        );
    }
    println!();

    println!("RULE SCORES");
    println!("{}", "-".repeat(40));
    for score in &report.rule_scores {
        match score.outcome.score() {
            Some(value) => println!("  {:<14} {:>6.1}", score.rule.display_name(), value),
            None => println!("  {:<14} {:>6}", score.rule.display_name(), "n/a"),
        }
    }
    println!();

    match report.dq_score {
        Some(score) => println!("  DQ SCORE: {:.1}", score),
        None => println!("  DQ SCORE: n/a (no rules configured)"),
    }
    println!(
        "  Rows processed: {} / failed: {}",
        report.processed_rows, report.failed_rows
    );
    println!();
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

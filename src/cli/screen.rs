use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use indicatif::ProgressDrawTarget;

use crate::cleaning::remote::CleanerConfig;
use crate::cleaning::{clean_column, HttpNameCleaner, CLEANED_NAME_COLUMN, DEFAULT_BATCH_SIZE};
use crate::cli::{percent_bar, OutputFormat};
use crate::core::columns::detect_columns;
use crate::core::record::Dataset;
use crate::core::types::DisplaySeverity;
use crate::export;
use crate::matching::engine::{
    filter_by_threshold, run_dataset, sort_by_score, MatchResult, MatchingConfig, RunSummary,
};
use crate::matching::scoring::IntersectionRule;
use crate::parsing::{self, InputFormat};
use crate::utils::validation::parse_threshold;

#[derive(Args)]
pub struct ScreenArgs {
    /// Customer file (XLSX, XLS, XLSB, ODS, CSV or TSV); the first sheet is used
    #[arg(required = true)]
    pub input: PathBuf,

    /// Input format (auto-detected by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,

    /// Column holding customer names (auto-detected by default)
    #[arg(short = 'c', long)]
    pub customer_column: Option<String>,

    /// Column holding restricted-party names (auto-detected by default)
    #[arg(short = 'r', long)]
    pub reference_column: Option<String>,

    /// Read restricted-party names from this file instead of the input file
    #[arg(long)]
    pub reference_file: Option<PathBuf>,

    /// Only show matches scoring at or above this value (0-1)
    #[arg(short, long, default_value = "0.5", value_parser = parse_threshold)]
    pub threshold: f64,

    /// Show the highest scores first
    #[arg(long)]
    pub sort: bool,

    /// Maximum number of matches to show
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Write the full report (every row) to this file (.xlsx, .csv, .tsv or .json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Cap shared bigrams by their count in both names (textbook Dice coefficient)
    #[arg(long)]
    pub canonical_dice: bool,

    /// Clean customer names through this HTTP service before matching; the
    /// cleaned names are matched and written to a CLEANED_CUSTOMER_NAME column
    #[arg(long)]
    pub clean_endpoint: Option<String>,

    /// Bearer token for the name-cleaning service
    #[arg(long, env = "RPL_SCREEN_CLEANER_API_KEY", hide_env_values = true)]
    pub clean_api_key: Option<String>,

    /// Timeout for each name-cleaning request, in seconds
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub clean_timeout_secs: u64,

    /// Names sent per name-cleaning request
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub clean_batch_size: usize,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Execute screen subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read, a column cannot be resolved,
/// or the report cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScreenArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let dataset = parsing::load_dataset(&args.input, args.input_format)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let references = args
        .reference_file
        .as_deref()
        .map(|path| {
            parsing::load_dataset(path, None)
                .with_context(|| format!("Failed to load {}", path.display()))
        })
        .transpose()?;

    if verbose {
        eprintln!(
            "Loaded {} rows with {} columns from {}",
            dataset.len(),
            dataset.headers.len(),
            args.input.display()
        );
        if let (Some(refs), Some(path)) = (&references, &args.reference_file) {
            eprintln!("Loaded {} reference rows from {}", refs.len(), path.display());
        }
    }

    let customer_column = resolve_column(
        args.customer_column.as_deref(),
        detect_columns(&dataset.headers).customer,
        "customer",
        "--customer-column",
    )?;
    let reference_headers = references.as_ref().map_or(&dataset.headers, |r| &r.headers);
    let reference_column = resolve_column(
        args.reference_column.as_deref(),
        detect_columns(reference_headers).reference,
        "reference",
        "--reference-column",
    )?;

    if verbose {
        eprintln!("Customer column: {customer_column}");
        eprintln!("Reference column: {reference_column}");
    }

    let (dataset, match_column) = match &args.clean_endpoint {
        Some(endpoint) => (
            clean_customers(&args, endpoint, &dataset, &customer_column, verbose)?,
            CLEANED_NAME_COLUMN.to_string(),
        ),
        None => (dataset, customer_column),
    };

    let rule = if args.canonical_dice {
        IntersectionRule::Multiset
    } else {
        IntersectionRule::Membership
    };
    let config = MatchingConfig::new(match_column, reference_column).with_intersection(rule);

    let pb = percent_bar("Screening")?;
    if args.no_progress {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    let mut reporter = |percent: u8| pb.set_position(u64::from(percent));
    let results = run_dataset(&dataset, references.as_ref(), &config, &mut reporter)?;
    pb.finish_and_clear();

    if let Some(path) = &args.output {
        export::write_report(path, &dataset.headers, &results)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        if verbose {
            eprintln!("Wrote {} rows to {}", results.len(), path.display());
        }
    }

    let summary = RunSummary::from_results(&results);
    let mut view = filter_by_threshold(&results, args.threshold);
    if args.sort {
        sort_by_score(&mut view);
    }
    if let Some(limit) = args.limit {
        view.truncate(limit);
    }

    match format {
        OutputFormat::Text => print_text_results(&args, &config, &view, &summary),
        OutputFormat::Json => print_json_results(&args, &config, &view, &summary)?,
        OutputFormat::Tsv => print_tsv_results(&view),
    }

    Ok(())
}

/// Explicit column name, else the auto-detected guess
fn resolve_column(
    explicit: Option<&str>,
    guess: Option<String>,
    role: &str,
    flag: &str,
) -> anyhow::Result<String> {
    match explicit {
        Some(column) => Ok(column.to_string()),
        None => guess.ok_or_else(|| {
            anyhow::anyhow!("Could not detect the {role} column; specify it with {flag}")
        }),
    }
}

fn clean_customers(
    args: &ScreenArgs,
    endpoint: &str,
    dataset: &Dataset,
    column: &str,
    verbose: bool,
) -> anyhow::Result<Dataset> {
    let config = CleanerConfig::new(endpoint)
        .with_api_key(args.clean_api_key.clone())
        .with_timeout(Duration::from_secs(args.clean_timeout_secs))
        .with_batch_size(args.clean_batch_size);
    let cleaner = HttpNameCleaner::new(config).context("Invalid name-cleaning configuration")?;

    let cleaned = clean_column(&cleaner, dataset, column, cleaner.config().batch_size);

    if verbose {
        let names = cleaned.column_text(column);
        let changed = names
            .iter()
            .zip(cleaned.column_text(CLEANED_NAME_COLUMN))
            .filter(|(a, b)| **a != *b)
            .count();
        eprintln!("Name cleaning changed {changed} of {} names", names.len());
    }

    Ok(cleaned)
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(blank)"
    } else {
        name
    }
}

fn print_text_results(
    args: &ScreenArgs,
    config: &MatchingConfig,
    view: &[&MatchResult<'_>],
    summary: &RunSummary,
) {
    println!("Screening Results");
    println!("{}", "=".repeat(60));

    println!("\nInput: {}", args.input.display());
    println!("  Customer column: {}", config.customer_column);
    println!("  Reference column: {}", config.reference_column);
    println!(
        "  Records: {} ({} with a match)",
        summary.total, summary.matched
    );
    println!(
        "  Risk levels: {} critical, {} high, {} low",
        summary.critical, summary.high, summary.low
    );

    if view.is_empty() {
        println!("\nNo matches at or above {:.2}.", args.threshold);
        return;
    }

    println!(
        "\nMatches at or above {:.2} ({} shown):\n",
        args.threshold,
        view.len()
    );
    for result in view {
        println!(
            "{} {:.4}  {:<8}  {} -> {}",
            DisplaySeverity::from_score(result.similarity).marker(),
            result.similarity,
            result.risk_tier().as_str(),
            display_name(&result.customer_name),
            display_name(&result.matched_reference),
        );
    }
}

fn print_json_results(
    args: &ScreenArgs,
    config: &MatchingConfig,
    view: &[&MatchResult<'_>],
    summary: &RunSummary,
) -> anyhow::Result<()> {
    let matches: Vec<serde_json::Value> = view
        .iter()
        .map(|r| {
            serde_json::json!({
                "customer_name": r.customer_name,
                "matched_rpl_name": r.matched_reference,
                "similarity": r.similarity,
                "risk_level": r.risk_tier(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "input": args.input.display().to_string(),
        "customer_column": config.customer_column,
        "reference_column": config.reference_column,
        "intersection": config.intersection,
        "threshold": args.threshold,
        "summary": summary,
        "matches": matches,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(view: &[&MatchResult<'_>]) {
    println!("customer_name\tmatched_rpl_name\tsimilarity\trisk_level");
    for result in view {
        println!(
            "{}\t{}\t{:.4}\t{}",
            result.customer_name,
            result.matched_reference,
            result.similarity,
            result.risk_tier(),
        );
    }
}

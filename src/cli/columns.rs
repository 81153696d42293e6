use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::columns::{detect_columns, ColumnGuess};
use crate::core::record::Dataset;
use crate::parsing::{self, InputFormat};

#[derive(Args)]
pub struct ColumnsArgs {
    /// Input file (XLSX, XLS, XLSB, ODS, CSV or TSV)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Input format (auto-detected by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,

    /// Number of data rows to preview
    #[arg(short = 'n', long, default_value = "5")]
    pub rows: usize,
}

#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ColumnsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let dataset = parsing::load_dataset(&args.input, args.input_format)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let guess = detect_columns(&dataset.headers);

    if verbose {
        eprintln!(
            "Loaded {} rows with {} columns",
            dataset.len(),
            dataset.headers.len()
        );
    }

    let preview = &dataset.rows[..args.rows.min(dataset.len())];
    let preview = Dataset::new(dataset.headers.clone(), preview.to_vec());

    match format {
        OutputFormat::Text => print_text_columns(&args, &dataset, &guess, &preview),
        OutputFormat::Json => print_json_columns(&args, &dataset, &guess, &preview)?,
        OutputFormat::Tsv => print_tsv_preview(&preview),
    }

    Ok(())
}

fn print_text_columns(args: &ColumnsArgs, dataset: &Dataset, guess: &ColumnGuess, preview: &Dataset) {
    println!("File: {}", args.input.display());
    println!("Rows: {}", dataset.len());

    println!("\nColumns:");
    for (i, header) in dataset.headers.iter().enumerate() {
        let mut roles = Vec::new();
        if guess.customer.as_deref() == Some(header.as_str()) {
            roles.push("customer");
        }
        if guess.reference.as_deref() == Some(header.as_str()) {
            roles.push("reference");
        }
        if roles.is_empty() {
            println!("  {:>3}. {header}", i + 1);
        } else {
            println!("  {:>3}. {header}  [{}]", i + 1, roles.join(", "));
        }
    }

    println!(
        "\nDetected customer column: {}",
        guess.customer.as_deref().unwrap_or("(none)")
    );
    println!(
        "Detected reference column: {}",
        guess.reference.as_deref().unwrap_or("(none)")
    );

    if preview.is_empty() {
        return;
    }

    println!("\nFirst {} rows:", preview.len());
    println!("{}", preview.headers.join(" | "));
    for row in &preview.rows {
        let cells: Vec<String> = preview.headers.iter().map(|h| row.text(h)).collect();
        println!("{}", cells.join(" | "));
    }
}

fn print_json_columns(
    args: &ColumnsArgs,
    dataset: &Dataset,
    guess: &ColumnGuess,
    preview: &Dataset,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "path": args.input.display().to_string(),
        "row_count": dataset.len(),
        "headers": dataset.headers,
        "detected": {
            "customer": guess.customer,
            "reference": guess.reference,
        },
        "preview": preview.rows,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_preview(preview: &Dataset) {
    println!("{}", preview.headers.join("\t"));
    for row in &preview.rows {
        let cells: Vec<String> = preview.headers.iter().map(|h| row.text(h)).collect();
        println!("{}", cells.join("\t"));
    }
}

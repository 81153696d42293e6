//! Command-line interface for rpl-screen.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **screen**: Match every customer against the restricted-party list
//! - **compare**: Score two names against each other
//! - **columns**: Show a file's headers, column guesses and first rows
//!
//! ## Usage
//!
//! ```text
//! # Screen a spreadsheet holding both columns
//! rpl-screen screen customers.xlsx
//!
//! # Reference names from a separate file, explicit columns
//! rpl-screen screen customers.csv --customer-column "Client" \
//!     --reference-file denied.xlsx --reference-column "Denied Party"
//!
//! # Only show likely hits, highest first, and write the full report
//! rpl-screen screen customers.xlsx --threshold 0.65 --sort --output report.xlsx
//!
//! # JSON output for scripting
//! rpl-screen screen customers.xlsx --format json
//!
//! # Explain a single pair
//! rpl-screen compare "Zenith Trading Co" "Zenith Trade"
//! ```

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

pub mod columns;
pub mod compare;
pub mod screen;

#[derive(Parser)]
#[command(name = "rpl-screen")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Screen customer lists against restricted-party lists")]
#[command(
    long_about = "rpl-screen compares every customer name in a spreadsheet against a list of restricted-party names.\n\nFor each customer it reports:\n- The single best-matching restricted-party name\n- A bigram similarity score between 0 and 1\n- A risk level (CRITICAL above 0.85, HIGH above 0.65, otherwise LOW)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen every customer against the restricted-party list
    Screen(screen::ScreenArgs),

    /// Compare two names
    Compare(compare::CompareArgs),

    /// Show headers, column guesses and a preview of a file
    Columns(columns::ColumnsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Percent-complete bar drawn on stderr (hidden when stderr is not a terminal)
pub(crate) fn percent_bar(message: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos:>3}% ({elapsed})")?
            .progress_chars("█▓░"),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

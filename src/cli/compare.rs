use clap::Args;

use crate::cli::OutputFormat;
use crate::core::types::{DisplaySeverity, RiskTier};
use crate::matching::normalize::normalize;
use crate::matching::scoring::{common_words, similarity_with_rule, IntersectionRule};
use crate::utils::validation::round_score;

#[derive(Args)]
pub struct CompareArgs {
    /// First name (for example, a customer)
    #[arg(required = true)]
    pub name_a: String,

    /// Second name (for example, a restricted party)
    #[arg(required = true)]
    pub name_b: String,

    /// Cap shared bigrams by their count in both names (textbook Dice coefficient)
    #[arg(long)]
    pub canonical_dice: bool,
}

struct Comparison {
    normalized_a: String,
    normalized_b: String,
    similarity: f64,
    tier: RiskTier,
    common: Vec<String>,
}

#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let rule = if args.canonical_dice {
        IntersectionRule::Multiset
    } else {
        IntersectionRule::Membership
    };

    let similarity = round_score(similarity_with_rule(&args.name_a, &args.name_b, rule));
    let comparison = Comparison {
        normalized_a: normalize(&args.name_a),
        normalized_b: normalize(&args.name_b),
        similarity,
        tier: RiskTier::from_score(similarity),
        common: common_words(&args.name_a, &args.name_b),
    };

    if verbose {
        eprintln!("Intersection rule: {rule:?}");
    }

    match format {
        OutputFormat::Text => print_text_comparison(&args, &comparison),
        OutputFormat::Json => print_json_comparison(&args, &comparison, rule)?,
        OutputFormat::Tsv => print_tsv_comparison(&comparison),
    }

    Ok(())
}

fn print_text_comparison(args: &CompareArgs, comparison: &Comparison) {
    println!("Comparison Results");
    println!("{}", "=".repeat(60));

    println!("\nName A: {}", args.name_a);
    println!("  Normalized: {}", comparison.normalized_a);

    println!("\nName B: {}", args.name_b);
    println!("  Normalized: {}", comparison.normalized_b);

    println!(
        "\n{}Similarity: {:.4} ({:.1}%)",
        DisplaySeverity::from_score(comparison.similarity).marker(),
        comparison.similarity,
        comparison.similarity * 100.0
    );
    println!("  Risk level: {}", comparison.tier);
    if comparison.common.is_empty() {
        println!("  Common words: (none)");
    } else {
        println!("  Common words: {}", comparison.common.join(", "));
    }
}

fn print_json_comparison(
    args: &CompareArgs,
    comparison: &Comparison,
    rule: IntersectionRule,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "name_a": {
            "original": args.name_a,
            "normalized": comparison.normalized_a,
        },
        "name_b": {
            "original": args.name_b,
            "normalized": comparison.normalized_b,
        },
        "similarity": comparison.similarity,
        "risk_level": comparison.tier,
        "common_words": comparison.common,
        "intersection": format!("{rule:?}"),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_comparison(comparison: &Comparison) {
    println!("normalized_a\tnormalized_b\tsimilarity\trisk_level\tcommon_words");
    println!(
        "{}\t{}\t{:.4}\t{}\t{}",
        comparison.normalized_a,
        comparison.normalized_b,
        comparison.similarity,
        comparison.tier,
        comparison.common.join(","),
    );
}

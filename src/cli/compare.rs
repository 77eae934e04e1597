use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::scoring::{compute_similarity, levenshtein_distance, normalize};

#[derive(Args)]
pub struct CompareArgs {
    /// First name
    #[arg(required = true)]
    pub a: String,

    /// Second name
    #[arg(required = true)]
    pub b: String,
}

#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CompareArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let normalized_a = normalize(&args.a);
    let normalized_b = normalize(&args.b);
    let distance = levenshtein_distance(&normalized_a, &normalized_b);
    let similarity = compute_similarity(&args.a, &args.b);

    match format {
        OutputFormat::Text => {
            println!("Comparison Results");
            println!("{}", "=".repeat(60));
            println!("\nA: '{}' -> '{}'", args.a, normalized_a);
            println!("B: '{}' -> '{}'", args.b, normalized_b);
            println!("\n  Edit distance: {distance}");
            println!("  Similarity: {:.2}%", similarity * 100.0);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "a": { "input": args.a, "normalized": normalized_a },
                "b": { "input": args.b, "normalized": normalized_b },
                "distance": distance,
                "similarity": similarity,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("a\tb\tdistance\tsimilarity");
            println!("{}\t{}\t{distance}\t{similarity:.4}", args.a, args.b);
        }
    }

    Ok(())
}

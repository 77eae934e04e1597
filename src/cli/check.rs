use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::{load_catalog, OutputFormat};
use crate::core::entry::{CandidateEntry, ExistingEntry};
use crate::core::types::EntryKind;
use crate::matching::engine::{
    DuplicateChecker, MatchingConfig, SimilarityResult, DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::parsing;

#[derive(Args)]
pub struct CheckArgs {
    /// Name of the entry about to be created
    #[arg(required = true)]
    pub name: String,

    /// Code of the entry about to be created
    #[arg(long)]
    pub code: Option<String>,

    /// Which catalog to check against
    #[arg(short, long, value_enum, default_value = "ingredient")]
    pub kind: EntryKind,

    /// Path to custom catalog file
    #[arg(long, conflicts_with = "entries")]
    pub catalog: Option<PathBuf>,

    /// TSV or CSV file of existing entries (id, name, [code]) instead of a catalog
    #[arg(long)]
    pub entries: Option<PathBuf>,

    /// Minimum name similarity (0.0-1.0) to report
    #[arg(short, long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: f64,
}

/// Execute check subcommand
///
/// # Errors
///
/// Returns an error if the existing entries cannot be loaded or the candidate
/// is rejected (oversized input, threshold out of range).
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CheckArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let existing = load_existing(&args)?;

    if verbose {
        eprintln!("Loaded {} existing {} entries", existing.len(), args.kind);
    }

    let candidate = CandidateEntry {
        name: args.name.clone(),
        code: args.code.clone(),
    };

    let checker =
        DuplicateChecker::with_config(MatchingConfig::default().with_threshold(args.threshold));
    let results = checker.check_candidate(&candidate, &existing)?;

    match format {
        OutputFormat::Text => print_text_results(&candidate, &results),
        OutputFormat::Json => print_json_results(&candidate, args.threshold, &results)?,
        OutputFormat::Tsv => print_tsv_results(&results),
    }

    Ok(())
}

fn load_existing(args: &CheckArgs) -> anyhow::Result<Vec<ExistingEntry>> {
    if let Some(path) = &args.entries {
        return parse_entries_file(path);
    }

    let catalog = load_catalog(args.catalog.as_deref())?;
    Ok(catalog.entries(args.kind).to_vec())
}

fn parse_entries_file(path: &Path) -> anyhow::Result<Vec<ExistingEntry>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("csv") => Ok(parsing::tsv::parse_tsv_file(path, ',')?),
        _ => Ok(parsing::tsv::parse_tsv_file(path, '\t')?),
    }
}

fn print_text_results(candidate: &CandidateEntry, results: &[SimilarityResult]) {
    if results.is_empty() {
        println!("No duplicates found for '{}'.", candidate.name);
        return;
    }

    println!("Possible duplicates of '{}'", candidate.name);
    println!("{}", "=".repeat(60));

    for (i, r) in results.iter().enumerate() {
        println!(
            "\n#{} {} (id {}{})",
            i + 1,
            r.name,
            r.id,
            r.code
                .as_deref()
                .map(|c| format!(", code {c}"))
                .unwrap_or_default()
        );
        println!("   Similarity: {:.1}%", r.similarity * 100.0);
        println!("   Match: {}", r.strength());
    }
}

fn print_json_results(
    candidate: &CandidateEntry,
    threshold: f64,
    results: &[SimilarityResult],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "candidate": candidate,
        "threshold": threshold,
        "has_duplicates": !results.is_empty(),
        "duplicates": results.iter().map(|r| {
            serde_json::json!({
                "id": r.id,
                "name": r.name,
                "code": r.code,
                "similarity": r.similarity,
                "exact_match": r.exact_match,
                "strength": r.strength(),
            })
        }).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(results: &[SimilarityResult]) {
    println!("id\tname\tcode\tsimilarity\texact_match");
    for r in results {
        println!(
            "{}\t{}\t{}\t{:.4}\t{}",
            r.id,
            r.name,
            r.code.as_deref().unwrap_or(""),
            r.similarity,
            r.exact_match
        );
    }
}

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{load_catalog, OutputFormat};
use crate::core::entry::EntryId;
use crate::core::types::EntryKind;
use crate::matching::audit::{find_near_duplicates, DuplicatePair};
use crate::matching::engine::DEFAULT_SIMILARITY_THRESHOLD;
use crate::utils::validation::validate_threshold;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List entries in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only list one kind of entry
        #[arg(long, value_enum)]
        kind: Option<EntryKind>,
    },

    /// Show details of a specific entry
    Show {
        /// Entry kind
        #[arg(required = true, value_enum)]
        kind: EntryKind,

        /// Entry ID
        #[arg(required = true)]
        id: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Report entries that already look like duplicates of each other
    Audit {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only audit one kind of entry
        #[arg(long, value_enum)]
        kind: Option<EntryKind>,

        /// Minimum name similarity (0.0-1.0) to report
        #[arg(short, long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
        threshold: f64,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the entry is not found,
/// or the export file cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, kind } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let kinds = selected_kinds(kind);

            match format {
                OutputFormat::Json => {
                    let mut output = serde_json::Map::new();
                    for kind in kinds {
                        output.insert(
                            kind.to_string(),
                            serde_json::to_value(catalog.entries(kind))?,
                        );
                    }
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Tsv => {
                    println!("kind\tid\tname\tcode");
                    for kind in kinds {
                        for e in catalog.entries(kind) {
                            println!(
                                "{kind}\t{}\t{}\t{}",
                                e.id,
                                e.name,
                                e.code.as_deref().unwrap_or("")
                            );
                        }
                    }
                }
                OutputFormat::Text => {
                    for kind in kinds {
                        println!("\n{} ({} entries)", kind, catalog.count(kind));
                        println!("{}", "-".repeat(60));
                        for e in catalog.entries(kind) {
                            println!(
                                "  {:<8} {:<12} {}",
                                e.id.as_str(),
                                e.code.as_deref().unwrap_or("-"),
                                e.name
                            );
                        }
                    }
                }
            }
        }

        CatalogCommands::Show { kind, id, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let entry = catalog
                .get(kind, &EntryId::new(&id))
                .ok_or_else(|| anyhow::anyhow!("No {kind} with id '{id}' in catalog"))?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
                OutputFormat::Tsv => {
                    println!("id\tname\tcode");
                    println!(
                        "{}\t{}\t{}",
                        entry.id,
                        entry.name,
                        entry.code.as_deref().unwrap_or("")
                    );
                }
                OutputFormat::Text => {
                    println!("Kind: {kind}");
                    println!("ID:   {}", entry.id);
                    println!("Name: {}", entry.name);
                    println!("Code: {}", entry.code.as_deref().unwrap_or("(none)"));
                }
            }
        }

        CatalogCommands::Export { output, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            std::fs::write(&output, catalog.to_json()?)?;
            if verbose {
                eprintln!(
                    "Exported {} entries to {}",
                    catalog.len(),
                    output.display()
                );
            }
        }

        CatalogCommands::Audit {
            catalog,
            kind,
            threshold,
        } => {
            let threshold = validate_threshold(threshold)?;
            let catalog = load_catalog(catalog.as_deref())?;

            let mut report = Vec::new();
            for kind in selected_kinds(kind) {
                let pairs = find_near_duplicates(catalog.entries(kind), threshold);
                if verbose {
                    eprintln!(
                        "Audited {} {kind} entries: {} suspicious pairs",
                        catalog.count(kind),
                        pairs.len()
                    );
                }
                report.push((kind, pairs));
            }

            match format {
                OutputFormat::Json => print_json_audit(&report)?,
                OutputFormat::Tsv => print_tsv_audit(&report),
                OutputFormat::Text => print_text_audit(&report),
            }
        }
    }

    Ok(())
}

fn selected_kinds(kind: Option<EntryKind>) -> Vec<EntryKind> {
    kind.map_or_else(|| EntryKind::ALL.to_vec(), |k| vec![k])
}

fn print_text_audit(report: &[(EntryKind, Vec<DuplicatePair>)]) {
    let total: usize = report.iter().map(|(_, pairs)| pairs.len()).sum();
    if total == 0 {
        println!("No duplicates found in catalog.");
        return;
    }

    for (kind, pairs) in report {
        if pairs.is_empty() {
            continue;
        }
        println!("\n{kind}: {} suspicious pairs", pairs.len());
        println!("{}", "-".repeat(60));
        for p in pairs {
            println!(
                "  [{}] {} (id {}) <-> {} (id {})  {:.1}%",
                p.strength(),
                p.first.name,
                p.first.id,
                p.second.name,
                p.second.id,
                p.similarity * 100.0
            );
        }
    }
}

fn print_json_audit(report: &[(EntryKind, Vec<DuplicatePair>)]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = report
        .iter()
        .map(|(kind, pairs)| {
            serde_json::json!({
                "kind": kind,
                "pairs": pairs.iter().map(|p| {
                    serde_json::json!({
                        "first": p.first,
                        "second": p.second,
                        "similarity": p.similarity,
                        "code_collision": p.code_collision,
                        "strength": p.strength(),
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_audit(report: &[(EntryKind, Vec<DuplicatePair>)]) {
    println!("kind\tfirst_id\tfirst_name\tsecond_id\tsecond_name\tsimilarity\tcode_collision");
    for (kind, pairs) in report {
        for p in pairs {
            println!(
                "{kind}\t{}\t{}\t{}\t{}\t{:.4}\t{}",
                p.first.id,
                p.first.name,
                p.second.id,
                p.second.name,
                p.similarity,
                p.code_collision
            );
        }
    }
}

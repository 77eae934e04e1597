//! Command-line interface for catalog-dedup.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **check**: Check a new name (and optional code) against existing entries
//! - **compare**: Show the similarity between two names
//! - **catalog**: List, show, export or audit the entry catalog
//! - **serve**: Start the duplicate-check HTTP API
//!
//! ## Usage
//!
//! ```text
//! # Check a new ingredient against the embedded sample catalog
//! catalog-dedup check "Wheet Flour" --code ING-001
//!
//! # Check a product against a spreadsheet export
//! catalog-dedup check "Croisant" --kind product --entries products.csv
//!
//! # JSON output for scripting
//! catalog-dedup check "Rye flour" --format json
//!
//! # Find duplicates already in a catalog
//! catalog-dedup catalog audit --catalog catalog.json
//!
//! # Start the API
//! catalog-dedup serve --port 8080
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::store::EntryCatalog;

pub mod catalog;
pub mod check;
pub mod compare;

#[derive(Parser)]
#[command(name = "catalog-dedup")]
#[command(version)]
#[command(about = "Catch near-duplicate ingredients, products and recipes before they are created")]
#[command(
    long_about = "catalog-dedup compares a new catalog entry against the existing ones and reports:\n- Entries whose code is identical (ignoring case and surrounding whitespace)\n- Entries whose name is similar by edit distance, most similar first"
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
    /// Check a candidate entry for duplicates
    Check(check::CheckArgs),

    /// Compare two names
    Compare(compare::CompareArgs),

    /// Manage the entry catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Path to catalog file served to callers that send no entries
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load a catalog from `path`, or the embedded sample catalog when absent
pub(crate) fn load_catalog(path: Option<&Path>) -> anyhow::Result<EntryCatalog> {
    let catalog = match path {
        Some(path) => EntryCatalog::load_from_file(path)?,
        None => EntryCatalog::load_embedded()?,
    };
    Ok(catalog)
}

//! # catalog-dedup
//!
//! A library for catching near-duplicate catalog entries before they are created.
//!
//! A bakery's operations database holds ingredients, products and recipes that
//! are entered by hand. "Wheat Flour" and "Wheet flour" end up as two rows, and
//! costing and inventory reports silently split across them. `catalog-dedup`
//! compares the entry a user is about to create against the existing ones and
//! reports likely duplicates, so the caller can warn or block.
//!
//! ## Features
//!
//! - **Exact code matching**: codes are compared ignoring case and surrounding whitespace
//! - **Fuzzy name matching**: Levenshtein similarity relative to the longer name
//! - **Stable ranking**: most similar first, ties keep catalog order
//! - **Catalog audit**: find duplicate pairs that are already in a catalog
//!
//! ## Example
//!
//! ```rust
//! use catalog_dedup::{DuplicateChecker, ExistingEntry};
//!
//! let existing = vec![
//!     ExistingEntry::new(1u64, "Wheat Flour").with_code("ING-001"),
//!     ExistingEntry::new(2u64, "White Sugar").with_code("ING-002"),
//! ];
//!
//! let checker = DuplicateChecker::new();
//! let matches = checker.check(Some("Wheet Flour"), Some("ING-001"), &existing).unwrap();
//!
//! for m in &matches {
//!     println!("{}: {:.1}% (exact code: {})", m.name, m.similarity * 100.0, m.exact_match);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Entry catalog storage
//! - [`core`]: Entry types and match classification
//! - [`matching`]: Similarity scoring and duplicate detection
//! - [`parsing`]: TSV/CSV import of existing entries
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP API for duplicate checks

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::catalog::store::EntryCatalog;
pub use crate::core::entry::{CandidateEntry, EntryId, ExistingEntry};
pub use crate::core::types::*;
pub use crate::matching::engine::{
    find_duplicates, find_exact_by_code, find_similar_by_name, DuplicateChecker, MatchError,
    MatchingConfig, SimilarityResult,
};
pub use crate::matching::scoring::compute_similarity;

//! Duplicate detection: name similarity and exact code matching.
//!
//! - [`scoring`]: normalization, Levenshtein distance and the similarity score
//! - [`engine`]: the matching operations and the validating [`DuplicateChecker`]
//! - [`audit`]: pairwise scan of an existing catalog for duplicates that slipped in
//!
//! ## Scoring
//!
//! Names are trimmed and lower-cased, then compared by edit distance relative to
//! the longer name: `similarity = 1 - distance / max_len`. Identical names score
//! exactly 1.0, and two blank names are considered identical.
//!
//! ## Duplicate checks
//!
//! A check runs in two phases:
//!
//! 1. **Code phase**: entries whose normalized code equals the candidate's are
//!    reported first, flagged `exact_match`, whatever their name similarity.
//! 2. **Name phase**: remaining entries whose name similarity reaches the
//!    threshold (default 0.7), most similar first.
//!
//! ## Example
//!
//! ```rust
//! use catalog_dedup::core::entry::ExistingEntry;
//! use catalog_dedup::matching::engine::find_duplicates;
//!
//! let existing = vec![
//!     ExistingEntry::new(1u64, "Wheat Flour").with_code("ING-001"),
//!     ExistingEntry::new(2u64, "White Sugar").with_code("ING-002"),
//! ];
//!
//! let results = find_duplicates("Wheet Flour", Some("ing-001"), &existing, 0.7);
//! assert_eq!(results.len(), 1);
//! assert!(results[0].exact_match);
//! ```
//!
//! [`DuplicateChecker`]: engine::DuplicateChecker

pub mod audit;
pub mod engine;
pub mod scoring;

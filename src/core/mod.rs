//! Core data types for duplicate detection.
//!
//! - [`CandidateEntry`]: the name and optional code a user is about to create
//! - [`ExistingEntry`]: a catalog row supplied by the caller
//! - [`EntryId`]: opaque row identifier (numeric or text keys)
//! - [`EntryKind`]: which catalog (ingredient, product, recipe) an entry lives in
//! - [`MatchStrength`]: classification of a match for warning views
//!
//! [`CandidateEntry`]: entry::CandidateEntry
//! [`ExistingEntry`]: entry::ExistingEntry
//! [`EntryId`]: entry::EntryId
//! [`EntryKind`]: types::EntryKind
//! [`MatchStrength`]: types::MatchStrength

pub mod entry;
pub mod types;

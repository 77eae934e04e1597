use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::entry::{CandidateEntry, EntryId, ExistingEntry};
use crate::core::types::MatchStrength;
use crate::matching::scoring::{compute_similarity, normalize};
use crate::utils::validation::{
    check_length, require_name, validate_threshold, ValidationError, MAX_INPUT_CHARS,
};

/// Default minimum similarity for an entry to count as a fuzzy duplicate
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// One existing entry that looks like a duplicate of the candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub id: EntryId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Name similarity in `[0.0, 1.0]`
    pub similarity: f64,

    /// The candidate's code collides with this entry's code
    pub exact_match: bool,
}

impl SimilarityResult {
    fn from_entry(entry: &ExistingEntry, similarity: f64, exact_match: bool) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            code: entry.code.clone(),
            similarity,
            exact_match,
        }
    }

    #[must_use]
    pub fn strength(&self) -> MatchStrength {
        MatchStrength::from_result(self.exact_match, self.similarity)
    }
}

/// Score every existing name against the candidate and keep those at or above `threshold`.
///
/// Results are sorted by similarity descending. The sort is stable, so entries
/// with equal scores keep their input order.
#[must_use]
pub fn find_similar_by_name(
    candidate_name: &str,
    existing: &[ExistingEntry],
    threshold: f64,
) -> Vec<SimilarityResult> {
    let mut results: Vec<SimilarityResult> = existing
        .iter()
        .filter_map(|entry| {
            let similarity = compute_similarity(candidate_name, &entry.name);
            (similarity >= threshold).then(|| SimilarityResult::from_entry(entry, similarity, false))
        })
        .collect();

    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    results
}

/// Entries whose normalized code equals the normalized candidate code, in input order.
///
/// Codes are identifiers, not free text: there is no fuzzy matching here.
/// Entries without a code never match.
#[must_use]
pub fn find_exact_by_code<'a>(
    candidate_code: &str,
    existing: &'a [ExistingEntry],
) -> Vec<&'a ExistingEntry> {
    let wanted = normalize(candidate_code);
    existing
        .iter()
        .filter(|entry| {
            entry
                .code
                .as_deref()
                .is_some_and(|code| normalize(code) == wanted)
        })
        .collect()
}

/// Exact code collisions first, then fuzzy name matches not already reported.
///
/// When `candidate_code` is `None` or blank the code phase is skipped and the
/// result equals [`find_similar_by_name`].
#[must_use]
pub fn find_duplicates(
    candidate_name: &str,
    candidate_code: Option<&str>,
    existing: &[ExistingEntry],
    threshold: f64,
) -> Vec<SimilarityResult> {
    let code_matches = find_code_collisions(candidate_name, candidate_code, existing);
    let by_name = find_similar_by_name(candidate_name, existing, threshold);
    merge_matches(code_matches, by_name)
}

/// Code phase of [`find_duplicates`]: exact code matches carrying their name similarity
fn find_code_collisions(
    candidate_name: &str,
    candidate_code: Option<&str>,
    existing: &[ExistingEntry],
) -> Vec<SimilarityResult> {
    match candidate_code.filter(|c| !c.trim().is_empty()) {
        Some(code) => find_exact_by_code(code, existing)
            .into_iter()
            .map(|entry| {
                let similarity = compute_similarity(candidate_name, &entry.name);
                SimilarityResult::from_entry(entry, similarity, true)
            })
            .collect(),
        None => Vec::new(),
    }
}

/// Append name matches whose ids were not already reported as code collisions
fn merge_matches(
    mut code_matches: Vec<SimilarityResult>,
    by_name: Vec<SimilarityResult>,
) -> Vec<SimilarityResult> {
    if code_matches.is_empty() {
        return by_name;
    }

    let exact_ids: HashSet<EntryId> = code_matches.iter().map(|r| r.id.clone()).collect();
    code_matches.extend(by_name.into_iter().filter(|r| !exact_ids.contains(&r.id)));
    code_matches
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{field} is {actual} characters long, maximum is {max}")]
    InputTooLong {
        field: String,
        actual: usize,
        max: usize,
    },

    #[error("Similarity threshold {0} must be between 0.0 and 1.0")]
    InvalidThreshold(f64),
}

impl From<ValidationError> for MatchError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingName => Self::InvalidArgument(err.to_string()),
            ValidationError::TooLong { field, actual, max } => {
                Self::InputTooLong { field, actual, max }
            }
            ValidationError::ThresholdOutOfRange(value) => Self::InvalidThreshold(value),
        }
    }
}

/// Configuration for duplicate checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum name similarity for a fuzzy match
    pub threshold: f64,
    /// Longest name or code accepted, in characters
    pub max_input_chars: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_input_chars: MAX_INPUT_CHARS,
        }
    }
}

impl MatchingConfig {
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Validating front door for [`find_duplicates`].
///
/// Rejects missing or oversized candidate input and out-of-range thresholds.
/// Existing entries with oversized names are skipped rather than failing the
/// whole check, since they come from storage and not from the user.
#[derive(Debug, Clone, Default)]
pub struct DuplicateChecker {
    config: MatchingConfig,
}

impl DuplicateChecker {
    /// Create a checker with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a checker with custom configuration
    pub fn with_config(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Check a candidate given as loose fields, as received at an API boundary
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidArgument` if `name` is missing,
    /// `MatchError::InputTooLong` if the name or code exceeds the configured
    /// limit, or `MatchError::InvalidThreshold` if the threshold is not in `[0, 1]`.
    pub fn check(
        &self,
        name: Option<&str>,
        code: Option<&str>,
        existing: &[ExistingEntry],
    ) -> Result<Vec<SimilarityResult>, MatchError> {
        let max = self.config.max_input_chars;
        let name = require_name(name)?;
        check_length("name", name, max)?;
        if let Some(code) = code {
            check_length("code", code, max)?;
        }
        let threshold = validate_threshold(self.config.threshold)?;

        let oversized = existing
            .iter()
            .filter(|e| e.name.chars().count() > max)
            .count();

        let results = if oversized == 0 {
            find_duplicates(name, code, existing, threshold)
        } else {
            tracing::warn!(
                "Skipping {} existing entries with names longer than {} characters in name matching",
                oversized,
                max
            );
            let bounded: Vec<ExistingEntry> = existing
                .iter()
                .filter(|e| e.name.chars().count() <= max)
                .cloned()
                .collect();
            // Code collisions are reported whatever the length of the stored name
            merge_matches(
                find_code_collisions(name, code, existing),
                find_similar_by_name(name, &bounded, threshold),
            )
        };

        tracing::debug!(
            "Checked '{}' against {} entries: {} possible duplicates",
            name,
            existing.len(),
            results.len()
        );

        Ok(results)
    }

    /// Check a fully-formed candidate
    ///
    /// # Errors
    ///
    /// See [`DuplicateChecker::check`].
    pub fn check_candidate(
        &self,
        candidate: &CandidateEntry,
        existing: &[ExistingEntry],
    ) -> Result<Vec<SimilarityResult>, MatchError> {
        self.check(Some(&candidate.name), candidate.code.as_deref(), existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bakery_entries() -> Vec<ExistingEntry> {
        vec![
            ExistingEntry::new(1u64, "Wheat Flour").with_code("ING-001"),
            ExistingEntry::new(2u64, "White Sugar").with_code("ING-002"),
        ]
    }

    #[test]
    fn test_find_similar_by_name_threshold_and_order() {
        let existing = vec![
            ExistingEntry::new("a", "Rye Bread"),
            ExistingEntry::new("b", "Rye Breads"),
            ExistingEntry::new("c", "rye bread"),
            ExistingEntry::new("d", "Baguette"),
        ];

        let results = find_similar_by_name("Rye Bread", &existing, 0.7);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
        assert!(results.iter().all(|r| r.similarity >= 0.7 && !r.exact_match));
        assert!(results.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    }

    #[test]
    fn test_find_similar_by_name_ties_keep_input_order() {
        let existing = vec![
            ExistingEntry::new("first", "Bran"),
            ExistingEntry::new("second", "Brat"),
            ExistingEntry::new("third", "Bram"),
        ];
        let results = find_similar_by_name("Brax", &existing, 0.5);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_find_similar_by_name_threshold_extremes() {
        let existing = bakery_entries();
        assert_eq!(find_similar_by_name("Sugar", &existing, 0.0).len(), 2);
        assert!(find_similar_by_name("Wheet Flour", &existing, 1.0).is_empty());
        assert_eq!(find_similar_by_name("wheat flour", &existing, 1.0).len(), 1);
    }

    #[test]
    fn test_find_similar_by_name_empty_existing() {
        assert!(find_similar_by_name("Flour", &[], 0.7).is_empty());
    }

    #[test]
    fn test_find_exact_by_code() {
        let mut existing = bakery_entries();
        existing.push(ExistingEntry::new(3u64, "Salt"));
        existing.push(ExistingEntry::new(4u64, "Sea Salt").with_code(" ing-001 "));

        let found = find_exact_by_code("ING-001", &existing);
        let ids: Vec<&str> = found.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);

        assert!(find_exact_by_code("ING-00", &existing).is_empty());
    }

    #[test]
    fn test_find_duplicates_code_match_first() {
        let existing = bakery_entries();
        let results = find_duplicates("Wheet Flour", Some("ING-001"), &existing, 0.7);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, EntryId::new("1"));
        assert!(results[0].exact_match);
        assert!((results[0].similarity - 10.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_find_duplicates_exact_code_precedes_better_name_match() {
        let existing = vec![
            ExistingEntry::new(1u64, "Brioche").with_code("PRD-100"),
            ExistingEntry::new(2u64, "Baguette").with_code("PRD-200"),
        ];
        let results = find_duplicates("Brioche", Some("prd-200"), &existing, 0.7);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, EntryId::new("2"));
        assert!(results[0].exact_match);
        assert!(results[0].similarity < 0.7);
        assert_eq!(results[1].id, EntryId::new("1"));
        assert!(!results[1].exact_match);
    }

    #[test]
    fn test_find_duplicates_without_code_matches_name_search() {
        let existing = vec![
            ExistingEntry::new(1u64, "Croissant").with_code("PRD-1"),
            ExistingEntry::new(2u64, "Croissants").with_code("PRD-2"),
            ExistingEntry::new(3u64, "Danish"),
        ];
        let by_name = find_similar_by_name("Croisant", &existing, 0.7);
        assert_eq!(find_duplicates("Croisant", None, &existing, 0.7), by_name);
        assert_eq!(find_duplicates("Croisant", Some("  "), &existing, 0.7), by_name);
    }

    #[test]
    fn test_find_duplicates_no_match() {
        let existing = bakery_entries();
        assert!(find_duplicates("Sugar", None, &existing, 0.7).is_empty());
    }

    #[test]
    fn test_checker_rejects_missing_name() {
        let checker = DuplicateChecker::new();
        let err = checker.check(None, Some("ING-001"), &bakery_entries());
        assert!(matches!(err, Err(MatchError::InvalidArgument(_))));
    }

    #[test]
    fn test_checker_rejects_oversized_input() {
        let checker = DuplicateChecker::with_config(MatchingConfig {
            max_input_chars: 8,
            ..MatchingConfig::default()
        });
        let err = checker.check(Some("Wholemeal Flour"), None, &bakery_entries());
        assert!(matches!(err, Err(MatchError::InputTooLong { max: 8, .. })));

        let err = checker.check(Some("Flour"), Some("ING-000000001"), &bakery_entries());
        assert!(matches!(err, Err(MatchError::InputTooLong { .. })));
    }

    #[test]
    fn test_checker_skips_oversized_existing_names() {
        let checker = DuplicateChecker::with_config(MatchingConfig {
            max_input_chars: 12,
            ..MatchingConfig::default()
        });
        let existing = vec![
            ExistingEntry::new(1u64, "Wheat Flour"),
            ExistingEntry::new(2u64, "Wheat Flour, stone ground, organic"),
        ];
        let results = checker.check(Some("Wheat Flour"), None, &existing).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, EntryId::new("1"));
    }

    #[test]
    fn test_checker_keeps_code_match_with_oversized_name() {
        let checker = DuplicateChecker::new();
        let long_name = "a".repeat(MAX_INPUT_CHARS + 1);
        let existing = vec![
            ExistingEntry::new(1u64, long_name.as_str()).with_code("ING-001"),
            ExistingEntry::new(2u64, "Flours"),
        ];

        let results = checker.check(Some("Flour"), Some("ING-001"), &existing).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, EntryId::new("1"));
        assert!(results[0].exact_match);
        assert_eq!(results[0].name, long_name);
        assert_eq!(results[1].id, EntryId::new("2"));
        assert!(!results[1].exact_match);

        assert!(checker.check(Some("Flour"), None, &existing[..1]).unwrap().is_empty());
    }

    #[test]
    fn test_checker_rejects_bad_threshold() {
        for threshold in [-0.1, 1.5, f64::NAN] {
            let checker =
                DuplicateChecker::with_config(MatchingConfig::default().with_threshold(threshold));
            let err = checker.check(Some("Flour"), None, &[]);
            assert!(matches!(err, Err(MatchError::InvalidThreshold(_))));
        }
    }

    #[test]
    fn test_check_candidate() {
        let checker = DuplicateChecker::new();
        let candidate = CandidateEntry::new("Wheet Flour").with_code("ING-001");
        let results = checker.check_candidate(&candidate, &bakery_entries()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].strength(), MatchStrength::Exact);
    }
}

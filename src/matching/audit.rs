use serde::Serialize;

use crate::core::entry::ExistingEntry;
use crate::core::types::MatchStrength;
use crate::matching::scoring::{compute_similarity, normalize};

/// Two existing entries that look like duplicates of each other
#[derive(Debug, Clone, Serialize)]
pub struct DuplicatePair {
    pub first: ExistingEntry,
    pub second: ExistingEntry,
    pub similarity: f64,
    pub code_collision: bool,
}

impl DuplicatePair {
    #[must_use]
    pub fn strength(&self) -> MatchStrength {
        MatchStrength::from_result(self.code_collision, self.similarity)
    }
}

/// Scan an existing catalog for pairs that would have been flagged on creation.
///
/// Every unordered pair is compared once. A pair is reported when both entries
/// carry the same non-blank normalized code, or when their names reach
/// `threshold`. Code collisions come first, then name matches by similarity
/// descending; pairs that tie keep scan order.
#[must_use]
pub fn find_near_duplicates(entries: &[ExistingEntry], threshold: f64) -> Vec<DuplicatePair> {
    let codes: Vec<Option<String>> = entries
        .iter()
        .map(|e| e.code.as_deref().map(normalize).filter(|c| !c.is_empty()))
        .collect();

    let mut pairs = Vec::new();
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let code_collision = codes[i].is_some() && codes[i] == codes[j];
            let similarity = compute_similarity(&entries[i].name, &entries[j].name);
            if code_collision || similarity >= threshold {
                pairs.push(DuplicatePair {
                    first: entries[i].clone(),
                    second: entries[j].clone(),
                    similarity,
                    code_collision,
                });
            }
        }
    }

    pairs.sort_by(|a, b| {
        b.code_collision.cmp(&a.code_collision).then_with(|| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    tracing::debug!(
        "Audited {} entries: {} suspicious pairs",
        entries.len(),
        pairs.len()
    );

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_near_duplicates() {
        let entries = vec![
            ExistingEntry::new(1u64, "Wheat Flour").with_code("ING-001"),
            ExistingEntry::new(2u64, "Wheat flour ").with_code("ING-010"),
            ExistingEntry::new(3u64, "Cocoa Powder").with_code("ing-001"),
            ExistingEntry::new(4u64, "Butter"),
        ];

        let pairs = find_near_duplicates(&entries, 0.7);
        assert_eq!(pairs.len(), 2);

        assert!(pairs[0].code_collision);
        assert_eq!(pairs[0].first.id.as_str(), "1");
        assert_eq!(pairs[0].second.id.as_str(), "3");

        assert!(!pairs[1].code_collision);
        assert_eq!(pairs[1].strength(), MatchStrength::Identical);
    }

    #[test]
    fn test_missing_codes_do_not_collide() {
        let entries = vec![
            ExistingEntry::new(1u64, "Salt"),
            ExistingEntry::new(2u64, "Yeast").with_code(" "),
            ExistingEntry::new(3u64, "Honey").with_code(""),
        ];
        assert!(find_near_duplicates(&entries, 0.9).is_empty());
    }

    #[test]
    fn test_empty_and_single() {
        assert!(find_near_duplicates(&[], 0.7).is_empty());
        assert!(find_near_duplicates(&[ExistingEntry::new(1u64, "Milk")], 0.0).is_empty());
    }
}

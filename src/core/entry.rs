use serde::{Deserialize, Serialize};

/// Opaque identifier of a catalog row.
///
/// Rows exported from the hosted database carry numeric keys while imported
/// spreadsheets use text keys, so both deserialize into the same id. The id is
/// always serialized back as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawEntryId", into = "String")]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for EntryId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntryId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<RawEntryId> for EntryId {
    fn from(raw: RawEntryId) -> Self {
        match raw {
            RawEntryId::Text(s) => Self(s),
            RawEntryId::Unsigned(n) => Self(n.to_string()),
            RawEntryId::Signed(n) => Self(n.to_string()),
        }
    }
}

/// The item a user is about to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl CandidateEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// A catalog row retrieved by the caller from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingEntry {
    pub id: EntryId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ExistingEntry {
    pub fn new(id: impl Into<EntryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_accepts_numbers_and_strings() {
        let numeric: ExistingEntry =
            serde_json::from_str(r#"{"id": 42, "name": "Butter"}"#).unwrap();
        assert_eq!(numeric.id, EntryId::new("42"));
        assert!(numeric.code.is_none());

        let text: ExistingEntry =
            serde_json::from_str(r#"{"id": "ing-7", "name": "Yeast", "code": "ING-007"}"#)
                .unwrap();
        assert_eq!(text.id.as_str(), "ing-7");
        assert_eq!(text.code.as_deref(), Some("ING-007"));
    }

    #[test]
    fn test_entry_id_serializes_as_string() {
        let entry = ExistingEntry::new(1u64, "Wheat Flour");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"id":"1","name":"Wheat Flour"}"#);
    }

    #[test]
    fn test_candidate_builder() {
        let candidate = CandidateEntry::new("Rye Flour").with_code("ING-010");
        assert_eq!(candidate.name, "Rye Flour");
        assert_eq!(candidate.code.as_deref(), Some("ING-010"));
    }
}

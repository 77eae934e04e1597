use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::entry::{EntryId, ExistingEntry};
use crate::core::types::EntryKind;
use crate::matching::engine::find_exact_by_code;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate {kind} id '{id}' in catalog")]
    DuplicateId { kind: EntryKind, id: EntryId },
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub ingredients: Vec<ExistingEntry>,
    #[serde(default)]
    pub products: Vec<ExistingEntry>,
    #[serde(default)]
    pub recipes: Vec<ExistingEntry>,
}

/// Existing ingredient, product and recipe entries with an id index
#[derive(Debug, Default)]
pub struct EntryCatalog {
    ingredients: Vec<ExistingEntry>,
    products: Vec<ExistingEntry>,
    recipes: Vec<ExistingEntry>,

    /// Index: (kind, id) -> position in that kind's list
    id_to_index: HashMap<(EntryKind, EntryId), usize>,
}

impl EntryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded sample bakery catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time via build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/bakery.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        let mut catalog = Self::new();
        for (kind, entries) in [
            (EntryKind::Ingredient, data.ingredients),
            (EntryKind::Product, data.products),
            (EntryKind::Recipe, data.recipes),
        ] {
            for entry in entries {
                catalog.add_entry(kind, entry)?;
            }
        }

        tracing::debug!("Loaded catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    /// Add an entry to the catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if an entry of the same kind
    /// already uses this id.
    pub fn add_entry(&mut self, kind: EntryKind, entry: ExistingEntry) -> Result<(), CatalogError> {
        let key = (kind, entry.id.clone());
        if self.id_to_index.contains_key(&key) {
            return Err(CatalogError::DuplicateId { kind, id: key.1 });
        }

        let list = self.list_mut(kind);
        let index = list.len();
        list.push(entry);
        self.id_to_index.insert(key, index);
        Ok(())
    }

    /// All entries of one kind, in catalog order
    pub fn entries(&self, kind: EntryKind) -> &[ExistingEntry] {
        match kind {
            EntryKind::Ingredient => &self.ingredients,
            EntryKind::Product => &self.products,
            EntryKind::Recipe => &self.recipes,
        }
    }

    fn list_mut(&mut self, kind: EntryKind) -> &mut Vec<ExistingEntry> {
        match kind {
            EntryKind::Ingredient => &mut self.ingredients,
            EntryKind::Product => &mut self.products,
            EntryKind::Recipe => &mut self.recipes,
        }
    }

    /// Get an entry by kind and ID
    pub fn get(&self, kind: EntryKind, id: &EntryId) -> Option<&ExistingEntry> {
        self.id_to_index
            .get(&(kind, id.clone()))
            .map(|&idx| &self.entries(kind)[idx])
    }

    /// Entries of one kind whose code matches exactly (case and whitespace insensitive)
    pub fn find_by_code(&self, kind: EntryKind, code: &str) -> Vec<&ExistingEntry> {
        find_exact_by_code(code, self.entries(kind))
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            ingredients: self.ingredients.clone(),
            products: self.products.clone(),
            recipes: self.recipes.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of entries of one kind
    pub fn count(&self, kind: EntryKind) -> usize {
        self.entries(kind).len()
    }

    /// Number of entries in catalog
    pub fn len(&self) -> usize {
        self.ingredients.len() + self.products.len() + self.recipes.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = EntryCatalog::load_embedded().unwrap();
        assert!(!catalog.is_empty());
        for kind in EntryKind::ALL {
            assert!(catalog.count(kind) > 0, "no {kind} entries");
        }
    }

    #[test]
    fn test_catalog_get_by_id() {
        let catalog = EntryCatalog::load_embedded().unwrap();

        let flour = catalog.get(EntryKind::Ingredient, &EntryId::new("1"));
        assert!(flour.is_some());
        let flour = flour.unwrap();
        assert_eq!(flour.name, "Wheat Flour");
        assert_eq!(flour.code.as_deref(), Some("ING-001"));

        // Ids are scoped per kind
        assert!(catalog.get(EntryKind::Recipe, &EntryId::new("999")).is_none());
    }

    #[test]
    fn test_find_by_code() {
        let catalog = EntryCatalog::load_embedded().unwrap();
        let found = catalog.find_by_code(EntryKind::Ingredient, " ing-002 ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "White Sugar");
        assert!(catalog.find_by_code(EntryKind::Product, "ING-002").is_empty());
    }

    #[test]
    fn test_catalog_to_json_round_trip_keeps_entries() {
        let catalog = EntryCatalog::load_embedded().unwrap();
        let json = catalog.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"ingredients\""));
        assert!(json.contains("Wheat Flour"));

        let reloaded = EntryCatalog::from_json(&json).unwrap();
        assert_eq!(reloaded.len(), catalog.len());
    }

    #[test]
    fn test_from_json_missing_kinds_default_empty() {
        let catalog = EntryCatalog::from_json(
            r#"{"version": "1.0.0", "products": [{"id": 7, "name": "Baguette"}]}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.count(EntryKind::Ingredient), 0);
        assert_eq!(catalog.entries(EntryKind::Product)[0].id.as_str(), "7");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = EntryCatalog::from_json(
            r#"{"version": "1.0.0", "recipes": [
                {"id": 1, "name": "Sourdough"},
                {"id": "1", "name": "Rye Sourdough"}
            ]}"#,
        );
        assert!(matches!(result, Err(CatalogError::DuplicateId { .. })));
    }

    #[test]
    fn test_add_entry() {
        let mut catalog = EntryCatalog::new();
        assert_eq!(catalog.len(), 0);

        catalog
            .add_entry(
                EntryKind::Ingredient,
                ExistingEntry::new("x1", "Butter").with_code("ING-100"),
            )
            .unwrap();
        catalog
            .add_entry(EntryKind::Product, ExistingEntry::new("x1", "Butter Croissant"))
            .unwrap();
        assert_eq!(catalog.len(), 2);

        let retrieved = catalog.get(EntryKind::Ingredient, &EntryId::new("x1"));
        assert_eq!(retrieved.unwrap().name, "Butter");
    }
}

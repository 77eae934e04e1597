//! Catalog of existing entries to check candidates against.
//!
//! The catalog groups [`ExistingEntry`] rows by [`EntryKind`]: ingredients,
//! products and recipes are separate namespaces, so ids and codes only collide
//! within one kind. A small sample bakery catalog is compiled into the binary;
//! real catalogs are exported from the operations database as JSON.
//!
//! ## Format
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "created_at": "2026-01-01T00:00:00Z",
//!   "ingredients": [{ "id": 1, "name": "Wheat Flour", "code": "ING-001" }],
//!   "products": [],
//!   "recipes": []
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use catalog_dedup::EntryCatalog;
//! use catalog_dedup::core::types::EntryKind;
//! use std::path::Path;
//!
//! let catalog = EntryCatalog::load_from_file(Path::new("catalog.json")).unwrap();
//! for entry in catalog.entries(EntryKind::Ingredient) {
//!     println!("{} {}", entry.id, entry.name);
//! }
//! ```
//!
//! [`ExistingEntry`]: crate::core::entry::ExistingEntry
//! [`EntryKind`]: crate::core::types::EntryKind

pub mod store;

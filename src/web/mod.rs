//! HTTP API for duplicate checks.
//!
//! The operations app calls this service before inserting a new ingredient,
//! product or recipe, and shows the returned matches in its warning dialog.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080 with the embedded sample catalog
//! catalog-dedup serve
//!
//! # Serve an exported catalog on all interfaces
//! catalog-dedup serve --catalog catalog.json --address 0.0.0.0 --port 3000
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /api/catalog` - List catalog entries by kind
//! - `POST /api/duplicates` - Check a candidate name/code (JSON body)
//! - `POST /api/similarity` - Similarity and edit distance of two names

pub mod server;

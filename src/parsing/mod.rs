//! Parsers for importing existing entries from spreadsheet exports.
//!
//! - **TSV/CSV files**: columns `id`, `name` and an optional `code`
//!
//! ## Example
//!
//! ```rust
//! use catalog_dedup::parsing::tsv::parse_tsv_text;
//!
//! let entries = parse_tsv_text("id,name,code\n1,Wheat Flour,ING-001\n", ',').unwrap();
//! assert_eq!(entries[0].name, "Wheat Flour");
//! ```

use thiserror::Error;

pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Too many entries: {0} exceeds maximum allowed (100000)")]
    TooManyEntries(usize),
}

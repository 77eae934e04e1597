use std::path::Path;

use crate::core::entry::ExistingEntry;
use crate::parsing::ParseError;
use crate::utils::validation::check_entry_limit;

/// Parse a TSV/CSV file with columns: id, name, [code]
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_tsv_file(path: &Path, delimiter: char) -> Result<Vec<ExistingEntry>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_tsv_text(&content, delimiter)
}

/// Parse TSV/CSV text with columns: id, name, [code]
///
/// An empty code column means the entry has no code. Comma-separated input
/// honours double-quoted fields, so `"Flour, whole wheat"` stays one name;
/// tab-separated input is read literally.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if lines have fewer than 2 fields, an
/// empty id or the delimiter is not ASCII, `ParseError::Csv` on malformed
/// records, or `ParseError::TooManyEntries` if the limit is exceeded.
pub fn parse_tsv_text(text: &str, delimiter: char) -> Result<Vec<ExistingEntry>, ParseError> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| ParseError::InvalidFormat(format!("Unsupported delimiter {delimiter:?}")))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quoting(delimiter != b'\t')
        .comment(Some(b'#'))
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut entries = Vec::new();
    let mut first_data_line = true;

    for record in reader.records() {
        let record = record?;
        let first = record.get(0).unwrap_or_default();

        // Whitespace-only lines and indented comments
        if record.iter().all(str::is_empty) || first.starts_with('#') {
            continue;
        }

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = first.to_lowercase();
            if first == "id" || first == "name" {
                continue;
            }
        }

        let line_num = record.position().map_or(0, csv::Position::line);

        if record.len() < 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 2 fields"
            )));
        }

        if first.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has an empty id"
            )));
        }

        let mut entry = ExistingEntry::new(first, &record[1]);

        // Optional code in third column
        if let Some(code) = record.get(2).filter(|c| !c.is_empty()) {
            entry.code = Some(code.to_string());
        }

        if check_entry_limit(entries.len()).is_some() {
            return Err(ParseError::TooManyEntries(entries.len()));
        }

        entries.push(entry);
    }

    Ok(entries)
}

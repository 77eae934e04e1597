//! Centralized validation and helper functions.

/// Maximum number of entries accepted from a single import (DOS protection)
pub const MAX_ENTRIES: usize = 100_000;

/// Longest name or code accepted, in characters.
///
/// Similarity uses a full edit-distance matrix, so this bounds each
/// comparison to roughly a million cells.
pub const MAX_INPUT_CHARS: usize = 1_000;

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Candidate name is required")]
    MissingName,
    #[error("{field} is {actual} characters long, maximum is {max}")]
    TooLong {
        field: String,
        actual: usize,
        max: usize,
    },
    #[error("Similarity threshold {0} must be between 0.0 and 1.0")]
    ThresholdOutOfRange(f64),
}

/// Require a candidate name to be present.
///
/// A blank name is still a name (it normalizes to the empty string and
/// compares as such); only an absent one is rejected.
///
/// # Errors
///
/// Returns `ValidationError::MissingName` if `name` is `None`.
pub fn require_name(name: Option<&str>) -> Result<&str, ValidationError> {
    name.ok_or(ValidationError::MissingName)
}

/// Check that `value` is at most `max` characters long.
///
/// # Errors
///
/// Returns `ValidationError::TooLong` naming `field` if the limit is exceeded.
pub fn check_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            actual,
            max,
        });
    }
    Ok(())
}

/// Validate that a similarity threshold lies in `[0.0, 1.0]`.
///
/// # Examples
///
/// ```
/// use catalog_dedup::utils::validation::validate_threshold;
///
/// assert!(validate_threshold(0.7).is_ok());
/// assert!(validate_threshold(1.2).is_err());
/// assert!(validate_threshold(f64::NAN).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::ThresholdOutOfRange` for values outside the
/// interval, including NaN.
pub fn validate_threshold(threshold: f64) -> Result<f64, ValidationError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(ValidationError::ThresholdOutOfRange(threshold))
    }
}

/// Check if adding another entry would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new entry.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_entry_limit(count: usize) -> Option<String> {
    if count >= MAX_ENTRIES {
        Some(format!(
            "Too many entries: adding another would exceed maximum of {MAX_ENTRIES}"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_name() {
        assert_eq!(require_name(Some("Flour")).unwrap(), "Flour");
        assert_eq!(require_name(Some("")).unwrap(), "");
        assert!(matches!(require_name(None), Err(ValidationError::MissingName)));
    }

    #[test]
    fn test_check_length_counts_chars() {
        assert!(check_length("name", "crème", 5).is_ok());
        let err = check_length("name", "crèmes", 5).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooLong { actual: 6, max: 5, .. }
        ));
        assert_eq!(err.to_string(), "name is 6 characters long, maximum is 5");
    }

    #[test]
    fn test_validate_threshold_bounds() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(1.0).is_ok());
        assert!(validate_threshold(-0.01).is_err());
        assert!(validate_threshold(f64::INFINITY).is_err());
    }

    #[test]
    fn test_check_entry_limit() {
        assert!(check_entry_limit(0).is_none());
        assert!(check_entry_limit(MAX_ENTRIES - 1).is_none());
        assert!(check_entry_limit(MAX_ENTRIES).is_some());
    }
}

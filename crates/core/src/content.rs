//! Content item validation and status constants.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_ARCHIVED: &str = "archived";

/// All valid content statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED, STATUS_ARCHIVED];

/// Status assigned to newly created content when none is given.
pub const DEFAULT_STATUS: &str = STATUS_DRAFT;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_BODY_LEN: usize = 1_000_000;
pub const MAX_CHANGE_DESCRIPTION_LEN: usize = 500;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a content title (non-blank, at most [`MAX_TITLE_LEN`] chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a content body. Empty bodies are allowed.
pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.len() > MAX_BODY_LEN {
        return Err(CoreError::Validation(format!(
            "Body must be at most {MAX_BODY_LEN} bytes"
        )));
    }
    Ok(())
}

/// Validate a status against the known set.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if !VALID_STATUSES.contains(&status) {
        return Err(CoreError::Validation(format!(
            "Invalid status '{}'. Valid statuses: {}",
            status,
            VALID_STATUSES.join(", ")
        )));
    }
    Ok(())
}

/// Validate a free-text change description.
pub fn validate_change_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_CHANGE_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Change description must be at most {MAX_CHANGE_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_valid() {
        assert!(validate_title("Launch notes").is_ok());
    }

    #[test]
    fn title_blank_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("  \t").is_err());
    }

    #[test]
    fn title_length_counts_chars_not_bytes() {
        let accented = "é".repeat(MAX_TITLE_LEN);
        assert!(validate_title(&accented).is_ok());
        assert!(validate_title(&"a".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn empty_body_allowed() {
        assert!(validate_body("").is_ok());
    }

    #[test]
    fn oversized_body_rejected() {
        assert!(validate_body(&"x".repeat(MAX_BODY_LEN + 1)).is_err());
    }

    #[test]
    fn status_valid_and_invalid() {
        assert!(validate_status("published").is_ok());
        assert!(validate_status("scheduled").is_err());
    }

    #[test]
    fn change_description_limit() {
        assert!(validate_change_description("Fixed typo").is_ok());
        let long = "d".repeat(MAX_CHANGE_DESCRIPTION_LEN + 1);
        assert!(validate_change_description(&long).is_err());
    }
}

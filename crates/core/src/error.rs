use crate::types::{DbId, VersionNumber};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A version number that does not exist for the content item.
    ///
    /// `param` names the request parameter (`v1` / `v2`) when the lookup came
    /// from a comparison, so callers can tell which side was missing.
    #[error("{}", version_not_found_message(*content_id, *version_number, *param))]
    VersionNotFound {
        content_id: DbId,
        version_number: VersionNumber,
        param: Option<&'static str>,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Semantically invalid request that is not a not-found case.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A concurrent writer won the version-number race. Safe to retry.
    #[error("Retryable conflict: {0}")]
    ConflictRetryable(String),

    /// The store could not be reached or could not commit.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the failed operation may succeed if run again unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::ConflictRetryable(_))
    }
}

/// Human-readable message for [`CoreError::VersionNotFound`].
pub fn version_not_found_message(
    content_id: DbId,
    version_number: VersionNumber,
    param: Option<&str>,
) -> String {
    match param {
        Some(param) => {
            format!("Version {version_number} ({param}) not found for content {content_id}")
        }
        None => format!("Version {version_number} not found for content {content_id}"),
    }
}

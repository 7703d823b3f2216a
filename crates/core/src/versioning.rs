//! Version numbering, rollback rules, and the retry policy for allocation races.
//!
//! "Current" is never stored: it is always the version with the highest
//! number for a content item, so there is no pointer that can drift from the
//! version history.

use std::time::Duration;

use crate::error::CoreError;
use crate::types::VersionNumber;

// ---------------------------------------------------------------------------
// Numbering
// ---------------------------------------------------------------------------

/// Number assigned to the snapshot written when content is created.
pub const INITIAL_VERSION_NUMBER: VersionNumber = 1;

/// Next number after the highest existing one, or 1 when there is none.
///
/// Returns `None` when the highest number is already `VersionNumber::MAX`.
pub fn next_version_number(current_max: Option<VersionNumber>) -> Option<VersionNumber> {
    match current_max {
        None => Some(INITIAL_VERSION_NUMBER),
        Some(max) => max.checked_add(1),
    }
}

// ---------------------------------------------------------------------------
// Change descriptions
// ---------------------------------------------------------------------------

pub const INITIAL_VERSION_DESCRIPTION: &str = "Initial version";
pub const DEFAULT_EDIT_DESCRIPTION: &str = "Updated content";

/// Provenance note recorded on the version created by a rollback.
pub fn rollback_description(target: VersionNumber) -> String {
    format!("Rolled back to version {target}")
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Reject a rollback whose target is already the current version.
pub fn validate_rollback_target(
    current: VersionNumber,
    target: VersionNumber,
) -> Result<(), CoreError> {
    if current == target {
        return Err(CoreError::InvalidOperation(
            "cannot rollback to current version".into(),
        ));
    }
    Ok(())
}

/// Whether an edit changes the snapshotted fields and so needs a new version.
///
/// `None` means "leave the field as is".
pub fn has_editable_changes(
    current_title: &str,
    current_body: &str,
    new_title: Option<&str>,
    new_body: Option<&str>,
) -> bool {
    new_title.is_some_and(|t| t != current_title) || new_body.is_some_and(|b| b != current_body)
}

// ---------------------------------------------------------------------------
// Retry policy
// ---------------------------------------------------------------------------

/// Total attempts (first try included) for a mutating transaction.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Upper bound accepted from configuration.
pub const MAX_ATTEMPTS_CEILING: u32 = 10;

/// Base delay between attempts; attempt `n` waits `n * base`.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(25);

/// Bounded retry for transactions that lose the version-number race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Build a policy, clamping `max_attempts` to `1..=MAX_ATTEMPTS_CEILING`.
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.clamp(1, MAX_ATTEMPTS_CEILING),
            backoff,
        }
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether `err`, raised on attempt number `attempt` (1-based), should
    /// trigger another attempt.
    pub fn should_retry(&self, err: &CoreError, attempt: u32) -> bool {
        err.is_retryable() && attempt < self.max_attempts
    }

    /// Delay to wait after failed attempt number `attempt`.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_BACKOFF)
    }
}

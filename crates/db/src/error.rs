//! Mapping from sqlx failures to the domain error taxonomy.

use folio_core::error::CoreError;

/// Unique constraint that serializes version-number allocation.
pub const VERSION_NUMBER_CONSTRAINT: &str = "uq_content_versions_content_id_version_number";

/// PostgreSQL `unique_violation`.
const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `serialization_failure`.
const SQLSTATE_SERIALIZATION_FAILURE: &str = "40001";
/// PostgreSQL `deadlock_detected`.
const SQLSTATE_DEADLOCK_DETECTED: &str = "40P01";
/// PostgreSQL `query_canceled` (raised by `statement_timeout`).
const SQLSTATE_QUERY_CANCELED: &str = "57014";

/// Classify a sqlx error into a [`CoreError`].
///
/// - A unique violation on [`VERSION_NUMBER_CONSTRAINT`], serialization
///   failures, and deadlocks become `ConflictRetryable`.
/// - Any other unique violation becomes a plain `Conflict`.
/// - Connection, pool, TLS, and I/O failures plus timeouts and admin
///   shutdowns (SQLSTATE classes `08`, `57P`, and `57014`) become
///   `StoreUnavailable`.
/// - Everything else becomes `Internal`.
pub fn classify_store_error(err: sqlx::Error) -> CoreError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
            match code.as_str() {
                SQLSTATE_UNIQUE_VIOLATION => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint == VERSION_NUMBER_CONSTRAINT {
                        CoreError::ConflictRetryable(
                            "A concurrent write allocated the same version number".into(),
                        )
                    } else {
                        CoreError::Conflict(format!(
                            "Duplicate value violates unique constraint: {constraint}"
                        ))
                    }
                }
                SQLSTATE_SERIALIZATION_FAILURE | SQLSTATE_DEADLOCK_DETECTED => {
                    CoreError::ConflictRetryable(db_err.message().to_string())
                }
                SQLSTATE_QUERY_CANCELED => CoreError::StoreUnavailable(db_err.message().to_string()),
                c if c.starts_with("08") || c.starts_with("57P") => {
                    CoreError::StoreUnavailable(db_err.message().to_string())
                }
                _ => CoreError::Internal(err.to_string()),
            }
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => CoreError::StoreUnavailable(err.to_string()),
        _ => CoreError::Internal(err.to_string()),
    }
}

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use folio_core::error::CoreError;
use folio_db::error::classify_store_error;
use serde_json::json;

/// Seconds a client should wait before retrying a `CONFLICT_RETRYABLE` response.
pub const RETRY_AFTER_SECS: u64 = 1;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and raw [`sqlx::Error`]s from
/// handler-level queries.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `folio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let core = match self {
            AppError::Core(core) => core,
            // Database errors go through the same taxonomy as the engine's.
            AppError::Database(err) => classify_store_error(err),
        };

        match core {
            CoreError::NotFound { entity, id } => error_response(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            err @ CoreError::VersionNotFound { .. } => {
                error_response(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            CoreError::Validation(msg) => {
                error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            CoreError::InvalidOperation(msg) => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_OPERATION", msg)
            }
            CoreError::Conflict(msg) => error_response(StatusCode::CONFLICT, "CONFLICT", msg),
            CoreError::ConflictRetryable(msg) => {
                let mut response =
                    error_response(StatusCode::CONFLICT, "CONFLICT_RETRYABLE", msg);
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, RETRY_AFTER_SECS.into());
                response
            }
            CoreError::StoreUnavailable(msg) => {
                tracing::error!(error = %msg, "Store unavailable");
                error_response(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "The content store is temporarily unavailable".to_string(),
                )
            }
            CoreError::Unauthorized(msg) => {
                error_response(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
            }
            CoreError::Forbidden(msg) => error_response(StatusCode::FORBIDDEN, "FORBIDDEN", msg),
            CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal core error");
                internal_error_response()
            }
        }
    }
}

fn error_response(status: StatusCode, code: &'static str, message: String) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}

fn internal_error_response() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

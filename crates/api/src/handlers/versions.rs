//! Handlers for version history, comparison, and rollback.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use folio_core::diff::{compute_line_diff, diff_stats};
use folio_core::pagination::PageRequest;
use folio_core::types::DbId;
use folio_db::models::content_version::{CompareRequest, CompareResponse, RollbackRequest};

use crate::authorization::ensure_can_modify;
use crate::error::AppResult;
use crate::handlers::ensure_content_exists;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /content/{id}/versions
///
/// Paged version history, newest first.
pub async fn list_versions(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .versioning
        .list_versions(id, PageRequest::from(params))
        .await?;
    Ok(Json(page))
}

/// GET /content/{id}/versions/current
pub async fn current_version(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let version = state.versioning.current_version(id).await?;
    Ok(Json(DataResponse { data: version }))
}

/// GET /content/{id}/versions/{version_id}
///
/// Looks a version up by row id, not by version number.
pub async fn get_version(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((id, version_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let version = state.versioning.get_version(id, version_id).await?;
    Ok(Json(DataResponse { data: version }))
}

/// GET /content/{id}/compare?v1=&v2=
///
/// Both versions in the requested order plus a line diff of the bodies
/// from `v1` to `v2`.
pub async fn compare_versions(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<CompareRequest>,
) -> AppResult<impl IntoResponse> {
    let (v1, v2) = state.versioning.compare(id, params.v1, params.v2).await?;

    let body_diff = compute_line_diff(&v1.body, &v2.body);
    let stats = diff_stats(&body_diff);

    Ok(Json(DataResponse {
        data: CompareResponse {
            content_id: id,
            title_changed: v1.title != v2.title,
            v1,
            v2,
            body_diff,
            stats,
        },
    }))
}

/// POST /content/{id}/rollback
///
/// Restore content to a prior version by appending a copy of it as the new
/// current version.
pub async fn rollback(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RollbackRequest>,
) -> AppResult<impl IntoResponse> {
    let content = ensure_content_exists(&state.pool, id).await?;
    ensure_can_modify(state.authorizer.as_ref(), &auth, &content).await?;

    let restored = state
        .versioning
        .rollback(id, input.version_number, auth.user_id)
        .await?;

    tracing::info!(
        user_id = auth.user_id,
        content_id = id,
        rolled_back_to = input.version_number,
        version_number = restored.current_version.version_number,
        "Content rolled back"
    );

    Ok(Json(DataResponse { data: restored }))
}

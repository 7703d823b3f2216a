//! Handlers for content items.
//!
//! Creation and edits go through the versioning engine so the live row and
//! its history stay in step. Edits and deletes require the actor to pass the
//! configured [`ContentAuthorizer`](crate::authorization::ContentAuthorizer).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use folio_core::content::{
    validate_body, validate_change_description, validate_status, validate_title,
};
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::content::{ContentWithVersion, CreateContentItem, UpdateContentItem};
use folio_db::repositories::ContentRepo;
use folio_db::versioning::ENTITY_CONTENT;

use crate::authorization::ensure_can_modify;
use crate::error::{AppError, AppResult};
use crate::handlers::ensure_content_exists;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

fn validate_create(input: &CreateContentItem) -> Result<(), CoreError> {
    validate_title(&input.title)?;
    validate_body(&input.body)?;
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref description) = input.change_description {
        validate_change_description(description)?;
    }
    Ok(())
}

fn validate_update(input: &UpdateContentItem) -> Result<(), CoreError> {
    if let Some(ref title) = input.title {
        validate_title(title)?;
    }
    if let Some(ref body) = input.body {
        validate_body(body)?;
    }
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref description) = input.change_description {
        validate_change_description(description)?;
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Content CRUD
-------------------------------------------------------------------------- */

/// GET /content
///
/// List content items, most recently updated first.
pub async fn list_content(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let items = ContentRepo::list(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /content
///
/// Create a content item and its version 1. The caller becomes the author.
pub async fn create_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateContentItem>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;

    let created = state.versioning.create(&input, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        content_id = created.content.id,
        "Content created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /content/{id}
///
/// Live content state plus its current version.
pub async fn get_content(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let content = ensure_content_exists(&state.pool, id).await?;
    let current_version = state.versioning.current_version(id).await?;

    Ok(Json(DataResponse {
        data: ContentWithVersion {
            content,
            current_version,
        },
    }))
}

/// PUT /content/{id}
///
/// Edit title, body, or status. Title/body changes append a version;
/// status-only changes do not.
pub async fn update_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContentItem>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input)?;

    let content = ensure_content_exists(&state.pool, id).await?;
    ensure_can_modify(state.authorizer.as_ref(), &auth, &content).await?;

    let updated = state.versioning.edit(id, &input, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        content_id = id,
        version_number = updated.current_version.version_number,
        "Content updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /content/{id}
///
/// Delete a content item. Its version history is removed with it.
pub async fn delete_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let content = ensure_content_exists(&state.pool, id).await?;
    ensure_can_modify(state.authorizer.as_ref(), &auth, &content).await?;

    if !ContentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: ENTITY_CONTENT,
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, content_id = id, "Content deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub mod content;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /content                                   list, create
/// /content/{id}                              get, update, delete
/// /content/{id}/versions                     paged history
/// /content/{id}/versions/current             current version
/// /content/{id}/versions/{version_id}        version by row id
/// /content/{id}/compare                      compare two versions (GET)
/// /content/{id}/rollback                     rollback (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/content", content::router())
}

//! Route definitions for content items and their version history.
//!
//! Registered under `/content`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{content, versions};
use crate::state::AppState;

/// Content routes, registered as `/content`.
///
/// ```text
/// GET    /                               list_content (?limit&offset)
/// POST   /                               create_content
/// GET    /{id}                           get_content
/// PUT    /{id}                           update_content
/// DELETE /{id}                           delete_content
/// GET    /{id}/versions                  list_versions (?page&page_size)
/// GET    /{id}/versions/current          current_version
/// GET    /{id}/versions/{version_id}     get_version
/// GET    /{id}/compare                   compare_versions (?v1&v2)
/// POST   /{id}/rollback                  rollback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_content).post(content::create_content))
        .route(
            "/{id}",
            get(content::get_content)
                .put(content::update_content)
                .delete(content::delete_content),
        )
        .route("/{id}/versions", get(versions::list_versions))
        .route("/{id}/versions/current", get(versions::current_version))
        .route("/{id}/versions/{version_id}", get(versions::get_version))
        .route("/{id}/compare", get(versions::compare_versions))
        .route("/{id}/rollback", post(versions::rollback))
}

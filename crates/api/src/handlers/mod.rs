pub mod content;
pub mod versions;

use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::content::ContentItem;
use folio_db::repositories::ContentRepo;
use folio_db::versioning::ENTITY_CONTENT;

use crate::error::{AppError, AppResult};

/// Fetch a content item by id or return 404.
pub(crate) async fn ensure_content_exists(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<ContentItem> {
    ContentRepo::find_by_id(pool, id).await?.ok_or(AppError::Core(CoreError::NotFound {
        entity: ENTITY_CONTENT,
        id,
    }))
}

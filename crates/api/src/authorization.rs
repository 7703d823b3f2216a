//! Content modification policy.
//!
//! The versioning engine executes edits and rollbacks mechanically; handlers
//! ask a [`ContentAuthorizer`] first and refuse with `FORBIDDEN` when it says
//! no.

use async_trait::async_trait;
use folio_core::error::CoreError;
use folio_core::roles::is_content_manager;
use folio_db::models::content::ContentItem;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Decides whether an actor may modify a content item.
#[async_trait]
pub trait ContentAuthorizer: Send + Sync {
    async fn can_modify(&self, actor: &AuthUser, content: &ContentItem) -> AppResult<bool>;
}

/// Default policy: admins and editors may modify anything, everyone else
/// only content they authored.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipAuthorizer;

#[async_trait]
impl ContentAuthorizer for OwnershipAuthorizer {
    async fn can_modify(&self, actor: &AuthUser, content: &ContentItem) -> AppResult<bool> {
        Ok(is_content_manager(&actor.role) || content.author_id == actor.user_id)
    }
}

/// Fail with `FORBIDDEN` unless `actor` may modify `content`.
pub async fn ensure_can_modify(
    authorizer: &dyn ContentAuthorizer,
    actor: &AuthUser,
    content: &ContentItem,
) -> AppResult<()> {
    if authorizer.can_modify(actor, content).await? {
        return Ok(());
    }
    tracing::warn!(
        user_id = actor.user_id,
        role = %actor.role,
        content_id = content.id,
        "Modification denied"
    );
    Err(AppError::Core(CoreError::Forbidden(
        "You do not have permission to modify this content".into(),
    )))
}

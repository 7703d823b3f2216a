//! Transactional content versioning engine.
//!
//! Every mutation runs in one PostgreSQL transaction: the version number is
//! allocated, the version row appended, and the live content row updated
//! against the same `Transaction` handle, so a failure at any step leaves
//! neither write visible. Concurrent writers are not locked out; the unique
//! constraint on `(content_id, version_number)` rejects the loser of an
//! allocation race, which is retried under the configured [`RetryPolicy`].
//!
//! Authorization is the caller's job. The engine assumes the actor has
//! already been cleared to modify the content.

use std::future::Future;

use folio_core::error::CoreError;
use folio_core::pagination::{Page, PageRequest};
use folio_core::types::{DbId, VersionNumber};
use folio_core::versioning::{
    has_editable_changes, rollback_description, validate_rollback_target, RetryPolicy,
    DEFAULT_EDIT_DESCRIPTION, INITIAL_VERSION_DESCRIPTION, INITIAL_VERSION_NUMBER,
};
use sqlx::{PgExecutor, PgPool};

use crate::error::classify_store_error;
use crate::models::content::{ContentItem, ContentWithVersion, CreateContentItem, UpdateContentItem};
use crate::models::content_version::{ContentVersion, NewContentVersion};
use crate::repositories::{ContentRepo, ContentVersionRepo};

/// Entity name used in `NotFound` errors for content items.
pub const ENTITY_CONTENT: &str = "Content";

/// Entity name used in `NotFound` errors for versions looked up by row id.
pub const ENTITY_VERSION: &str = "ContentVersion";

/// Content versioning engine: history, comparison, edits, and rollback.
///
/// Cheap to clone; holds a pool handle and a copy of the retry policy.
#[derive(Debug, Clone)]
pub struct ContentVersioning {
    pool: PgPool,
    retry: RetryPolicy,
}

impl ContentVersioning {
    pub fn new(pool: PgPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    // ── Creation ─────────────────────────────────────────────────────

    /// Create a content item together with its version 1.
    pub async fn create(
        &self,
        input: &CreateContentItem,
        author_id: DbId,
    ) -> Result<ContentWithVersion, CoreError> {
        let mut tx = self.pool.begin().await.map_err(classify_store_error)?;

        let content = ContentRepo::create(&mut tx, input, author_id)
            .await
            .map_err(classify_store_error)?;

        let description = input
            .change_description
            .as_deref()
            .unwrap_or(INITIAL_VERSION_DESCRIPTION);
        let version = ContentVersionRepo::create(
            &mut tx,
            &NewContentVersion {
                content_id: content.id,
                version_number: INITIAL_VERSION_NUMBER,
                title: &content.title,
                body: &content.body,
                change_description: description,
                created_by: author_id,
            },
        )
        .await
        .map_err(classify_store_error)?;

        tx.commit().await.map_err(classify_store_error)?;

        Ok(ContentWithVersion {
            content,
            current_version: version,
        })
    }

    // ── History ──────────────────────────────────────────────────────

    /// List versions newest first. Out-of-range pages come back empty with
    /// accurate totals.
    pub async fn list_versions(
        &self,
        content_id: DbId,
        page: PageRequest,
    ) -> Result<Page<ContentVersion>, CoreError> {
        ensure_content(&self.pool, content_id).await?;

        let total = ContentVersionRepo::count_by_content(&self.pool, content_id)
            .await
            .map_err(classify_store_error)?;
        let items =
            ContentVersionRepo::list_by_content(&self.pool, content_id, page.limit(), page.offset())
                .await
                .map_err(classify_store_error)?;

        Ok(Page::new(items, total, page))
    }

    /// Fetch a version by row id, rejecting ids that belong to another
    /// content item.
    pub async fn get_version(
        &self,
        content_id: DbId,
        version_id: DbId,
    ) -> Result<ContentVersion, CoreError> {
        ensure_content(&self.pool, content_id).await?;

        ContentVersionRepo::find_by_id(&self.pool, version_id)
            .await
            .map_err(classify_store_error)?
            .filter(|v| v.content_id == content_id)
            .ok_or(CoreError::NotFound {
                entity: ENTITY_VERSION,
                id: version_id,
            })
    }

    /// Fetch the current (highest-numbered) version.
    pub async fn current_version(&self, content_id: DbId) -> Result<ContentVersion, CoreError> {
        ensure_content(&self.pool, content_id).await?;
        latest_version(&self.pool, content_id).await
    }

    // ── Comparison ───────────────────────────────────────────────────

    /// Fetch two versions by number, returned in the order requested.
    pub async fn compare(
        &self,
        content_id: DbId,
        v1: VersionNumber,
        v2: VersionNumber,
    ) -> Result<(ContentVersion, ContentVersion), CoreError> {
        ensure_content(&self.pool, content_id).await?;

        let first = version_by_number(&self.pool, content_id, v1, Some("v1")).await?;
        let second = version_by_number(&self.pool, content_id, v2, Some("v2")).await?;
        Ok((first, second))
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Edit a content item. A version is appended only when title or body
    /// actually change; status-only edits leave the history untouched.
    pub async fn edit(
        &self,
        content_id: DbId,
        input: &UpdateContentItem,
        actor_id: DbId,
    ) -> Result<ContentWithVersion, CoreError> {
        self.retry_on_conflict("edit", content_id, || {
            self.edit_once(content_id, input, actor_id)
        })
        .await
    }

    /// Restore content to the fields of version `target`.
    ///
    /// Appends a new version copying the target (history is never
    /// rewritten) and updates the live content to match.
    pub async fn rollback(
        &self,
        content_id: DbId,
        target: VersionNumber,
        actor_id: DbId,
    ) -> Result<ContentWithVersion, CoreError> {
        self.retry_on_conflict("rollback", content_id, || {
            self.rollback_once(content_id, target, actor_id)
        })
        .await
    }

    async fn rollback_once(
        &self,
        content_id: DbId,
        target: VersionNumber,
        actor_id: DbId,
    ) -> Result<ContentWithVersion, CoreError> {
        let mut tx = self.pool.begin().await.map_err(classify_store_error)?;

        ensure_content(&mut *tx, content_id).await?;

        let current = latest_version(&mut *tx, content_id).await?;
        validate_rollback_target(current.version_number, target)?;

        let target_version = version_by_number(&mut *tx, content_id, target, None).await?;

        let next = ContentVersionRepo::next_version_number(&mut tx, content_id).await?;
        let description = rollback_description(target);
        let version = ContentVersionRepo::create(
            &mut tx,
            &NewContentVersion {
                content_id,
                version_number: next,
                title: &target_version.title,
                body: &target_version.body,
                change_description: &description,
                created_by: actor_id,
            },
        )
        .await
        .map_err(classify_store_error)?;

        let content = ContentRepo::update_editable_fields(
            &mut tx,
            content_id,
            &target_version.title,
            &target_version.body,
        )
        .await
        .map_err(classify_store_error)?
        .ok_or(CoreError::NotFound {
            entity: ENTITY_CONTENT,
            id: content_id,
        })?;

        tx.commit().await.map_err(classify_store_error)?;

        tracing::debug!(
            content_id,
            rolled_back_to = target,
            version_number = version.version_number,
            "Rollback committed"
        );

        Ok(ContentWithVersion {
            content,
            current_version: version,
        })
    }

    async fn edit_once(
        &self,
        content_id: DbId,
        input: &UpdateContentItem,
        actor_id: DbId,
    ) -> Result<ContentWithVersion, CoreError> {
        let mut tx = self.pool.begin().await.map_err(classify_store_error)?;

        let mut content = ensure_content(&mut *tx, content_id).await?;

        let changed = has_editable_changes(
            &content.title,
            &content.body,
            input.title.as_deref(),
            input.body.as_deref(),
        );

        let current_version = if changed {
            let title = input.title.clone().unwrap_or_else(|| content.title.clone());
            let body = input.body.clone().unwrap_or_else(|| content.body.clone());

            let next = ContentVersionRepo::next_version_number(&mut tx, content_id).await?;
            let description = input
                .change_description
                .as_deref()
                .unwrap_or(DEFAULT_EDIT_DESCRIPTION);
            let version = ContentVersionRepo::create(
                &mut tx,
                &NewContentVersion {
                    content_id,
                    version_number: next,
                    title: &title,
                    body: &body,
                    change_description: description,
                    created_by: actor_id,
                },
            )
            .await
            .map_err(classify_store_error)?;

            content = updated_or_not_found(
                ContentRepo::update_editable_fields(&mut tx, content_id, &title, &body).await,
                content_id,
            )?;
            version
        } else {
            latest_version(&mut *tx, content_id).await?
        };

        if let Some(status) = input.status.as_deref().filter(|s| *s != content.status) {
            content = updated_or_not_found(
                ContentRepo::update_status(&mut tx, content_id, status).await,
                content_id,
            )?;
        }

        tx.commit().await.map_err(classify_store_error)?;

        Ok(ContentWithVersion {
            content,
            current_version,
        })
    }

    /// Run `attempt` until it succeeds, fails with a non-retryable error, or
    /// the retry policy is exhausted. Each call must open its own
    /// transaction so a retry starts from a clean snapshot.
    async fn retry_on_conflict<T, F, Fut>(
        &self,
        operation: &'static str,
        content_id: DbId,
        mut attempt: F,
    ) -> Result<T, CoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let mut number = 1;
        loop {
            match attempt().await {
                Err(err) if self.retry.should_retry(&err, number) => {
                    tracing::warn!(
                        operation,
                        content_id,
                        attempt = number,
                        max_attempts = self.retry.max_attempts(),
                        error = %err,
                        "Version allocation conflict, retrying"
                    );
                    tokio::time::sleep(self.retry.backoff_for(number)).await;
                    number += 1;
                }
                Err(err) => {
                    if err.is_retryable() {
                        tracing::warn!(
                            operation,
                            content_id,
                            attempts = number,
                            "Version allocation conflict, retries exhausted"
                        );
                    }
                    return Err(err);
                }
                Ok(value) => return Ok(value),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a content item or fail with `NotFound(content)`.
async fn ensure_content<'e, E>(executor: E, content_id: DbId) -> Result<ContentItem, CoreError>
where
    E: PgExecutor<'e>,
{
    ContentRepo::find_by_id(executor, content_id)
        .await
        .map_err(classify_store_error)?
        .ok_or(CoreError::NotFound {
            entity: ENTITY_CONTENT,
            id: content_id,
        })
}

/// Load the highest-numbered version. Content without any version breaks
/// the history invariant and is reported as an internal error.
async fn latest_version<'e, E>(executor: E, content_id: DbId) -> Result<ContentVersion, CoreError>
where
    E: PgExecutor<'e>,
{
    ContentVersionRepo::find_latest(executor, content_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::Internal(format!("Content {content_id} has no versions")))
}

/// Load a version by number or fail with `VersionNotFound`.
async fn version_by_number<'e, E>(
    executor: E,
    content_id: DbId,
    version_number: VersionNumber,
    param: Option<&'static str>,
) -> Result<ContentVersion, CoreError>
where
    E: PgExecutor<'e>,
{
    ContentVersionRepo::find_by_content_and_number(executor, content_id, version_number)
        .await
        .map_err(classify_store_error)?
        .ok_or(CoreError::VersionNotFound {
            content_id,
            version_number,
            param,
        })
}

fn updated_or_not_found(
    result: Result<Option<ContentItem>, sqlx::Error>,
    content_id: DbId,
) -> Result<ContentItem, CoreError> {
    result
        .map_err(classify_store_error)?
        .ok_or(CoreError::NotFound {
            entity: ENTITY_CONTENT,
            id: content_id,
        })
}

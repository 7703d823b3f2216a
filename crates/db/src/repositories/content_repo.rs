//! Repository for the `content_items` table.
//!
//! Writes that must stay consistent with the version history take the
//! caller's transaction; see [`crate::versioning::ContentVersioning`].

use folio_core::content::DEFAULT_STATUS;
use folio_core::types::DbId;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::models::content::{ContentItem, CreateContentItem};

/// Column list for content_items queries.
const COLUMNS: &str = "id, title, body, status, author_id, created_at, updated_at";

/// Provides CRUD operations for content items.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a content item. The caller appends version 1 in the same
    /// transaction.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateContentItem,
        author_id: DbId,
    ) -> Result<ContentItem, sqlx::Error> {
        let status = input.status.as_deref().unwrap_or(DEFAULT_STATUS);
        let query = format!(
            "INSERT INTO content_items (title, body, status, author_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(status)
            .bind(author_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a content item by ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<ContentItem>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM content_items WHERE id = $1");
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List content items, most recently updated first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_items
             ORDER BY updated_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the snapshotted fields of a content item.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_editable_fields(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        title: &str,
        body: &str,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "UPDATE content_items SET title = $2, body = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .bind(title)
            .bind(body)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Update the status of a content item.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        status: &str,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "UPDATE content_items SET status = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Delete a content item. Its versions go with it via `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

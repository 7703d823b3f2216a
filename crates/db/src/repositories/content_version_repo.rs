//! Repository for the `content_versions` table.
//!
//! Versions are append-only: this repository exposes inserts and reads but
//! no update or delete. Writes take an explicit transaction so allocation
//! and insert always share one.

use folio_core::error::CoreError;
use folio_core::types::{DbId, VersionNumber};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::error::classify_store_error;
use crate::models::content_version::{ContentVersion, NewContentVersion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, content_id, version_number, title, body, \
    change_description, created_by, created_at";

/// Provides append and read operations for content versions.
pub struct ContentVersionRepo;

impl ContentVersionRepo {
    // ── Allocation & append ──────────────────────────────────────────

    /// Compute the next version number for a content item (max + 1, or 1 if
    /// none) inside the transaction that will insert it.
    ///
    /// Two concurrent transactions may compute the same number; the unique
    /// constraint on `(content_id, version_number)` rejects the loser.
    /// A history that already reached `VersionNumber::MAX` is an `Internal`
    /// error.
    pub async fn next_version_number(
        tx: &mut Transaction<'_, Postgres>,
        content_id: DbId,
    ) -> Result<VersionNumber, CoreError> {
        let row: (Option<VersionNumber>,) =
            sqlx::query_as("SELECT MAX(version_number) FROM content_versions WHERE content_id = $1")
                .bind(content_id)
                .fetch_one(&mut **tx)
                .await
                .map_err(classify_store_error)?;
        folio_core::versioning::next_version_number(row.0).ok_or_else(|| {
            CoreError::Internal(format!(
                "Version numbers exhausted for content {content_id}"
            ))
        })
    }

    /// Append a version row.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &NewContentVersion<'_>,
    ) -> Result<ContentVersion, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_versions
                (content_id, version_number, title, body, change_description, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(input.content_id)
            .bind(input.version_number)
            .bind(input.title)
            .bind(input.body)
            .bind(input.change_description)
            .bind(input.created_by)
            .fetch_one(&mut **tx)
            .await
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Find a version by its row id.
    pub async fn find_by_id<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<ContentVersion>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM content_versions WHERE id = $1");
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a specific version number of a content item.
    pub async fn find_by_content_and_number<'e, E>(
        executor: E,
        content_id: DbId,
        version_number: VersionNumber,
    ) -> Result<Option<ContentVersion>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM content_versions
             WHERE content_id = $1 AND version_number = $2"
        );
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(content_id)
            .bind(version_number)
            .fetch_optional(executor)
            .await
    }

    /// Find the current version: the one with the highest number.
    pub async fn find_latest<'e, E>(
        executor: E,
        content_id: DbId,
    ) -> Result<Option<ContentVersion>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM content_versions
             WHERE content_id = $1
             ORDER BY version_number DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(content_id)
            .fetch_optional(executor)
            .await
    }

    /// List one page of versions for a content item, newest first.
    pub async fn list_by_content(
        pool: &PgPool,
        content_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContentVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_versions
             WHERE content_id = $1
             ORDER BY version_number DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(content_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all versions of a content item.
    pub async fn count_by_content(pool: &PgPool, content_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM content_versions WHERE content_id = $1")
                .bind(content_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}

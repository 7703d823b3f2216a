//! Content version model and DTOs.
//!
//! Versions are immutable snapshots of a content item's title and body,
//! created on content creation, on every edit to those fields, and on
//! every rollback.

use folio_core::diff::{DiffLine, DiffStats};
use folio_core::types::{DbId, Timestamp, VersionNumber};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `content_versions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ContentVersion {
    pub id: DbId,
    pub content_id: DbId,
    pub version_number: VersionNumber,
    pub title: String,
    pub body: String,
    pub change_description: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// Values for appending a version row.
#[derive(Debug, Clone, Copy)]
pub struct NewContentVersion<'a> {
    pub content_id: DbId,
    pub version_number: VersionNumber,
    pub title: &'a str,
    pub body: &'a str,
    pub change_description: &'a str,
    pub created_by: DbId,
}

/// Query params for comparing two versions by number.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub v1: VersionNumber,
    pub v2: VersionNumber,
}

/// Request body for a rollback.
#[derive(Debug, Deserialize)]
pub struct RollbackRequest {
    pub version_number: VersionNumber,
}

/// Response for a comparison. `v1`/`v2` keep the requested order.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub content_id: DbId,
    pub v1: ContentVersion,
    pub v2: ContentVersion,
    pub title_changed: bool,
    pub body_diff: Vec<DiffLine>,
    pub stats: DiffStats,
}

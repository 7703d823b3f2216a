//! Content item model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::content_version::ContentVersion;

/// A row from the `content_items` table: the live state of a piece of content.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ContentItem {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub status: String,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a content item (and its version 1).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentItem {
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Defaults to `draft` if `None`.
    pub status: Option<String>,
    /// Defaults to `"Initial version"` if `None`.
    pub change_description: Option<String>,
}

/// DTO for editing a content item. All fields optional.
///
/// A new version is recorded only when `title` or `body` actually change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContentItem {
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<String>,
    pub change_description: Option<String>,
}

/// A content item together with its newest version.
#[derive(Debug, Clone, Serialize)]
pub struct ContentWithVersion {
    #[serde(flatten)]
    pub content: ContentItem,
    pub current_version: ContentVersion,
}

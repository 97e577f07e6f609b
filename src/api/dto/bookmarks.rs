/*
 * Responsibility
 * - Bookmark の response DTO (camelCase、owner は userId として返す)
 * - request 側は DTO を持たない (スキーマ検証は services::validation)
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::repos::Bookmark;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(row: Bookmark) -> Self {
        Self {
            id: row.id,
            url: row.url,
            title: row.title,
            description: row.description,
            user_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/*
 * Responsibility
 * - bookmarks の永続化インターフェース (BookmarkStore)
 * - service はこの trait だけを知る (Postgres / memory を差し替え可能にする)
 * - owner_id による絞り込みは store の責務 (他人の row は決して返さない)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::repos::error::RepoResult;

/// A persisted bookmark row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Bookmark {
    pub id: Uuid,
    pub url: String,
    #[sqlx(rename = "user_id")]
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Durable keyed storage for bookmarks.
///
/// Every operation is a single atomic statement against the backend. Callers
/// that need "check then mutate" get no transaction from here; `replace` and
/// `delete` report a vanished row instead.
///
/// Implementations must be usable concurrently without external locking.
#[async_trait]
pub trait BookmarkStore: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Persist a new record. The id and timestamps are taken from `record`.
    async fn insert(&self, record: Bookmark) -> RepoResult<Bookmark>;

    async fn find_by_id_and_owner(&self, id: Uuid, owner_id: &str)
    -> RepoResult<Option<Bookmark>>;

    // Newest first. Empty when the owner has none.
    // Rows sharing a created_at come back in a fixed, backend-defined order
    // (Postgres: id descending, memory: latest insert first).
    async fn list_by_owner(&self, owner_id: &str) -> RepoResult<Vec<Bookmark>>;

    // Overwrite url/title/description/updated_at of the row matching
    // (`record.id`, `record.owner_id`).
    //
    // Returns:
    // - Ok(Some(row)) => updated
    // - Ok(None)      => no matching row (deleted concurrently or never existed)
    async fn replace(&self, record: Bookmark) -> RepoResult<Option<Bookmark>>;

    // Returns whether a matching row existed and was removed.
    async fn delete(&self, id: Uuid, owner_id: &str) -> RepoResult<bool>;
}

/*
 * Responsibility
 * - bookmarks テーブル向け SQLx 操作 (BookmarkStore の Postgres 実装)
 * - すべての WHERE に user_id を含め、所有者以外の row を返さない
 * - 1 操作 = 1 statement (transaction は張らない)
 */
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::{
    error::RepoResult,
    store::{Bookmark, BookmarkStore},
};

// id breaks created_at ties (same microsecond) so pages are stable
const LIST_BY_OWNER_SQL: &str = r#"
    SELECT
        id, url, user_id, title, description, created_at, updated_at
    FROM bookmarks
    WHERE user_id = $1
    ORDER BY created_at DESC, id DESC
"#;

#[derive(Clone, Debug)]
pub struct PgBookmarkStore {
    pool: PgPool,
}

impl PgBookmarkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkStore for PgBookmarkStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, record: Bookmark) -> RepoResult<Bookmark> {
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            INSERT INTO bookmarks (id, url, user_id, title, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, url, user_id, title, description, created_at, updated_at
            "#,
        )
        .bind(record.id)
        .bind(&record.url)
        .bind(&record.owner_id)
        .bind(&record.title)
        .bind(record.description.as_deref())
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: &str,
    ) -> RepoResult<Option<Bookmark>> {
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT
                id, url, user_id, title, description, created_at, updated_at
            FROM bookmarks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_owner(&self, owner_id: &str) -> RepoResult<Vec<Bookmark>> {
        let rows = sqlx::query_as::<_, Bookmark>(LIST_BY_OWNER_SQL)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn replace(&self, record: Bookmark) -> RepoResult<Option<Bookmark>> {
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            UPDATE bookmarks
            SET
                url = $3,
                title = $4,
                description = $5,
                updated_at = $6
            WHERE id = $1 AND user_id = $2
            RETURNING
                id, url, user_id, title, description, created_at, updated_at
            "#,
        )
        .bind(record.id)
        .bind(&record.owner_id)
        .bind(&record.url)
        .bind(&record.title)
        .bind(record.description.as_deref())
        .bind(record.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: Uuid, owner_id: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM bookmarks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/*
 * Responsibility
 * - bookmark の create / list / get / update / delete
 * - 所有者 (OwnerId) による絞り込みと存在確認 → 変更、の 2 段階を担う
 * - payload の検証は store に触る前に済ませる
 * - store は trait 経由 (Postgres / memory を知らない)
 */
use std::sync::Arc;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde_json::Value;
use tracing::instrument;

use crate::repos::{Bookmark, BookmarkStore};
use crate::services::bookmarks::{
    error::{BookmarkError, BookmarkResult},
    types::{BookmarkId, OwnerId},
};
use crate::services::validation;

#[derive(Clone)]
pub struct BookmarkService {
    store: Arc<dyn BookmarkStore>,
}

impl std::fmt::Debug for BookmarkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarkService")
            .field("store", &self.store.backend_name())
            .finish()
    }
}

impl BookmarkService {
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    #[instrument(skip(self, owner, payload), fields(owner = %owner))]
    pub async fn create(&self, owner: &OwnerId, payload: &Value) -> BookmarkResult<Bookmark> {
        let input =
            validation::validate_create(payload).map_err(BookmarkError::ValidationFailed)?;

        let now = now();
        let record = Bookmark {
            id: BookmarkId::generate().as_uuid(),
            url: input.url,
            owner_id: owner.as_str().to_owned(),
            title: input.title,
            description: input.description,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert(record).await?;
        tracing::info!(bookmark_id = %stored.id, "bookmark created");

        Ok(stored)
    }

    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn list(&self, owner: &OwnerId) -> BookmarkResult<Vec<Bookmark>> {
        let rows = self.store.list_by_owner(owner.as_str()).await?;
        Ok(rows)
    }

    #[instrument(skip(self, id, owner), fields(owner = %owner, bookmark_id = %id))]
    pub async fn get(&self, id: BookmarkId, owner: &OwnerId) -> BookmarkResult<Bookmark> {
        self.store
            .find_by_id_and_owner(id.as_uuid(), owner.as_str())
            .await?
            .ok_or_else(|| BookmarkError::not_found(id))
    }

    #[instrument(skip(self, id, owner, payload), fields(owner = %owner, bookmark_id = %id))]
    pub async fn update(
        &self,
        id: BookmarkId,
        owner: &OwnerId,
        payload: &Value,
    ) -> BookmarkResult<Bookmark> {
        let patch =
            validation::validate_update(payload).map_err(BookmarkError::ValidationFailed)?;

        let mut record = self.get(id, owner).await?;
        patch.apply_to(&mut record);
        record.updated_at = next_updated_at(record.updated_at);

        // get → replace is not atomic: a concurrent delete surfaces here as NotFound
        let updated = self.store.replace(record).await?.ok_or_else(|| {
            tracing::warn!("bookmark removed between lookup and replace");
            BookmarkError::not_found(id)
        })?;
        tracing::info!("bookmark updated");

        Ok(updated)
    }

    #[instrument(skip(self, id, owner), fields(owner = %owner, bookmark_id = %id))]
    pub async fn delete(&self, id: BookmarkId, owner: &OwnerId) -> BookmarkResult<()> {
        self.get(id, owner).await?;

        if !self.store.delete(id.as_uuid(), owner.as_str()).await? {
            tracing::warn!("bookmark removed between lookup and delete");
            return Err(BookmarkError::not_found(id));
        }
        tracing::info!("bookmark deleted");

        Ok(())
    }
}

// Postgres keeps microseconds; truncate so a stored record equals the returned one.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

// strictly increasing, even when the clock has not moved (or moved backwards)
fn next_updated_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    now().max(previous + Duration::microseconds(1))
}

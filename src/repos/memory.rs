/*
 * Responsibility
 * - BookmarkStore の in-memory 実装 (STORE_BACKEND=memory / テスト用)
 * - Postgres 実装と同じ契約 (owner 絞り込み、created_at DESC、rows_affected 相当)
 */
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::repos::{
    error::{RepoError, RepoResult},
    store::{Bookmark, BookmarkStore},
};

#[derive(Debug, Default)]
pub struct MemoryBookmarkStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<Uuid, Entry>,
    next_seq: u64,
}

#[derive(Debug)]
struct Entry {
    // insertion order, used to break created_at ties
    seq: u64,
    row: Bookmark,
}

impl MemoryBookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rows
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BookmarkStore for MemoryBookmarkStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, record: Bookmark) -> RepoResult<Bookmark> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if inner.rows.contains_key(&record.id) {
            return Err(RepoError::Conflict);
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.rows.insert(
            record.id,
            Entry {
                seq,
                row: record.clone(),
            },
        );

        Ok(record)
    }

    async fn find_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: &str,
    ) -> RepoResult<Option<Bookmark>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);

        Ok(inner
            .rows
            .get(&id)
            .filter(|e| e.row.owner_id == owner_id)
            .map(|e| e.row.clone()))
    }

    async fn list_by_owner(&self, owner_id: &str) -> RepoResult<Vec<Bookmark>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);

        let mut entries: Vec<&Entry> = inner
            .rows
            .values()
            .filter(|e| e.row.owner_id == owner_id)
            .collect();
        entries.sort_by(|a, b| {
            b.row
                .created_at
                .cmp(&a.row.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(entries.into_iter().map(|e| e.row.clone()).collect())
    }

    async fn replace(&self, record: Bookmark) -> RepoResult<Option<Bookmark>> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let Some(entry) = inner
            .rows
            .get_mut(&record.id)
            .filter(|e| e.row.owner_id == record.owner_id)
        else {
            return Ok(None);
        };

        // id / owner / created_at are immutable
        entry.row.url = record.url;
        entry.row.title = record.title;
        entry.row.description = record.description;
        entry.row.updated_at = record.updated_at;

        Ok(Some(entry.row.clone()))
    }

    async fn delete(&self, id: Uuid, owner_id: &str) -> RepoResult<bool> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let owned = inner
            .rows
            .get(&id)
            .is_some_and(|e| e.row.owner_id == owner_id);
        if owned {
            inner.rows.remove(&id);
        }

        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn bookmark(owner: &str, offset_secs: i64) -> Bookmark {
        let at = Utc::now() + Duration::seconds(offset_secs);
        Bookmark {
            id: Uuid::new_v4(),
            url: "https://a.example/p".into(),
            owner_id: owner.into(),
            title: "T".into(),
            description: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = MemoryBookmarkStore::new();
        let b = bookmark("u1", 0);

        store.insert(b.clone()).await.unwrap();
        let err = store.insert(b).await.unwrap_err();

        assert!(matches!(err, RepoError::Conflict));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn find_never_crosses_owners() {
        let store = MemoryBookmarkStore::new();
        let b = store.insert(bookmark("u1", 0)).await.unwrap();

        assert!(store.find_by_id_and_owner(b.id, "u1").await.unwrap().is_some());
        assert!(store.find_by_id_and_owner(b.id, "u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_orders_newest_first_and_breaks_ties_by_insertion() {
        let store = MemoryBookmarkStore::new();
        let old = store.insert(bookmark("u1", -10)).await.unwrap();
        let new = store.insert(bookmark("u1", 10)).await.unwrap();

        let mut tie_a = bookmark("u1", 0);
        let mut tie_b = bookmark("u1", 0);
        tie_b.created_at = tie_a.created_at;
        tie_a.updated_at = tie_a.created_at;
        tie_b.updated_at = tie_b.created_at;
        let tie_a = store.insert(tie_a).await.unwrap();
        let tie_b = store.insert(tie_b).await.unwrap();
        store.insert(bookmark("u2", 20)).await.unwrap();

        let ids: Vec<Uuid> = store
            .list_by_owner("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();

        assert_eq!(ids, vec![new.id, tie_b.id, tie_a.id, old.id]);
        assert!(store.list_by_owner("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_keeps_immutable_fields_and_reports_missing_rows() {
        let store = MemoryBookmarkStore::new();
        let original = store.insert(bookmark("u1", 0)).await.unwrap();

        let mut changed = original.clone();
        changed.title = "changed".into();
        changed.created_at = original.created_at + Duration::days(1);
        changed.updated_at = original.updated_at + Duration::seconds(1);

        let stored = store.replace(changed.clone()).await.unwrap().unwrap();
        assert_eq!(stored.title, "changed");
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.updated_at, changed.updated_at);

        let mut foreign = changed.clone();
        foreign.owner_id = "u2".into();
        assert!(store.replace(foreign).await.unwrap().is_none());

        store.delete(original.id, "u1").await.unwrap();
        assert!(store.replace(changed).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let store = MemoryBookmarkStore::new();
        let b = store.insert(bookmark("u1", 0)).await.unwrap();

        assert!(!store.delete(b.id, "u2").await.unwrap());
        assert!(store.delete(b.id, "u1").await.unwrap());
        assert!(!store.delete(b.id, "u1").await.unwrap());
        assert!(store.is_empty());
    }
}

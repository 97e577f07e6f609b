/*
 * Responsibility
 * - 永続化層の公開インターフェース (re-export)
 */
pub mod bookmark_repo;
pub mod error;
pub mod memory;
pub mod store;

pub use bookmark_repo::PgBookmarkStore;
pub use error::{RepoError, RepoResult};
pub use memory::MemoryBookmarkStore;
pub use store::{Bookmark, BookmarkStore};

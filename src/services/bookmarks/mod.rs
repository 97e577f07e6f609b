/*
 * Responsibility
 * - bookmark ユースケースの入口 (service / types / error の re-export)
 */
pub mod error;
mod service;
pub mod types;

pub use error::{BookmarkError, BookmarkResult};
pub use service::BookmarkService;
pub use types::{BookmarkId, BookmarkPatch, CreateBookmark, IdentityError, OwnerId};

/*
 * Responsibility
 * - handler 用 extractor の公開ポイント
 */
mod bookmark_id;
mod identity;

pub use bookmark_id::BookmarkIdPath;
pub use identity::Identity;

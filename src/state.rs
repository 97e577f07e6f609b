/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc で cheap)
 */
use std::sync::Arc;

use crate::repos::BookmarkStore;
use crate::services::bookmarks::BookmarkService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub bookmarks: Arc<BookmarkService>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        Self {
            bookmarks: Arc::new(BookmarkService::new(store)),
        }
    }
}

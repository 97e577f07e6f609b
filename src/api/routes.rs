/*
 * Responsibility
 * - URL 構造を定義
 * - /health は identity 不要、/bookmarks 系はすべて identity 必須 (route_layer)
 */
use axum::{Router, routing::get};

use crate::api::handlers::{
    bookmarks::{create_bookmark, delete_bookmark, get_bookmark, list_bookmarks, update_bookmark},
    health::health,
};
use crate::middleware;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let bookmarks = Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/{id}",
            get(get_bookmark)
                .patch(update_bookmark)
                .delete(delete_bookmark),
        );

    Router::new()
        .route("/health", get(health))
        .merge(middleware::identity::apply(bookmarks))
}

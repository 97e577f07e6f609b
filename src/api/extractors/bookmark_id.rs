/*
 * Responsibility
 * - Path の {id} を BookmarkId (UUID) として受ける
 * - 不正な id は store に触る前に 400 INVALID_ID
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;
use crate::services::bookmarks::BookmarkId;
use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
pub struct BookmarkIdPath(pub BookmarkId);

impl FromRequestParts<AppState> for BookmarkIdPath {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request("INVALID_ID", e.body_text()))?;

        Ok(Self(BookmarkId::parse(&raw)?))
    }
}

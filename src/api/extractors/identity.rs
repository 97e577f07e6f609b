use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::bookmarks::OwnerId;
use crate::state::AppState;

/// Handler で OwnerId を受け取るための extractor
/// identity middleware が request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（route_layer の付け忘れ）
#[derive(Debug, Clone)]
pub struct Identity(pub OwnerId);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<OwnerId>()
            .cloned()
            .map(Identity)
            .ok_or(AppError::Unauthorized)
    }
}

/*
 * Responsibility
 * - /bookmarks 系 CRUD handler
 * - identity / path id は extractor で型付きにしてから service に渡す
 * - body は Value のまま service へ (検証は service 側のスキーマで行う)
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::Value;

use crate::{
    api::{
        dto::bookmarks::BookmarkResponse,
        extractors::{BookmarkIdPath, Identity},
    },
    error::AppError,
    state::AppState,
};

pub async fn list_bookmarks(
    State(state): State<AppState>,
    Identity(owner): Identity,
) -> Result<Json<Vec<BookmarkResponse>>, AppError> {
    let rows = state.bookmarks.list(&owner).await?;

    Ok(Json(rows.into_iter().map(BookmarkResponse::from).collect()))
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    Identity(owner): Identity,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    let row = state.bookmarks.create(&owner, &payload).await?;
    let location = format!("/bookmarks/{}", row.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BookmarkResponse::from(row)),
    ))
}

pub async fn get_bookmark(
    State(state): State<AppState>,
    Identity(owner): Identity,
    BookmarkIdPath(id): BookmarkIdPath,
) -> Result<Json<BookmarkResponse>, AppError> {
    let row = state.bookmarks.get(id, &owner).await?;

    Ok(Json(row.into()))
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    Identity(owner): Identity,
    BookmarkIdPath(id): BookmarkIdPath,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BookmarkResponse>, AppError> {
    let Json(payload) = payload?;

    let row = state.bookmarks.update(id, &owner, &payload).await?;

    Ok(Json(row.into()))
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    Identity(owner): Identity,
    BookmarkIdPath(id): BookmarkIdPath,
) -> Result<StatusCode, AppError> {
    state.bookmarks.delete(id, &owner).await?;

    Ok(StatusCode::NO_CONTENT)
}

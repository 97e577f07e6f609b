/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - BookmarkError / JSON body rejection を統一的に変換
 * - 500 の原因はログにだけ出す (body には出さない)
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::bookmarks::BookmarkError;
use crate::services::validation::FieldViolation;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, code, message, None)
            }
            AppError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                "validation failed".into(),
                Some(violations),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "missing or invalid x-user-id header".into(),
                None,
            ),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<BookmarkError> for AppError {
    fn from(e: BookmarkError) -> Self {
        match e {
            BookmarkError::ValidationFailed(violations) => AppError::Validation(violations),
            BookmarkError::InvalidArgument(message) => AppError::bad_request("INVALID_ID", message),
            e @ BookmarkError::NotFound { .. } => AppError::not_found(e.to_string()),
            BookmarkError::Storage(source) => {
                tracing::error!(error = ?source, "storage failure");
                AppError::Internal
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request("INVALID_JSON", rejection.body_text())
    }
}

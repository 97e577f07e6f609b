/*
 * Responsibility
 * - bookmark service が上位 (handler) に伝える失敗の意味
 * - 他人の bookmark は NotFound として扱う (Forbidden は存在しない)
 */
use thiserror::Error;

use crate::repos::RepoError;
use crate::services::validation::FieldViolation;

pub type BookmarkResult<T> = Result<T, BookmarkError>;

#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("validation failed ({} violation(s))", .0.len())]
    ValidationFailed(Vec<FieldViolation>),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Bookmark with ID \"{id}\" not found")]
    NotFound { id: String },

    #[error("storage error")]
    Storage(#[from] RepoError),
}

impl BookmarkError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}

/*
 * Responsibility
 * - bookmark ドメインの値型 (OwnerId / BookmarkId / 入力 payload)
 * - 「検証済み」であることを型で表す (生の String / Uuid を service に流さない)
 */
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::repos::Bookmark;
use crate::services::bookmarks::error::BookmarkError;

/// Width of the `user_id` column.
pub const OWNER_ID_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("identity is missing")]
    Missing,
    #[error("identity is given more than once")]
    Duplicated,
    #[error("identity is not valid text")]
    NotText,
    #[error("identity is blank")]
    Blank,
    #[error("identity is longer than 255 characters")]
    TooLong,
}

/// Caller identity, trusted as-is once it is known to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    /// The value is kept verbatim; whitespace only matters for the blank check.
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        if raw.trim().is_empty() {
            return Err(IdentityError::Blank);
        }
        if raw.chars().count() > OWNER_ID_MAX_LENGTH {
            return Err(IdentityError::TooLong);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const HYPHENATED_LEN: usize = 36;

/// Syntactically valid bookmark identifier (UUID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookmarkId(Uuid);

impl BookmarkId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Only the canonical hyphenated form (8-4-4-4-12) is accepted; the simple,
    /// braced and `urn:uuid:` spellings `Uuid::try_parse` allows are rejected.
    pub fn parse(raw: &str) -> Result<Self, BookmarkError> {
        let invalid = || BookmarkError::InvalidArgument(format!("invalid bookmark id: {raw}"));

        if raw.len() != HYPHENATED_LEN {
            return Err(invalid());
        }
        Uuid::try_parse(raw).map(Self).map_err(|_| invalid())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl FromStr for BookmarkId {
    type Err = BookmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated create payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookmark {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
}

/// Validated update payload. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub url: Option<String>,
    pub title: Option<String>,
    // Tri-state:
    // - None: field missing (do not update)
    // - Some(None): null (clear)
    // - Some(Some(v)): set value
    pub description: Option<Option<String>>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.title.is_none() && self.description.is_none()
    }

    /// Merge the present fields onto `record`. Timestamps are the caller's job.
    pub fn apply_to(self, record: &mut Bookmark) {
        if let Some(url) = self.url {
            record.url = url;
        }
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
    }
}

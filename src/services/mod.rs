pub mod bookmarks;
pub mod validation;

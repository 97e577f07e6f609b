/*
 * Responsibility
 * - bookmark の create / update スキーマ定義
 * - 検証済み Map → 型付き payload (CreateBookmark / BookmarkPatch) への変換
 */
mod schema;

use serde_json::{Map, Value};

pub use schema::{FieldFormat, FieldRule, FieldViolation, ROOT_FIELD, Schema, is_absolute_url};

use crate::services::bookmarks::types::{BookmarkPatch, CreateBookmark};

pub const URL_MAX_LENGTH: usize = 2048;
pub const TITLE_MAX_LENGTH: usize = 255;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

const CREATE_FIELDS: &[FieldRule] = &[
    FieldRule {
        name: "url",
        required: true,
        nullable: false,
        non_empty: true,
        max_length: URL_MAX_LENGTH,
        format: Some(FieldFormat::Url),
    },
    FieldRule {
        name: "title",
        required: true,
        nullable: false,
        non_empty: true,
        max_length: TITLE_MAX_LENGTH,
        format: None,
    },
    FieldRule {
        name: "description",
        required: false,
        nullable: true,
        non_empty: false,
        max_length: DESCRIPTION_MAX_LENGTH,
        format: None,
    },
];

// same constraints, nothing required
const UPDATE_FIELDS: &[FieldRule] = &[
    FieldRule {
        required: false,
        ..CREATE_FIELDS[0]
    },
    FieldRule {
        required: false,
        ..CREATE_FIELDS[1]
    },
    CREATE_FIELDS[2],
];

pub const CREATE_SCHEMA: Schema = Schema {
    fields: CREATE_FIELDS,
};

pub const UPDATE_SCHEMA: Schema = Schema {
    fields: UPDATE_FIELDS,
};

pub fn validate_create(payload: &Value) -> Result<CreateBookmark, Vec<FieldViolation>> {
    let mut fields = CREATE_SCHEMA.validate(payload)?;

    let (Some(url), Some(title)) = (
        take_string(&mut fields, "url"),
        take_string(&mut fields, "title"),
    ) else {
        // unreachable after a successful validate(); keep the contract anyway
        return Err(vec![FieldViolation::new(ROOT_FIELD, "url and title are required")]);
    };

    Ok(CreateBookmark {
        url,
        title,
        // null on create means "no description"
        description: take_string(&mut fields, "description"),
    })
}

pub fn validate_update(payload: &Value) -> Result<BookmarkPatch, Vec<FieldViolation>> {
    let mut fields = UPDATE_SCHEMA.validate(payload)?;

    let description = match fields.remove("description") {
        None => None,
        Some(Value::String(s)) => Some(Some(s)),
        Some(_) => Some(None),
    };

    Ok(BookmarkPatch {
        url: take_string(&mut fields, "url"),
        title: take_string(&mut fields, "title"),
        description,
    })
}

fn take_string(fields: &mut Map<String, Value>, name: &str) -> Option<String> {
    match fields.remove(name) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

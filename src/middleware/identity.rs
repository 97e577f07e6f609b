//! x-user-id → OwnerId を extensions に入れる
//!
//! - 値は検証しない (信頼された上流が付ける前提)。空白のみ・重複・非テキストは 401
//! - route_layer として掛けるので、path / body の解析や store へのアクセスより先に弾く
//! - handler 側は `Identity` extractor で受け取る

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, HeaderName, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::bookmarks::{IdentityError, OwnerId};

pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// Require a caller identity on every route of `router`.
pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn(identity_middleware))
}

async fn identity_middleware(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let owner = match owner_from_headers(req.headers()) {
        Ok(owner) => owner,
        Err(err) => {
            tracing::warn!(
                error = %err,
                method = %req.method(),
                uri = %req.uri(),
                "request rejected: no usable identity"
            );
            return Err(AppError::Unauthorized);
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(owner);

    Ok(next.run(req).await)
}

/// Exactly one `x-user-id` value, readable as text and non-blank.
pub fn owner_from_headers(headers: &HeaderMap) -> Result<OwnerId, IdentityError> {
    let mut values = headers.get_all(USER_ID_HEADER).iter();

    let value = values.next().ok_or(IdentityError::Missing)?;
    if values.next().is_some() {
        return Err(IdentityError::Duplicated);
    }

    let raw = value.to_str().map_err(|_| IdentityError::NotText)?;
    OwnerId::parse(raw)
}

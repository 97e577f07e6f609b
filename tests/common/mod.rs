#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::HeaderMap},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use bookmarks_api::{
    app::build_router,
    config::Config,
    repos::{Bookmark, BookmarkStore, MemoryBookmarkStore, RepoResult},
    state::AppState,
};

pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut env: HashMap<String, String> = HashMap::from([
        ("STORE_BACKEND".to_string(), "memory".to_string()),
        ("RUN_MIGRATIONS".to_string(), "false".to_string()),
    ]);
    for (k, v) in extra {
        env.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| env.get(key).cloned()).unwrap()
}

/// Memory store that counts every call, to prove a request never reached it.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryBookmarkStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> usize {
        self.inner.len()
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BookmarkStore for CountingStore {
    fn backend_name(&self) -> &'static str {
        "counting"
    }

    async fn insert(&self, record: Bookmark) -> RepoResult<Bookmark> {
        self.hit();
        self.inner.insert(record).await
    }

    async fn find_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: &str,
    ) -> RepoResult<Option<Bookmark>> {
        self.hit();
        self.inner.find_by_id_and_owner(id, owner_id).await
    }

    async fn list_by_owner(&self, owner_id: &str) -> RepoResult<Vec<Bookmark>> {
        self.hit();
        self.inner.list_by_owner(owner_id).await
    }

    async fn replace(&self, record: Bookmark) -> RepoResult<Option<Bookmark>> {
        self.hit();
        self.inner.replace(record).await
    }

    async fn delete(&self, id: Uuid, owner_id: &str) -> RepoResult<bool> {
        self.hit();
        self.inner.delete(id, owner_id).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<CountingStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(&test_config(&[]))
    }

    pub fn with_config(config: &Config) -> Self {
        let store = Arc::new(CountingStore::default());
        let router = build_router(AppState::new(store.clone()), config);
        Self { router, store }
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let res = self.router.clone().oneshot(req).await.unwrap();

        let status = res.status();
        let headers = res.headers().clone();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        self.send(request(method, uri, user, body)).await
    }

    /// Creates a bookmark and returns its id.
    pub async fn create(&self, user: &str, body: Value) -> String {
        let res = self
            .call(Method::POST, "/bookmarks", Some(user), Some(body))
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
        res.body["id"].as_str().unwrap().to_string()
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }
}

pub fn request(method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn raw_request(method: Method, uri: &str, user: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{TestApp, raw_request, test_config};

const UNKNOWN: &str = "/bookmarks/6f1c1d8e-2a4b-4c3d-9e8f-0a1b2c3d4e5f";

#[tokio::test]
async fn invalid_url_is_rejected_without_store_access() {
    let app = TestApp::new();

    let res = app
        .call(
            Method::POST,
            "/bookmarks",
            Some("u1"),
            Some(json!({"url": "not a url", "title": "T"})),
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "VALIDATION_FAILED");
    assert_eq!(
        res.body["error"]["details"],
        json!([{"field": "url", "message": "url must be a URL address"}])
    );
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn create_lists_every_violation() {
    let app = TestApp::new();

    let res = app
        .call(
            Method::POST,
            "/bookmarks",
            Some("u1"),
            Some(json!({
                "title": " ",
                "description": "d".repeat(1001),
                "userId": "someone-else",
            })),
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = res.body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    // a whitespace-only title is a value; only "" is rejected
    assert_eq!(fields, vec!["url", "description", "userId"]);
}

#[tokio::test]
async fn whitespace_only_title_is_accepted_but_empty_is_not() {
    let app = TestApp::new();

    let res = app
        .call(
            Method::POST,
            "/bookmarks",
            Some("u1"),
            Some(json!({"url": "https://a.example/p", "title": "   "})),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["title"], "   ");

    let res = app
        .call(
            Method::POST,
            "/bookmarks",
            Some("u1"),
            Some(json!({"url": "https://a.example/p", "title": ""})),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.body["error"]["details"],
        json!([{"field": "title", "message": "title should not be empty"}])
    );
}

#[tokio::test]
async fn non_object_payload_is_a_validation_error() {
    let app = TestApp::new();

    let res = app
        .call(Method::POST, "/bookmarks", Some("u1"), Some(json!([1, 2])))
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["details"][0]["field"], "$");
}

#[tokio::test]
async fn malformed_json_is_invalid_json() {
    let app = TestApp::new();

    let res = app
        .send(raw_request(Method::POST, "/bookmarks", Some("u1"), "{\"url\":"))
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "INVALID_JSON");
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn invalid_patch_on_unknown_id_is_a_validation_error() {
    let app = TestApp::new();

    let res = app
        .call(
            Method::PATCH,
            UNKNOWN,
            Some("u1"),
            Some(json!({"url": "not a url"})),
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "VALIDATION_FAILED");
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn patch_rejects_null_title() {
    let app = TestApp::new();
    let id = app
        .create("u1", json!({"url": "https://a.example", "title": "T"}))
        .await;

    let res = app
        .call(
            Method::PATCH,
            &format!("/bookmarks/{id}"),
            Some("u1"),
            Some(json!({"title": null})),
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.body["error"]["details"][0]["message"],
        "title must be a string"
    );
}

#[tokio::test]
async fn malformed_id_is_invalid_id() {
    let app = TestApp::new();

    for method in [Method::GET, Method::DELETE] {
        let res = app
            .call(method, "/bookmarks/not-a-uuid", Some("u1"), None)
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.error_code(), "INVALID_ID");
    }

    let res = app
        .call(
            Method::PATCH,
            "/bookmarks/not-a-uuid",
            Some("u1"),
            Some(json!({"title": "T"})),
        )
        .await;
    assert_eq!(res.error_code(), "INVALID_ID");

    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn non_canonical_uuid_spellings_are_invalid_ids() {
    let app = TestApp::new();
    let uuid = "6f1c1d8e-2a4b-4c3d-9e8f-0a1b2c3d4e5f";

    for raw in [
        uuid.replace('-', ""),
        format!("urn:uuid:{uuid}"),
        format!("%7B{uuid}%7D"),
    ] {
        let res = app
            .call(Method::GET, &format!("/bookmarks/{raw}"), Some("u1"), None)
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{raw}");
        assert_eq!(res.error_code(), "INVALID_ID");
    }

    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = TestApp::new();

    for method in [Method::GET, Method::DELETE] {
        let res = app.call(method, UNKNOWN, Some("u1"), None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(
            res.body["error"]["message"],
            "Bookmark with ID \"6f1c1d8e-2a4b-4c3d-9e8f-0a1b2c3d4e5f\" not found"
        );
    }
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = TestApp::with_config(&test_config(&[("BODY_LIMIT_BYTES", "64")]));
    let body = json!({"url": "https://a.example", "title": "t".repeat(200)});

    let res = app
        .call(Method::POST, "/bookmarks", Some("u1"), Some(body))
        .await;

    assert!(res.status.is_client_error());
    assert_eq!(app.store.rows(), 0);
}

//! End-to-end tests of the HTTP surface.

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_root_and_probes() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Quill"));

    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = app.send(Method::GET, "/live", None, None).await;
    assert_eq!(status, StatusCode::OK);

    // no database behind the test pool
    let (status, body) = app.send(Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
}

#[tokio::test]
async fn test_register_login_and_duplicate_email() {
    let app = TestApp::new();
    app.register("grace@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "grace@example.com", "password": "Abcd12@"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "grace@example.com", "password": "Wrong12@"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Invalid email or password");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "first_name": "Grace",
                "last_name": "Again",
                "email": "GRACE@example.com",
                "password": "Abcd12@",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_lowercase_bearer_scheme_is_accepted() {
    let app = TestApp::new();
    let (token, _) = app.register("lower@example.com").await;

    let (status, body) = app
        .send_with_authorization(
            Method::POST,
            "/api/v1/blogs",
            Some(&format!("bearer {token}")),
            Some(json!({"title": "Hello", "content": "Some content"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

#[tokio::test]
async fn test_protected_routes_require_a_valid_token() {
    let app = TestApp::new();
    let payload = json!({"title": "Hello", "content": "Some content"});

    let (status, body) = app
        .send(Method::POST, "/api/v1/blogs", None, Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .send(Method::POST, "/api/v1/blogs", Some("garbage"), Some(payload))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send(Method::DELETE, "/api/v1/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_listing_shows_updated_title() {
    let app = TestApp::new();
    let (token, _) = app.register("a@example.com").await;
    let post_id = app.create_post(&token, "Old title").await;

    let (status, body) = app.send(Method::GET, "/api/v1/blogs", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Old title");
    assert!(app.cache.contains("posts:all"));

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/v1/blogs/{post_id}"),
            Some(&token),
            Some(json!({"title": "New title"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!app.cache.contains("posts:all"));

    let (_, body) = app.send(Method::GET, "/api/v1/blogs", None, None).await;
    assert_eq!(body["data"][0]["title"], "New title");
    assert_eq!(body["data"][0]["content"], "Some content");
}

#[tokio::test]
async fn test_non_owner_cannot_touch_post() {
    let app = TestApp::new();
    let (owner, _) = app.register("owner@example.com").await;
    let (intruder, _) = app.register("intruder@example.com").await;
    let post_id = app.create_post(&owner, "Mine").await;
    let uri = format!("/api/v1/blogs/{post_id}");

    let (status, body) = app
        .send(Method::PUT, &uri, Some(&intruder), Some(json!({"title": "Theirs"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (status, _) = app.send(Method::DELETE, &uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(body["data"]["title"], "Mine");
}

#[tokio::test]
async fn test_update_validation() {
    let app = TestApp::new();
    let (token, _) = app.register("a@example.com").await;
    let post_id = app.create_post(&token, "Title").await;
    let uri = format!("/api/v1/blogs/{post_id}");

    let (status, body) = app.send(Method::PUT, &uri, Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Validation error: payload cannot be empty");

    let (status, _) = app
        .send(Method::PUT, &uri, Some(&token), Some(json!({"content": "x"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::PUT, &uri, Some(&token), Some(json!({"title": null})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_and_malformed_ids_are_not_found() {
    let app = TestApp::new();
    let (token, _) = app.register("a@example.com").await;
    let missing = quill_core::PostId::new();

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/v1/blogs/{missing}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.send(Method::GET, "/api/v1/blogs/not-an-id", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = app
        .send(Method::GET, &format!("/api/v1/blogs/{missing}/comments"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_flow() {
    let app = TestApp::new();
    let (owner, _) = app.register("owner@example.com").await;
    let (author, _) = app.register("author@example.com").await;
    let post_id = app.create_post(&owner, "A post").await;
    let other_post = app.create_post(&owner, "Other post").await;
    let comment_id = app.create_comment(&author, &post_id, "Nice post").await;
    let comments_uri = format!("/api/v1/blogs/{post_id}/comments");
    let comment_uri = format!("{comments_uri}/{comment_id}");

    let (status, body) = app.send(Method::GET, &comments_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert!(app.cache.contains(&format!("comments:{post_id}")));

    // the post owner is not the comment owner
    let (status, _) = app
        .send(Method::PUT, &comment_uri, Some(&owner), Some(json!({"content": "Edited"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, body) = app.send(Method::GET, &comment_uri, None, None).await;
    assert_eq!(body["data"]["content"], "Nice post");

    let (status, body) = app
        .send(Method::PUT, &comment_uri, Some(&author), Some(json!({"content": "Edited"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["content"], "Edited");
    assert!(!app.cache.contains(&format!("comments:{post_id}")));

    // addressed through the wrong post
    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/v1/blogs/{other_post}/comments/{comment_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.send(Method::DELETE, &comment_uri, Some(&author), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (_, body) = app.send(Method::GET, &comments_uri, None, None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_comment_writes_leave_post_listing_cached() {
    let app = TestApp::new();
    let (token, _) = app.register("a@example.com").await;
    let post_id = app.create_post(&token, "A post").await;
    app.send(Method::GET, "/api/v1/blogs", None, None).await;

    app.create_comment(&token, &post_id, "Hello there").await;

    assert!(app.cache.contains("posts:all"));
}

#[tokio::test]
async fn test_account_update_and_delete() {
    let app = TestApp::new();
    let (token, _) = app.register("a@example.com").await;
    let (other, _) = app.register("b@example.com").await;
    let own_post = app.create_post(&token, "Mine").await;
    let other_post = app.create_post(&other, "Theirs").await;
    app.create_comment(&token, &other_post, "My comment").await;

    let (status, body) = app
        .send(Method::PUT, "/api/v1/users", Some(&token), Some(json!({"first_name": "Renamed"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["first_name"], "Renamed");
    assert_eq!(body["data"]["last_name"], "User");

    let (status, _) = app
        .send(Method::PUT, "/api/v1/users", Some(&token), Some(json!({"email": "B@example.com"})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    app.send(Method::GET, "/api/v1/blogs", None, None).await;
    app.send(Method::GET, &format!("/api/v1/blogs/{other_post}/comments"), None, None)
        .await;

    let (status, _) = app.send(Method::DELETE, "/api/v1/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!app.cache.contains("posts:all"));
    assert!(!app.cache.contains(&format!("comments:{other_post}")));

    let (_, body) = app.send(Method::GET, "/api/v1/blogs", None, None).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Theirs"]);

    let (status, _) = app
        .send(Method::GET, &format!("/api/v1/blogs/{own_post}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app
        .send(Method::GET, &format!("/api/v1/blogs/{other_post}/comments"), None, None)
        .await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_enveloped() {
    let app = TestApp::new();
    let (token, _) = app.register("a@example.com").await;

    let (status, body) = app
        .send(Method::POST, "/api/v1/blogs", Some(&token), Some(json!({"title": 5})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/v1/blogs").is_some());
}

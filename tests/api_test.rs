//! Route-level tests: thin handlers over the gateway, admin gating, and the
//! error mapping the admin console depends on.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use rewired::config::Config;
use rewired::routes;
use rewired::state::AppState;
use rewired::store::ContentStore;

fn app(config: Config, store: ContentStore) -> axum::Router {
    routes::router().with_state(AppState {
        store: Arc::new(store),
        config,
    })
}

fn dev_app(tmp: &TempDir) -> axum::Router {
    let config = Config::default();
    let store = ContentStore::open(&config, tmp.path());
    app(config, store)
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn stories_list_serves_samples_by_default() {
    let tmp = TempDir::new().unwrap();
    let response = dev_app(&tmp).oneshot(get("/api/stories")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stories = body_json(response).await;
    assert_eq!(stories.as_array().unwrap().len(), 3);
    assert_eq!(stories[0]["slug"], "from-trash-to-treasure");
}

#[tokio::test]
async fn story_lookup_by_slug_and_404() {
    let tmp = TempDir::new().unwrap();
    let app = dev_app(&tmp);

    let response = app
        .clone()
        .oneshot(get("/api/stories/the-library-laptop-drive"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["title"],
        "The Library Laptop Drive"
    );

    let response = app.oneshot(get("/api/stories/no-such-story")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_stories_normalizes_slugs_and_reports_tier() {
    let tmp = TempDir::new().unwrap();
    let app = dev_app(&tmp);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/stories",
            json!([{ "title": "Battery Safety!" }]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["stored"], "filesystem");

    let response = app.oneshot(get("/api/stories")).await.unwrap();
    let stories = body_json(response).await;
    assert_eq!(stories.as_array().unwrap().len(), 1);
    assert_eq!(stories[0]["slug"], "battery-safety");
}

#[tokio::test]
async fn admin_token_gates_writes_when_configured() {
    let tmp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.admin.token = Some("s3cret".into());
    let store = ContentStore::open(&config, tmp.path());
    let app = app(config, store);

    // Missing token
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/diy", json!([])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong token
    let mut request = json_request("PUT", "/api/diy", json!([]));
    request
        .headers_mut()
        .insert(header::AUTHORIZATION, "Bearer wrong".parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Right token
    let mut request = json_request("PUT", "/api/diy", json!([]));
    request
        .headers_mut()
        .insert(header::AUTHORIZATION, "Bearer s3cret".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn production_without_database_surfaces_read_only_error() {
    let tmp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.deployment.production = true;
    config.admin.token = Some("s3cret".into());
    let store = ContentStore::new(None, false, tmp.path(), true);
    let app = app(config, store);

    let mut request = json_request("PUT", "/api/stories", json!([]));
    request
        .headers_mut()
        .insert(header::AUTHORIZATION, "Bearer s3cret".parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("no durable storage"));

    // Reads still serve content
    let response = app.oneshot(get("/api/stories")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn site_patch_merges_over_defaults() {
    let tmp = TempDir::new().unwrap();
    let app = dev_app(&tmp);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/site",
            json!({ "hero": { "heading": "Fix it, don't bin it" } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/site")).await.unwrap();
    let site = body_json(response).await;
    assert_eq!(site["hero"]["heading"], "Fix it, don't bin it");
    // Untouched sections still carry defaults
    assert_eq!(site["nav"].as_array().unwrap().len(), 6);
    assert_eq!(site["stats"][0]["label"], "Devices rescued");
}

#[tokio::test]
async fn chat_post_list_and_react() {
    let tmp = TempDir::new().unwrap();
    let app = dev_app(&tmp);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/chat",
            json!({
                "story_slug": "from-trash-to-treasure",
                "name": "sam",
                "message": "loved this"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let posted = body_json(response).await;
    let id = posted["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/chat/{id}/reactions"),
            json!({ "emoji": "♻️" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["reactions"]["♻️"], 1);

    // Single-story listing
    let response = app
        .clone()
        .oneshot(get("/api/chat?story=from-trash-to-treasure"))
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Grouped listing
    let response = app.oneshot(get("/api/chat")).await.unwrap();
    let grouped = body_json(response).await;
    assert!(grouped["from-trash-to-treasure"].is_array());
}

#[tokio::test]
async fn chat_rejects_blank_messages() {
    let tmp = TempDir::new().unwrap();
    let response = dev_app(&tmp)
        .oneshot(json_request(
            "POST",
            "/api/chat",
            json!({ "story_slug": "x", "message": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("message"));
}

#[tokio::test]
async fn reacting_to_unknown_message_is_404() {
    let tmp = TempDir::new().unwrap();
    let response = dev_app(&tmp)
        .oneshot(json_request(
            "POST",
            "/api/chat/not-a-real-id/reactions",
            json!({ "emoji": "👍" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_active_storage_tier() {
    let tmp = TempDir::new().unwrap();
    let response = dev_app(&tmp).oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "filesystem");

    let mut config = Config::default();
    config.database.path = Some(tmp.path().join("content.db"));
    let store = ContentStore::open(&config, tmp.path());
    let response = app(config, store).oneshot(get("/api/health")).await.unwrap();
    assert_eq!(body_json(response).await["storage"], "database");
}

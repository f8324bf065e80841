//! Router tests against the in-memory store.

use super::{Message, LOGIN_SUCCESS};
use crate::{
    api::router,
    auth::AuthHandler,
    hashing::Argon2Hasher,
    store::{Account, CredentialStore, MemoryStore, StoreError},
};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let auth = AuthHandler::new(Arc::new(MemoryStore::new()), Arc::new(Argon2Hasher::new()))
        .unwrap();
    router(Arc::new(auth))
}

async fn send(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post(app: &Router, uri: &str, body: &Value) -> (StatusCode, String) {
    send(app, Method::POST, uri, Body::from(body.to_string())).await
}

fn message(body: &str) -> String {
    serde_json::from_str::<Message>(body).unwrap().message
}

#[tokio::test]
async fn register_returns_id_and_username() {
    let app = app();
    let (status, body) = post(
        &app,
        "/register",
        &json!({"username": "alice", "password": "p1"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(object["username"], "alice");
    assert!(object["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn duplicate_register_is_conflict() {
    let app = app();
    let credentials = json!({"username": "alice", "password": "p1"});

    let (first, _) = post(&app, "/register", &credentials).await;
    let (second, body) = post(&app, "/register", &credentials).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(message(&body), "Username already exists");
}

#[tokio::test]
async fn missing_fields_are_bad_requests() {
    let app = app();
    let bodies = [
        json!({}),
        json!({"username": "alice"}),
        json!({"password": "p1"}),
        json!({"username": "", "password": "p1"}),
    ];

    for uri in ["/register", "/login"] {
        for body in &bodies {
            let (status, text) = post(&app, uri, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body}");
            assert_eq!(message(&text), "Missing username or password");
        }

        let (status, _) = send(&app, Method::POST, uri, Body::from("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn login_after_register() {
    let app = app();
    let credentials = json!({"username": "alice", "password": "p1"});
    post(&app, "/register", &credentials).await;

    let (status, body) = post(&app, "/login", &credentials).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), LOGIN_SUCCESS);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = app();
    post(
        &app,
        "/register",
        &json!({"username": "alice", "password": "p1"}),
    )
    .await;

    let wrong_password = post(
        &app,
        "/login",
        &json!({"username": "alice", "password": "p2"}),
    )
    .await;
    let unknown_user = post(
        &app,
        "/login",
        &json!({"username": "nobody", "password": "p1"}),
    )
    .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(message(&wrong_password.1), "Invalid credentials");
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn responses_never_echo_secrets() {
    let app = app();
    let password = "s3cret-passw0rd";
    let credentials = json!({"username": "alice", "password": password});

    let responses = [
        post(&app, "/register", &credentials).await,
        post(&app, "/register", &credentials).await,
        post(&app, "/login", &credentials).await,
        post(
            &app,
            "/login",
            &json!({"username": "alice", "password": "wrong"}),
        )
        .await,
    ];

    for (_, body) in &responses {
        assert!(!body.contains(password));
        assert!(!body.contains("argon2"));
        assert!(!body.contains("password"));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_over_http() {
    let app = app();
    let credentials = json!({"username": "erin", "password": "p1"});

    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let app = app.clone();
            let credentials = credentials.clone();
            tokio::spawn(async move { post(&app, "/register", &credentials).await.0 })
        })
        .collect();

    let mut statuses = Vec::new();
    for task in tasks {
        statuses.push(task.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::CONFLICT)
            .count(),
        5
    );
}

struct DownStore;

#[async_trait]
impl CredentialStore for DownStore {
    async fn create_account(&self, _: &str, _: &str) -> Result<Account, StoreError> {
        Err(StoreError::Unavailable(
            "password authentication failed for user \"gatekeep\"".to_string(),
        ))
    }

    async fn find_by_username(&self, _: &str) -> Result<Option<Account>, StoreError> {
        Err(StoreError::Unavailable("pool timed out".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("pool timed out".to_string()))
    }
}

fn down_app() -> Router {
    let auth = AuthHandler::new(Arc::new(DownStore), Arc::new(Argon2Hasher::new()))
        .unwrap();
    router(Arc::new(auth))
}

#[tokio::test]
async fn store_outage_is_service_unavailable() {
    let app = down_app();
    let credentials = json!({"username": "alice", "password": "p1"});

    for uri in ["/register", "/login"] {
        let (status, body) = post(&app, uri, &credentials).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(message(&body), "Service unavailable");
        assert!(!body.contains("pool"));
        assert!(!body.contains("gatekeep"));
    }
}

#[tokio::test]
async fn health_reports_store_state() {
    let (status, body) = send(&app(), Method::GET, "/health", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["store"], "ok");
    assert_eq!(value["name"], env!("CARGO_PKG_NAME"));

    let (status, body) = send(&down_app(), Method::GET, "/health", Body::empty()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["store"], "error");
}

#[tokio::test]
async fn health_options_has_empty_body() {
    let (status, body) = send(&app(), Method::OPTIONS, "/health", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn request_id_is_set_on_responses() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-42")
    );
}

#[tokio::test]
async fn index_serves_login_page() {
    let (status, body) = send(&app(), Method::GET, "/", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/login"));
    assert!(body.contains("<form"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(
        &app(),
        Method::GET,
        "/api-docs/openapi.json",
        Body::empty(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/register"));
}

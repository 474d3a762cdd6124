//! End-to-end tests of the HTTP surface over in-memory stores.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde_json::Value;
use tower::ServiceExt;

use vault_api::{AppState, build_router};
use vault_auth::testing::{MemorySessionStore, PlainTextVerifier};
use vault_auth::{AuthoritySettings, TokenAuthority};
use vault_core::config::{AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig};
use vault_core::result::AppResult;
use vault_core::traits::{AssetStore, SystemClock};
use vault_core::types::AssetContent;

#[derive(Debug, Default)]
struct MemoryAssetStore {
    assets: Mutex<HashMap<(String, String), AssetContent>>,
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn get_asset(&self, login: &str, asset_name: &str) -> AppResult<Option<AssetContent>> {
        let assets = self.assets.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(assets.get(&(login.to_string(), asset_name.to_string())).cloned())
    }

    async fn put_asset(
        &self,
        login: &str,
        asset_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<()> {
        let mut assets = self.assets.lock().unwrap_or_else(PoisonError::into_inner);
        assets.insert(
            (login.to_string(), asset_name.to_string()),
            AssetContent {
                content_type: content_type.to_string(),
                data,
            },
        );
        Ok(())
    }

    async fn delete_asset(&self, login: &str, asset_name: &str) -> AppResult<bool> {
        let mut assets = self.assets.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(assets
            .remove(&(login.to_string(), asset_name.to_string()))
            .is_some())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

fn config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://localhost/unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
            query_timeout_ms: 500,
            delete_session_timeout_ms: 100,
        },
        auth: AuthConfig {
            hmac_secret: "apiTestSecret".to_string(),
            token_ttl_seconds: 3600,
            cache_cleanup_interval_seconds: 3600,
        },
        logging: LoggingConfig::default(),
    }
}

struct TestApp {
    router: Router,
    sessions: Arc<MemorySessionStore>,
}

async fn app() -> TestApp {
    let config = config();
    let sessions = Arc::new(MemorySessionStore::new());
    sessions.add_user("alice", "wonderland");
    sessions.add_user("bob", "builder");

    let authority = TokenAuthority::start(
        AuthoritySettings::from_config(&config.auth, &config.database),
        sessions.clone(),
        Arc::new(PlainTextVerifier),
        Arc::new(SystemClock),
    )
    .await;

    let state = AppState::new(
        config,
        Arc::new(authority),
        Arc::new(MemoryAssetStore::default()),
    );
    TestApp {
        router: build_router(state),
        sessions,
    }
}

fn basic(login: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{login}:{password}")))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>, Option<String>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec(), content_type)
}

async fn login(router: &Router, user: &str, password: &str) -> String {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth")
        .header(AUTHORIZATION, basic(user, password))
        .body(Body::empty())
        .unwrap();
    let (status, body, _) = send(router, request).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    json["access_token"].as_str().unwrap().to_string()
}

fn asset_request(method: Method, name: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(format!("/asset/{name}"));
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body).unwrap()
}

#[tokio::test]
async fn test_auth_returns_bearer_token() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth")
        .header(AUTHORIZATION, basic("alice", "wonderland"))
        .body(Body::empty())
        .unwrap();

    let (status, body, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["token_type"], "Bearer");
    assert!(json["expires_in"].as_i64().unwrap() > 0);
    let token = json["access_token"].as_str().unwrap();
    assert_eq!(
        app.sessions.active_session("alice").map(|r| r.token),
        Some(token.to_string())
    );
}

#[tokio::test]
async fn test_auth_without_basic_header_is_bad_request() {
    let app = app().await;
    for header in [None, Some("Bearer xyz"), Some("Basic !!!notbase64")] {
        let mut builder = Request::builder().method(Method::POST).uri("/auth");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (status, _, _) = send(&app.router, builder.body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "header {header:?}");
    }
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let app = app().await;
    let mut bodies = Vec::new();
    for (user, password) in [("alice", "wrong"), ("mallory", "wonderland")] {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth")
            .header(AUTHORIZATION, basic(user, password))
            .body(Body::empty())
            .unwrap();
        let (status, body, _) = send(&app.router, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        bodies.push(body);
    }
    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let app = app().await;
    app.sessions.set_unavailable(true);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth")
        .header(AUTHORIZATION, basic("alice", "wonderland"))
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_asset_round_trip_with_content_types() {
    let app = app().await;
    let token = login(&app.router, "alice", "wonderland").await;

    let put = Request::builder()
        .method(Method::POST)
        .uri("/asset/notes")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/text")
        .body(Body::from("hello"))
        .unwrap();
    let (status, body, _) = send(&app.router, put).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap()["status"], "ok");

    let get = asset_request(Method::GET, "notes", Some(&token), Body::empty());
    let (status, body, content_type) = send(&app.router, get).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"hello");
    assert_eq!(content_type.as_deref(), Some("application/text; charset=utf-8"));

    let put_json = Request::builder()
        .method(Method::POST)
        .uri("/asset/config")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"a":1}"#))
        .unwrap();
    assert_eq!(send(&app.router, put_json).await.0, StatusCode::OK);
    let get = asset_request(Method::GET, "config", Some(&token), Body::empty());
    let (_, body, content_type) = send(&app.router, get).await;
    assert_eq!(body, br#"{"a":1}"#);
    assert_eq!(content_type.as_deref(), Some("application/json; charset=utf-8"));
}

#[tokio::test]
async fn test_assets_are_scoped_per_user() {
    let app = app().await;
    let alice = login(&app.router, "alice", "wonderland").await;
    let bob = login(&app.router, "bob", "builder").await;

    let put = asset_request(Method::POST, "secret", Some(&alice), Body::from("mine"));
    assert_eq!(send(&app.router, put).await.0, StatusCode::OK);

    let get = asset_request(Method::GET, "secret", Some(&bob), Body::empty());
    assert_eq!(send(&app.router, get).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_asset() {
    let app = app().await;
    let token = login(&app.router, "alice", "wonderland").await;

    let put = asset_request(Method::POST, "logo", Some(&token), Body::from("{}"));
    assert_eq!(send(&app.router, put).await.0, StatusCode::OK);

    let delete = asset_request(Method::DELETE, "logo", Some(&token), Body::empty());
    assert_eq!(send(&app.router, delete).await.0, StatusCode::OK);

    let delete = asset_request(Method::DELETE, "logo", Some(&token), Body::empty());
    assert_eq!(send(&app.router, delete).await.0, StatusCode::NOT_FOUND);

    let get = asset_request(Method::GET, "logo", Some(&token), Body::empty());
    assert_eq!(send(&app.router, get).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_or_invalid_bearer_is_unauthorized() {
    let app = app().await;

    let get = asset_request(Method::GET, "logo", None, Body::empty());
    assert_eq!(send(&app.router, get).await.0, StatusCode::UNAUTHORIZED);

    let get = asset_request(Method::GET, "logo", Some("bm90LWEtdG9rZW4="), Body::empty());
    assert_eq!(send(&app.router, get).await.0, StatusCode::UNAUTHORIZED);

    let get = Request::builder()
        .uri("/asset/logo")
        .header(AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app.router, get).await.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_superseded_token_is_unauthorized() {
    let app = app().await;
    let first = login(&app.router, "alice", "wonderland").await;
    let second = login(&app.router, "alice", "wonderland").await;
    assert_ne!(first, second);

    let get = asset_request(Method::GET, "logo", Some(&first), Body::empty());
    assert_eq!(send(&app.router, get).await.0, StatusCode::UNAUTHORIZED);

    let get = asset_request(Method::GET, "logo", Some(&second), Body::empty());
    assert_eq!(send(&app.router, get).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_asset_name_is_bad_request() {
    let app = app().await;
    let token = login(&app.router, "alice", "wonderland").await;
    let get = asset_request(Method::GET, "bad-name", Some(&token), Body::empty());
    assert_eq!(send(&app.router, get).await.0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_sessions() {
    let app = app().await;
    login(&app.router, "alice", "wonderland").await;

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
    assert_eq!(json["active_sessions"], 1);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = app().await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

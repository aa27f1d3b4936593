#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use moodtunes_api::auth::jwt::JwtConfig;
use moodtunes_api::config::ServerConfig;
use moodtunes_api::routes;
use moodtunes_api::state::AppState;
use moodtunes_catalog::{CatalogLookup, MarketResolver};
use moodtunes_llm::{ChatModel, ChatRequest, LlmConfig, LlmError, OpenAiClient};

pub const TEST_PASSWORD: &str = "Sunny-Day-42";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        frontend_url: "http://localhost:5173".to_string(),
        password_reset_expiry_mins: 60,
        geoip_db_path: "/nonexistent/GeoLite2-Country.mmdb".to_string(),
        run_startup_refresh: false,
    }
}

/// An OpenAI client with no key: every call fails and the fallbacks run.
pub fn unconfigured_llm() -> Arc<dyn ChatModel> {
    Arc::new(OpenAiClient::new(LlmConfig {
        api_key: None,
        base_url: "http://127.0.0.1:9".to_string(),
        chat_model: "test-chat".to_string(),
        vision_model: "test-vision".to_string(),
    }))
}

/// Answers every request with the same text.
pub struct FixedReply(pub String);

#[async_trait]
impl ChatModel for FixedReply {
    async fn complete(&self, _request: &ChatRequest) -> Result<String, LlmError> {
        Ok(self.0.clone())
    }
}

pub fn fixed_llm(reply: &str) -> Arc<dyn ChatModel> {
    Arc::new(FixedReply(reply.to_string()))
}

/// Full application router without an LLM key or catalog credentials.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, unconfigured_llm())
}

/// Full application router with all middleware layers, mirroring `main.rs`.
pub fn build_test_app_with(pool: PgPool, llm: Arc<dyn ChatModel>) -> Router {
    let state = AppState::new(
        pool,
        test_config(),
        llm,
        CatalogLookup::disabled(),
        MarketResolver::without_geo(),
        None,
    );

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register `username` with [`TEST_PASSWORD`] and return an access token.
pub async fn register_and_login(app: &Router, username: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": TEST_PASSWORD,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "username": username, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Generate a fallback playlist for the token's user; returns the response body.
pub async fn create_playlist(app: &Router, token: &str) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/v1/moods/playlist",
        Some(token),
        serde_json::json!({ "mood_text": "restless but hopeful", "energy_level": 6 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

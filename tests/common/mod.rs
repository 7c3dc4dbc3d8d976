use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use user_api::config::AppConfig;
use user_api::state::AppState;
use user_api::{database, routes};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build the full application router over a fresh in-memory database.
/// A single pooled connection keeps the in-memory database alive for the
/// lifetime of the pool.
pub async fn test_app() -> Result<Router> {
    let mut config = AppConfig::default();
    config.web_service.jwt.secret = TEST_SECRET.to_string();
    config.web_service.jwt.token_expiration_time_in_minutes = 60;

    let options = SqliteConnectOptions::new().filename(":memory:");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    database::migrate(&pool).await?;

    let state = AppState::new(config, pool)?;
    Ok(routes::app(state))
}

/// Fetch a valid bearer token through the public token endpoint.
pub async fn bearer_token(app: &Router) -> Result<String> {
    let response = send(app, Method::GET, "/token/generate", None, None).await?;
    assert_eq!(response.status(), StatusCode::OK);

    body_string(response).await
}

/// Drive one request through the router.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Result<Response<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    Ok(app.clone().oneshot(request).await?)
}

pub async fn body_string(response: Response<Body>) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

pub async fn body_json(response: Response<Body>) -> Result<serde_json::Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

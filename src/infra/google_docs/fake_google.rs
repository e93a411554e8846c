//! In-process stand-in for Google's OAuth2 token endpoint, shared by the
//! Drive client tests and the end-to-end route tests.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Form, Json, Router};
use serde_json::json;
use std::collections::HashMap;

/// A throwaway RSA key that only ever signs assertions for the fake endpoint.
pub const TEST_PRIVATE_KEY: &str = include_str!("testdata/service_account_key.pem");

/// Token handed out by `/token`.
pub const FAKE_ACCESS_TOKEN: &str = "test-token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

async fn issue_token(Form(form): Form<HashMap<String, String>>) -> Response {
    let grant_ok = form.get("grant_type").map(String::as_str) == Some(JWT_BEARER_GRANT);
    let assertion_ok = form
        .get("assertion")
        .is_some_and(|jwt| jwt.split('.').filter(|part| !part.is_empty()).count() == 3);

    if !grant_ok || !assertion_ok {
        return (StatusCode::BAD_REQUEST, "invalid_grant").into_response();
    }

    Json(json!({
        "access_token": FAKE_ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600,
    }))
    .into_response()
}

async fn deny_token() -> Response {
    (StatusCode::UNAUTHORIZED, "invalid_client").into_response()
}

async fn empty_token() -> Json<serde_json::Value> {
    Json(json!({ "access_token": "", "token_type": "Bearer" }))
}

/// Serves `/token` (valid exchange), `/token/denied` (401) and `/token/empty`
/// (200 without a token). Everything else, including any Drive path, is 404.
/// Returns the base URL.
pub async fn spawn_fake_google() -> String {
    let router = Router::new()
        .route("/token", post(issue_token))
        .route("/token/denied", post(deny_token))
        .route("/token/empty", post(empty_token));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

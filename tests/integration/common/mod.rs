//! Common test utilities and fixtures for integration tests
//!
//! Each `TestApp` owns a fresh in-memory store, so tests are isolated and
//! need no database.

use anyhow::Result;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use laminas_collection::CollectionRepositories;
use laminas_common::Config;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Test application over an isolated in-memory store
pub struct TestApp {
    pub router: Router,
    pub repos: CollectionRepositories,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let repos = laminas_app::build_repositories(&Config::in_memory()).await?;
        let router = laminas_app::create_app(repos.clone());
        Ok(Self { router, repos })
    }

    /// Send a request and return the status with the parsed JSON body
    /// (`Value::Null` when the body is empty)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&b).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, parse_body(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    /// Create an album and return its id
    pub async fn create_album(&self, name: &str, total_laminas: i32) -> i64 {
        let (status, body) = self
            .request(
                Method::POST,
                "/v1/albums",
                Some(json!({"name": name, "total_laminas": total_laminas})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "album creation failed: {body}");
        body["id"].as_i64().unwrap()
    }

    /// Bulk-create laminas and return the created numbers
    pub async fn bulk_laminas(&self, album_id: i64, numeros: &[i32]) -> Vec<i64> {
        let (status, body) = self
            .request(
                Method::POST,
                &format!("/v1/albums/{album_id}/laminas/bulk"),
                Some(json!({ "numeros": numeros })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "bulk creation failed: {body}");
        numbers(&body)
    }

    pub async fn acquire(&self, album_id: i64, numero: i32) -> (StatusCode, Value) {
        self.request(
            Method::PATCH,
            &format!("/v1/albums/{album_id}/laminas/{numero}/acquire"),
            None,
        )
        .await
    }
}

/// Parse response body as JSON Value
pub async fn parse_body(response: axum::http::Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&body).unwrap()
}

/// `numero` of every lamina in a JSON array
pub fn numbers(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|l| l["numero"].as_i64().unwrap())
        .collect()
}

/// Assert the standard error envelope
pub fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["error"]["code"], code, "unexpected error body: {body}");
    assert!(body["error"]["message"].is_string());
}

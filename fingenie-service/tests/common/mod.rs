//! Test helpers for fingenie-service integration tests.
//!
//! Routers are built against a mock provider; nothing here talks to Gemini.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use fingenie_service::config::FingenieConfig;
use fingenie_service::services::providers::mock::{MockConnector, MockTextProvider};
use fingenie_service::startup::{build_router, AppState};
use secrecy::Secret;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const FRONTEND_ORIGIN: &str = "http://localhost:3000";

pub fn test_config(api_key: Option<&str>) -> FingenieConfig {
    let mut config = FingenieConfig::default();
    config.common.port = 0;
    config.gemini.api_key = api_key.map(|k| Secret::new(k.to_string()));
    config.cors.allowed_origin = FRONTEND_ORIGIN.to_string();
    config
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub connector: Arc<MockConnector>,
}

impl TestApp {
    pub fn new(api_key: Option<&str>, provider: MockTextProvider) -> Self {
        let connector = Arc::new(MockConnector::new(Arc::new(provider)));
        let state = AppState::new(test_config(api_key), connector.clone());
        let router = build_router(state.clone()).expect("Failed to build router");

        Self {
            router,
            state,
            connector,
        }
    }

    pub fn configured(provider: MockTextProvider) -> Self {
        Self::new(Some("test-api-key"), provider)
    }

    pub fn unconfigured() -> Self {
        Self::new(None, MockTextProvider::echo())
    }

    pub fn provider_calls(&self) -> usize {
        self.connector.provider().call_count()
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed to respond");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn ask(&self, body: &str) -> TestResponse {
        self.send(post_json("/ask", body)).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

//! Shared test helpers for integration tests.
//!
//! Tests run the real router over the in-memory identity store, so no
//! database is required. Argon2 parameters are lowered to keep the
//! suite fast; development mode is on so one-shot tokens are echoed
//! back through the API.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use foliogate_api::state::AppState;
use foliogate_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig,
};
use foliogate_database::repositories::memory::MemoryIdentityStore;
use foliogate_database::store::IdentityStore;

pub const PASSWORD: &str = "mauve-Teapot-41";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Identity store for direct inspection
    pub store: Arc<MemoryIdentityStore>,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        auth: AuthConfig {
            access_token_secret: "test-access-secret".to_string(),
            refresh_token_secret: "test-refresh-secret".to_string(),
            access_ttl_days: 7,
            refresh_ttl_days: 30,
            reset_token_ttl_minutes: 10,
            password_min_length: 8,
            argon2_memory_kib: 1024,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            development_mode: true,
        },
        logging: LoggingConfig::default(),
    }
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store.
    pub fn new() -> Self {
        let store = Arc::new(MemoryIdentityStore::new());
        let state = AppState::new(test_config(), Arc::clone(&store) as Arc<dyn IdentityStore>)
            .expect("Failed to build app state");

        Self {
            router: foliogate_api::router::build_router(state),
            store,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Register a user and return the response body.
    pub async fn register(&self, email: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "email": email,
                    "password": PASSWORD,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        response.body
    }

    /// Login and return the (access, refresh) token pair.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        let data = &response.body["data"];
        (
            data["access_token"].as_str().expect("No access_token").to_string(),
            data["refresh_token"].as_str().expect("No refresh_token").to_string(),
        )
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Common test utilities for integration tests
///
/// Builds a full router around a lazily-connected pool. Connections are only
/// attempted when a handler actually queries, so every code path in front of
/// the store (the auth layer, request validation, the token flows) is
/// exercised end-to-end without infrastructure.
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tasklane_api::app::{build_router, AppState};
use tasklane_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use tasklane_shared::auth::jwt::{create_token, Claims, TokenType};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context holding the app under test
pub struct TestContext {
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a test context with a router and a lazy (never-connected) pool
    pub fn new() -> anyhow::Result<Self> {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "postgresql://127.0.0.1:1/unreachable".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
                access_token_days: 7,
                refresh_token_days: 30,
            },
        };

        // Short acquire timeout so tests that do hit the store fail fast
        let db = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy(&config.database.url)?;

        let app = build_router(AppState::new(db, config.clone()));

        Ok(TestContext { app, config })
    }

    /// Issues a signed access token for the given identity
    pub fn access_token(&self, user_id: i64, email: &str) -> String {
        let claims = Claims::new(user_id, email, TokenType::Access);
        create_token(&claims, &self.config.jwt.secret).unwrap()
    }

    /// Issues a signed refresh token for the given identity
    pub fn refresh_token(&self, user_id: i64, email: &str) -> String {
        let claims = Claims::new(user_id, email, TokenType::Refresh);
        create_token(&claims, &self.config.jwt.secret).unwrap()
    }
}

/// Reads a response body into JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

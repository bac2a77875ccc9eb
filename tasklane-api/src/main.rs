//! # TaskLane API Server
//!
//! HTTP server for TaskLane, a personal task-tracking service.
//!
//! ## Architecture
//!
//! Built with Axum and backed by Postgres:
//! - Session flows (register, login, token refresh) with Argon2id password
//!   hashing and HS256 bearer tokens
//! - Ownership-scoped task CRUD with filtering, search, sort, and pagination
//! - A uniform `{ success, data?, error?, message? }` response envelope
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tasklane-api
//! ```

use tasklane_api::{
    app::{build_router, AppState},
    config::Config,
};
use tasklane_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklane_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskLane API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db_config = pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    };
    let pool = pool::create_pool(db_config).await?;

    migrations::run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

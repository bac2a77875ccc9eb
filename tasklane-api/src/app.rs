/// Application state and router builder
///
/// Defines the shared application state and builds the axum router with all
/// routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tasklane_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tasklane_shared::auth::guard;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via axum's `State` extractor; `Arc`
/// internally so cloning is cheap. Holds the only cross-request state in the
/// system: the pool and the immutable startup configuration.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the signing secret for credential operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete axum router
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                  # Health check (public)
/// └── /api/
///     ├── /auth/               # Session flows (public)
///     │   ├── POST /register
///     │   ├── POST /login
///     │   └── POST /refresh
///     └── /tasks/              # Task CRUD (bearer auth required)
///         ├── GET    /         # List (filter/search/sort/paginate)
///         ├── POST   /         # Create
///         ├── PUT    /:id      # Update (owner only)
///         └── DELETE /:id      # Delete (owner only)
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Session flows are public by definition
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    // Task operations all sit behind the access guard
    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bearer authentication middleware layer
///
/// Runs the access guard against the `Authorization` header and injects the
/// resulting [`guard::AuthUser`] into request extensions. Purely
/// token-based: no user lookup happens here.
async fn bearer_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let identity = guard::authenticate(header, state.jwt_secret())?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

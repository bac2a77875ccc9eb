/// Session flow endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Register a new user
/// - `POST /api/auth/login` - Login and receive access + refresh tokens
/// - `POST /api/auth/refresh` - Exchange a refresh token for a new access token
///
/// Each flow is a single linear pass with no intermediate persisted state.
/// Login fails uniformly for an unknown email and a wrong password so the
/// response never reveals which one was the problem.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::{created, ok},
    routes::collect_validation_errors,
};
use axum::{extract::State, response::Response, Json};
use axum::response::IntoResponse;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tasklane_shared::{
    auth::{jwt, password},
    models::user::{normalize_email, CreateUser, PublicUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 2, max = 255, message = "Name must be 2 to 255 characters"))]
    pub name: String,

    /// Email address (normalized to lowercase before storage)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (checked for strength below)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Register response payload
#[derive(Debug, Serialize)]
pub struct RegisterData {
    /// The created user, without its password hash
    pub user: PublicUser,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response payload
#[derive(Debug, Serialize)]
pub struct LoginData {
    /// Access token (short-lived)
    pub access_token: String,

    /// Refresh token (long-lived)
    pub refresh_token: String,

    /// The authenticated user, without its password hash
    pub user: PublicUser,
}

/// Refresh request
///
/// The token field is optional at the serde level so a missing field maps to
/// a validation failure in the envelope rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token previously issued by login
    pub refresh_token: Option<String>,
}

/// Refresh response payload
#[derive(Debug, Serialize)]
pub struct RefreshData {
    /// Newly issued access token
    pub access_token: String,

    /// The same refresh token, returned unchanged (no rotation)
    pub refresh_token: String,
}

/// Registers a new user
///
/// Validates input shape and password strength, normalizes the email, checks
/// uniqueness, hashes the password, and creates the account.
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `409 Conflict`: email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Response> {
    req.validate().map_err(collect_validation_errors)?;

    password::validate_password_strength(&req.password)
        .map_err(|e| ApiError::Validation(vec![e]))?;

    let email = normalize_email(&req.email);

    if User::find_by_email(&state.db, &email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    // A concurrent registration with the same email loses the race here and
    // surfaces as the same conflict via the unique constraint.
    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok(created(
        RegisterData { user: user.into() },
        "User registered successfully",
    )
    .into_response())
}

/// Authenticates a user and issues access + refresh tokens
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `401 Unauthorized`: unknown email or wrong password (indistinguishable)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Response> {
    req.validate().map_err(collect_validation_errors)?;

    let email = normalize_email(&req.email);

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let jwt_config = &state.config.jwt;
    let access_claims = jwt::Claims::with_lifetime(
        user.id,
        &user.email,
        jwt::TokenType::Access,
        Duration::days(jwt_config.access_token_days),
    );
    let refresh_claims = jwt::Claims::with_lifetime(
        user.id,
        &user.email,
        jwt::TokenType::Refresh,
        Duration::days(jwt_config.refresh_token_days),
    );

    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;
    let refresh_token = jwt::create_token(&refresh_claims, state.jwt_secret())?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(ok(
        LoginData {
            access_token,
            refresh_token,
            user: user.into(),
        },
        "Login successful",
    )
    .into_response())
}

/// Exchanges a refresh token for a new access token
///
/// The refresh token itself is not rotated and not checked against any
/// store; it is returned unchanged. Two refresh calls with the same valid
/// token both succeed.
///
/// # Errors
///
/// - `400 Bad Request`: refresh token missing from the payload
/// - `401 Unauthorized`: refresh token invalid or expired
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Response> {
    let refresh_token = req
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation(vec!["Refresh token is required".to_string()]))?;

    let claims = jwt::decode_token(&refresh_token, state.jwt_secret())
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    let access_claims = jwt::Claims::with_lifetime(
        claims.sub,
        &claims.email,
        jwt::TokenType::Access,
        Duration::days(state.config.jwt.access_token_days),
    );
    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;

    Ok(ok(
        RefreshData {
            access_token,
            refresh_token,
        },
        "Token renewed successfully",
    )
    .into_response())
}

/// Error handling for the API server
///
/// Provides a unified error type mapping onto the response envelope:
/// failures serialize as `{ "success": false, "error": <label>, "message":
/// <detail> }` with the appropriate HTTP status. Handlers return
/// `Result<T, ApiError>`.
///
/// Validation and ownership errors pass through unchanged from the component
/// that detected them; unexpected store errors are caught here, logged, and
/// downgraded so internal detail never reaches the caller.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or out-of-range input (400)
    Validation(Vec<String>),

    /// Missing, malformed, or invalid credential (401)
    Unauthorized(String),

    /// Unknown email or wrong password, deliberately indistinguishable (401)
    InvalidCredentials,

    /// Valid identity, wrong owner (403)
    Forbidden(String),

    /// No such record for any owner (404)
    NotFound(String),

    /// Duplicate unique key (409)
    Conflict(String),

    /// Store unreachable or unexpected failure (500); detail is logged, not
    /// surfaced
    Internal(String),
}

/// Failure envelope
///
/// `error` is a short machine-ish label; `message` is human-readable detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false on the failure path
    pub success: bool,

    /// Machine-readable error label (e.g. "validation_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => write!(f, "Validation failed: {}", errors.join(", ")),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                errors.join(", "),
            ),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Incorrect email or password".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Unique constraint on users.email surfaces as a conflict
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already registered".to_string());
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert guard rejections to API errors
impl From<tasklane_shared::auth::guard::GuardError> for ApiError {
    fn from(err: tasklane_shared::auth::guard::GuardError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// Convert password hashing errors to API errors
impl From<tasklane_shared::auth::password::PasswordError> for ApiError {
    fn from(err: tasklane_shared::auth::password::PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert token issuance errors to API errors
impl From<tasklane_shared::auth::jwt::JwtError> for ApiError {
    fn from(err: tasklane_shared::auth::jwt::JwtError) -> Self {
        ApiError::Internal(format!("Token operation failed: {}", err))
    }
}

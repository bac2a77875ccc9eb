/// Request access guard
///
/// Turns an inbound `Authorization` header into an authenticated identity,
/// or a rejection. The guard is pure with respect to the store: possession of
/// a validly signed, unexpired token is sufficient, and no user lookup is
/// performed. Given the same header and clock, the outcome is deterministic.
///
/// The HTTP layer wires [`authenticate`] into an axum middleware and maps
/// [`GuardError`] onto a 401 response.
///
/// # Example
///
/// ```
/// use tasklane_shared::auth::guard::authenticate;
/// use tasklane_shared::auth::jwt::{create_token, Claims, TokenType};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let token = create_token(&Claims::new(42, "user@example.com", TokenType::Access), secret)?;
///
/// let header = format!("Bearer {}", token);
/// let identity = authenticate(Some(&header), secret)?;
/// assert_eq!(identity.user_id, 42);
/// # Ok(())
/// # }
/// ```
use serde::Serialize;

use super::jwt::decode_token;

/// Authenticated identity attached to a request after the guard passes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    /// Numeric id of the authenticated user
    pub user_id: i64,

    /// Email carried by the credential at issuance time
    pub email: String,
}

/// Rejection reasons produced by the guard
///
/// Only two outcomes exist on purpose: a header that never contained a
/// usable token, and a token that failed verification. Both map to 401 at
/// the boundary.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GuardError {
    /// Authorization header absent or not in `Bearer <token>` shape
    #[error("Authentication token not provided")]
    MissingToken,

    /// Token failed signature or expiry verification
    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Extracts the token from a `Bearer <token>` header value
///
/// Requires exactly one space-delimited `Bearer` scheme prefix and a
/// non-empty token; anything else yields `None`.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let parts: Vec<&str> = header.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return None;
    }
    Some(parts[1])
}

/// Authenticates a request from its `Authorization` header value
///
/// 1. Require a `Bearer <token>` shaped header
/// 2. Verify signature and expiry via the credential codec
/// 3. Produce the identity carried by the credential
///
/// # Errors
///
/// - `GuardError::MissingToken` when the header is absent or malformed
/// - `GuardError::InvalidToken` when verification fails
pub fn authenticate(header: Option<&str>, secret: &str) -> Result<AuthUser, GuardError> {
    let token = header
        .and_then(extract_bearer_token)
        .ok_or(GuardError::MissingToken)?;

    let claims = decode_token(token, secret).ok_or(GuardError::InvalidToken)?;

    Ok(AuthUser {
        user_id: claims.sub,
        email: claims.email,
    })
}

/// Bearer credential issuance and verification
///
/// This module implements the signed, time-bounded credentials used to
/// authenticate users. Tokens are signed using HS256 (HMAC-SHA256) and carry
/// the owning user's id and email.
///
/// # Token Types
///
/// - **Access Token**: short-lived (default 7 days), presented on every task
///   operation
/// - **Refresh Token**: long-lived (default 30 days), used solely to obtain a
///   new access token
///
/// Both variants share the same payload shape and signing key; only the
/// default lifetime differs. Credentials are stateless: validity is
/// determined purely by signature and expiry, never by a server-side
/// revocation list.
///
/// # Example
///
/// ```
/// use tasklane_shared::auth::jwt::{create_token, decode_token, Claims, TokenType};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let claims = Claims::new(42, "user@example.com", TokenType::Access);
/// let token = create_token(&claims, secret)?;
///
/// let decoded = decode_token(&token, secret).expect("token should be valid");
/// assert_eq!(decoded.sub, 42);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Error type for token issuance
///
/// Verification never produces an error: [`decode_token`] collapses all
/// failure modes to `None`.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to serialize and sign the token
    #[error("Failed to create token: {0}")]
    CreateError(String),
}

/// Token type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token (short-lived, default 7 days)
    Access,

    /// Refresh token (long-lived, default 30 days)
    Refresh,
}

impl TokenType {
    /// Gets the default lifetime for this token type
    pub fn default_lifetime(&self) -> Duration {
        match self {
            TokenType::Access => Duration::days(7),
            TokenType::Refresh => Duration::days(30),
        }
    }

    /// Gets the token type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// Signed credential payload
///
/// # Claims
///
/// - `sub`: Subject (numeric user id)
/// - `email`: The user's email at issuance time
/// - `iat`: Issued at (Unix timestamp)
/// - `exp`: Expiration (Unix timestamp)
/// - `token_type`: Access or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - numeric user id
    pub sub: i64,

    /// Email address of the subject
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token type (access or refresh)
    pub token_type: TokenType,
}

impl Claims {
    /// Creates new claims with the default lifetime for the token type
    pub fn new(user_id: i64, email: &str, token_type: TokenType) -> Self {
        Self::with_lifetime(user_id, email, token_type, token_type.default_lifetime())
    }

    /// Creates claims with an explicit lifetime
    ///
    /// Used when the configured lifetime overrides the per-type default.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::Duration;
    /// use tasklane_shared::auth::jwt::{Claims, TokenType};
    ///
    /// let claims = Claims::with_lifetime(
    ///     7,
    ///     "user@example.com",
    ///     TokenType::Access,
    ///     Duration::days(1),
    /// );
    /// assert!(!claims.is_expired());
    /// ```
    pub fn with_lifetime(
        user_id: i64,
        email: &str,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + lifetime;

        Self {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            token_type,
        }
    }

    /// Checks whether the credential has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed token from claims
///
/// Signs the token using HS256 with the provided secret. The secret is
/// process-wide configuration loaded once at startup; rotating it invalidates
/// every previously issued credential.
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a token and extracts its claims
///
/// Checks the signature and expiry. Every failure path collapses to `None`:
/// a malformed token, a signature mismatch, and an expired token are
/// indistinguishable to the caller, so nothing is leaked about *why* a token
/// was rejected. This function never panics on attacker-controlled input.
///
/// # Example
///
/// ```
/// use tasklane_shared::auth::jwt::decode_token;
///
/// assert!(decode_token("not-a-token", "secret").is_none());
/// ```
pub fn decode_token(token: &str, secret: &str) -> Option<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    decode::<Claims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_token_type_default_lifetime() {
        assert_eq!(TokenType::Access.default_lifetime(), Duration::days(7));
        assert_eq!(TokenType::Refresh.default_lifetime(), Duration::days(30));
    }

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(42, "user@example.com", TokenType::Access);

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, Duration::days(7).num_seconds());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_with_custom_lifetime() {
        let claims =
            Claims::with_lifetime(42, "user@example.com", TokenType::Access, Duration::hours(1));

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_create_and_decode_token() {
        let claims = Claims::new(7, "ana@ex.com", TokenType::Access);
        let token = create_token(&claims, SECRET).expect("should create token");

        let decoded = decode_token(&token, SECRET).expect("should decode token");
        assert_eq!(decoded.sub, 7);
        assert_eq!(decoded.email, "ana@ex.com");
        assert_eq!(decoded.token_type, TokenType::Access);
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let claims = Claims::new(7, "ana@ex.com", TokenType::Access);
        let token = create_token(&claims, SECRET).expect("should create token");

        assert!(decode_token(&token, "wrong-secret").is_none());
    }

    #[test]
    fn test_decode_expired_token() {
        // Expired an hour ago, well past the default leeway
        let claims = Claims::with_lifetime(
            7,
            "ana@ex.com",
            TokenType::Access,
            Duration::seconds(-3600),
        );

        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).expect("should create token");
        assert!(decode_token(&token, SECRET).is_none());
    }

    #[test]
    fn test_decode_malformed_input() {
        assert!(decode_token("", SECRET).is_none());
        assert!(decode_token("garbage", SECRET).is_none());
        assert!(decode_token("a.b.c", SECRET).is_none());
        assert!(decode_token("eyJhbGciOiJIUzI1NiJ9.e30.", SECRET).is_none());
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let claims = Claims::new(9, "b@ex.com", TokenType::Refresh);
        let token = create_token(&claims, SECRET).unwrap();

        let decoded = decode_token(&token, SECRET).unwrap();
        assert_eq!(decoded.token_type, TokenType::Refresh);
        assert_eq!(decoded.exp - decoded.iat, Duration::days(30).num_seconds());
    }

    #[test]
    fn test_two_refreshed_access_tokens_carry_same_subject() {
        // Refresh is idempotent: two access tokens minted from the same
        // refresh claims decode to the same user id.
        let refresh = Claims::new(11, "c@ex.com", TokenType::Refresh);
        let refresh_token = create_token(&refresh, SECRET).unwrap();

        let decoded = decode_token(&refresh_token, SECRET).unwrap();
        let first = create_token(
            &Claims::new(decoded.sub, &decoded.email, TokenType::Access),
            SECRET,
        )
        .unwrap();
        let second = create_token(
            &Claims::new(decoded.sub, &decoded.email, TokenType::Access),
            SECRET,
        )
        .unwrap();

        assert_eq!(decode_token(&first, SECRET).unwrap().sub, 11);
        assert_eq!(decode_token(&second, SECRET).unwrap().sub, 11);
    }
}

/// Password hashing using Argon2id
///
/// This module provides one-way adaptive password hashing. Hashes are
/// self-salting: the same plaintext yields a different digest on every call,
/// and the salt travels inside the PHC-format output.
///
/// # Security
///
/// - **Algorithm**: Argon2id
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash
///
/// # Example
///
/// ```
/// use tasklane_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret_password_123")?;
///
/// assert!(verify_password("super_secret_password_123", &hash));
/// assert!(!verify_password("wrong_password", &hash));
/// # Ok(())
/// # }
/// ```
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),
}

/// Hashes a password using Argon2id with fixed cost parameters
///
/// # Returns
///
/// PHC string format hash (includes algorithm, parameters, salt, and hash),
/// e.g. `$argon2id$v=19$m=65536,t=3,p=4$...`
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored digest
///
/// Comparison is constant-time-equivalent (built into Argon2 verification).
/// A malformed or unparseable digest returns `false` rather than an error,
/// so callers get a single uniform rejection path.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    // Parameters are embedded in the hash
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Validates password strength
///
/// Registration requires passwords to be at least 8 characters with at least
/// one uppercase letter, one lowercase letter, and one digit.
///
/// # Example
///
/// ```
/// use tasklane_shared::auth::password::validate_password_strength;
///
/// assert!(validate_password_strength("Abcd1234").is_ok());
/// assert!(validate_password_strength("short1A").is_err());
/// assert!(validate_password_strength("alllowercase1").is_err());
/// ```
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_numeric()) {
        return Err("Password must contain at least one digit".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_format() {
        let hash = hash_password("test_password_123").expect("hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_never_equals_plaintext() {
        let password = "Abcd1234";
        let hash = hash_password(password).expect("hash should succeed");
        assert_ne!(hash, password);
    }

    #[test]
    fn test_same_plaintext_different_digests() {
        let password = "same_password";

        let hash1 = hash_password(password).expect("hash 1 should succeed");
        let hash2 = hash_password(password).expect("hash 2 should succeed");

        // Self-salting: different salts, different digests
        assert_ne!(hash1, hash2);
        assert!(verify_password(password, &hash1));
        assert!(verify_password(password, &hash2));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("correct_password").expect("hash should succeed");
        assert!(!verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_verify_password_empty() {
        let hash = hash_password("password").expect("hash should succeed");
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_verify_malformed_digest_returns_false() {
        assert!(!verify_password("password", ""));
        assert!(!verify_password("password", "not-a-hash"));
        assert!(!verify_password("password", "$argon2id$invalid"));
    }

    #[test]
    fn test_validate_password_strength_valid() {
        for password in ["Abcd1234", "Str0ngpass", "Password1"] {
            assert!(
                validate_password_strength(password).is_ok(),
                "password '{}' should be valid",
                password
            );
        }
    }

    #[test]
    fn test_validate_password_strength_too_short() {
        let result = validate_password_strength("Ab1");
        assert!(result.unwrap_err().contains("at least 8 characters"));
    }

    #[test]
    fn test_validate_password_strength_missing_classes() {
        assert!(validate_password_strength("alllower1")
            .unwrap_err()
            .contains("uppercase"));
        assert!(validate_password_strength("ALLUPPER1")
            .unwrap_err()
            .contains("lowercase"));
        assert!(validate_password_strength("NoDigitsHere")
            .unwrap_err()
            .contains("digit"));
    }
}

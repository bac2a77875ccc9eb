/// Authentication and authorization utilities
///
/// This module provides the secure authentication primitives for Tasklane:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength validation
/// - [`jwt`]: Signed bearer credential issuance and verification
/// - [`guard`]: Bearer-token extraction and request authentication
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Bearer Credentials**: HS256-signed tokens with configurable lifetimes
/// - **Uniform Failure**: token verification collapses every failure mode to
///   a single "invalid" outcome so callers cannot distinguish why a token
///   was rejected
pub mod guard;
pub mod jwt;
pub mod password;

/// API route handlers
///
/// Handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Session flows (register, login, refresh)
/// - `tasks`: Ownership-scoped task CRUD and listing
use crate::error::ApiError;

pub mod auth;
pub mod health;
pub mod tasks;

/// Flattens validator output into the envelope's message list
pub(crate) fn collect_validation_errors(errors: validator::ValidationErrors) -> ApiError {
    let messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field))
            })
        })
        .collect();

    ApiError::Validation(messages)
}

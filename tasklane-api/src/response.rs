/// Success envelope helpers
///
/// Every successful response is wrapped in the same envelope as failures:
/// `{ "success": true, "data": ..., "message": ... }`. The failure side of
/// the envelope lives in [`crate::error`].
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    /// Always true on the success path
    pub success: bool,

    /// Response payload
    pub data: T,

    /// Optional human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Wraps a payload in the success envelope with a 200 status
pub fn ok<T: Serialize>(data: T, message: &str) -> impl IntoResponse {
    envelope(StatusCode::OK, data, message)
}

/// Wraps a payload in the success envelope with a 201 status
pub fn created<T: Serialize>(data: T, message: &str) -> impl IntoResponse {
    envelope(StatusCode::CREATED, data, message)
}

fn envelope<T: Serialize>(status: StatusCode, data: T, message: &str) -> impl IntoResponse {
    (
        status,
        Json(SuccessResponse {
            success: true,
            data,
            message: Some(message.to_string()),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = SuccessResponse {
            success: true,
            data: serde_json::json!({ "id": 1 }),
            message: Some("Created".to_string()),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["message"], "Created");
    }

    #[test]
    fn test_message_omitted_when_none() {
        let body = SuccessResponse {
            success: true,
            data: 42,
            message: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ok((), "done").into_response().status(),
            StatusCode::OK
        );
        assert_eq!(
            created((), "made").into_response().status(),
            StatusCode::CREATED
        );
    }
}

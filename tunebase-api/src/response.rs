/// Uniform response envelope
///
/// Every endpoint, success or failure, answers with the same JSON shape:
///
/// ```json
/// {
///   "status": 200,
///   "data": { ... } | [ ... ] | null,
///   "message": "Artists retrieved successfully.",
///   "error": null
/// }
/// ```
///
/// The `error` field is serialized but always null; failure detail goes
/// to the server log, never to the client. Update endpoints answer 204
/// with no body at all and bypass the envelope (see the route handlers).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// Response envelope carried by every JSON-bodied endpoint
#[derive(Debug, Serialize)]
pub struct Envelope {
    /// HTTP status, duplicated in the body
    pub status: u16,

    /// Payload, or null
    pub data: Value,

    /// Human-readable outcome message
    pub message: String,

    /// Always null
    pub error: Option<()>,
}

impl Envelope {
    /// Builds an envelope with an explicit status and payload
    pub fn new(status: StatusCode, data: Value, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            data,
            message: message.into(),
            error: None,
        }
    }

    /// 200 with a serialized payload
    pub fn ok<T: Serialize>(data: &T, message: impl Into<String>) -> Self {
        let data = serde_json::to_value(data).unwrap_or(Value::Null);
        Self::new(StatusCode::OK, data, message)
    }

    /// 200 with a null payload
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, Value::Null, message)
    }

    /// 201 with a null payload
    pub fn created(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CREATED, Value::Null, message)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_serializes_null_error() {
        let envelope = Envelope::ok_empty("User logged out successfully.");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["status"], 200);
        assert!(json["data"].is_null());
        assert_eq!(json["message"], "User logged out successfully.");
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_envelope_created_has_null_data() {
        let envelope = Envelope::created("User created successfully.");
        assert_eq!(envelope.status, 201);
        assert!(envelope.data.is_null());
    }

    #[test]
    fn test_envelope_ok_carries_payload() {
        let envelope = Envelope::ok(&json!({"token": "abc"}), "Login successful.");
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.data["token"], "abc");
    }
}

/// Error handling for the API server
///
/// A single error type that every handler returns. Each variant maps to
/// an HTTP status and renders through the response envelope with a null
/// payload. There is deliberately no 500 surface: unexpected database
/// failures answer 400 with a generic message and the detail is logged
/// server-side.
///
/// # Example
///
/// ```no_run
/// use tunebase_api::error::{ApiError, ApiResult};
/// use tunebase_api::response::Envelope;
///
/// async fn handler() -> ApiResult<Envelope> {
///     Err(ApiError::NotFound("Artist not found.".to_string()))
/// }
/// ```

use crate::response::Envelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;
use tunebase_shared::auth::{middleware::AuthError, password::PasswordError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request (400); also the catch-all for unexpected failures
    #[error("{0}")]
    BadRequest(String),

    /// Unauthorized (401); always the uniform auth-failure message
    #[error("{0}")]
    Unauthorized(String),

    /// Forbidden (403); role policy violations
    #[error("{0}")]
    Forbidden(String),

    /// Not found (404); covers missing and cross-tenant alike
    #[error("{0}")]
    NotFound(String),

    /// Conflict (409); duplicate email
    #[error("{0}")]
    Conflict(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        Envelope::new(status, Value::Null, self.to_string()).into_response()
    }
}

/// Converts sqlx errors to API errors
///
/// The duplicate-email constraint surfaces as a conflict; everything
/// else collapses to a generic 400 with the detail logged.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found.".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already exists.".to_string());
                    }
                }
                tracing::error!("Database error: {}", db_err);
                ApiError::BadRequest("Bad Request".to_string())
            }
            _ => {
                tracing::error!("Database error: {}", err);
                ApiError::BadRequest("Bad Request".to_string())
            }
        }
    }
}

/// Converts auth-gate errors to the uniform 401
///
/// Missing header, malformed header, bad signature, and expiry are all
/// indistinguishable to the client.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        tracing::debug!("Authentication failed: {}", err);
        ApiError::Unauthorized("Unauthorized Access".to_string())
    }
}

/// Converts password hashing failures to the generic 400
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!("Password operation failed: {}", err);
        ApiError::BadRequest("Bad Request".to_string())
    }
}

/// Converts token creation failures to the generic 400
impl From<tunebase_shared::auth::jwt::JwtError> for ApiError {
    fn from(err: tunebase_shared::auth::jwt::JwtError) -> Self {
        tracing::error!("Token operation failed: {}", err);
        ApiError::BadRequest("Bad Request".to_string())
    }
}

/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /signup` - Create an organization and its first user
/// - `POST /login` - Authenticate and get a bearer token
/// - `GET /logout` - Stateless acknowledgment
///
/// Signup carries the bootstrap rule: the very first user in the whole
/// system becomes the admin, every later signup becomes a viewer. Login
/// deliberately distinguishes an unknown email (404) from a wrong
/// password (400); both messages are load-bearing for API clients.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::Envelope,
    routes::validate_request,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tunebase_shared::{
    auth::{jwt, password},
    models::user::User,
};
use validator::Validate;

/// Default organization name when signup omits one
const DEFAULT_ORG_NAME: &str = "Default Test Organization";

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address, unique across all organizations
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional organization name
    #[validate(length(max = 255, message = "Organization name must be at most 255 characters"))]
    pub organization: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Signup endpoint
///
/// Creates the organization and the user in one transaction.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already exists
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<Envelope> {
    validate_request(&req)?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already exists.".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let org_name = req.organization.as_deref().unwrap_or(DEFAULT_ORG_NAME);

    let user = User::register(&state.db, &req.email, &password_hash, org_name).await?;

    tracing::info!(user_id = %user.user_id, org_id = %user.org_id, "User registered");

    Ok(Envelope::created("User created successfully."))
}

/// Login endpoint
///
/// # Errors
///
/// - `404 Not Found`: Unknown email
/// - `400 Bad Request`: Wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Envelope> {
    validate_request(&req)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::BadRequest("Invalid credentials.".to_string()));
    }

    let role = user
        .get_role()
        .ok_or_else(|| ApiError::BadRequest("Bad Request".to_string()))?;

    let claims = jwt::Claims::new(user.user_id, user.org_id, role);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Envelope::ok(&json!({ "token": token }), "Login successful."))
}

/// Logout endpoint
///
/// Tokens are stateless, so there is nothing to revoke server-side;
/// clients discard the token.
pub async fn logout() -> Envelope {
    Envelope::ok_empty("User logged out successfully.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_rejects_bad_email() {
        let req = SignupRequest {
            email: "not-an-email".to_string(),
            password: "long-enough-password".to_string(),
            organization: None,
        };

        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_signup_request_rejects_short_password() {
        let req = SignupRequest {
            email: "user@example.com".to_string(),
            password: "short".to_string(),
            organization: None,
        };

        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_signup_request_accepts_missing_organization() {
        let req = SignupRequest {
            email: "user@example.com".to_string(),
            password: "long-enough-password".to_string(),
            organization: None,
        };

        assert!(validate_request(&req).is_ok());
        assert_eq!(
            req.organization.as_deref().unwrap_or(DEFAULT_ORG_NAME),
            DEFAULT_ORG_NAME
        );
    }

    #[tokio::test]
    async fn test_logout_is_stateless_acknowledgment() {
        let envelope = logout().await;
        assert_eq!(envelope.status, 200);
        assert!(envelope.data.is_null());
        assert_eq!(envelope.message, "User logged out successfully.");
    }
}

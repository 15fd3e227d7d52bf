/// Request authentication for Axum
///
/// This module provides the identity context attached to every
/// authenticated request and the bearer-token verification behind it.
/// The axum middleware layer in the API crate calls [`authenticate`]
/// and inserts the resulting [`AuthContext`] into request extensions.
///
/// Every failure mode (missing header, malformed header, invalid
/// signature, expired token) maps to the same `AuthError` surface so
/// the HTTP layer can render a single uniform Unauthorized response
/// without leaking which check failed.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use tunebase_shared::auth::jwt::{create_token, Claims};
/// use tunebase_shared::auth::middleware::authenticate;
/// use tunebase_shared::models::user::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "your-secret-key";
/// let claims = Claims::new(Uuid::new_v4(), Uuid::new_v4(), Role::Viewer);
/// let token = create_token(&claims, secret)?;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     header::AUTHORIZATION,
///     HeaderValue::from_str(&format!("Bearer {}", token))?,
/// );
///
/// let auth = authenticate(&headers, secret).unwrap();
/// assert_eq!(auth.user_id, claims.sub);
/// # Ok(())
/// # }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, Claims};
use crate::models::user::Role;

/// Identity context attached to request extensions after authentication
///
/// Handlers extract it with Axum's `Extension` extractor. The `org_id`
/// is the tenant scope for every catalog operation; it is never taken
/// from the request body or path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// The user's organization (tenant scope)
    pub org_id: Uuid,

    /// The user's role at token issuance
    pub role: Role,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            org_id: claims.org_id,
            role: claims.role,
        }
    }
}

/// Error type for request authentication
///
/// The variants exist for logging; callers collapse all of them into
/// one uniform Unauthorized response.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing or non-UTF8 Authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Header present but not a Bearer token
    #[error("Invalid authorization header format")]
    InvalidFormat,

    /// Token validation failed (bad signature, expired, wrong issuer)
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Verifies the `Authorization: Bearer <token>` header and produces an
/// [`AuthContext`]
///
/// # Errors
///
/// Returns `AuthError` if the header is missing, malformed, or carries
/// a token that fails validation. Callers must render every variant
/// identically (security-by-uniformity).
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)?;

    let claims =
        validate_token(token, secret).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(AuthContext::from_claims(&claims))
}

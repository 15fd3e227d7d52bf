/// API route handlers
///
/// One module per resource. Public routes (`auth`, `health`) take no
/// identity; everything else extracts the `AuthContext` injected by the
/// JWT layer and scopes all work to `auth.org_id`.

use crate::error::ApiError;
use validator::Validate;

pub mod albums;
pub mod artists;
pub mod auth;
pub mod favorites;
pub mod health;
pub mod tracks;
pub mod users;

/// Default page size for listings
pub(crate) const DEFAULT_LIMIT: i64 = 5;

/// Runs derive-based validation, collapsing failures to a 400
///
/// The first declared message wins; clients get one reason at a time.
pub(crate) fn validate_request<T: Validate>(req: &T) -> Result<(), ApiError> {
    req.validate().map_err(|e| {
        let message = e
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .filter_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| "Bad Request".to_string());
        ApiError::BadRequest(message)
    })
}

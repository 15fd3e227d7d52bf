/// User management endpoints
///
/// # Endpoints
///
/// - `GET /users` - List users in the caller's organization
/// - `POST /users/add-user` - Create a user in the caller's organization
/// - `DELETE /users/:id` - Delete a non-admin user
/// - `PUT /users/update-password` - Change the caller's own password
///
/// The role policy lives here: no admin can ever be created through
/// add-user, and no admin can ever be deleted, whoever asks. Delete
/// targets outside the caller's organization come back as not found.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::Envelope,
    routes::{validate_request, DEFAULT_LIMIT},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tunebase_shared::{
    auth::{middleware::AuthContext, password},
    models::user::{Role, User},
};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for the user listing
#[derive(Debug, Deserialize)]
pub struct ListUsersParams {
    /// Optional role filter
    pub role: Option<Role>,

    /// Page size (default 5)
    pub limit: Option<i64>,

    /// Page start (default 0)
    pub offset: Option<i64>,
}

/// Add-user request
#[derive(Debug, Deserialize, Validate)]
pub struct AddUserRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Requested role; admin is always refused
    pub role: Role,
}

/// Update-password request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    /// Current password, verified against the stored digest
    pub old_password: String,

    /// Replacement password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Lists users in the caller's organization
pub async fn list_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListUsersParams>,
) -> ApiResult<Envelope> {
    let users = User::list_by_org(
        &state.db,
        auth.org_id,
        params.role,
        params.limit.unwrap_or(DEFAULT_LIMIT),
        params.offset.unwrap_or(0),
    )
    .await?;

    Ok(Envelope::ok(&users, "Users retrieved successfully."))
}

/// Creates a user in the caller's organization
///
/// # Errors
///
/// - `403 Forbidden`: Requested role is admin, whoever the caller is
/// - `409 Conflict`: Email already exists
pub async fn add_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<AddUserRequest>,
) -> ApiResult<Envelope> {
    if req.role == Role::Admin {
        return Err(ApiError::Forbidden("Cannot create admin users".to_string()));
    }

    validate_request(&req)?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already exists.".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    User::create(&state.db, auth.org_id, &req.email, &password_hash, req.role).await?;

    Ok(Envelope::created("User created successfully."))
}

/// Deletes a user in the caller's organization
///
/// # Errors
///
/// - `404 Not Found`: Missing or cross-tenant target
/// - `403 Forbidden`: Target is the admin
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Envelope> {
    let target = User::find_scoped(&state.db, user_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    if target.get_role() == Some(Role::Admin) {
        return Err(ApiError::Forbidden("Cannot delete admin user.".to_string()));
    }

    User::delete(&state.db, user_id).await?;

    Ok(Envelope::ok_empty("User deleted successfully."))
}

/// Changes the caller's own password
///
/// Always operates on the authenticated identity; no target id is
/// accepted.
///
/// # Errors
///
/// - `400 Bad Request`: Old password does not verify
pub async fn update_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdatePasswordRequest>,
) -> ApiResult<StatusCode> {
    validate_request(&req)?;

    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    let valid = password::verify_password(&req.old_password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::BadRequest("Invalid old password.".to_string()));
    }

    let password_hash = password::hash_password(&req.new_password)?;
    User::update_password(&state.db, auth.user_id, &password_hash).await?;

    Ok(StatusCode::NO_CONTENT)
}

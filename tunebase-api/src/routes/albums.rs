/// Album catalog endpoints
///
/// # Endpoints
///
/// - `GET /albums` - List albums (filters: artist_id, hidden)
/// - `GET /albums/:id` - Get one album
/// - `POST /albums/add-album` - Create under an owned artist
/// - `PUT /albums/:id` - Full-field update
/// - `DELETE /albums/:id` - Delete, cascading tracks
///
/// Albums inherit tenant scope through their artist. Creation checks
/// the named artist against the caller's organization first and reports
/// a foreign artist as 404, indistinguishable from a missing one.

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
    auth::middleware::AuthContext,
    models::{
        album::{Album, AlbumFilter},
        artist::Artist,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for the album listing
#[derive(Debug, Deserialize)]
pub struct ListAlbumsParams {
    /// Filter by owning artist
    pub artist_id: Option<Uuid>,

    /// Filter by hidden flag
    pub hidden: Option<bool>,

    /// Page size (default 5)
    pub limit: Option<i64>,

    /// Page start (default 0)
    pub offset: Option<i64>,
}

/// Album create request body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAlbumRequest {
    /// Owning artist, must be in the caller's organization
    pub artist_id: Uuid,

    /// Album name
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    /// Release year
    pub year: i32,

    /// Hidden flag
    #[serde(default)]
    pub hidden: bool,
}

/// Album update request body; the owning artist is not changeable
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAlbumRequest {
    /// Album name
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    /// Release year
    pub year: i32,

    /// Hidden flag
    #[serde(default)]
    pub hidden: bool,
}

/// Lists albums in the caller's organization
pub async fn list_albums(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListAlbumsParams>,
) -> ApiResult<Envelope> {
    let filter = AlbumFilter {
        artist_id: params.artist_id,
        hidden: params.hidden,
    };

    let albums = Album::list(
        &state.db,
        auth.org_id,
        filter,
        params.limit.unwrap_or(DEFAULT_LIMIT),
        params.offset.unwrap_or(0),
    )
    .await?;

    Ok(Envelope::ok(&albums, "Albums retrieved successfully."))
}

/// Gets a single album
pub async fn get_album(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(album_id): Path<Uuid>,
) -> ApiResult<Envelope> {
    let album = Album::find_scoped(&state.db, album_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Album not found.".to_string()))?;

    Ok(Envelope::ok(&album, "Album retrieved successfully."))
}

/// Creates an album under an artist the caller owns
///
/// # Errors
///
/// - `404 Not Found`: Artist missing or in another organization
pub async fn add_album(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateAlbumRequest>,
) -> ApiResult<Envelope> {
    validate_request(&req)?;

    if !Artist::exists_scoped(&state.db, req.artist_id, auth.org_id).await? {
        return Err(ApiError::NotFound("Artist not found.".to_string()));
    }

    Album::create(&state.db, req.artist_id, &req.name, req.year, req.hidden).await?;

    Ok(Envelope::created("Album created successfully."))
}

/// Full-field update of an album
///
/// # Errors
///
/// - `404 Not Found`: Missing or cross-tenant album
pub async fn update_album(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(album_id): Path<Uuid>,
    Json(req): Json<UpdateAlbumRequest>,
) -> ApiResult<StatusCode> {
    validate_request(&req)?;

    let updated = Album::update_scoped(
        &state.db,
        album_id,
        auth.org_id,
        &req.name,
        req.year,
        req.hidden,
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound("Album not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes an album; its tracks cascade
pub async fn delete_album(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(album_id): Path<Uuid>,
) -> ApiResult<Envelope> {
    let name = Album::name_scoped(&state.db, album_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Album not found.".to_string()))?;

    Album::delete(&state.db, album_id).await?;

    Ok(Envelope::ok_empty(format!(
        "Album:{} deleted successfully.",
        name
    )))
}

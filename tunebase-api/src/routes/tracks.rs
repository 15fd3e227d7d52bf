/// Track catalog endpoints
///
/// # Endpoints
///
/// - `GET /tracks` - List tracks (filters: artist_id, album_id, hidden)
/// - `GET /tracks/:id` - Get one track
/// - `POST /tracks/add-track` - Create under an owned artist and album
/// - `PUT /tracks/:id` - Full-field update
/// - `DELETE /tracks/:id` - Delete
///
/// Creation runs two parent checks in order: the artist must be in the
/// caller's organization, then the album must belong to that exact
/// artist. A valid album paired with the wrong artist is rejected as
/// "Album not found.", same as a missing one.

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
        album::Album,
        artist::Artist,
        track::{Track, TrackFilter},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for the track listing
#[derive(Debug, Deserialize)]
pub struct ListTracksParams {
    /// Filter by owning artist
    pub artist_id: Option<Uuid>,

    /// Filter by owning album
    pub album_id: Option<Uuid>,

    /// Filter by hidden flag
    pub hidden: Option<bool>,

    /// Page size (default 5)
    pub limit: Option<i64>,

    /// Page start (default 0)
    pub offset: Option<i64>,
}

/// Track create request body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrackRequest {
    /// Owning artist, must be in the caller's organization
    pub artist_id: Uuid,

    /// Owning album, must belong to `artist_id`
    pub album_id: Uuid,

    /// Track name
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    /// Duration in seconds
    pub duration: i32,

    /// Hidden flag
    #[serde(default)]
    pub hidden: bool,
}

/// Track update request body; parents are not changeable
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTrackRequest {
    /// Track name
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    /// Duration in seconds
    pub duration: i32,

    /// Hidden flag
    #[serde(default)]
    pub hidden: bool,
}

/// Lists tracks in the caller's organization
pub async fn list_tracks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListTracksParams>,
) -> ApiResult<Envelope> {
    let filter = TrackFilter {
        artist_id: params.artist_id,
        album_id: params.album_id,
        hidden: params.hidden,
    };

    let tracks = Track::list(
        &state.db,
        auth.org_id,
        filter,
        params.limit.unwrap_or(DEFAULT_LIMIT),
        params.offset.unwrap_or(0),
    )
    .await?;

    Ok(Envelope::ok(&tracks, "Tracks retrieved successfully."))
}

/// Gets a single track
pub async fn get_track(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(track_id): Path<Uuid>,
) -> ApiResult<Envelope> {
    let track = Track::find_scoped(&state.db, track_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Track not found.".to_string()))?;

    Ok(Envelope::ok(&track, "Track retrieved successfully."))
}

/// Creates a track under an owned artist and that artist's album
///
/// # Errors
///
/// - `404 Not Found`: Artist missing/foreign, or album not owned by the
///   named artist
pub async fn add_track(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTrackRequest>,
) -> ApiResult<Envelope> {
    validate_request(&req)?;

    if !Artist::exists_scoped(&state.db, req.artist_id, auth.org_id).await? {
        return Err(ApiError::NotFound("Artist not found.".to_string()));
    }

    if !Album::belongs_to_artist(&state.db, req.album_id, req.artist_id).await? {
        return Err(ApiError::NotFound("Album not found.".to_string()));
    }

    Track::create(
        &state.db,
        req.artist_id,
        req.album_id,
        &req.name,
        req.duration,
        req.hidden,
    )
    .await?;

    Ok(Envelope::created("Track created successfully."))
}

/// Full-field update of a track
///
/// # Errors
///
/// - `404 Not Found`: Missing or cross-tenant track
pub async fn update_track(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(track_id): Path<Uuid>,
    Json(req): Json<UpdateTrackRequest>,
) -> ApiResult<StatusCode> {
    validate_request(&req)?;

    let updated = Track::update_scoped(
        &state.db,
        track_id,
        auth.org_id,
        &req.name,
        req.duration,
        req.hidden,
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound("Track not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a track
pub async fn delete_track(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(track_id): Path<Uuid>,
) -> ApiResult<Envelope> {
    let name = Track::name_scoped(&state.db, track_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Track not found.".to_string()))?;

    Track::delete(&state.db, track_id).await?;

    Ok(Envelope::ok_empty(format!(
        "Track:{} deleted successfully.",
        name
    )))
}

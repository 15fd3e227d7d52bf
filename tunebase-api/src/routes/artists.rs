/// Artist catalog endpoints
///
/// # Endpoints
///
/// - `GET /artists` - List artists (filters: grammy, hidden)
/// - `GET /artists/:id` - Get one artist
/// - `POST /artists/add-artist` - Create an artist
/// - `PUT /artists/:id` - Full-field update
/// - `DELETE /artists/:id` - Delete, cascading albums and tracks
///
/// Everything is scoped to the caller's organization; a cross-tenant id
/// answers 404 exactly like a missing one.

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
use serde_json::json;
use tunebase_shared::{
    auth::middleware::AuthContext,
    models::artist::{Artist, ArtistFilter},
};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for the artist listing
#[derive(Debug, Deserialize)]
pub struct ListArtistsParams {
    /// Filter by exact grammy count
    pub grammy: Option<i32>,

    /// Filter by hidden flag
    pub hidden: Option<bool>,

    /// Page size (default 5)
    pub limit: Option<i64>,

    /// Page start (default 0)
    pub offset: Option<i64>,
}

/// Artist create/update request body
#[derive(Debug, Deserialize, Validate)]
pub struct ArtistBody {
    /// Artist name
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    /// Number of Grammy awards
    #[serde(default)]
    pub grammy: i32,

    /// Hidden flag
    #[serde(default)]
    pub hidden: bool,
}

/// Lists artists in the caller's organization
pub async fn list_artists(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListArtistsParams>,
) -> ApiResult<Envelope> {
    let filter = ArtistFilter {
        grammy: params.grammy,
        hidden: params.hidden,
    };

    let artists = Artist::list(
        &state.db,
        auth.org_id,
        filter,
        params.limit.unwrap_or(DEFAULT_LIMIT),
        params.offset.unwrap_or(0),
    )
    .await?;

    Ok(Envelope::ok(&artists, "Artists retrieved successfully."))
}

/// Gets a single artist
pub async fn get_artist(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(artist_id): Path<Uuid>,
) -> ApiResult<Envelope> {
    let artist = Artist::find_scoped(&state.db, artist_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Artist not found.".to_string()))?;

    Ok(Envelope::ok(&artist, "Artist retrieved successfully."))
}

/// Creates an artist in the caller's organization
pub async fn add_artist(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ArtistBody>,
) -> ApiResult<Envelope> {
    validate_request(&req)?;

    Artist::create(&state.db, auth.org_id, &req.name, req.grammy, req.hidden).await?;

    Ok(Envelope::created("Artist created successfully."))
}

/// Full-field update of an artist
///
/// # Errors
///
/// - `404 Not Found`: Missing or cross-tenant artist
pub async fn update_artist(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(artist_id): Path<Uuid>,
    Json(req): Json<ArtistBody>,
) -> ApiResult<StatusCode> {
    validate_request(&req)?;

    let updated = Artist::update_scoped(
        &state.db,
        artist_id,
        auth.org_id,
        &req.name,
        req.grammy,
        req.hidden,
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound("Artist not found.".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes an artist
///
/// Fetches the name first so the confirmation can include it; albums
/// and tracks cascade at the database.
pub async fn delete_artist(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(artist_id): Path<Uuid>,
) -> ApiResult<Envelope> {
    let name = Artist::name_scoped(&state.db, artist_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Artist not found.".to_string()))?;

    Artist::delete(&state.db, artist_id).await?;

    Ok(Envelope::ok(
        &json!({ "artist_id": artist_id }),
        format!("Artist:{} deleted successfully.", name),
    ))
}

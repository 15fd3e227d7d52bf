/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tunebase_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = tunebase_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tunebase_shared::auth::middleware::authenticate;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                          # Health check (public)
/// ├── /signup, /login, /logout         # Auth (public)
/// ├── /users/...                       # User management (JWT)
/// ├── /artists/...                     # Catalog (JWT)
/// ├── /albums/...                      # Catalog (JWT)
/// ├── /tracks/...                      # Catalog (JWT)
/// └── /favorites/...                   # Per-user favorites (JWT)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (protected sub-routers only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes, no auth
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login))
        .route("/logout", get(routes::auth::logout));

    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .route("/add-user", post(routes::users::add_user))
        .route("/update-password", put(routes::users::update_password))
        .route("/:id", delete(routes::users::delete_user));

    let artist_routes = Router::new()
        .route("/", get(routes::artists::list_artists))
        .route("/add-artist", post(routes::artists::add_artist))
        .route(
            "/:id",
            get(routes::artists::get_artist)
                .put(routes::artists::update_artist)
                .delete(routes::artists::delete_artist),
        );

    let album_routes = Router::new()
        .route("/", get(routes::albums::list_albums))
        .route("/add-album", post(routes::albums::add_album))
        .route(
            "/:id",
            get(routes::albums::get_album)
                .put(routes::albums::update_album)
                .delete(routes::albums::delete_album),
        );

    let track_routes = Router::new()
        .route("/", get(routes::tracks::list_tracks))
        .route("/add-track", post(routes::tracks::add_track))
        .route(
            "/:id",
            get(routes::tracks::get_track)
                .put(routes::tracks::update_track)
                .delete(routes::tracks::delete_track),
        );

    let favorite_routes = Router::new()
        .route("/add-favorite", post(routes::favorites::add_favorite))
        .route(
            "/remove-favorite/:id",
            delete(routes::favorites::remove_favorite),
        )
        .route("/:category", get(routes::favorites::list_favorites));

    // Everything below the auth gate shares one JWT layer
    let protected_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/artists", artist_routes)
        .nest("/albums", album_routes)
        .nest("/tracks", track_routes)
        .nest("/favorites", favorite_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Validates the bearer token and injects `AuthContext` into request
/// extensions. Every failure, whatever its cause, answers with the same
/// 401 envelope so callers cannot tell which check rejected them.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_context = authenticate(req.headers(), state.jwt_secret())?;

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

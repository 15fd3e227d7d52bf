/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Per-test scratch database setup and teardown
/// - Test organization/user creation and JWT token generation
/// - A request helper driving the router through `tower::Service`
///
/// Each context provisions its own uniquely-named database and runs the
/// embedded migrations into it, so tests are isolated and can assume an
/// otherwise empty catalog. Tests skip (pass vacuously) when
/// `DATABASE_URL` is not set or the server is unreachable.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::migrate::MigrateDatabase;
use sqlx::{PgPool, Postgres};
use tower::Service as _;
use tunebase_api::app::{build_router, AppState};
use tunebase_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use tunebase_shared::auth::jwt::{create_token, Claims};
use tunebase_shared::auth::password;
use tunebase_shared::db::migrations::ensure_database_exists;
use tunebase_shared::db::pool::close_pool;
use tunebase_shared::models::organization::Organization;
use tunebase_shared::models::user::{Role, User};
use uuid::Uuid;

const TEST_JWT_SECRET: &str = "integration-test-secret-key-32-bytes-long";

/// Known password of the context's seeded user
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub db_url: String,
    pub app: Router,
    pub config: Config,
    pub org_id: Uuid,
    pub user: User,
    pub token: String,
}

impl TestContext {
    /// Creates a new test context with a fresh database
    ///
    /// Returns `None` (skipping the test) when no database is reachable.
    pub async fn new() -> Option<Self> {
        match Self::try_new().await {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                eprintln!("skipping integration test: {}", e);
                None
            }
        }
    }

    async fn try_new() -> anyhow::Result<Self> {
        let base_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL not set"))?;

        let db_name = format!("tunebase_test_{}", Uuid::new_v4().simple());
        let db_url = with_database(&base_url, &db_name);

        ensure_database_exists(&db_url).await?;
        let db = PgPool::connect(&db_url).await?;

        // Path relative to this crate's Cargo.toml
        sqlx::migrate!("../tunebase-shared/migrations").run(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: db_url.clone(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
            },
        };

        // Seed an editor identity directly; the bootstrap path is
        // exercised through the signup endpoint in the tests themselves
        let org = Organization::create(&db, &format!("Test Organization {}", Uuid::new_v4()))
            .await?;
        let password_hash = password::hash_password(TEST_PASSWORD)?;
        let user = User::create(
            &db,
            org.org_id,
            &format!("test-{}@example.com", Uuid::new_v4()),
            &password_hash,
            Role::Editor,
        )
        .await?;

        let claims = Claims::new(user.user_id, org.org_id, Role::Editor);
        let token = create_token(&claims, &config.jwt.secret)?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            db_url,
            app,
            config,
            org_id: org.org_id,
            user,
            token,
        })
    }

    /// Creates a user in a separate organization and returns their token
    pub async fn foreign_actor(&self) -> anyhow::Result<String> {
        let org = Organization::create(
            &self.db,
            &format!("Other Organization {}", Uuid::new_v4()),
        )
        .await?;
        let password_hash = password::hash_password(TEST_PASSWORD)?;
        let user = User::create(
            &self.db,
            org.org_id,
            &format!("other-{}@example.com", Uuid::new_v4()),
            &password_hash,
            Role::Editor,
        )
        .await?;

        let claims = Claims::new(user.user_id, org.org_id, Role::Editor);
        Ok(create_token(&claims, &self.config.jwt.secret)?)
    }

    /// Closes the pool and drops the scratch database
    pub async fn cleanup(self) {
        close_pool(self.db).await;
        let _ = Postgres::drop_database(&self.db_url).await;
    }
}

/// Replaces the database name in a connection URL
fn with_database(url: &str, name: &str) -> String {
    match url.rsplit_once('/') {
        Some((base, _)) => format!("{}/{}", base, name),
        None => format!("{}/{}", url, name),
    }
}

/// Sends a request through the router and parses the envelope
///
/// The body comes back as `Value::Null` for bodyless responses (204).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Inserts an artist directly, returning its id
pub async fn seed_artist(db: &PgPool, org_id: Uuid, name: &str) -> Uuid {
    let (artist_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO artists (name, grammy, hidden, org_id) VALUES ($1, 0, false, $2) RETURNING artist_id",
    )
    .bind(name)
    .bind(org_id)
    .fetch_one(db)
    .await
    .unwrap();

    artist_id
}

/// Inserts an album directly, returning its id
pub async fn seed_album(db: &PgPool, artist_id: Uuid, name: &str, year: i32) -> Uuid {
    let (album_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO albums (name, year, hidden, artist_id) VALUES ($1, $2, false, $3) RETURNING album_id",
    )
    .bind(name)
    .bind(year)
    .bind(artist_id)
    .fetch_one(db)
    .await
    .unwrap();

    album_id
}

/// Inserts a track directly, returning its id
pub async fn seed_track(db: &PgPool, artist_id: Uuid, album_id: Uuid, name: &str) -> Uuid {
    let (track_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO tracks (name, duration, hidden, artist_id, album_id) VALUES ($1, 300, false, $2, $3) RETURNING track_id",
    )
    .bind(name)
    .bind(artist_id)
    .bind(album_id)
    .fetch_one(db)
    .await
    .unwrap();

    track_id
}

/// Track model and tenant-scoped operations
///
/// Tracks name both their artist and their album, and the album must
/// belong to that same artist. Tenant scope is inherited through the
/// artist, exactly as for albums. Read shapes denormalize both the
/// artist and album names.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tracks (
///     track_id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
///     artist_id UUID NOT NULL REFERENCES artists(artist_id) ON DELETE CASCADE,
///     album_id UUID NOT NULL REFERENCES albums(album_id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     duration INTEGER NOT NULL,
///     hidden BOOLEAN NOT NULL DEFAULT false,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Track row shape returned by the API, with joined parent names
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Track {
    /// Unique track ID (UUID v4)
    pub track_id: Uuid,

    /// Track name
    pub name: String,

    /// Duration in seconds
    pub duration: i32,

    /// Whether the track is hidden from default listings
    pub hidden: bool,

    /// Owning artist
    pub artist_id: Uuid,

    /// Owning artist's name
    pub artist_name: String,

    /// Owning album
    pub album_id: Uuid,

    /// Owning album's name
    pub album_name: String,
}

/// Optional equality filters for track listings
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackFilter {
    /// Filter by owning artist
    pub artist_id: Option<Uuid>,

    /// Filter by owning album
    pub album_id: Option<Uuid>,

    /// Filter by hidden flag
    pub hidden: Option<bool>,
}

const SELECT_TRACK: &str = r#"
    SELECT t.track_id, t.name, t.duration, t.hidden,
           t.artist_id, ar.name AS artist_name,
           t.album_id, al.name AS album_name
    FROM tracks t
    JOIN artists ar ON ar.artist_id = t.artist_id
    JOIN albums al ON al.album_id = t.album_id
"#;

impl Track {
    /// Lists tracks whose artist belongs to the caller's organization
    pub async fn list(
        pool: &PgPool,
        org_id: Uuid,
        filter: TrackFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = format!("{} WHERE ar.org_id = $1", SELECT_TRACK);
        let mut bind_count = 1;

        if filter.artist_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND t.artist_id = ${}", bind_count));
        }
        if filter.album_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND t.album_id = ${}", bind_count));
        }
        if filter.hidden.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND t.hidden = ${}", bind_count));
        }

        query.push_str(&format!(
            " ORDER BY t.created_at LIMIT ${} OFFSET ${}",
            bind_count + 1,
            bind_count + 2
        ));

        let mut q = sqlx::query_as::<_, Track>(&query).bind(org_id);

        if let Some(artist_id) = filter.artist_id {
            q = q.bind(artist_id);
        }
        if let Some(album_id) = filter.album_id {
            q = q.bind(album_id);
        }
        if let Some(hidden) = filter.hidden {
            q = q.bind(hidden);
        }

        let tracks = q.bind(limit).bind(offset).fetch_all(pool).await?;

        Ok(tracks)
    }

    /// Finds a track scoped to the caller's organization via its artist
    pub async fn find_scoped(
        pool: &PgPool,
        track_id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("{} WHERE t.track_id = $1 AND ar.org_id = $2", SELECT_TRACK);

        let track = sqlx::query_as::<_, Track>(&query)
            .bind(track_id)
            .bind(org_id)
            .fetch_optional(pool)
            .await?;

        Ok(track)
    }

    /// Checks that a track exists within the organization
    ///
    /// Parent-ownership check for track favorites.
    pub async fn exists_scoped(
        pool: &PgPool,
        track_id: Uuid,
        org_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let (found,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM tracks t
                JOIN artists ar ON ar.artist_id = t.artist_id
                WHERE t.track_id = $1 AND ar.org_id = $2
            )
            "#,
        )
        .bind(track_id)
        .bind(org_id)
        .fetch_one(pool)
        .await?;

        Ok(found)
    }

    /// Creates a track under an artist and album
    ///
    /// The caller must have verified the artist is in their organization
    /// and the album belongs to that artist.
    pub async fn create(
        pool: &PgPool,
        artist_id: Uuid,
        album_id: Uuid,
        name: &str,
        duration: i32,
        hidden: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO tracks (name, duration, hidden, artist_id, album_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(name)
        .bind(duration)
        .bind(hidden)
        .bind(artist_id)
        .bind(album_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Full-field replace of a track, scoped through its artist's org
    ///
    /// Returns false when no row matched (missing or cross-tenant).
    pub async fn update_scoped(
        pool: &PgPool,
        track_id: Uuid,
        org_id: Uuid,
        name: &str,
        duration: i32,
        hidden: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tracks SET name = $1, duration = $2, hidden = $3
            WHERE track_id = $4
              AND artist_id IN (SELECT artist_id FROM artists WHERE org_id = $5)
            "#,
        )
        .bind(name)
        .bind(duration)
        .bind(hidden)
        .bind(track_id)
        .bind(org_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetches a track's name within the organization
    pub async fn name_scoped(
        pool: &PgPool,
        track_id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<String>, sqlx::Error> {
        let name: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT t.name FROM tracks t
            JOIN artists ar ON ar.artist_id = t.artist_id
            WHERE t.track_id = $1 AND ar.org_id = $2
            "#,
        )
        .bind(track_id)
        .bind(org_id)
        .fetch_optional(pool)
        .await?;

        Ok(name.map(|(n,)| n))
    }

    /// Deletes a track by ID
    pub async fn delete(pool: &PgPool, track_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tracks WHERE track_id = $1")
            .bind(track_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

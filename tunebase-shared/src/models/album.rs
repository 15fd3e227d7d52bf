/// Album model and tenant-scoped operations
///
/// Albums carry no `org_id` of their own; they inherit tenant scope
/// through their owning artist. Every query here joins (or subqueries)
/// artists on `org_id`, so a cross-tenant album id is indistinguishable
/// from a missing one. Read shapes include the denormalized artist name.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE albums (
///     album_id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
///     artist_id UUID NOT NULL REFERENCES artists(artist_id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     year INTEGER NOT NULL,
///     hidden BOOLEAN NOT NULL DEFAULT false,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Album row shape returned by the API, with the joined artist name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Album {
    /// Unique album ID (UUID v4)
    pub album_id: Uuid,

    /// Album name
    pub name: String,

    /// Release year
    pub year: i32,

    /// Whether the album is hidden from default listings
    pub hidden: bool,

    /// Owning artist
    pub artist_id: Uuid,

    /// Owning artist's name, denormalized into read shapes
    pub artist_name: String,
}

/// Optional equality filters for album listings
#[derive(Debug, Clone, Copy, Default)]
pub struct AlbumFilter {
    /// Filter by owning artist
    pub artist_id: Option<Uuid>,

    /// Filter by hidden flag
    pub hidden: Option<bool>,
}

const SELECT_ALBUM: &str = r#"
    SELECT al.album_id, al.name, al.year, al.hidden, al.artist_id, ar.name AS artist_name
    FROM albums al
    JOIN artists ar ON ar.artist_id = al.artist_id
"#;

impl Album {
    /// Lists albums whose artist belongs to the caller's organization
    pub async fn list(
        pool: &PgPool,
        org_id: Uuid,
        filter: AlbumFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = format!("{} WHERE ar.org_id = $1", SELECT_ALBUM);
        let mut bind_count = 1;

        if filter.artist_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND al.artist_id = ${}", bind_count));
        }
        if filter.hidden.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND al.hidden = ${}", bind_count));
        }

        query.push_str(&format!(
            " ORDER BY al.created_at LIMIT ${} OFFSET ${}",
            bind_count + 1,
            bind_count + 2
        ));

        let mut q = sqlx::query_as::<_, Album>(&query).bind(org_id);

        if let Some(artist_id) = filter.artist_id {
            q = q.bind(artist_id);
        }
        if let Some(hidden) = filter.hidden {
            q = q.bind(hidden);
        }

        let albums = q.bind(limit).bind(offset).fetch_all(pool).await?;

        Ok(albums)
    }

    /// Finds an album scoped to the caller's organization via its artist
    pub async fn find_scoped(
        pool: &PgPool,
        album_id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("{} WHERE al.album_id = $1 AND ar.org_id = $2", SELECT_ALBUM);

        let album = sqlx::query_as::<_, Album>(&query)
            .bind(album_id)
            .bind(org_id)
            .fetch_optional(pool)
            .await?;

        Ok(album)
    }

    /// Checks that an album exists within the organization
    ///
    /// Parent-ownership check for album favorites.
    pub async fn exists_scoped(
        pool: &PgPool,
        album_id: Uuid,
        org_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let (found,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM albums al
                JOIN artists ar ON ar.artist_id = al.artist_id
                WHERE al.album_id = $1 AND ar.org_id = $2
            )
            "#,
        )
        .bind(album_id)
        .bind(org_id)
        .fetch_one(pool)
        .await?;

        Ok(found)
    }

    /// Checks that an album exists and is owned by the given artist
    ///
    /// Track creation requires the album to belong to the same artist the
    /// track names, not merely the same organization.
    pub async fn belongs_to_artist(
        pool: &PgPool,
        album_id: Uuid,
        artist_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let (found,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM albums WHERE album_id = $1 AND artist_id = $2)",
        )
        .bind(album_id)
        .bind(artist_id)
        .fetch_one(pool)
        .await?;

        Ok(found)
    }

    /// Creates an album under an artist
    ///
    /// The caller must have verified the artist is in their organization.
    pub async fn create(
        pool: &PgPool,
        artist_id: Uuid,
        name: &str,
        year: i32,
        hidden: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO albums (name, year, hidden, artist_id) VALUES ($1, $2, $3, $4)")
            .bind(name)
            .bind(year)
            .bind(hidden)
            .bind(artist_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Full-field replace of an album, scoped through its artist's org
    ///
    /// Returns false when no row matched (missing or cross-tenant).
    pub async fn update_scoped(
        pool: &PgPool,
        album_id: Uuid,
        org_id: Uuid,
        name: &str,
        year: i32,
        hidden: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE albums SET name = $1, year = $2, hidden = $3
            WHERE album_id = $4
              AND artist_id IN (SELECT artist_id FROM artists WHERE org_id = $5)
            "#,
        )
        .bind(name)
        .bind(year)
        .bind(hidden)
        .bind(album_id)
        .bind(org_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetches an album's name within the organization
    pub async fn name_scoped(
        pool: &PgPool,
        album_id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<String>, sqlx::Error> {
        let name: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT al.name FROM albums al
            JOIN artists ar ON ar.artist_id = al.artist_id
            WHERE al.album_id = $1 AND ar.org_id = $2
            "#,
        )
        .bind(album_id)
        .bind(org_id)
        .fetch_optional(pool)
        .await?;

        Ok(name.map(|(n,)| n))
    }

    /// Deletes an album by ID; owned tracks cascade
    pub async fn delete(pool: &PgPool, album_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM albums WHERE album_id = $1")
            .bind(album_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

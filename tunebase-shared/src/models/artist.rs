/// Artist model and tenant-scoped operations
///
/// Artists are owned directly by an organization and anchor the ownership
/// chain for albums and tracks. Every operation here takes the caller's
/// `org_id`; a cross-tenant artist id behaves exactly like a missing one.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE artists (
///     artist_id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
///     org_id UUID NOT NULL REFERENCES organizations(org_id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     grammy INTEGER NOT NULL DEFAULT 0,
///     hidden BOOLEAN NOT NULL DEFAULT false,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Artist row shape returned by the API (no org_id, no timestamps)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Artist {
    /// Unique artist ID (UUID v4)
    pub artist_id: Uuid,

    /// Artist name
    pub name: String,

    /// Number of Grammy awards
    pub grammy: i32,

    /// Whether the artist is hidden from default listings
    pub hidden: bool,
}

/// Optional equality filters for artist listings
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtistFilter {
    /// Filter by exact grammy count
    pub grammy: Option<i32>,

    /// Filter by hidden flag
    pub hidden: Option<bool>,
}

impl Artist {
    /// Lists artists in the caller's organization
    ///
    /// Mandatory org filter, optional equality filters, insertion order,
    /// bounded by limit/offset. Filters are appended as numbered binds;
    /// user input never lands in the query text.
    pub async fn list(
        pool: &PgPool,
        org_id: Uuid,
        filter: ArtistFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query =
            String::from("SELECT artist_id, name, grammy, hidden FROM artists WHERE org_id = $1");
        let mut bind_count = 1;

        if filter.grammy.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND grammy = ${}", bind_count));
        }
        if filter.hidden.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND hidden = ${}", bind_count));
        }

        query.push_str(&format!(
            " ORDER BY created_at LIMIT ${} OFFSET ${}",
            bind_count + 1,
            bind_count + 2
        ));

        let mut q = sqlx::query_as::<_, Artist>(&query).bind(org_id);

        if let Some(grammy) = filter.grammy {
            q = q.bind(grammy);
        }
        if let Some(hidden) = filter.hidden {
            q = q.bind(hidden);
        }

        let artists = q.bind(limit).bind(offset).fetch_all(pool).await?;

        Ok(artists)
    }

    /// Finds an artist owned by the caller's organization
    ///
    /// `None` covers both "does not exist" and "belongs to another tenant".
    pub async fn find_scoped(
        pool: &PgPool,
        artist_id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let artist = sqlx::query_as::<_, Artist>(
            r#"
            SELECT artist_id, name, grammy, hidden
            FROM artists
            WHERE artist_id = $1 AND org_id = $2
            "#,
        )
        .bind(artist_id)
        .bind(org_id)
        .fetch_optional(pool)
        .await?;

        Ok(artist)
    }

    /// Checks that an artist exists and belongs to the organization
    ///
    /// This is the parent-ownership check for album and track creation and
    /// for artist favorites.
    pub async fn exists_scoped(
        pool: &PgPool,
        artist_id: Uuid,
        org_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let (found,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM artists WHERE artist_id = $1 AND org_id = $2)",
        )
        .bind(artist_id)
        .bind(org_id)
        .fetch_one(pool)
        .await?;

        Ok(found)
    }

    /// Creates an artist in the caller's organization
    pub async fn create(
        pool: &PgPool,
        org_id: Uuid,
        name: &str,
        grammy: i32,
        hidden: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO artists (name, grammy, hidden, org_id) VALUES ($1, $2, $3, $4)")
            .bind(name)
            .bind(grammy)
            .bind(hidden)
            .bind(org_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Full-field replace of an artist, scoped to the organization
    ///
    /// Returns false when no row matched (missing or cross-tenant).
    pub async fn update_scoped(
        pool: &PgPool,
        artist_id: Uuid,
        org_id: Uuid,
        name: &str,
        grammy: i32,
        hidden: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE artists SET name = $1, grammy = $2, hidden = $3
            WHERE artist_id = $4 AND org_id = $5
            "#,
        )
        .bind(name)
        .bind(grammy)
        .bind(hidden)
        .bind(artist_id)
        .bind(org_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetches an artist's name within the organization
    ///
    /// Used by delete to report the removed entity's name.
    pub async fn name_scoped(
        pool: &PgPool,
        artist_id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<String>, sqlx::Error> {
        let name: Option<(String,)> =
            sqlx::query_as("SELECT name FROM artists WHERE artist_id = $1 AND org_id = $2")
                .bind(artist_id)
                .bind(org_id)
                .fetch_optional(pool)
                .await?;

        Ok(name.map(|(n,)| n))
    }

    /// Deletes an artist by ID
    ///
    /// Owned albums and tracks cascade at the database level. The caller
    /// must have resolved ownership first (see [`Artist::name_scoped`]).
    pub async fn delete(pool: &PgPool, artist_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artists WHERE artist_id = $1")
            .bind(artist_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

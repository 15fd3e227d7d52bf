/// Favorite model and per-user operations
///
/// Favorites belong to a single user and point at a catalog item by
/// category plus id. There is no foreign key to the catalog tables, so a
/// favorite can outlive its item; listings resolve the item name with a
/// category-switched left join and surface null for orphans. Existence of
/// the item inside the caller's organization is checked at creation time
/// by the handler, not here.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE favorites (
///     favorite_id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
///     user_id UUID NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
///     category VARCHAR(20) NOT NULL CHECK (category IN ('artist', 'album', 'track')),
///     item_id UUID NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Catalog item category a favorite can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Artist,
    Album,
    Track,
}

impl Category {
    /// Converts the category to its database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Artist => "artist",
            Category::Album => "album",
            Category::Track => "track",
        }
    }

    /// Parses a category from its wire/database representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "artist" => Some(Category::Artist),
            "album" => Some(Category::Album),
            "track" => Some(Category::Track),
            _ => None,
        }
    }
}

/// Favorite row shape returned by listings, with the resolved item name
///
/// `name` is null when the referenced item has since been deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Favorite {
    /// Unique favorite ID (UUID v4)
    pub favorite_id: Uuid,

    /// Item category, stored as text (see [`Category`])
    pub category: String,

    /// Referenced catalog item
    pub item_id: Uuid,

    /// Resolved item name, null for orphaned favorites
    pub name: Option<String>,

    /// When the favorite was added
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    /// Lists the caller's favorites of one category with resolved item names
    ///
    /// The name comes from whichever catalog table the category points at;
    /// left joins keep orphaned favorites in the result with a null name.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
        category: Category,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let favorites = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT f.favorite_id, f.category, f.item_id,
                   CASE f.category
                       WHEN 'artist' THEN ar.name
                       WHEN 'album' THEN al.name
                       WHEN 'track' THEN t.name
                   END AS name,
                   f.created_at
            FROM favorites f
            LEFT JOIN artists ar ON f.category = 'artist' AND ar.artist_id = f.item_id
            LEFT JOIN albums al ON f.category = 'album' AND al.album_id = f.item_id
            LEFT JOIN tracks t ON f.category = 'track' AND t.track_id = f.item_id
            WHERE f.user_id = $1 AND f.category = $2
            ORDER BY f.created_at
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(category.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(favorites)
    }

    /// Adds a favorite for the user
    ///
    /// The caller must have verified the item exists in their organization.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        category: Category,
        item_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO favorites (user_id, category, item_id) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(category.as_str())
            .bind(item_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Removes a favorite owned by the user
    ///
    /// Scoping by `(favorite_id, user_id)` means another user's favorite
    /// comes back as not found, never as forbidden.
    pub async fn delete_for_user(
        pool: &PgPool,
        favorite_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE favorite_id = $1 AND user_id = $2")
            .bind(favorite_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in [Category::Artist, Category::Album, Category::Track] {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        assert_eq!(Category::parse("playlist"), None);
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse("Artist"), None);
    }

    #[test]
    fn test_orphaned_favorite_serializes_null_name() {
        let favorite = Favorite {
            favorite_id: Uuid::nil(),
            category: "track".to_string(),
            item_id: Uuid::nil(),
            name: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&favorite).unwrap();
        assert!(json["name"].is_null());
        assert_eq!(json["category"], "track");
    }
}

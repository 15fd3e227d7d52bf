/// Organization model
///
/// Organizations are the root of tenant isolation. Every user and every
/// artist belongs to exactly one organization; albums and tracks inherit
/// the scope transitively through their artist. An organization is created
/// once at signup and never updated; deleting it cascades to all owned
/// rows at the database level.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organizations (
///     org_id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
///     name VARCHAR(255) UNIQUE NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use uuid::Uuid;

/// Organization model representing a tenant
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Unique organization ID (UUID v4)
    pub org_id: Uuid,

    /// Organization name (unique)
    pub name: String,

    /// When the organization was created
    pub created_at: DateTime<Utc>,
}

impl Organization {
    /// Creates a new organization
    ///
    /// Takes any executor so it can participate in the signup transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the name already exists (unique constraint) or
    /// the database connection fails
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        name: &str,
    ) -> Result<Self, sqlx::Error> {
        let org = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name)
            VALUES ($1)
            RETURNING org_id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(org)
    }

    /// Finds an organization by ID
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        org_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let org = sqlx::query_as::<_, Organization>(
            r#"
            SELECT org_id, name, created_at
            FROM organizations
            WHERE org_id = $1
            "#,
        )
        .bind(org_id)
        .fetch_optional(executor)
        .await?;

        Ok(org)
    }
}

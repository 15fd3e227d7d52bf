/// User model and database operations
///
/// Users belong to exactly one organization and carry one of three roles.
/// The signup path is the only place an admin can ever be minted: the very
/// first user in the system becomes admin, every later signup becomes a
/// viewer, and the add-user path refuses admin outright. That bootstrap
/// decision is serialized with a transaction-scoped advisory lock and
/// backed by a partial unique index on the admin role, so at most one
/// admin can exist even under concurrent signups.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     user_id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
///     org_id UUID NOT NULL REFERENCES organizations(org_id) ON DELETE CASCADE,
///     email VARCHAR(255) UNIQUE NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     role VARCHAR(20) NOT NULL CHECK (role IN ('admin', 'editor', 'viewer')),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tunebase_shared::models::user::{Role, User};
/// use tunebase_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::register(&pool, "user@example.com", "$argon2id$...", "Acme Records").await?;
/// println!("Created user: {}", user.user_id);
///
/// let found = User::find_by_email(&pool, "user@example.com").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Advisory lock key serializing the first-user-is-admin decision.
const BOOTSTRAP_LOCK_KEY: i64 = 0x7475_6e65_6261_7365; // "tunebase"

/// User role
///
/// Roles gate user-management operations only; catalog reads and writes
/// are scoped by organization, not role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sole bootstrap role; can never be created or deleted through the API
    Admin,

    /// Regular member with write access
    Editor,

    /// Regular member
    Viewer,
}

impl Role {
    /// Converts the role to its database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    /// Parses a role from its database representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }
}

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub user_id: Uuid,

    /// Owning organization
    pub org_id: Uuid,

    /// Email address, unique across all organizations
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Role, stored as text (see [`Role`])
    pub role: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Gets the parsed role enum
    pub fn get_role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

/// Row shape returned by org-scoped user listings (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    /// User ID
    pub user_id: Uuid,

    /// Email address
    pub email: String,

    /// Role
    pub role: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Registers a new user at signup, creating their organization
    ///
    /// Runs in a single transaction:
    /// 1. Takes a transaction-scoped advisory lock so concurrent signups
    ///    serialize on the bootstrap decision
    /// 2. Creates the organization
    /// 3. Counts existing users; zero means this signup becomes the admin,
    ///    otherwise a viewer
    /// 4. Inserts the user
    ///
    /// The partial unique index on the admin role is the storage-level
    /// backstop for the same invariant.
    ///
    /// # Errors
    ///
    /// Returns an error if the email or organization name already exists,
    /// or the database connection fails
    pub async fn register(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        org_name: &str,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(BOOTSTRAP_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        let org = super::organization::Organization::create(&mut *tx, org_name).await?;

        let (user_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;

        let role = if user_count == 0 {
            Role::Admin
        } else {
            Role::Viewer
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role, org_id)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, org_id, email, password_hash, role, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(org.org_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }

    /// Creates a user inside an existing organization (the add-user path)
    ///
    /// The role policy (no admin creation) is enforced at the handler; the
    /// CHECK constraint and the partial admin index back it at the store.
    pub async fn create(
        pool: &PgPool,
        org_id: Uuid,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role, org_id)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, org_id, email, password_hash, role, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(org_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Email is globally unique, so this is the login lookup and the
    /// duplicate-email check.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, org_id, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID without tenant scoping (self-service paths only)
    pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, org_id, email, password_hash, role, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID within the caller's organization
    ///
    /// Cross-tenant lookups come back as `None`, indistinguishable from a
    /// missing row.
    pub async fn find_scoped(
        pool: &PgPool,
        user_id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, org_id, email, password_hash, role, created_at
            FROM users
            WHERE user_id = $1 AND org_id = $2
            "#,
        )
        .bind(user_id)
        .bind(org_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists users in an organization with an optional role filter
    ///
    /// Ordered by insertion; password hashes are never included.
    pub async fn list_by_org(
        pool: &PgPool,
        org_id: Uuid,
        role: Option<Role>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        let mut query = String::from(
            "SELECT user_id, email, role, created_at FROM users WHERE org_id = $1",
        );
        let mut bind_count = 1;

        if role.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND role = ${}", bind_count));
        }

        query.push_str(&format!(
            " ORDER BY created_at LIMIT ${} OFFSET ${}",
            bind_count + 1,
            bind_count + 2
        ));

        let mut q = sqlx::query_as::<_, UserRecord>(&query).bind(org_id);

        if let Some(role) = role {
            q = q.bind(role.as_str());
        }

        let users = q.bind(limit).bind(offset).fetch_all(pool).await?;

        Ok(users)
    }

    /// Replaces a user's password hash
    pub async fn update_password(
        pool: &PgPool,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE user_id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user by ID
    ///
    /// The caller is responsible for the role policy (admin targets are
    /// protected) and for scoping the target to their organization first.
    pub async fn delete(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

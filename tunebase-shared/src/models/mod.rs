/// Database models for TuneBase
///
/// This module contains all database models and their tenant-scoped CRUD
/// operations. Every read and write of a catalog entity takes the caller's
/// `org_id` explicitly; ownership resolution lives in named scoped-lookup
/// functions (`find_scoped`, `exists_scoped`, `belongs_to_artist`) rather
/// than ad hoc joins in handlers, so the isolation invariant is central and
/// testable.
///
/// # Models
///
/// - `organization`: Tenant root; all users and catalog data belong to one
/// - `user`: User accounts, roles, and the bootstrap-admin signup path
/// - `artist`: Org-owned catalog artists
/// - `album`: Albums, org-scoped transitively through their artist
/// - `track`: Tracks, owned by an artist and one of that artist's albums
/// - `favorite`: Per-user favorites referencing catalog items by category
///
/// # Example
///
/// ```no_run
/// use tunebase_shared::models::artist::{Artist, ArtistFilter};
/// use tunebase_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(org_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let artists = Artist::list(&pool, org_id, ArtistFilter::default(), 5, 0).await?;
/// # Ok(())
/// # }
/// ```

pub mod album;
pub mod artist;
pub mod favorite;
pub mod organization;
pub mod track;
pub mod user;

//! # TuneBase Shared Library
//!
//! This crate contains the models, authentication primitives, and database
//! utilities used by the TuneBase API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and tenant-scoped CRUD operations
//! - `auth`: JWT session tokens, password hashing, request authentication
//! - `db`: Connection pool and embedded migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TuneBase shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

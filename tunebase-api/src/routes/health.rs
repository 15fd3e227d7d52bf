/// Health check endpoint
///
/// Verifies the server is running and the database is reachable.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": 200,
///   "data": { "status": "healthy", "version": "0.1.0", "database": "connected" },
///   "message": "Service is healthy.",
///   "error": null
/// }
/// ```

use crate::{app::AppState, error::ApiResult, response::Envelope};
use axum::extract::State;
use serde::{Deserialize, Serialize};

/// Health check payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,
}

/// Health check handler
///
/// Reports degraded rather than failing when the database is down, so
/// monitoring can still read the response.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Envelope> {
    let database = match tunebase_shared::db::pool::health_check(&state.db).await {
        Ok(()) => "connected",
        Err(_) => "disconnected",
    };

    let payload = HealthStatus {
        status: if database == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    };

    Ok(Envelope::ok(&payload, "Service is healthy."))
}

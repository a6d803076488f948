//! Connection cleanup run during graceful shutdown.

use tracing::{error, info};

/// Closes a SeaORM PostgreSQL pool.
///
/// The pool also closes on drop; closing explicitly gives a log line.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::close_postgres;
///
/// close_postgres(db, "products").await;
/// ```
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!(pool = name, "PostgreSQL connection closed"),
        Err(e) => error!(pool = name, error = %e, "Error closing PostgreSQL connection"),
    }
}

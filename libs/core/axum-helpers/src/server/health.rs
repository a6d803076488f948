use axum::{Json, Router, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness payload: `{"status": 200, "message": "OK"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HealthResponse {
    /// HTTP status mirrored in the body
    #[schema(example = 200)]
    pub status: u16,
    #[schema(example = "OK")]
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: "OK".to_string(),
        }
    }
}

/// Health check endpoint handler.
///
/// Always 200 while the process is serving requests.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse::ok()))
}

/// Creates a router with the /health endpoint.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
///
/// let app = Router::new().merge(health_router());
/// ```
pub fn health_router() -> Router {
    Router::new().route("/health", get(health_handler))
}

use axum::response::Response;

use super::AppError;
use super::codes::ErrorCode;

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    use axum::response::IntoResponse;

    AppError::NotFound(ErrorCode::NotFound.default_message().to_string()).into_response()
}

//! Static landing page

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Serves the browser UI for managing products
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

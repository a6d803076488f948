//! API routes module

pub mod index;

use axum::{Router, routing::get};
use axum_helpers::health_router;
use domain_products::{PgProductRepository, ProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create all API routes backed by PostgreSQL
pub fn routes(state: &AppState) -> Router {
    let service = ProductService::new(PgProductRepository::new(state.db.clone()));
    routes_with(service)
}

/// Route table for any repository backend
pub fn routes_with<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(index::index))
        .nest("/products", handlers::router(service))
        .merge(health_router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::ApiDoc;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum_helpers::create_router;
    use domain_products::InMemoryProductRepository;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let service = ProductService::new(InMemoryProductRepository::new());
        create_router::<ApiDoc>(routes_with(service)).await.unwrap()
    }

    async fn body_bytes(body: Body) -> Vec<u8> {
        body.collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_index_serves_html() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));

        let html = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
        assert!(html.contains("Product Store"));
        assert!(html.contains(r#"id="category""#));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
        assert_eq!(body, json!({"status": 200, "message": "OK"}));
    }

    #[tokio::test]
    async fn test_create_product_location_is_absolute() {
        let request = Request::builder()
            .method("POST")
            .uri("/products")
            .header(header::HOST, "localhost:8080")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "name": "Hat",
                    "description": "A red fedora",
                    "price": "59.95",
                    "available": true,
                    "category": "CLOTHS"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app().await.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::LOCATION],
            "http://localhost:8080/products/1"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/nothing/here").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_lists_product_paths() {
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc: Value = serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
        assert!(doc["paths"].get("/products/{id}").is_some());
        assert!(doc["paths"].get("/health").is_some());
    }
}

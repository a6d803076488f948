//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Product Store
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Store",
        version = "0.1.0",
        description = "Inventory CRUD service for products",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(axum_helpers::server::health::health_handler),
    nest(
        (path = "/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{
    ApiResponse, OrderResponseData, Pagination, ProductPageData,
};
use crate::store::models::{
    AddressRow, BrandRow, CategoryRow, OrderDetail, OrderSummary, ProductListing, SubCategoryRow,
};

/// Bearer-token security scheme (tokens issued by the identity service)
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = "Catalog and order backend: categories, sub-categories, brands, products and orders.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        // Public
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::list_products,
        crate::gateway::handlers::get_product,
        crate::gateway::handlers::list_categories,
        crate::gateway::handlers::list_sub_categories,
        crate::gateway::handlers::list_brands,
        // Authenticated
        crate::gateway::handlers::create_order,
        crate::gateway::handlers::my_orders,
        crate::gateway::handlers::my_addresses,
        crate::gateway::handlers::create_address,
        // Admin
        crate::gateway::handlers::list_orders,
        crate::gateway::handlers::recent_orders,
        crate::gateway::handlers::get_order,
        crate::gateway::handlers::update_order_status,
        crate::gateway::handlers::delete_order,
        crate::gateway::handlers::create_product,
        crate::gateway::handlers::update_product,
        crate::gateway::handlers::delete_product,
        crate::gateway::handlers::create_category,
        crate::gateway::handlers::rename_category,
        crate::gateway::handlers::delete_category,
        crate::gateway::handlers::create_sub_category,
        crate::gateway::handlers::rename_sub_category,
        crate::gateway::handlers::delete_sub_category,
        crate::gateway::handlers::create_brand,
        crate::gateway::handlers::rename_brand,
        crate::gateway::handlers::delete_brand,
    ),
    components(
        schemas(
            HealthResponse,
            ApiResponse<ProductPageData>,
            ProductPageData,
            Pagination,
            ProductListing,
            OrderResponseData,
            OrderDetail,
            OrderSummary,
            CategoryRow,
            SubCategoryRow,
            BrandRow,
            AddressRow,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "System", description = "Health and diagnostics"),
        (name = "Catalog", description = "Products, categories, sub-categories, brands"),
        (name = "Orders", description = "Checkout and order management"),
        (name = "Addresses", description = "Delivery address book"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("openapi serializes");
        assert!(json.contains("/api/v1/products"));
        assert!(json.contains("/api/v1/orders/{order_id}"));
        assert!(json.contains("bearer_auth"));
    }
}

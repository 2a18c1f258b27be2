pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{jwt_auth_middleware, require_admin};
use crate::config::AppConfig;
use crate::db::Database;
use crate::media::MediaClient;
use state::AppState;

/// Start the HTTP gateway
pub async fn run_server(
    config: &AppConfig,
    db: Arc<Database>,
    media: Arc<MediaClient>,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(
        db,
        media,
        config.auth.jwt_secret.clone(),
    ));

    // ==========================================================================
    // Public routes (no auth required)
    // ==========================================================================
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/products", get(handlers::list_products))
        .route("/products/{product_id}", get(handlers::get_product))
        .route("/categories", get(handlers::list_categories))
        .route("/subcategories", get(handlers::list_sub_categories))
        .route("/brands", get(handlers::list_brands));

    // ==========================================================================
    // Authenticated routes (any valid bearer token)
    // ==========================================================================
    let customer_routes = Router::new()
        .route("/orders", post(handlers::create_order))
        .route("/orders/mine", get(handlers::my_orders))
        .route(
            "/addresses",
            get(handlers::my_addresses).post(handlers::create_address),
        )
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    // ==========================================================================
    // Admin routes (bearer token + administrator role)
    // ==========================================================================
    let admin_routes = Router::new()
        // Order management
        .route("/orders", get(handlers::list_orders))
        .route("/orders/recent", get(handlers::recent_orders))
        .route(
            "/orders/{order_id}",
            get(handlers::get_order)
                .put(handlers::update_order_status)
                .delete(handlers::delete_order),
        )
        // Product mutation
        .route("/products", post(handlers::create_product))
        .route(
            "/products/{product_id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        // Catalog mutation
        .route("/categories", post(handlers::create_category))
        .route(
            "/categories/{id}",
            put(handlers::rename_category).delete(handlers::delete_category),
        )
        .route("/subcategories", post(handlers::create_sub_category))
        .route(
            "/subcategories/{id}",
            put(handlers::rename_sub_category).delete(handlers::delete_sub_category),
        )
        .route("/brands", post(handlers::create_brand))
        .route(
            "/brands/{id}",
            put(handlers::rename_brand).delete(handlers::delete_brand),
        )
        // Admin gate runs after token verification
        .layer(from_fn(require_admin))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    let api = public_routes.merge(customer_routes).merge(admin_routes);

    let app = Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()));

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to bind to {}: {} (hint: port may already be in use)",
            addr,
            e
        )
    })?;

    println!("🚀 Gateway listening on http://{}", addr);
    println!("📖 API Docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}

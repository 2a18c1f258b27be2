//! Product handlers (catalog listing + admin mutation)

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::store::catalog::{BrandRepository, CategoryRepository, SubCategoryRepository};
use crate::store::filter::ProductFilter;
use crate::store::models::ProductListing;
use crate::store::products::ProductRepository;

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResponse, ApiResult, CreateProductRequest, DeletedData, Pagination,
    ProductListQuery, ProductPageData, UpdateProductRequest, created, ok, parse_list_query,
    parse_new_product, parse_product_update, parse_uuid,
};

async fn resolve_category(pool: &PgPool, name: Option<&str>) -> Result<Option<Uuid>, ApiError> {
    match name {
        None => Ok(None),
        Some(n) => CategoryRepository::resolve_name(pool, n)
            .await?
            .map(Some)
            .ok_or_else(|| ApiError::not_found(format!("Category '{}' not found", n))),
    }
}

async fn resolve_sub_category(pool: &PgPool, name: Option<&str>) -> Result<Option<Uuid>, ApiError> {
    match name {
        None => Ok(None),
        Some(n) => SubCategoryRepository::resolve_name(pool, n)
            .await?
            .map(Some)
            .ok_or_else(|| ApiError::not_found(format!("Sub category '{}' not found", n))),
    }
}

async fn resolve_brand(pool: &PgPool, name: Option<&str>) -> Result<Option<Uuid>, ApiError> {
    match name {
        None => Ok(None),
        Some(n) => BrandRepository::resolve_name(pool, n)
            .await?
            .map(Some)
            .ok_or_else(|| ApiError::not_found(format!("Brand '{}' not found", n))),
    }
}

/// Filtered, sorted, paginated product listing
///
/// GET /api/v1/products
///
/// Category, sub-category and brand are matched by *name*. Zero
/// matches and pages past the end are success responses with empty
/// data, never errors. The total match count is repeated in the
/// `X-Total-Count` header.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Product page", body = ProductPageData, content_type = "application/json"),
        (status = 400, description = "Bad pagination or sort parameter"),
        (status = 404, description = "Unknown category/sub-category/brand name")
    ),
    tag = "Catalog"
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    // 1. Validate pagination and sorting
    let params = parse_list_query(&query)?;

    // 2. Resolve filter names to ids; the lookups are independent, so
    //    run them in parallel
    let pool = state.pool();
    let (category_id, sub_category_id, brand_id) = tokio::try_join!(
        resolve_category(pool, params.category.as_deref()),
        resolve_sub_category(pool, params.sub_category.as_deref()),
        resolve_brand(pool, params.brand.as_deref()),
    )?;

    // 3. Compose the filter from the supplied, resolved criteria
    let filter = ProductFilter {
        category_id,
        sub_category_id,
        brand_id,
        size: params.size.clone(),
        price: params.price,
    };

    // 4. Query one page plus the total under the same filter
    let (products, total) =
        ProductRepository::list(pool, &filter, &params.sort, &params.page).await?;

    let pagination = Pagination::new(total, &params.page);
    let msg = if products.is_empty() {
        "no products matched the given criteria"
    } else {
        "ok"
    };

    // 5. Respond with the page, pagination block and count header
    Ok((
        [("x-total-count", total.to_string())],
        Json(ApiResponse::success_with_msg(
            msg,
            ProductPageData {
                products,
                pagination,
            },
        )),
    ))
}

/// One product by id, references populated to {id, name}
///
/// GET /api/v1/products/{product_id}
#[utoipa::path(
    get,
    path = "/api/v1/products/{product_id}",
    params(("product_id" = String, Path, description = "Product id (UUID)")),
    responses(
        (status = 200, description = "Product", body = ProductListing, content_type = "application/json"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Product not found")
    ),
    tag = "Catalog"
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> ApiResult<ProductListing> {
    let id = parse_uuid(&product_id, "product")?;
    match ProductRepository::get(state.pool(), id).await? {
        Some(product) => ok(product),
        None => ApiError::not_found("product not found").into_err(),
    }
}

/// Create a product (admin)
///
/// POST /api/v1/products
///
/// Image entries are local file paths; they are pushed to the media
/// host first and the product stores the returned public URLs. A
/// failed upload fails the whole request; no partial image list.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Created product", body = ProductListing, content_type = "application/json"),
        (status = 400, description = "Malformed body or identifier"),
        (status = 404, description = "Referenced catalog entry not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProductRequest>,
) -> ApiResult<ProductListing> {
    // 1. Validate the body before spending uploads on it
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    // 2. Upload images wholesale
    let image_urls = state.media.upload_files(&req.images).await.map_err(|e| {
        tracing::error!("image upload failed: {}", e);
        ApiError::internal("Image upload failed")
    })?;

    // 3. Parse identifiers and insert
    let new_product = parse_new_product(&req, image_urls)?;
    let product = ProductRepository::create(state.pool(), &new_product).await?;
    tracing::info!(product_id = %product.id, name = %product.name, "product created");
    created(product)
}

/// Update a product (admin); absent fields keep their values
///
/// PUT /api/v1/products/{product_id}
#[utoipa::path(
    put,
    path = "/api/v1/products/{product_id}",
    params(("product_id" = String, Path, description = "Product id (UUID)")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductListing, content_type = "application/json"),
        (status = 400, description = "Malformed body or identifier"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> ApiResult<ProductListing> {
    let id = parse_uuid(&product_id, "product")?;

    // Replace the image list only when the request carries one
    let image_urls = match &req.images {
        Some(paths) => Some(state.media.upload_files(paths).await.map_err(|e| {
            tracing::error!("image upload failed: {}", e);
            ApiError::internal("Image upload failed")
        })?),
        None => None,
    };

    let update = parse_product_update(&req, image_urls)?;
    let product = ProductRepository::update(state.pool(), id, &update).await?;
    ok(product)
}

/// Delete a product (admin)
///
/// DELETE /api/v1/products/{product_id}
#[utoipa::path(
    delete,
    path = "/api/v1/products/{product_id}",
    params(("product_id" = String, Path, description = "Product id (UUID)")),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeletedData, content_type = "application/json"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> ApiResult<DeletedData> {
    let id = parse_uuid(&product_id, "product")?;
    ProductRepository::delete(state.pool(), id).await?;
    tracing::info!(product_id = %id, "product deleted");
    ok(DeletedData { deleted: true })
}

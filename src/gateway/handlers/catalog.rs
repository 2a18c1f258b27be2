//! Catalog handlers: categories, sub-categories, brands
//!
//! Listings are public; mutations are admin-gated at the router.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::store::catalog::{BrandRepository, CategoryRepository, SubCategoryRepository};
use crate::store::models::{BrandRow, CategoryRow, SubCategoryRow};

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResult, CreateSubCategoryRequest, DeletedData, NameRequest, created, ok,
    parse_uuid,
};

fn validated_name(req: &NameRequest) -> Result<&str, ApiError> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    Ok(req.name.trim())
}

// ============================================================================
// Categories
// ============================================================================

/// GET /api/v1/categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses((status = 200, description = "All categories", body = [CategoryRow])),
    tag = "Catalog"
)]
pub async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<Vec<CategoryRow>> {
    ok(CategoryRepository::list(state.pool()).await?)
}

/// POST /api/v1/categories (admin)
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = NameRequest,
    responses(
        (status = 201, description = "Created category", body = CategoryRow),
        (status = 409, description = "Name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NameRequest>,
) -> ApiResult<CategoryRow> {
    let name = validated_name(&req)?;
    created(CategoryRepository::create(state.pool(), name).await?)
}

/// PUT /api/v1/categories/{id} (admin)
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category id (UUID)")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Renamed category", body = CategoryRow),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn rename_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<NameRequest>,
) -> ApiResult<CategoryRow> {
    let id = parse_uuid(&id, "category")?;
    let name = validated_name(&req)?;
    ok(CategoryRepository::rename(state.pool(), id, name).await?)
}

/// DELETE /api/v1/categories/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category id (UUID)")),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeletedData),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<DeletedData> {
    let id = parse_uuid(&id, "category")?;
    CategoryRepository::delete(state.pool(), id).await?;
    ok(DeletedData { deleted: true })
}

// ============================================================================
// Sub-categories
// ============================================================================

/// GET /api/v1/subcategories
#[utoipa::path(
    get,
    path = "/api/v1/subcategories",
    responses((status = 200, description = "All sub-categories", body = [SubCategoryRow])),
    tag = "Catalog"
)]
pub async fn list_sub_categories(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<SubCategoryRow>> {
    ok(SubCategoryRepository::list(state.pool()).await?)
}

/// POST /api/v1/subcategories (admin)
#[utoipa::path(
    post,
    path = "/api/v1/subcategories",
    request_body = CreateSubCategoryRequest,
    responses(
        (status = 201, description = "Created sub-category", body = SubCategoryRow),
        (status = 404, description = "Parent category not found"),
        (status = 409, description = "Name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_sub_category(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSubCategoryRequest>,
) -> ApiResult<SubCategoryRow> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let category_id = parse_uuid(&req.category_id, "category")?;
    created(SubCategoryRepository::create(state.pool(), req.name.trim(), category_id).await?)
}

/// PUT /api/v1/subcategories/{id} (admin)
#[utoipa::path(
    put,
    path = "/api/v1/subcategories/{id}",
    params(("id" = String, Path, description = "Sub-category id (UUID)")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Renamed sub-category", body = SubCategoryRow),
        (status = 404, description = "Sub-category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn rename_sub_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<NameRequest>,
) -> ApiResult<SubCategoryRow> {
    let id = parse_uuid(&id, "sub category")?;
    let name = validated_name(&req)?;
    ok(SubCategoryRepository::rename(state.pool(), id, name).await?)
}

/// DELETE /api/v1/subcategories/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/subcategories/{id}",
    params(("id" = String, Path, description = "Sub-category id (UUID)")),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeletedData),
        (status = 404, description = "Sub-category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_sub_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<DeletedData> {
    let id = parse_uuid(&id, "sub category")?;
    SubCategoryRepository::delete(state.pool(), id).await?;
    ok(DeletedData { deleted: true })
}

// ============================================================================
// Brands
// ============================================================================

/// GET /api/v1/brands
#[utoipa::path(
    get,
    path = "/api/v1/brands",
    responses((status = 200, description = "All brands", body = [BrandRow])),
    tag = "Catalog"
)]
pub async fn list_brands(State(state): State<Arc<AppState>>) -> ApiResult<Vec<BrandRow>> {
    ok(BrandRepository::list(state.pool()).await?)
}

/// POST /api/v1/brands (admin)
#[utoipa::path(
    post,
    path = "/api/v1/brands",
    request_body = NameRequest,
    responses(
        (status = 201, description = "Created brand", body = BrandRow),
        (status = 409, description = "Name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_brand(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NameRequest>,
) -> ApiResult<BrandRow> {
    let name = validated_name(&req)?;
    created(BrandRepository::create(state.pool(), name).await?)
}

/// PUT /api/v1/brands/{id} (admin)
#[utoipa::path(
    put,
    path = "/api/v1/brands/{id}",
    params(("id" = String, Path, description = "Brand id (UUID)")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Renamed brand", body = BrandRow),
        (status = 404, description = "Brand not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn rename_brand(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<NameRequest>,
) -> ApiResult<BrandRow> {
    let id = parse_uuid(&id, "brand")?;
    let name = validated_name(&req)?;
    ok(BrandRepository::rename(state.pool(), id, name).await?)
}

/// DELETE /api/v1/brands/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/brands/{id}",
    params(("id" = String, Path, description = "Brand id (UUID)")),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeletedData),
        (status = 404, description = "Brand not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_brand(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<DeletedData> {
    let id = parse_uuid(&id, "brand")?;
    BrandRepository::delete(state.pool(), id).await?;
    ok(DeletedData { deleted: true })
}

//! Address book handlers
//!
//! Minimal surface the Order Service reads from: list own addresses,
//! create one.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::auth::AuthUser;
use crate::store::addresses::AddressRepository;
use crate::store::models::AddressRow;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, CreateAddressRequest, created, ok};

/// GET /api/v1/addresses: the caller's addresses
#[utoipa::path(
    get,
    path = "/api/v1/addresses",
    responses((status = 200, description = "Caller's addresses", body = [AddressRow])),
    security(("bearer_auth" = [])),
    tag = "Addresses"
)]
pub async fn my_addresses(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<AddressRow>> {
    ok(AddressRepository::list_for_user(state.pool(), user.user_id).await?)
}

/// POST /api/v1/addresses
#[utoipa::path(
    post,
    path = "/api/v1/addresses",
    request_body = CreateAddressRequest,
    responses(
        (status = 201, description = "Created address", body = AddressRow),
        (status = 400, description = "Malformed body")
    ),
    security(("bearer_auth" = [])),
    tag = "Addresses"
)]
pub async fn create_address(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateAddressRequest>,
) -> ApiResult<AddressRow> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let address = AddressRepository::create(
        state.pool(),
        user.user_id,
        &req.name,
        &req.mobile,
        &req.email,
        &req.pincode,
        req.landmark.as_deref(),
        &req.district,
        &req.state,
    )
    .await?;
    created(address)
}

//! API response types and error codes
//!
//! - `ApiResponse<T>`: unified response wrapper
//! - `ApiError` / `ApiResult<T>`: handler boundary types
//! - `error_codes`: standard error code constants

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::StoreError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Success response with an explanatory status marker instead of
    /// the plain "ok" (e.g. an empty-but-valid listing)
    pub fn success_with_msg(msg: impl Into<String>, data: T) -> Self {
        Self {
            code: 0,
            msg: msg.into(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INVALID_IDENTIFIER: i32 = 1002;
    pub const INSUFFICIENT_STOCK: i32 = 1003;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const FORBIDDEN: i32 = 2003;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4004;
    pub const DUPLICATE_ENTRY: i32 = 4009;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}

// ============================================================================
// Handler boundary
// ============================================================================

/// Handler-level error: HTTP status + API error code + message.
/// Converts into the same `ApiResponse` envelope as success paths.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Malformed or missing request fields
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            message,
        )
    }

    /// Malformed reference id
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_IDENTIFIER,
            message,
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            message,
        )
    }

    /// Wrap self in Err for early returns from handlers
    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiResponse::<()>::error(self.code, self.message)),
        )
            .into_response()
    }
}

/// Store failures map onto one consistent status set: 404 for missing
/// entities, 409 for stock and uniqueness conflicts, 500 otherwise.
/// Internal detail goes to the log, not the client.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(entity) => Self::not_found(format!("{} not found", entity)),
            StoreError::InsufficientStock { .. } => Self::new(
                StatusCode::CONFLICT,
                error_codes::INSUFFICIENT_STOCK,
                err.to_string(),
            ),
            StoreError::Duplicate(entity) => Self::new(
                StatusCode::CONFLICT,
                error_codes::DUPLICATE_ENTRY,
                format!("{} already exists", entity),
            ),
            StoreError::Database(e) => {
                tracing::error!("store failure: {}", e);
                Self::internal("Unexpected store failure")
            }
        }
    }
}

/// Handler return type: (status, enveloped body) or a mapped error
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// 200 success
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// 200 success with an explanatory marker message
pub fn ok_with_msg<T>(msg: impl Into<String>, data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success_with_msg(msg, data))))
}

/// 201 created
pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(42);
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["code"], 0);
        assert_eq!(value["msg"], "ok");
        assert_eq!(value["data"], 42);
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let resp = ApiResponse::<()>::error(error_codes::NOT_FOUND, "order not found");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["code"], 4004);
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: ApiError = StoreError::NotFound("order").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, error_codes::NOT_FOUND);
    }

    #[test]
    fn test_insufficient_stock_maps_to_409() {
        let err: ApiError = StoreError::InsufficientStock {
            product: "Air Max 90".to_string(),
            requested: 5,
            available: 2,
        }
        .into();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, error_codes::INSUFFICIENT_STOCK);
        assert!(err.message.contains("Air Max 90"));
    }

    #[test]
    fn test_duplicate_maps_to_409() {
        let err: ApiError = StoreError::Duplicate("category").into();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, error_codes::DUPLICATE_ENTRY);
    }

    #[test]
    fn test_database_error_hides_detail() {
        let err: ApiError = StoreError::Database(sqlx::Error::RowNotFound).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("RowNotFound"));
    }
}

//! Gateway types module
//!
//! Type-safe API boundary:
//!
//! ## Input types
//! - [`CreateOrderRequest`] / [`OrderItemRequest`]: checkout body
//! - [`ProductListQuery`] → [`ListParams`]: listing query parsing
//! - Product/catalog/address mutation bodies
//!
//! ## Output types
//! - [`ApiResponse<T>`]: unified response wrapper
//! - [`ApiError`] / [`ApiResult`]: handler boundary
//! - [`Pagination`] / [`ProductPageData`]: listing metadata

pub mod catalog;
pub mod order;
pub mod product;
pub mod response;

// Re-export commonly used types at module root
pub use catalog::{CreateAddressRequest, CreateSubCategoryRequest, NameRequest};
pub use order::{
    CreateOrderRequest, DeletedData, OrderItemRequest, OrderResponseData,
    UpdateOrderStatusRequest, parse_order_request, parse_status, parse_uuid,
};
pub use product::{
    CreateProductRequest, ListParams, Pagination, ProductListQuery, ProductPageData,
    UpdateProductRequest, parse_list_query, parse_new_product, parse_product_update,
};
pub use response::{ApiError, ApiResponse, ApiResult, created, error_codes, ok, ok_with_msg};

//! Order request/response types
//!
//! Shape validation happens at the serde + validator layer; identifier
//! parsing happens in [`parse_order_request`] so a malformed UUID is
//! reported as an invalid identifier, not a generic body error.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::gateway::types::response::ApiError;
use crate::store::models::OrderStatus;
use crate::store::orders::{NewOrder, NewOrderLine};

/// One requested line item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OrderItemRequest {
    /// Product id (UUID)
    pub product_id: String,
    /// Requested quantity, at least 1
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

/// Checkout request body
///
/// An absent or empty product list is accepted: the order is created
/// with zero lines and a total of zero.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    /// Delivery address id (UUID); must belong to the caller
    pub address_id: String,
    #[serde(default)]
    #[validate(nested)]
    pub products: Vec<OrderItemRequest>,
}

/// Status update body for PUT /orders/{id}
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    /// One of: pending, placed, shipped, delivered, cancelled
    pub status: String,
}

/// Parse a path or body identifier, mapping failure to a 400 with the
/// invalid-identifier code
pub fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid_id(format!("Invalid {} id", what)))
}

/// Validate shape and parse identifiers into store input
pub fn parse_order_request(
    user_id: Uuid,
    req: &CreateOrderRequest,
) -> Result<NewOrder, ApiError> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let address_id = parse_uuid(&req.address_id, "address")?;
    let lines = req
        .products
        .iter()
        .map(|item| {
            Ok(NewOrderLine {
                product_id: parse_uuid(&item.product_id, "product")?,
                quantity: item.quantity,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(NewOrder {
        user_id,
        address_id,
        lines,
    })
}

/// Parse the status body, mapping unknown values to a 400
pub fn parse_status(req: &UpdateOrderStatusRequest) -> Result<OrderStatus, ApiError> {
    req.status
        .parse::<OrderStatus>()
        .map_err(ApiError::bad_request)
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Order creation response data
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponseData {
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<crate::store::models::OrderRow> for OrderResponseData {
    fn from(row: crate::store::models::OrderRow) -> Self {
        Self {
            order_id: row.id,
            status: row.status,
            total_price: row.total_price,
            created_at: row.created_at,
        }
    }
}

/// Deletion confirmation
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedData {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid() -> String {
        Uuid::new_v4().to_string()
    }

    #[test]
    fn test_deserialize_order_request() {
        let json = format!(
            r#"{{"address_id":"{}","products":[{{"product_id":"{}","quantity":2}}]}}"#,
            uid(),
            uid()
        );
        let req: CreateOrderRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.products.len(), 1);
        assert_eq!(req.products[0].quantity, 2);
    }

    #[test]
    fn test_missing_products_defaults_to_empty() {
        let json = format!(r#"{{"address_id":"{}"}}"#, uid());
        let req: CreateOrderRequest = serde_json::from_str(&json).unwrap();
        assert!(req.products.is_empty());

        let parsed = parse_order_request(Uuid::new_v4(), &req).unwrap();
        assert!(parsed.lines.is_empty());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let req = CreateOrderRequest {
            address_id: uid(),
            products: vec![OrderItemRequest {
                product_id: uid(),
                quantity: 0,
            }],
        };
        let err = parse_order_request(Uuid::new_v4(), &req).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(
            err.code,
            crate::gateway::types::response::error_codes::INVALID_PARAMETER
        );
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let req = CreateOrderRequest {
            address_id: uid(),
            products: vec![OrderItemRequest {
                product_id: uid(),
                quantity: -3,
            }],
        };
        assert!(parse_order_request(Uuid::new_v4(), &req).is_err());
    }

    #[test]
    fn test_malformed_address_id_is_invalid_identifier() {
        let req = CreateOrderRequest {
            address_id: "not-a-uuid".to_string(),
            products: vec![],
        };
        let err = parse_order_request(Uuid::new_v4(), &req).unwrap_err();
        assert_eq!(
            err.code,
            crate::gateway::types::response::error_codes::INVALID_IDENTIFIER
        );
    }

    #[test]
    fn test_malformed_product_id_is_invalid_identifier() {
        let req = CreateOrderRequest {
            address_id: uid(),
            products: vec![OrderItemRequest {
                product_id: "42".to_string(),
                quantity: 1,
            }],
        };
        let err = parse_order_request(Uuid::new_v4(), &req).unwrap_err();
        assert_eq!(
            err.code,
            crate::gateway::types::response::error_codes::INVALID_IDENTIFIER
        );
    }

    #[test]
    fn test_parse_status_accepts_known_values() {
        let req = UpdateOrderStatusRequest {
            status: "shipped".to_string(),
        };
        assert_eq!(parse_status(&req).unwrap(), OrderStatus::Shipped);
    }

    #[test]
    fn test_parse_status_rejects_unknown() {
        let req = UpdateOrderStatusRequest {
            status: "teleported".to_string(),
        };
        assert!(parse_status(&req).is_err());
    }
}

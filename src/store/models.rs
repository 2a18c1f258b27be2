//! Row types and populated projections
//!
//! Row structs mirror table columns one-to-one. The `*Detail` /
//! `*Summary` types are populate projections: foreign keys resolved
//! into the selected fields of the referenced row, nothing more.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

// ============================================================================
// Order status
// ============================================================================

/// Lifecycle of an order. `Pending` on insert; only this field is
/// mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Placed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Placed => "placed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "placed" => Ok(OrderStatus::Placed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

// ============================================================================
// Rows
// ============================================================================

#[derive(Debug, Clone, sqlx::FromRow, Serialize, ToSchema)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, ToSchema)]
pub struct SubCategoryRow {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, ToSchema)]
pub struct BrandRow {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, ToSchema)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
    pub brand_id: Uuid,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Stock count; never negative (CHECK constraint backs this up)
    pub quantity: i32,
    pub final_price: Decimal,
    /// Ordered image URLs
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, ToSchema)]
pub struct AddressRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub pincode: String,
    pub landmark: Option<String>,
    pub district: String,
    pub state: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, ToSchema)]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Uuid,
    /// Computed at creation time, immutable after
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Populate projections
// ============================================================================

/// Foreign key resolved to {id, name} only (product listings)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NamedRef {
    pub id: Uuid,
    pub name: String,
}

/// Product with category/sub_category/brand populated to {id, name}
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductListing {
    pub id: Uuid,
    pub name: String,
    pub category: NamedRef,
    pub sub_category: NamedRef,
    pub brand: NamedRef,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: i32,
    pub final_price: Decimal,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Address projection for order listings; the address id is suppressed
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddressContact {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub pincode: String,
    pub landmark: Option<String>,
    pub district: String,
    pub state: String,
}

impl From<AddressRow> for AddressContact {
    fn from(row: AddressRow) -> Self {
        Self {
            name: row.name,
            mobile: row.mobile,
            email: row.email,
            pincode: row.pincode,
            landmark: row.landmark,
            district: row.district,
            state: row.state,
        }
    }
}

/// Line product projection for the admin order listing: {name, images}
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductCard {
    pub name: String,
    pub images: Vec<String>,
}

/// Line product projection for "my orders": {name, color, brand, size}
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductSummary {
    pub name: String,
    pub color: Option<String>,
    pub brand: String,
    pub size: Option<String>,
}

/// One line item with its product populated to the admin shape
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderLineDetail {
    pub quantity: i32,
    pub product: ProductCard,
}

/// One line item with its product populated to the buyer shape
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderLineSummary {
    pub quantity: i32,
    pub product: ProductSummary,
}

/// Fully populated order for admin listings and id-gated reads
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub address: AddressContact,
    pub items: Vec<OrderLineDetail>,
}

/// Populated order scoped to the calling buyer
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderSummary {
    pub id: Uuid,
    pub status: OrderStatus,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderLineSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_round_trip() {
        for s in [
            OrderStatus::Pending,
            OrderStatus::Placed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(s.as_str().parse::<OrderStatus>().unwrap(), s);
        }
    }

    #[test]
    fn test_order_status_rejects_unknown() {
        assert!("refunded".parse::<OrderStatus>().is_err());
        assert!("Shipped".parse::<OrderStatus>().is_err()); // case-sensitive
    }

    #[test]
    fn test_order_status_serde_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, r#""shipped""#);
    }

    #[test]
    fn test_address_contact_suppresses_ids() {
        let row = AddressRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Asha".to_string(),
            mobile: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
            pincode: "682001".to_string(),
            landmark: None,
            district: "Ernakulam".to_string(),
            state: "Kerala".to_string(),
        };
        let contact = AddressContact::from(row);
        let value = serde_json::to_value(&contact).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("user_id").is_none());
        assert_eq!(value["district"], "Ernakulam");
    }
}

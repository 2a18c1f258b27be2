//! Document store: PostgreSQL-backed repositories
//!
//! Collections: orders (+ embedded order_items), products, categories,
//! sub_categories, brands, addresses. Each repository provides
//! lookup-by-id, lookup-by-filter, create, update, delete; read paths
//! resolve foreign keys into projections of the referenced rows
//! (populate) so handlers never re-join by hand.

pub mod addresses;
pub mod catalog;
pub mod filter;
pub mod models;
pub mod orders;
pub mod products;
pub mod schema;

use thiserror::Error;

/// Store-level failure taxonomy
///
/// Handlers map each variant onto exactly one HTTP status; see the
/// response module for the mapping.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Requested quantity exceeds available stock
    #[error("insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: i32,
        available: i32,
    },

    /// Unique-constraint violation on create
    #[error("{0} already exists")]
    Duplicate(&'static str),

    /// Unexpected store failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a sqlx error on a create path, turning unique violations
    /// into [`StoreError::Duplicate`] for the given entity.
    pub fn on_create(entity: &'static str, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate(entity),
            _ => StoreError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = StoreError::NotFound("address");
        assert_eq!(e.to_string(), "address not found");

        let e = StoreError::InsufficientStock {
            product: "Air Max 90".to_string(),
            requested: 5,
            available: 2,
        };
        assert_eq!(
            e.to_string(),
            "insufficient stock for Air Max 90: requested 5, available 2"
        );

        let e = StoreError::Duplicate("category");
        assert_eq!(e.to_string(), "category already exists");
    }

    #[test]
    fn test_on_create_passes_through_non_unique_errors() {
        let e = StoreError::on_create("brand", sqlx::Error::RowNotFound);
        assert!(matches!(e, StoreError::Database(_)));
    }
}

//! Order repository
//!
//! Order placement is the one multi-document write in the system. It
//! runs inside a single transaction: product rows are locked, stock is
//! checked, the order and its lines are inserted and stock is
//! decremented, then everything commits together. Concurrent checkouts
//! against the same product serialize on the row locks, so stock can
//! never go negative and a rejected order leaves no writes behind.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use super::StoreError;
use super::models::{
    AddressContact, OrderDetail, OrderLineDetail, OrderLineSummary, OrderRow, OrderStatus,
    OrderSummary, ProductCard, ProductSummary,
};

/// One requested line item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Validated checkout input. An empty line list is legal: the order is
/// created with zero lines and a total of zero.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub lines: Vec<NewOrderLine>,
}

const ORDER_COLUMNS: &str = "id, user_id, address_id, total_price, status, created_at";

const DETAIL_SELECT: &str = "SELECT o.id, o.user_id, o.address_id, o.total_price, o.status, \
     o.created_at, a.name AS address_name, a.mobile, a.email, a.pincode, a.landmark, \
     a.district, a.state \
     FROM orders o JOIN addresses a ON a.id = o.address_id";

pub struct OrderRepository;

impl OrderRepository {
    /// Place an order: existence + ownership + stock checks, price
    /// accumulation, order insert and inventory decrement in one
    /// transaction.
    pub async fn place(pool: &PgPool, order: &NewOrder) -> Result<OrderRow, StoreError> {
        let mut tx = pool.begin().await?;

        // 1. Delivery address must exist and belong to the buyer
        let address: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM addresses WHERE id = $1 AND user_id = $2")
                .bind(order.address_id)
                .bind(order.user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if address.is_none() {
            return Err(StoreError::NotFound("address"));
        }

        // 2. Lock each product, verify stock, accumulate the total at
        //    the price read under the lock
        let mut total = Decimal::ZERO;
        for line in &order.lines {
            let product = sqlx::query(
                "SELECT name, quantity, final_price FROM products WHERE id = $1 FOR UPDATE",
            )
            .bind(line.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound("product"))?;

            let name: String = product.try_get("name")?;
            let available: i32 = product.try_get("quantity")?;
            let price: Decimal = product.try_get("final_price")?;

            if available < line.quantity {
                return Err(StoreError::InsufficientStock {
                    product: name,
                    requested: line.quantity,
                    available,
                });
            }
            total += price * Decimal::from(line.quantity);
        }

        // 3. Insert the order with the computed total
        let created = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders (user_id, address_id, total_price) \
             VALUES ($1, $2, $3) RETURNING {}",
            ORDER_COLUMNS
        ))
        .bind(order.user_id)
        .bind(order.address_id)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        // 4. Insert lines and decrement stock under the held locks
        for line in &order.lines {
            sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES ($1, $2, $3)")
                .bind(created.id)
                .bind(line.product_id)
                .bind(line.quantity)
                .execute(&mut *tx)
                .await
                .map_err(|e| StoreError::on_create("order line", e))?;

            sqlx::query("UPDATE products SET quantity = quantity - $1 WHERE id = $2")
                .bind(line.quantity)
                .bind(line.product_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::info!(
            order_id = %created.id,
            user_id = %order.user_id,
            lines = order.lines.len(),
            total = %total,
            "order placed"
        );
        Ok(created)
    }

    /// All orders, populated for the admin view
    pub async fn list_all(pool: &PgPool) -> Result<Vec<OrderDetail>, StoreError> {
        let rows = sqlx::query(&format!("{} ORDER BY o.created_at DESC", DETAIL_SELECT))
            .fetch_all(pool)
            .await?;
        Self::assemble_details(pool, rows).await
    }

    /// Orders created during the current calendar day, server-local
    /// time, admin population shape.
    pub async fn list_recent(pool: &PgPool) -> Result<Vec<OrderDetail>, StoreError> {
        let (start, end) = day_bounds(Local::now());
        let rows = sqlx::query(&format!(
            "{} WHERE o.created_at >= $1 AND o.created_at < $2 ORDER BY o.created_at DESC",
            DETAIL_SELECT
        ))
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
        Self::assemble_details(pool, rows).await
    }

    /// One populated order by id, admin shape
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<OrderDetail>, StoreError> {
        let row = sqlx::query(&format!("{} WHERE o.id = $1", DETAIL_SELECT))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        let Some(row) = row else { return Ok(None) };
        let mut details = Self::assemble_details(pool, vec![row]).await?;
        Ok(details.pop())
    }

    /// The caller's orders, buyer population shape: product
    /// {name, color, brand, size}. An empty result is a valid answer.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<OrderSummary>, StoreError> {
        let orders = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {} FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
            ORDER_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let item_rows = sqlx::query(
            "SELECT oi.order_id, oi.quantity, p.name, p.color, p.size, b.name AS brand_name \
             FROM order_items oi \
             JOIN products p ON p.id = oi.product_id \
             JOIN brands b ON b.id = p.brand_id \
             WHERE oi.order_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;

        let mut items: HashMap<Uuid, Vec<OrderLineSummary>> = HashMap::new();
        for row in &item_rows {
            let order_id: Uuid = row.try_get("order_id")?;
            items.entry(order_id).or_default().push(OrderLineSummary {
                quantity: row.try_get("quantity")?,
                product: ProductSummary {
                    name: row.try_get("name")?,
                    color: row.try_get("color")?,
                    brand: row.try_get("brand_name")?,
                    size: row.try_get("size")?,
                },
            });
        }

        Ok(orders
            .into_iter()
            .map(|o| OrderSummary {
                items: items.remove(&o.id).unwrap_or_default(),
                id: o.id,
                status: o.status,
                total_price: o.total_price,
                created_at: o.created_at,
            })
            .collect())
    }

    /// Update only the status field. Repeating the same transition is
    /// a no-op with the same outcome.
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<OrderRow, StoreError> {
        sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $1 WHERE id = $2 RETURNING {}",
            ORDER_COLUMNS
        ))
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound("order"))
    }

    /// Delete an order and its embedded lines (cascade). Stock is not
    /// restored; cancellation semantics live in status updates.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("order"));
        }
        Ok(())
    }

    /// Attach line items (product populated to {name, images}) to
    /// order+address rows from `DETAIL_SELECT`.
    async fn assemble_details(
        pool: &PgPool,
        rows: Vec<PgRow>,
    ) -> Result<Vec<OrderDetail>, StoreError> {
        let ids: Vec<Uuid> = rows
            .iter()
            .map(|r| r.try_get::<Uuid, _>("id"))
            .collect::<Result<_, _>>()?;

        let item_rows = sqlx::query(
            "SELECT oi.order_id, oi.quantity, p.name, p.images \
             FROM order_items oi JOIN products p ON p.id = oi.product_id \
             WHERE oi.order_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;

        let mut items: HashMap<Uuid, Vec<OrderLineDetail>> = HashMap::new();
        for row in &item_rows {
            let order_id: Uuid = row.try_get("order_id")?;
            items.entry(order_id).or_default().push(OrderLineDetail {
                quantity: row.try_get("quantity")?,
                product: ProductCard {
                    name: row.try_get("name")?,
                    images: row.try_get("images")?,
                },
            });
        }

        rows.iter()
            .map(|row| {
                let id: Uuid = row.try_get("id")?;
                Ok(OrderDetail {
                    id,
                    user_id: row.try_get("user_id")?,
                    status: row.try_get("status")?,
                    total_price: row.try_get("total_price")?,
                    created_at: row.try_get("created_at")?,
                    address: AddressContact {
                        name: row.try_get("address_name")?,
                        mobile: row.try_get("mobile")?,
                        email: row.try_get("email")?,
                        pincode: row.try_get("pincode")?,
                        landmark: row.try_get("landmark")?,
                        district: row.try_get("district")?,
                        state: row.try_get("state")?,
                    },
                    items: items.remove(&id).unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }
}

/// [start, end) of the calendar day containing `now`, in `now`'s
/// timezone, expressed in UTC for TIMESTAMPTZ comparison. A DST gap at
/// midnight falls back to treating the naive time as UTC rather than
/// failing the query.
pub fn day_bounds<Tz: TimeZone>(now: DateTime<Tz>) -> (DateTime<Utc>, DateTime<Utc>) {
    let tz = now.timezone();
    let start_naive = now.date_naive().and_time(NaiveTime::MIN);
    let end_naive = start_naive + Duration::days(1);

    let resolve = |naive: NaiveDateTime| match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    };
    (resolve(start_naive), resolve(end_naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_day_bounds_utc() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 15, 30, 0).unwrap();
        let (start, end) = day_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_day_bounds_offset_zone() {
        // 01:30 on Aug 6 in IST is still Aug 5 in UTC; the local day
        // must win.
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now = ist.with_ymd_and_hms(2026, 8, 6, 1, 30, 0).unwrap();
        let (start, end) = day_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 5, 18, 30, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 8, 6, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_day_bounds_cover_exactly_one_day() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let (start, end) = day_bounds(now);
        assert_eq!(end - start, Duration::days(1));
        assert!(start <= now && now < end);
    }

    // Transactional placement tests live in tests/order_flow.rs; they
    // need a running PostgreSQL.
}

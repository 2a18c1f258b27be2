//! Declarative product-listing specification
//!
//! A listing request is reduced to three values: a [`ProductFilter`]
//! (which criteria apply), a [`ProductSort`] (whitelisted column +
//! direction) and a [`Page`]. The filter renders to a list of
//! [`Predicate`]s, so the composition logic is assertable in unit tests
//! without touching a database; rendering into SQL happens in one place
//! via `sqlx::QueryBuilder` bind pushes.

use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// Default page size when the client sends none
pub const DEFAULT_LIMIT: i64 = 10;

// ============================================================================
// Filter
// ============================================================================

/// Inclusive price bounds on `final_price`; either side optional.
///
/// An inverted range (min > max) is rendered as-is and simply matches
/// nothing; it is not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Which criteria a listing query applies. Only supplied, resolved
/// criteria contribute predicates; names have already been resolved to
/// ids by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    pub sub_category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub size: Option<String>,
    pub price: PriceRange,
}

/// One rendered predicate on the products table (alias `p`)
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `p.<column> = <uuid>`
    IdEq(&'static str, Uuid),
    /// `p.<column> = <text>`
    TextEq(&'static str, String),
    /// Single range predicate over `p.final_price`; both bounds inclusive
    PriceBetween {
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
}

impl Predicate {
    /// Push ` AND <predicate>` onto the builder with bound parameters
    fn push_onto(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Predicate::IdEq(column, id) => {
                qb.push(" AND p.");
                qb.push(*column);
                qb.push(" = ");
                qb.push_bind(*id);
            }
            Predicate::TextEq(column, value) => {
                qb.push(" AND p.");
                qb.push(*column);
                qb.push(" = ");
                qb.push_bind(value.clone());
            }
            Predicate::PriceBetween { min, max } => match (min, max) {
                (Some(lo), Some(hi)) => {
                    qb.push(" AND p.final_price BETWEEN ");
                    qb.push_bind(*lo);
                    qb.push(" AND ");
                    qb.push_bind(*hi);
                }
                (Some(lo), None) => {
                    qb.push(" AND p.final_price >= ");
                    qb.push_bind(*lo);
                }
                (None, Some(hi)) => {
                    qb.push(" AND p.final_price <= ");
                    qb.push_bind(*hi);
                }
                (None, None) => {}
            },
        }
    }
}

impl ProductFilter {
    /// The predicate list this filter contributes. Field → predicate is
    /// fixed here; nothing else inspects the individual options.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut preds = Vec::new();
        if let Some(id) = self.category_id {
            preds.push(Predicate::IdEq("category_id", id));
        }
        if let Some(id) = self.sub_category_id {
            preds.push(Predicate::IdEq("sub_category_id", id));
        }
        if let Some(id) = self.brand_id {
            preds.push(Predicate::IdEq("brand_id", id));
        }
        if let Some(size) = &self.size {
            preds.push(Predicate::TextEq("size", size.clone()));
        }
        if !self.price.is_empty() {
            preds.push(Predicate::PriceBetween {
                min: self.price.min,
                max: self.price.max,
            });
        }
        preds
    }

    /// Append `WHERE`-clause terms to a query that already contains
    /// `... WHERE TRUE` (or equivalent).
    pub fn apply(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for predicate in self.predicates() {
            predicate.push_onto(qb);
        }
    }
}

// ============================================================================
// Sort
// ============================================================================

/// Whitelisted sortable columns; anything else is rejected at the
/// boundary before it reaches SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    FinalPrice,
    Quantity,
    CreatedAt,
}

impl SortField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(SortField::Name),
            "final_price" => Some(SortField::FinalPrice),
            "quantity" => Some(SortField::Quantity),
            "created_at" => Some(SortField::CreatedAt),
            _ => None,
        }
    }

    pub fn as_column(self) -> &'static str {
        match self {
            SortField::Name => "p.name",
            SortField::FinalPrice => "p.final_price",
            SortField::Quantity => "p.quantity",
            SortField::CreatedAt => "p.created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Sort specification; `None` field means the default listing order
/// (newest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub field: Option<SortField>,
    pub order: SortOrder,
}

impl Default for ProductSort {
    fn default() -> Self {
        Self {
            field: None,
            order: SortOrder::Asc,
        }
    }
}

impl ProductSort {
    /// The ORDER BY clause body. Ties on the sort key fall back to id
    /// so pages are stable across requests.
    pub fn order_by(&self) -> String {
        match self.field {
            Some(field) => format!("{} {}, p.id", field.as_column(), self.order.as_sql()),
            None => "p.created_at DESC, p.id".to_string(),
        }
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// 1-based page request; both values are validated positive at the
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Ceiling division; zero rows means zero pages
    pub fn total_pages(total: i64, limit: i64) -> i64 {
        if total == 0 { 0 } else { (total + limit - 1) / limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_filter_has_no_predicates() {
        assert!(ProductFilter::default().predicates().is_empty());
    }

    #[test]
    fn test_only_supplied_criteria_contribute() {
        let brand = Uuid::new_v4();
        let filter = ProductFilter {
            brand_id: Some(brand),
            size: Some("XL".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filter.predicates(),
            vec![
                Predicate::IdEq("brand_id", brand),
                Predicate::TextEq("size", "XL".to_string()),
            ]
        );
    }

    #[test]
    fn test_price_bounds_combine_into_single_predicate() {
        let filter = ProductFilter {
            price: PriceRange {
                min: Some(dec("100")),
                max: Some(dec("500")),
            },
            ..Default::default()
        };
        let preds = filter.predicates();
        assert_eq!(preds.len(), 1);
        assert_eq!(
            preds[0],
            Predicate::PriceBetween {
                min: Some(dec("100")),
                max: Some(dec("500")),
            }
        );
    }

    #[test]
    fn test_half_open_price_range() {
        let filter = ProductFilter {
            price: PriceRange {
                min: None,
                max: Some(dec("50")),
            },
            ..Default::default()
        };
        let mut qb = QueryBuilder::new("SELECT * FROM products p WHERE TRUE");
        filter.apply(&mut qb);
        assert!(qb.sql().contains("p.final_price <= "));
        assert!(!qb.sql().contains("BETWEEN"));
    }

    #[test]
    fn test_inverted_range_renders_not_errors() {
        // min > max matches nothing; it must still render cleanly
        let filter = ProductFilter {
            price: PriceRange {
                min: Some(dec("100")),
                max: Some(dec("50")),
            },
            ..Default::default()
        };
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products p WHERE TRUE");
        filter.apply(&mut qb);
        assert!(qb.sql().contains("BETWEEN"));
    }

    #[test]
    fn test_apply_renders_all_criteria() {
        let filter = ProductFilter {
            category_id: Some(Uuid::new_v4()),
            sub_category_id: Some(Uuid::new_v4()),
            brand_id: Some(Uuid::new_v4()),
            size: Some("M".to_string()),
            price: PriceRange {
                min: Some(dec("10")),
                max: None,
            },
        };
        let mut qb = QueryBuilder::new("SELECT * FROM products p WHERE TRUE");
        filter.apply(&mut qb);
        let sql = qb.sql();
        assert!(sql.contains("p.category_id = "));
        assert!(sql.contains("p.sub_category_id = "));
        assert!(sql.contains("p.brand_id = "));
        assert!(sql.contains("p.size = "));
        assert!(sql.contains("p.final_price >= "));
    }

    #[test]
    fn test_sort_field_whitelist() {
        assert_eq!(SortField::parse("final_price"), Some(SortField::FinalPrice));
        assert_eq!(SortField::parse("name"), Some(SortField::Name));
        // Injection attempts and unknown columns never parse
        assert_eq!(SortField::parse("price; DROP TABLE products"), None);
        assert_eq!(SortField::parse("images"), None);
    }

    #[test]
    fn test_sort_defaults_to_newest_first() {
        assert_eq!(ProductSort::default().order_by(), "p.created_at DESC, p.id");
    }

    #[test]
    fn test_explicit_sort_defaults_asc() {
        let sort = ProductSort {
            field: Some(SortField::FinalPrice),
            order: SortOrder::default(),
        };
        assert_eq!(sort.order_by(), "p.final_price ASC, p.id");
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(Page::default().offset(), 0);
        assert_eq!(Page { page: 3, limit: 10 }.offset(), 20);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(Page::total_pages(0, 10), 0);
        assert_eq!(Page::total_pages(1, 10), 1);
        assert_eq!(Page::total_pages(10, 10), 1);
        assert_eq!(Page::total_pages(11, 10), 2);
        assert_eq!(Page::total_pages(95, 10), 10);
    }
}

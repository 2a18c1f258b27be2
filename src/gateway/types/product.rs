//! Product listing query and product mutation types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::gateway::types::order::parse_uuid;
use crate::gateway::types::response::ApiError;
use crate::store::filter::{Page, PriceRange, ProductSort, SortField, SortOrder};
use crate::store::models::ProductListing;
use crate::store::products::{NewProduct, ProductUpdate};

// ============================================================================
// Listing query
// ============================================================================

/// GET /products query parameters. Category, sub-category and brand
/// are human-readable *names*, resolved to ids before filtering.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// One of: name, final_price, quantity, created_at
    pub sort_by: Option<String>,
    /// asc (default) or desc
    pub sort_order: Option<String>,
    /// 1-based, default 1
    pub page: Option<i64>,
    /// Default 10
    pub limit: Option<i64>,
}

/// Parsed listing request: names still unresolved, everything else
/// validated and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub price: PriceRange,
    pub sort: ProductSort,
    pub page: Page,
}

/// Validate pagination and sorting; unknown sort inputs are rejected
/// rather than silently ignored.
pub fn parse_list_query(query: &ProductListQuery) -> Result<ListParams, ApiError> {
    let page_no = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(crate::store::filter::DEFAULT_LIMIT);
    if page_no < 1 || limit < 1 {
        return Err(ApiError::bad_request(
            "page and limit must be positive numbers",
        ));
    }

    let field = match &query.sort_by {
        Some(raw) => Some(
            SortField::parse(raw)
                .ok_or_else(|| ApiError::bad_request(format!("Unknown sort field: {}", raw)))?,
        ),
        None => None,
    };
    let order = match &query.sort_order {
        Some(raw) => SortOrder::parse(raw)
            .ok_or_else(|| ApiError::bad_request(format!("Unknown sort order: {}", raw)))?,
        None => SortOrder::default(),
    };

    Ok(ListParams {
        category: query.category.clone(),
        sub_category: query.sub_category.clone(),
        brand: query.brand.clone(),
        size: query.size.clone(),
        price: PriceRange {
            min: query.min_price,
            max: query.max_price,
        },
        sort: ProductSort { field, order },
        page: Page {
            page: page_no,
            limit,
        },
    })
}

// ============================================================================
// Pagination block
// ============================================================================

/// Pagination metadata returned beside every product page
#[derive(Debug, Serialize, ToSchema)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub skip: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(total: i64, page: &Page) -> Self {
        Self {
            total,
            page: page.page,
            limit: page.limit,
            skip: page.offset(),
            total_pages: Page::total_pages(total, page.limit),
        }
    }
}

/// Product page response data
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPageData {
    pub products: Vec<ProductListing>,
    pub pagination: Pagination,
}

// ============================================================================
// Mutation requests
// ============================================================================

/// POST /products body. `images` are local file paths handed to the
/// media host; the stored product carries the returned public URLs.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub category_id: String,
    pub sub_category_id: String,
    pub brand_id: String,
    pub size: Option<String>,
    pub color: Option<String>,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    #[serde(default)]
    pub quantity: i32,
    pub final_price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
}

/// PUT /products/{id} body; absent fields keep their stored values
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub sub_category_id: Option<String>,
    pub brand_id: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: Option<i32>,
    pub final_price: Option<Decimal>,
    /// Local file paths; replaces the stored image list when present
    pub images: Option<Vec<String>>,
}

/// Validate and parse a create request; `image_urls` come from the
/// media collaborator, not the raw request.
pub fn parse_new_product(
    req: &CreateProductRequest,
    image_urls: Vec<String>,
) -> Result<NewProduct, ApiError> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    if req.final_price < Decimal::ZERO {
        return Err(ApiError::bad_request("final_price must not be negative"));
    }

    Ok(NewProduct {
        name: req.name.clone(),
        category_id: parse_uuid(&req.category_id, "category")?,
        sub_category_id: parse_uuid(&req.sub_category_id, "sub category")?,
        brand_id: parse_uuid(&req.brand_id, "brand")?,
        size: req.size.clone(),
        color: req.color.clone(),
        quantity: req.quantity,
        final_price: req.final_price,
        images: image_urls,
    })
}

/// Validate and parse an update request; `image_urls` is `Some` only
/// when the request replaced the image list.
pub fn parse_product_update(
    req: &UpdateProductRequest,
    image_urls: Option<Vec<String>>,
) -> Result<ProductUpdate, ApiError> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    if matches!(req.final_price, Some(p) if p < Decimal::ZERO) {
        return Err(ApiError::bad_request("final_price must not be negative"));
    }

    let parse_opt = |raw: &Option<String>, what: &str| -> Result<Option<Uuid>, ApiError> {
        raw.as_deref().map(|r| parse_uuid(r, what)).transpose()
    };

    Ok(ProductUpdate {
        name: req.name.clone(),
        category_id: parse_opt(&req.category_id, "category")?,
        sub_category_id: parse_opt(&req.sub_category_id, "sub category")?,
        brand_id: parse_opt(&req.brand_id, "brand")?,
        size: req.size.clone(),
        color: req.color.clone(),
        quantity: req.quantity,
        final_price: req.final_price,
        images: image_urls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_defaults_page_1_limit_10() {
        let params = parse_list_query(&ProductListQuery::default()).unwrap();
        assert_eq!(params.page, Page { page: 1, limit: 10 });
        assert_eq!(params.sort, ProductSort::default());
    }

    #[test]
    fn test_zero_page_rejected() {
        let query = ProductListQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(parse_list_query(&query).is_err());
    }

    #[test]
    fn test_negative_limit_rejected() {
        let query = ProductListQuery {
            limit: Some(-5),
            ..Default::default()
        };
        assert!(parse_list_query(&query).is_err());
    }

    #[test]
    fn test_unknown_sort_field_rejected() {
        let query = ProductListQuery {
            sort_by: Some("popularity".to_string()),
            ..Default::default()
        };
        assert!(parse_list_query(&query).is_err());
    }

    #[test]
    fn test_sort_order_defaults_asc() {
        let query = ProductListQuery {
            sort_by: Some("final_price".to_string()),
            ..Default::default()
        };
        let params = parse_list_query(&query).unwrap();
        assert_eq!(params.sort.order, SortOrder::Asc);
        assert_eq!(params.sort.field, Some(SortField::FinalPrice));
    }

    #[test]
    fn test_price_bounds_carried_through() {
        let query = ProductListQuery {
            min_price: Some(dec("100")),
            max_price: Some(dec("50")),
            ..Default::default()
        };
        // Inverted bounds are not rejected here; they just match nothing
        let params = parse_list_query(&query).unwrap();
        assert_eq!(params.price.min, Some(dec("100")));
        assert_eq!(params.price.max, Some(dec("50")));
    }

    #[test]
    fn test_pagination_block() {
        let page = Page { page: 2, limit: 10 };
        let p = Pagination::new(35, &page);
        assert_eq!(p.total, 35);
        assert_eq!(p.skip, 10);
        assert_eq!(p.total_pages, 4);
    }

    #[test]
    fn test_parse_new_product_rejects_negative_price() {
        let req = CreateProductRequest {
            name: "Air Max 90".to_string(),
            category_id: Uuid::new_v4().to_string(),
            sub_category_id: Uuid::new_v4().to_string(),
            brand_id: Uuid::new_v4().to_string(),
            size: None,
            color: None,
            quantity: 1,
            final_price: dec("-1"),
            images: vec![],
        };
        assert!(parse_new_product(&req, vec![]).is_err());
    }

    #[test]
    fn test_parse_new_product_uses_media_urls() {
        let req = CreateProductRequest {
            name: "Air Max 90".to_string(),
            category_id: Uuid::new_v4().to_string(),
            sub_category_id: Uuid::new_v4().to_string(),
            brand_id: Uuid::new_v4().to_string(),
            size: Some("42".to_string()),
            color: Some("white".to_string()),
            quantity: 10,
            final_price: dec("129.99"),
            images: vec!["/tmp/a.jpg".to_string()],
        };
        let product =
            parse_new_product(&req, vec!["https://media.example.com/a.jpg".to_string()]).unwrap();
        assert_eq!(product.images, vec!["https://media.example.com/a.jpg"]);
    }

    #[test]
    fn test_parse_update_empty_is_noop_shape() {
        let update = parse_product_update(&UpdateProductRequest::default(), None).unwrap();
        assert!(update.name.is_none());
        assert!(update.images.is_none());
    }

    #[test]
    fn test_parse_update_bad_brand_id() {
        let req = UpdateProductRequest {
            brand_id: Some("nope".to_string()),
            ..Default::default()
        };
        let err = parse_product_update(&req, None).unwrap_err();
        assert_eq!(
            err.code,
            crate::gateway::types::response::error_codes::INVALID_IDENTIFIER
        );
    }
}

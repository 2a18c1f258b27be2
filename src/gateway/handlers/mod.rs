//! HTTP handlers, split by concern

pub mod address;
pub mod catalog;
pub mod health;
pub mod order;
pub mod product;

pub use address::{__path_create_address, __path_my_addresses, create_address, my_addresses};
pub use catalog::{
    __path_create_brand, __path_create_category, __path_create_sub_category, __path_delete_brand,
    __path_delete_category, __path_delete_sub_category, __path_list_brands, __path_list_categories,
    __path_list_sub_categories, __path_rename_brand, __path_rename_category,
    __path_rename_sub_category, create_brand, create_category, create_sub_category, delete_brand,
    delete_category, delete_sub_category, list_brands, list_categories, list_sub_categories,
    rename_brand, rename_category, rename_sub_category,
};
pub use health::{HealthResponse, __path_health_check, health_check};
pub use order::{
    __path_create_order, __path_delete_order, __path_get_order, __path_list_orders,
    __path_my_orders, __path_recent_orders, __path_update_order_status, create_order, delete_order,
    get_order, list_orders, my_orders, recent_orders, update_order_status,
};
pub use product::{
    __path_create_product, __path_delete_product, __path_get_product, __path_list_products,
    __path_update_product, create_product, delete_product, get_product, list_products,
    update_product,
};

//! Catalog (category / sub-category / brand) and address request types

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Create/rename body for categories and brands
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NameRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

/// Create body for sub-categories: name plus parent category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubCategoryRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub category_id: String,
}

/// POST /addresses body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAddressRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 10, max = 15, message = "mobile must be 10-15 digits"))]
    pub mobile: String,
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "pincode must not be empty"))]
    pub pincode: String,
    pub landmark: Option<String>,
    #[validate(length(min = 1, message = "district must not be empty"))]
    pub district: String,
    #[validate(length(min = 1, message = "state must not be empty"))]
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        let req = NameRequest {
            name: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_address_email_validated() {
        let req = CreateAddressRequest {
            name: "Asha".to_string(),
            mobile: "9876543210".to_string(),
            email: "not-an-email".to_string(),
            pincode: "682001".to_string(),
            landmark: None,
            district: "Ernakulam".to_string(),
            state: "Kerala".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_valid_address_passes() {
        let req = CreateAddressRequest {
            name: "Asha".to_string(),
            mobile: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
            pincode: "682001".to_string(),
            landmark: Some("Near the lighthouse".to_string()),
            district: "Ernakulam".to_string(),
            state: "Kerala".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}

//! Authentication collaborator
//!
//! Token issuance lives in a separate identity service; this module
//! only verifies bearer tokens and injects the caller's identity into
//! the request. Two middleware layers:
//!
//! - [`jwt_auth_middleware`]: any authenticated caller
//! - [`require_admin`]: layered after the above on mutation routes

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::gateway::{
    state::AppState,
    types::{ApiResponse, error_codes},
};

/// Caller role carried in the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

/// Token claims as issued by the identity service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub role: Role,
    /// Expiry, seconds since epoch (validated by jsonwebtoken)
    pub exp: usize,
}

/// Authenticated caller, injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

type AuthRejection = (StatusCode, Json<ApiResponse<()>>);

fn unauthorized(code: i32, msg: &str) -> AuthRejection {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(code, msg)),
    )
}

/// Verify a bearer token against the configured secret
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Axum middleware: require a valid bearer token, inject [`AuthUser`]
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthRejection> {
    // 1. Extract Authorization header
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            unauthorized(error_codes::MISSING_AUTH, "Missing Authorization header")
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized(error_codes::AUTH_FAILED, "Invalid token format"))?;

    // 2. Verify token
    let claims = verify_token(&state.jwt_secret, token)
        .map_err(|_| unauthorized(error_codes::AUTH_FAILED, "Invalid or expired token"))?;

    // 3. Inject caller identity
    request.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        role: claims.role,
    });
    Ok(next.run(request).await)
}

/// Axum middleware: reject authenticated non-admin callers
pub async fn require_admin(request: Request<Body>, next: Next) -> Result<Response, AuthRejection> {
    let user = request.extensions().get::<AuthUser>().ok_or_else(|| {
        unauthorized(error_codes::MISSING_AUTH, "Missing Authorization header")
    })?;

    if !user.is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<()>::error(
                error_codes::FORBIDDEN,
                "Administrator role required",
            )),
        ));
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn make_token(secret: &str, role: Role, exp_offset_secs: i64) -> String {
        let exp = (chrono::Utc::now().timestamp() + exp_offset_secs) as usize;
        let claims = Claims {
            sub: Uuid::new_v4(),
            role,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let token = make_token("s3cret", Role::Admin, 3600);
        let claims = verify_token("s3cret", &token).unwrap();
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = make_token("s3cret", Role::Customer, 3600);
        assert!(verify_token("other-secret", &token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let token = make_token("s3cret", Role::Customer, -3600);
        assert!(verify_token("s3cret", &token).is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        let role: Role = serde_json::from_str(r#""customer""#).unwrap();
        assert_eq!(role, Role::Customer);
    }
}

//! Signed-cookie auth helpers for integration tests.
//!
//! Requests are authenticated from the `safereturn_access_token` cookie.
//! `TestIdentity` signs a real JWT with the test secret so requests pass
//! through the `Identity` extractor exactly as they would in production.

use jsonwebtoken::{EncodingKey, Header, encode};
use safereturn_auth_types::cookie::{ACCESS_TOKEN_EXP, SAFERETURN_ACCESS_TOKEN};
use safereturn_auth_types::token::JwtClaims;
use safereturn_domain::user::UserRole;
use uuid::Uuid;

/// Configurable identity for test requests.
pub struct TestIdentity {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl TestIdentity {
    pub fn new(user_id: Uuid, user_role: u8) -> Self {
        Self { user_id, user_role }
    }

    pub fn user(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::User.as_u8())
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::Admin.as_u8())
    }

    /// Sign an access token for this identity with `secret`.
    pub fn access_token(&self, secret: &str) -> String {
        let exp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + ACCESS_TOKEN_EXP;
        let claims = JwtClaims {
            sub: self.user_id.to_string(),
            role: self.user_role,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    /// `Cookie` header value carrying the signed access token.
    pub fn cookie(&self, secret: &str) -> String {
        format!("{}={}", SAFERETURN_ACCESS_TOKEN, self.access_token(secret))
    }
}

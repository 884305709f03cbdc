use std::time::{SystemTime, UNIX_EPOCH};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use safereturn_auth_types::cookie::{ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP};
use safereturn_auth_types::token::{JwtClaims, validate_token};
use safereturn_domain::user::{UserRole, VerificationStatus};

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiServiceError;

// ── Password hashing ─────────────────────────────────────────────────────────

pub fn hash_password(password: &str) -> Result<String, ApiServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ApiServiceError::Internal(anyhow::anyhow!("hash password: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

// ── Token issuance ───────────────────────────────────────────────────────────

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

pub fn issue_access_token(user: &User, secret: &str) -> Result<(String, u64), ApiServiceError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = JwtClaims {
        sub: user.id.to_string(),
        role: user.role.as_u8(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

pub fn issue_refresh_token(user: &User, secret: &str) -> Result<String, ApiServiceError> {
    let exp = now_secs() + REFRESH_TOKEN_EXP;
    let claims = JwtClaims {
        sub: user.id.to_string(),
        role: user.role.as_u8(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiServiceError::Internal(e.into()))
}

/// Token pair issued on register / login / refresh.
#[derive(Debug)]
pub struct TokenPair {
    pub user_id: Uuid,
    pub user_role: u8,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

fn issue_pair(user: &User, secret: &str) -> Result<TokenPair, ApiServiceError> {
    let (access_token, access_token_exp) = issue_access_token(user, secret)?;
    let refresh_token = issue_refresh_token(user, secret)?;
    Ok(TokenPair {
        user_id: user.id,
        user_role: user.role.as_u8(),
        access_token,
        access_token_exp,
        refresh_token,
    })
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub home_latitude: Option<f64>,
    pub home_longitude: Option<f64>,
}

pub struct RegisterUserUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RegisterUserUseCase<U> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<TokenPair, ApiServiceError> {
        if input.name.trim().is_empty()
            || input.email.trim().is_empty()
            || input.phone.trim().is_empty()
            || input.password.is_empty()
        {
            return Err(ApiServiceError::MissingData);
        }
        let email = input.email.trim().to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApiServiceError::EmailTaken);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email,
            phone: input.phone,
            password_hash: hash_password(&input.password)?,
            role: UserRole::User,
            district: None,
            verification_status: VerificationStatus::NotUploaded,
            verification_doc_number: None,
            verification_doc_photo: None,
            home_latitude: input.home_latitude,
            home_longitude: input.home_longitude,
            profile_photo: None,
            fcm_token: None,
            is_flagged: false,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        issue_pair(&user, &self.jwt_secret)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<TokenPair, ApiServiceError> {
        let email = input.email.trim().to_lowercase();
        // Unknown email and wrong password are indistinguishable to the caller.
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(ApiServiceError::InvalidCredentials)?;
        if !verify_password(&input.password, &user.password_hash) {
            return Err(ApiServiceError::InvalidCredentials);
        }
        issue_pair(&user, &self.jwt_secret)
    }
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

pub struct RefreshTokenUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RefreshTokenUseCase<U> {
    pub async fn execute(&self, refresh_token_value: &str) -> Result<TokenPair, ApiServiceError> {
        // Validate refresh token (sig + exp); expired access token is irrelevant here.
        let claims = validate_token(refresh_token_value, &self.jwt_secret)
            .map_err(|_| ApiServiceError::InvalidRefreshToken)?;

        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| ApiServiceError::InvalidRefreshToken)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::InvalidRefreshToken)?;

        issue_pair(&user, &self.jwt_secret)
    }
}

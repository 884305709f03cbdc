use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use safereturn_auth_types::{
    cookie::{
        SAFERETURN_ACCESS_TOKEN, SAFERETURN_REFRESH_TOKEN, clear_cookies,
        set_access_token_cookie, set_refresh_token_cookie,
    },
    identity::Identity,
    token::validate_access_token,
};

use crate::error::ApiServiceError;
use crate::state::AppState;
use crate::usecase::auth::{
    LoginInput, LoginUseCase, RefreshTokenUseCase, RegisterUserInput, RegisterUserUseCase,
    TokenPair,
};

const X_SAFERETURN_ACCESS_TOKEN_EXPIRES: &str = "x-safereturn-access-token-expires";

fn token_expires_header(exp: u64) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(X_SAFERETURN_ACCESS_TOKEN_EXPIRES),
        HeaderValue::from_str(&exp.to_string()).unwrap(),
    )
}

#[derive(Serialize)]
pub struct TokenIssuedResponse {
    pub user_id: uuid::Uuid,
    pub user_role: u8,
}

fn issued_response(
    state: &AppState,
    jar: CookieJar,
    pair: TokenPair,
) -> (StatusCode, CookieJar, HeaderMap, Json<TokenIssuedResponse>) {
    let jar = set_access_token_cookie(jar, pair.access_token, state.cookie_domain.clone());
    let jar = set_refresh_token_cookie(jar, pair.refresh_token, state.cookie_domain.clone());

    let mut headers = HeaderMap::new();
    let (name, value) = token_expires_header(pair.access_token_exp);
    headers.insert(name, value);

    (
        StatusCode::CREATED,
        jar,
        headers,
        Json(TokenIssuedResponse {
            user_id: pair.user_id,
            user_role: pair.user_role,
        }),
    )
}

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub home_latitude: Option<f64>,
    pub home_longitude: Option<f64>,
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let usecase = RegisterUserUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let pair = usecase
        .execute(RegisterUserInput {
            name: body.name,
            email: body.email,
            phone: body.phone,
            password: body.password,
            home_latitude: body.home_latitude,
            home_longitude: body.home_longitude,
        })
        .await?;
    Ok(issued_response(&state, jar, pair))
}

// ── POST /auth/token ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn create_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let pair = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(issued_response(&state, jar, pair))
}

// ── GET /auth/token ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckTokenQuery {
    pub role: Option<u8>,
}

#[derive(Serialize)]
pub struct CheckTokenResponse {
    pub user_id: uuid::Uuid,
    pub user_role: u8,
    pub access_token_exp: u64,
}

pub async fn check_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CheckTokenQuery>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let token_value = jar
        .get(SAFERETURN_ACCESS_TOKEN)
        .map(|c| c.value().to_owned())
        .ok_or(ApiServiceError::InvalidToken)?;

    let info = validate_access_token(&token_value, &state.jwt_secret)
        .map_err(|_| ApiServiceError::InvalidToken)?;

    if let Some(min_role) = query.role {
        if info.user_role < min_role {
            return Err(ApiServiceError::InvalidToken);
        }
    }

    let mut headers = HeaderMap::new();
    let (name, value) = token_expires_header(info.access_token_exp);
    headers.insert(name, value);

    Ok((
        StatusCode::OK,
        headers,
        Json(CheckTokenResponse {
            user_id: info.user_id,
            user_role: info.user_role,
            access_token_exp: info.access_token_exp,
        }),
    ))
}

// ── PATCH /auth/token ────────────────────────────────────────────────────────

pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiServiceError> {
    let refresh_value = jar
        .get(SAFERETURN_REFRESH_TOKEN)
        .map(|c| c.value().to_owned())
        .ok_or(ApiServiceError::InvalidRefreshToken)?;

    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let pair = usecase.execute(&refresh_value).await?;
    Ok(issued_response(&state, jar, pair))
}

// ── DELETE /auth/token ───────────────────────────────────────────────────────

pub async fn revoke_token(
    State(state): State<AppState>,
    _identity: Identity,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiServiceError> {
    let jar = clear_cookies(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}

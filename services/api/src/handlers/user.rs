use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use safereturn_auth_types::identity::Identity;
use safereturn_domain::pagination::PageRequest;
use safereturn_domain::user::VerificationStatus;

use crate::domain::repository::UploadStore as _;
use crate::domain::types::User;
use crate::error::ApiServiceError;
use crate::handlers::{read_multipart, require_admin};
use crate::state::AppState;
use crate::usecase::user::{
    DeleteUserUseCase, GetUserDetailsUseCase, GetUserUseCase, ListUsersUseCase,
    ReviewVerificationUseCase, SetFcmTokenUseCase, SetFlaggedUseCase, SetProfilePhotoUseCase,
    SubmitVerificationInput, SubmitVerificationUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: u8,
    pub district: Option<String>,
    pub verification_status: &'static str,
    pub verification_doc_number: Option<String>,
    pub home_latitude: Option<f64>,
    pub home_longitude: Option<f64>,
    pub profile_photo: Option<String>,
    pub is_flagged: bool,
    #[serde(serialize_with = "safereturn_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "safereturn_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role.as_u8(),
            district: user.district,
            verification_status: user.verification_status.as_str(),
            verification_doc_number: user.verification_doc_number,
            home_latitude: user.home_latitude,
            home_longitude: user.home_longitude,
            profile_photo: user.profile_photo,
            is_flagged: user.is_flagged,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiServiceError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub home_latitude: Option<f64>,
    pub home_longitude: Option<f64>,
}

pub async fn update_me(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<StatusCode, ApiServiceError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                name: body.name,
                phone: body.phone,
                home_latitude: body.home_latitude,
                home_longitude: body.home_longitude,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /users/@me/photo ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PhotoResponse {
    pub photo: String,
}

pub async fn upload_profile_photo(
    identity: Identity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PhotoResponse>, ApiServiceError> {
    let form = read_multipart(multipart, "photo").await?;
    let (file_name, bytes) = form.file.ok_or(ApiServiceError::MissingData)?;
    let path = state.upload_store().store(&file_name, bytes).await?;

    let usecase = SetProfilePhotoUseCase {
        users: state.user_repo(),
    };
    usecase.execute(identity.user_id, &path).await?;
    Ok(Json(PhotoResponse { photo: path }))
}

// ── POST /users/@me/verification ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct VerificationSubmittedResponse {
    pub verification_status: &'static str,
}

pub async fn submit_verification(
    identity: Identity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<VerificationSubmittedResponse>, ApiServiceError> {
    let form = read_multipart(multipart, "document").await?;
    let doc_number = form.text("doc_number").ok_or(ApiServiceError::MissingData)?;

    let doc_photo = match form.file {
        Some((file_name, bytes)) => Some(state.upload_store().store(&file_name, bytes).await?),
        None => None,
    };

    let usecase = SubmitVerificationUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            SubmitVerificationInput {
                doc_number,
                doc_photo,
            },
        )
        .await?;
    Ok(Json(VerificationSubmittedResponse {
        verification_status: VerificationStatus::Pending.as_str(),
    }))
}

// ── POST /users/@me/fcm-token ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct FcmTokenRequest {
    pub fcm_token: String,
}

pub async fn set_fcm_token(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<FcmTokenRequest>,
) -> Result<StatusCode, ApiServiceError> {
    let usecase = SetFcmTokenUseCase {
        users: state.user_repo(),
    };
    usecase.execute(identity.user_id, &body.fcm_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /admin/users ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct UserListQuery {
    pub verification_status: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn admin_list_users(
    identity: Identity,
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Vec<UserResponse>>, ApiServiceError> {
    require_admin(&identity)?;
    let query: UserListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| ApiServiceError::MissingData)?
        .unwrap_or_default();

    let status = query
        .verification_status
        .as_deref()
        .map(|s| VerificationStatus::from_str_opt(s).ok_or(ApiServiceError::InvalidStatus))
        .transpose()?;
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };

    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute(status, page).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /admin/users/{id} ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserDetailsResponse {
    pub user: UserResponse,
    pub cases: Vec<crate::handlers::case::CaseResponse>,
    pub sightings: Vec<crate::handlers::sighting::SightingResponse>,
}

pub async fn admin_get_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserDetailsResponse>, ApiServiceError> {
    require_admin(&identity)?;
    let usecase = GetUserDetailsUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        sightings: state.sighting_repo(),
    };
    let details = usecase.execute(user_id).await?;
    Ok(Json(UserDetailsResponse {
        user: details.user.into(),
        cases: details.cases.into_iter().map(Into::into).collect(),
        sightings: details.sightings.into_iter().map(Into::into).collect(),
    }))
}

// ── PATCH /admin/users/{id}/verification ─────────────────────────────────────

#[derive(Deserialize)]
pub struct ReviewVerificationRequest {
    pub status: String,
}

pub async fn admin_review_verification(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<ReviewVerificationRequest>,
) -> Result<StatusCode, ApiServiceError> {
    require_admin(&identity)?;
    let new_status = VerificationStatus::from_str_opt(&body.status)
        .ok_or(ApiServiceError::InvalidStatus)?;
    let usecase = ReviewVerificationUseCase {
        users: state.user_repo(),
    };
    usecase.execute(user_id, new_status).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /admin/users/{id}/flag ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct FlagUserRequest {
    pub is_flagged: bool,
}

pub async fn admin_flag_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<FlagUserRequest>,
) -> Result<StatusCode, ApiServiceError> {
    require_admin(&identity)?;
    let usecase = SetFlaggedUseCase {
        users: state.user_repo(),
    };
    usecase.execute(user_id, body.is_flagged).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /admin/users/{id} ─────────────────────────────────────────────────

pub async fn admin_delete_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiServiceError> {
    require_admin(&identity)?;
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

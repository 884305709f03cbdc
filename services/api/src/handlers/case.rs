use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use safereturn_auth_types::identity::Identity;
use safereturn_domain::pagination::PageRequest;
use safereturn_domain::status::CaseStatus;

use crate::domain::repository::UploadStore as _;
use crate::domain::types::Case;
use crate::error::ApiServiceError;
use crate::handlers::{read_multipart, require_admin};
use crate::state::AppState;
use crate::usecase::case::{
    AdminGetCaseUseCase, AdminListCasesUseCase, CaseCountsUseCase, GetPublicCaseUseCase,
    ListActiveCasesUseCase, ListMyCasesUseCase, SubmitCaseInput, SubmitCaseUseCase,
    TransitionCaseUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CaseResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub person_name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub clothing: Option<String>,
    pub last_seen_location: Option<String>,
    #[serde(serialize_with = "safereturn_core::serde::opt_to_rfc3339_ms")]
    pub last_seen_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_seen_latitude: Option<f64>,
    pub last_seen_longitude: Option<f64>,
    pub photo: Option<String>,
    pub informer_name: Option<String>,
    pub informer_phone: Option<String>,
    pub informer_relation: Option<String>,
    pub status: &'static str,
    pub case_number: Option<String>,
    pub verified_by: Option<Uuid>,
    #[serde(serialize_with = "safereturn_core::serde::opt_to_rfc3339_ms")]
    pub verified_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "safereturn_core::serde::opt_to_rfc3339_ms")]
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_from_sighting: Option<Uuid>,
    #[serde(serialize_with = "safereturn_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "safereturn_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Case> for CaseResponse {
    fn from(case: Case) -> Self {
        Self {
            id: case.id,
            user_id: case.user_id,
            person_name: case.person_name,
            age: case.age,
            gender: case.gender,
            description: case.description,
            clothing: case.clothing,
            last_seen_location: case.last_seen_location,
            last_seen_at: case.last_seen_at,
            last_seen_latitude: case.last_seen_latitude,
            last_seen_longitude: case.last_seen_longitude,
            photo: case.photo,
            informer_name: case.informer_name,
            informer_phone: case.informer_phone,
            informer_relation: case.informer_relation,
            status: case.status.as_str(),
            case_number: case.case_number.map(|n| n.to_string()),
            verified_by: case.verified_by,
            verified_at: case.verified_at,
            resolved_at: case.resolved_at,
            created_from_sighting: case.created_from_sighting,
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CaseListQuery {
    pub status: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

fn parse_list_query(raw_query: Option<&str>) -> Result<CaseListQuery, ApiServiceError> {
    raw_query
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| ApiServiceError::MissingData)
        .map(Option::unwrap_or_default)
}

impl CaseListQuery {
    fn page(&self) -> PageRequest {
        PageRequest {
            per_page: self.per_page.unwrap_or(25),
            page: self.page.unwrap_or(1),
        }
    }
}

// ── POST /cases ──────────────────────────────────────────────────────────────

pub async fn submit_case(
    identity: Identity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CaseResponse>), ApiServiceError> {
    let mut form = read_multipart(multipart, "photo").await?;

    let photo = match form.file.take() {
        Some((file_name, bytes)) => Some(state.upload_store().store(&file_name, bytes).await?),
        None => None,
    };

    let input = SubmitCaseInput {
        person_name: form.text("person_name").unwrap_or_default(),
        age: form.parse("age")?,
        gender: form.text("gender"),
        description: form.text("description"),
        clothing: form.text("clothing"),
        last_seen_location: form.text("last_seen_location"),
        last_seen_at: form.datetime("last_seen_at")?,
        last_seen_latitude: form.parse("last_seen_latitude")?,
        last_seen_longitude: form.parse("last_seen_longitude")?,
        photo,
        informer_name: form.text("informer_name"),
        informer_phone: form.text("informer_phone"),
        informer_relation: form.text("informer_relation"),
    };

    let usecase = SubmitCaseUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
    };
    let case = usecase.execute(identity.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(case.into())))
}

// ── GET /cases ───────────────────────────────────────────────────────────────

pub async fn list_active_cases(
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Vec<CaseResponse>>, ApiServiceError> {
    let query = parse_list_query(raw_query.as_deref())?;
    let usecase = ListActiveCasesUseCase {
        cases: state.case_repo(),
    };
    let cases = usecase.execute(query.page()).await?;
    Ok(Json(cases.into_iter().map(CaseResponse::from).collect()))
}

// ── GET /cases/{id} ──────────────────────────────────────────────────────────

pub async fn get_public_case(
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
) -> Result<Json<CaseResponse>, ApiServiceError> {
    let usecase = GetPublicCaseUseCase {
        cases: state.case_repo(),
    };
    let case = usecase.execute(case_id).await?;
    Ok(Json(case.into()))
}

// ── GET /users/@me/cases ─────────────────────────────────────────────────────

pub async fn list_my_cases(
    identity: Identity,
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Vec<CaseResponse>>, ApiServiceError> {
    let query = parse_list_query(raw_query.as_deref())?;
    let usecase = ListMyCasesUseCase {
        cases: state.case_repo(),
    };
    let cases = usecase.execute(identity.user_id, query.page()).await?;
    Ok(Json(cases.into_iter().map(CaseResponse::from).collect()))
}

// ── GET /admin/cases ─────────────────────────────────────────────────────────

pub async fn admin_list_cases(
    identity: Identity,
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Vec<CaseResponse>>, ApiServiceError> {
    require_admin(&identity)?;
    let query = parse_list_query(raw_query.as_deref())?;
    let status = query
        .status
        .as_deref()
        .map(|s| CaseStatus::from_str_opt(s).ok_or(ApiServiceError::InvalidStatus))
        .transpose()?;
    let usecase = AdminListCasesUseCase {
        cases: state.case_repo(),
    };
    let cases = usecase.execute(status, query.page()).await?;
    Ok(Json(cases.into_iter().map(CaseResponse::from).collect()))
}

// ── GET /admin/cases/counts ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CaseCountsResponse {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub resolved: u64,
}

pub async fn admin_case_counts(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<CaseCountsResponse>, ApiServiceError> {
    require_admin(&identity)?;
    let usecase = CaseCountsUseCase {
        cases: state.case_repo(),
    };
    let counts = usecase.execute().await?;
    Ok(Json(CaseCountsResponse {
        pending: counts.pending,
        approved: counts.approved,
        rejected: counts.rejected,
        resolved: counts.resolved,
    }))
}

// ── GET /admin/cases/{id} ────────────────────────────────────────────────────

pub async fn admin_get_case(
    identity: Identity,
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
) -> Result<Json<CaseResponse>, ApiServiceError> {
    require_admin(&identity)?;
    let usecase = AdminGetCaseUseCase {
        cases: state.case_repo(),
    };
    let case = usecase.execute(case_id).await?;
    Ok(Json(case.into()))
}

// ── PATCH /admin/cases/{id}/status ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct TransitionCaseRequest {
    pub status: String,
}

pub async fn admin_transition_case(
    identity: Identity,
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
    Json(body): Json<TransitionCaseRequest>,
) -> Result<Json<CaseResponse>, ApiServiceError> {
    require_admin(&identity)?;
    let new_status =
        CaseStatus::from_str_opt(&body.status).ok_or(ApiServiceError::InvalidStatus)?;
    let usecase = TransitionCaseUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        sequences: state.case_sequence_repo(),
    };
    let case = usecase.execute(case_id, new_status, identity.user_id).await?;
    Ok(Json(case.into()))
}

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use safereturn_auth_types::identity::Identity;
use safereturn_domain::pagination::PageRequest;
use safereturn_domain::status::{PersonCondition, SightingStatus};
use safereturn_domain::user::UserRole;

use crate::domain::repository::UploadStore as _;
use crate::domain::types::Sighting;
use crate::error::ApiServiceError;
use crate::handlers::{MultipartForm, read_multipart, require_admin};
use crate::state::AppState;
use crate::usecase::sighting::{
    AdminListSightingsUseCase, CaseOverrides, CreateCaseFromSightingUseCase,
    GeneralSightingCountsUseCase, ListPublicGeneralSightingsUseCase,
    ListPublicSightingsForCaseUseCase, ListSightingsForCaseUseCase, MatchSightingToCaseUseCase,
    RejectSightingUseCase, SubmitGeneralSightingUseCase, SubmitLinkedSightingUseCase,
    SubmitSightingInput, VerifyLinkedSightingUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Full sighting view for the reporter, the case owner and admins.
#[derive(Serialize)]
pub struct SightingResponse {
    pub id: Uuid,
    pub case_id: Option<Uuid>,
    pub user_id: Uuid,
    pub is_general: bool,
    pub person_name: Option<String>,
    pub person_age: Option<i32>,
    pub person_gender: Option<String>,
    pub person_height: Option<String>,
    pub person_complexion: Option<String>,
    pub person_clothing: Option<String>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(serialize_with = "safereturn_core::serde::to_rfc3339_ms")]
    pub sighted_at: chrono::DateTime<chrono::Utc>,
    pub description: String,
    pub person_condition: &'static str,
    pub photo: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub status: &'static str,
    pub matched_to_case: Option<Uuid>,
    pub reviewed_by: Option<Uuid>,
    #[serde(serialize_with = "safereturn_core::serde::opt_to_rfc3339_ms")]
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub admin_notes: Option<String>,
    pub is_public: bool,
    #[serde(serialize_with = "safereturn_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "safereturn_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Sighting> for SightingResponse {
    fn from(sighting: Sighting) -> Self {
        Self {
            id: sighting.id,
            case_id: sighting.case_id,
            user_id: sighting.user_id,
            is_general: sighting.is_general,
            person_name: sighting.person_name,
            person_age: sighting.person_age,
            person_gender: sighting.person_gender,
            person_height: sighting.person_height,
            person_complexion: sighting.person_complexion,
            person_clothing: sighting.person_clothing,
            location: sighting.location,
            latitude: sighting.latitude,
            longitude: sighting.longitude,
            sighted_at: sighting.sighted_at,
            description: sighting.description,
            person_condition: sighting.person_condition.as_str(),
            photo: sighting.photo,
            contact_name: sighting.contact_name,
            contact_phone: sighting.contact_phone,
            contact_email: sighting.contact_email,
            status: sighting.status.as_str(),
            matched_to_case: sighting.matched_to_case,
            reviewed_by: sighting.reviewed_by,
            reviewed_at: sighting.reviewed_at,
            admin_notes: sighting.admin_notes,
            is_public: sighting.is_public,
            created_at: sighting.created_at,
            updated_at: sighting.updated_at,
        }
    }
}

/// Public sighting view. No reporter contact details, no review metadata.
#[derive(Serialize)]
pub struct PublicSightingResponse {
    pub id: Uuid,
    pub case_id: Option<Uuid>,
    pub is_general: bool,
    pub person_name: Option<String>,
    pub person_age: Option<i32>,
    pub person_gender: Option<String>,
    pub person_height: Option<String>,
    pub person_complexion: Option<String>,
    pub person_clothing: Option<String>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(serialize_with = "safereturn_core::serde::to_rfc3339_ms")]
    pub sighted_at: chrono::DateTime<chrono::Utc>,
    pub description: String,
    pub person_condition: &'static str,
    pub photo: Option<String>,
    pub status: &'static str,
    pub matched_to_case: Option<Uuid>,
    #[serde(serialize_with = "safereturn_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Sighting> for PublicSightingResponse {
    fn from(sighting: Sighting) -> Self {
        Self {
            id: sighting.id,
            case_id: sighting.case_id,
            is_general: sighting.is_general,
            person_name: sighting.person_name,
            person_age: sighting.person_age,
            person_gender: sighting.person_gender,
            person_height: sighting.person_height,
            person_complexion: sighting.person_complexion,
            person_clothing: sighting.person_clothing,
            location: sighting.location,
            latitude: sighting.latitude,
            longitude: sighting.longitude,
            sighted_at: sighting.sighted_at,
            description: sighting.description,
            person_condition: sighting.person_condition.as_str(),
            photo: sighting.photo,
            status: sighting.status.as_str(),
            matched_to_case: sighting.matched_to_case,
            created_at: sighting.created_at,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SightingListQuery {
    pub kind: Option<String>,
    pub status: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

fn parse_list_query(raw_query: Option<&str>) -> Result<SightingListQuery, ApiServiceError> {
    raw_query
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| ApiServiceError::MissingData)
        .map(Option::unwrap_or_default)
}

impl SightingListQuery {
    fn page(&self) -> PageRequest {
        PageRequest {
            per_page: self.per_page.unwrap_or(25),
            page: self.page.unwrap_or(1),
        }
    }
}

async fn sighting_input(
    state: &AppState,
    multipart: Multipart,
) -> Result<SubmitSightingInput, ApiServiceError> {
    let mut form = read_multipart(multipart, "photo").await?;

    let photo = match form.file.take() {
        Some((file_name, bytes)) => Some(state.upload_store().store(&file_name, bytes).await?),
        None => None,
    };

    let person_condition = match form.text("person_condition") {
        Some(raw) => {
            PersonCondition::from_str_opt(&raw).ok_or(ApiServiceError::InvalidStatus)?
        }
        None => PersonCondition::default(),
    };

    Ok(build_input(&form, photo, person_condition)?)
}

fn build_input(
    form: &MultipartForm,
    photo: Option<String>,
    person_condition: PersonCondition,
) -> Result<SubmitSightingInput, ApiServiceError> {
    Ok(SubmitSightingInput {
        person_name: form.text("person_name"),
        person_age: form.parse("person_age")?,
        person_gender: form.text("person_gender"),
        person_height: form.text("person_height"),
        person_complexion: form.text("person_complexion"),
        person_clothing: form.text("person_clothing"),
        location: form.text("location").unwrap_or_default(),
        latitude: form.parse("latitude")?,
        longitude: form.parse("longitude")?,
        sighted_at: form.datetime("sighted_at")?,
        description: form.text("description").unwrap_or_default(),
        person_condition,
        photo,
        contact_name: form.text("contact_name"),
        contact_phone: form.text("contact_phone"),
        contact_email: form.text("contact_email"),
    })
}

// ── POST /cases/{id}/sightings ───────────────────────────────────────────────

pub async fn submit_linked_sighting(
    identity: Identity,
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SightingResponse>), ApiServiceError> {
    let input = sighting_input(&state, multipart).await?;
    let usecase = SubmitLinkedSightingUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        sightings: state.sighting_repo(),
    };
    let sighting = usecase.execute(case_id, identity.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(sighting.into())))
}

// ── GET /cases/{id}/sightings ────────────────────────────────────────────────

pub async fn list_public_sightings_for_case(
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
) -> Result<Json<Vec<PublicSightingResponse>>, ApiServiceError> {
    let usecase = ListPublicSightingsForCaseUseCase {
        sightings: state.sighting_repo(),
    };
    let sightings = usecase.execute(case_id).await?;
    Ok(Json(
        sightings
            .into_iter()
            .map(PublicSightingResponse::from)
            .collect(),
    ))
}

// ── GET /cases/{id}/sightings/all ────────────────────────────────────────────

pub async fn list_sightings_for_case(
    identity: Identity,
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
) -> Result<Json<Vec<SightingResponse>>, ApiServiceError> {
    let is_admin = UserRole::from_u8(identity.user_role).is_some_and(UserRole::is_admin);
    let usecase = ListSightingsForCaseUseCase {
        cases: state.case_repo(),
        sightings: state.sighting_repo(),
    };
    let sightings = usecase.execute(case_id, identity.user_id, is_admin).await?;
    Ok(Json(
        sightings.into_iter().map(SightingResponse::from).collect(),
    ))
}

// ── POST /sightings ──────────────────────────────────────────────────────────

pub async fn submit_general_sighting(
    identity: Identity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SightingResponse>), ApiServiceError> {
    let input = sighting_input(&state, multipart).await?;
    let usecase = SubmitGeneralSightingUseCase {
        users: state.user_repo(),
        sightings: state.sighting_repo(),
    };
    let sighting = usecase.execute(identity.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(sighting.into())))
}

// ── GET /sightings ───────────────────────────────────────────────────────────

pub async fn list_public_general_sightings(
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Vec<PublicSightingResponse>>, ApiServiceError> {
    let query = parse_list_query(raw_query.as_deref())?;
    let usecase = ListPublicGeneralSightingsUseCase {
        sightings: state.sighting_repo(),
    };
    let sightings = usecase.execute(query.page()).await?;
    Ok(Json(
        sightings
            .into_iter()
            .map(PublicSightingResponse::from)
            .collect(),
    ))
}

// ── GET /admin/sightings ─────────────────────────────────────────────────────

pub async fn admin_list_sightings(
    identity: Identity,
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Vec<SightingResponse>>, ApiServiceError> {
    require_admin(&identity)?;
    let query = parse_list_query(raw_query.as_deref())?;

    let is_general = match query.kind.as_deref() {
        None => None,
        Some("linked") => Some(false),
        Some("general") => Some(true),
        Some(_) => return Err(ApiServiceError::InvalidStatus),
    };
    let status = query
        .status
        .as_deref()
        .map(|s| SightingStatus::from_str_opt(s).ok_or(ApiServiceError::InvalidStatus))
        .transpose()?;

    let usecase = AdminListSightingsUseCase {
        sightings: state.sighting_repo(),
    };
    let sightings = usecase.execute(is_general, status, query.page()).await?;
    Ok(Json(
        sightings.into_iter().map(SightingResponse::from).collect(),
    ))
}

// ── GET /admin/sightings/counts ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct GeneralSightingCountsResponse {
    pub pending: u64,
    pub matched: u64,
    pub new_case: u64,
    pub irrelevant: u64,
}

pub async fn admin_sighting_counts(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<GeneralSightingCountsResponse>, ApiServiceError> {
    require_admin(&identity)?;
    let usecase = GeneralSightingCountsUseCase {
        sightings: state.sighting_repo(),
    };
    let counts = usecase.execute().await?;
    Ok(Json(GeneralSightingCountsResponse {
        pending: counts.pending,
        matched: counts.matched,
        new_case: counts.new_case,
        irrelevant: counts.irrelevant,
    }))
}

// ── PATCH /admin/sightings/{id}/verify ───────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifySightingRequest {
    pub status: String,
    pub notes: Option<String>,
}

pub async fn admin_verify_sighting(
    identity: Identity,
    State(state): State<AppState>,
    Path(sighting_id): Path<Uuid>,
    Json(body): Json<VerifySightingRequest>,
) -> Result<Json<SightingResponse>, ApiServiceError> {
    require_admin(&identity)?;
    let new_status =
        SightingStatus::from_str_opt(&body.status).ok_or(ApiServiceError::InvalidStatus)?;
    let usecase = VerifyLinkedSightingUseCase {
        sightings: state.sighting_repo(),
    };
    let sighting = usecase
        .execute(sighting_id, new_status, identity.user_id, body.notes)
        .await?;
    Ok(Json(sighting.into()))
}

// ── PATCH /admin/sightings/{id}/match ────────────────────────────────────────

#[derive(Deserialize)]
pub struct MatchSightingRequest {
    pub case_id: Uuid,
    pub notes: Option<String>,
}

pub async fn admin_match_sighting(
    identity: Identity,
    State(state): State<AppState>,
    Path(sighting_id): Path<Uuid>,
    Json(body): Json<MatchSightingRequest>,
) -> Result<Json<SightingResponse>, ApiServiceError> {
    require_admin(&identity)?;
    let usecase = MatchSightingToCaseUseCase {
        sightings: state.sighting_repo(),
        cases: state.case_repo(),
    };
    let sighting = usecase
        .execute(sighting_id, body.case_id, identity.user_id, body.notes)
        .await?;
    Ok(Json(sighting.into()))
}

// ── POST /admin/sightings/{id}/case ──────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct CreateCaseFromSightingRequest {
    pub person_name: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct CaseFromSightingResponse {
    pub case: crate::handlers::case::CaseResponse,
    pub sighting: SightingResponse,
}

pub async fn admin_create_case_from_sighting(
    identity: Identity,
    State(state): State<AppState>,
    Path(sighting_id): Path<Uuid>,
    Json(body): Json<CreateCaseFromSightingRequest>,
) -> Result<(StatusCode, Json<CaseFromSightingResponse>), ApiServiceError> {
    require_admin(&identity)?;
    let usecase = CreateCaseFromSightingUseCase {
        sightings: state.sighting_repo(),
        intake: state.case_intake_port(),
    };
    let (case, sighting) = usecase
        .execute(
            sighting_id,
            identity.user_id,
            CaseOverrides {
                person_name: body.person_name,
                description: body.description,
            },
            body.notes,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CaseFromSightingResponse {
            case: case.into(),
            sighting: sighting.into(),
        }),
    ))
}

// ── PATCH /admin/sightings/{id}/reject ───────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct RejectSightingRequest {
    pub notes: Option<String>,
}

pub async fn admin_reject_sighting(
    identity: Identity,
    State(state): State<AppState>,
    Path(sighting_id): Path<Uuid>,
    Json(body): Json<RejectSightingRequest>,
) -> Result<Json<SightingResponse>, ApiServiceError> {
    require_admin(&identity)?;
    let usecase = RejectSightingUseCase {
        sightings: state.sighting_repo(),
    };
    let sighting = usecase
        .execute(sighting_id, identity.user_id, body.notes)
        .await?;
    Ok(Json(sighting.into()))
}

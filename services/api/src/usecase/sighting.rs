use chrono::{DateTime, Utc};
use uuid::Uuid;

use safereturn_domain::pagination::PageRequest;
use safereturn_domain::status::{CaseStatus, PersonCondition, SightingStatus};

use crate::domain::repository::{
    CaseIntakePort, CaseRepository, SightingRepository, UserRepository,
};
use crate::domain::types::{Case, GeneralSightingCounts, Sighting};
use crate::error::ApiServiceError;

// ── Submit inputs ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct SubmitSightingInput {
    pub person_name: Option<String>,
    pub person_age: Option<i32>,
    pub person_gender: Option<String>,
    pub person_height: Option<String>,
    pub person_complexion: Option<String>,
    pub person_clothing: Option<String>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub sighted_at: Option<DateTime<Utc>>,
    pub description: String,
    pub person_condition: PersonCondition,
    pub photo: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
}

// ── SubmitLinkedSighting ─────────────────────────────────────────────────────

pub struct SubmitLinkedSightingUseCase<U: UserRepository, C: CaseRepository, S: SightingRepository>
{
    pub users: U,
    pub cases: C,
    pub sightings: S,
}

impl<U: UserRepository, C: CaseRepository, S: SightingRepository>
    SubmitLinkedSightingUseCase<U, C, S>
{
    pub async fn execute(
        &self,
        case_id: Uuid,
        reporter_id: Uuid,
        input: SubmitSightingInput,
    ) -> Result<Sighting, ApiServiceError> {
        self.cases
            .find_by_id(case_id)
            .await?
            .ok_or(ApiServiceError::CaseNotFound)?;
        let reporter = self
            .users
            .find_by_id(reporter_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        if reporter.is_flagged {
            return Err(ApiServiceError::AccountFlagged);
        }
        let sighting = build_sighting(Some(case_id), &reporter, input, false)?;
        self.sightings.create(&sighting).await?;
        Ok(sighting)
    }
}

// ── SubmitGeneralSighting ────────────────────────────────────────────────────

pub struct SubmitGeneralSightingUseCase<U: UserRepository, S: SightingRepository> {
    pub users: U,
    pub sightings: S,
}

impl<U: UserRepository, S: SightingRepository> SubmitGeneralSightingUseCase<U, S> {
    pub async fn execute(
        &self,
        reporter_id: Uuid,
        input: SubmitSightingInput,
    ) -> Result<Sighting, ApiServiceError> {
        let reporter = self
            .users
            .find_by_id(reporter_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        if reporter.is_flagged {
            return Err(ApiServiceError::AccountFlagged);
        }
        let sighting = build_sighting(None, &reporter, input, true)?;
        self.sightings.create(&sighting).await?;
        Ok(sighting)
    }
}

fn build_sighting(
    case_id: Option<Uuid>,
    reporter: &crate::domain::types::User,
    input: SubmitSightingInput,
    is_general: bool,
) -> Result<Sighting, ApiServiceError> {
    if input.location.trim().is_empty() || input.description.trim().is_empty() {
        return Err(ApiServiceError::MissingData);
    }
    let sighted_at = input.sighted_at.ok_or(ApiServiceError::MissingData)?;

    let now = Utc::now();
    Ok(Sighting {
        id: Uuid::now_v7(),
        case_id,
        user_id: reporter.id,
        is_general,
        person_name: input.person_name,
        person_age: input.person_age,
        person_gender: input.person_gender,
        person_height: input.person_height,
        person_complexion: input.person_complexion,
        person_clothing: input.person_clothing,
        location: input.location,
        latitude: input.latitude,
        longitude: input.longitude,
        sighted_at,
        description: input.description,
        person_condition: input.person_condition,
        photo: input.photo,
        // Contact details fall back to the reporter's account.
        contact_name: input.contact_name.or_else(|| Some(reporter.name.clone())),
        contact_phone: input.contact_phone.or_else(|| Some(reporter.phone.clone())),
        contact_email: input.contact_email.or_else(|| Some(reporter.email.clone())),
        status: SightingStatus::Pending,
        matched_to_case: None,
        reviewed_by: None,
        reviewed_at: None,
        admin_notes: None,
        is_public: false,
        created_at: now,
        updated_at: now,
    })
}

// ── VerifyLinkedSighting ─────────────────────────────────────────────────────

pub struct VerifyLinkedSightingUseCase<S: SightingRepository> {
    pub sightings: S,
}

impl<S: SightingRepository> VerifyLinkedSightingUseCase<S> {
    pub async fn execute(
        &self,
        sighting_id: Uuid,
        new_status: SightingStatus,
        admin_id: Uuid,
        notes: Option<String>,
    ) -> Result<Sighting, ApiServiceError> {
        if !new_status.is_linked_review() {
            return Err(ApiServiceError::InvalidStatus);
        }
        let mut sighting = self
            .sightings
            .find_by_id(sighting_id)
            .await?
            .ok_or(ApiServiceError::SightingNotFound)?;
        if sighting.is_general {
            return Err(ApiServiceError::InvalidStatus);
        }

        let now = Utc::now();
        sighting.status = new_status;
        sighting.is_public = new_status.grants_public_visibility();
        sighting.reviewed_by = Some(admin_id);
        sighting.reviewed_at = Some(now);
        if notes.is_some() {
            sighting.admin_notes = notes;
        }
        sighting.updated_at = now;

        self.sightings.update(&sighting).await?;
        Ok(sighting)
    }
}

// ── MatchSightingToCase ──────────────────────────────────────────────────────

pub struct MatchSightingToCaseUseCase<S: SightingRepository, C: CaseRepository> {
    pub sightings: S,
    pub cases: C,
}

impl<S: SightingRepository, C: CaseRepository> MatchSightingToCaseUseCase<S, C> {
    pub async fn execute(
        &self,
        sighting_id: Uuid,
        case_id: Uuid,
        admin_id: Uuid,
        notes: Option<String>,
    ) -> Result<Sighting, ApiServiceError> {
        let mut sighting = general_pending(&self.sightings, sighting_id).await?;
        self.cases
            .find_by_id(case_id)
            .await?
            .ok_or(ApiServiceError::CaseNotFound)?;

        let now = Utc::now();
        sighting.status = SightingStatus::Matched;
        sighting.matched_to_case = Some(case_id);
        sighting.is_public = true;
        sighting.reviewed_by = Some(admin_id);
        sighting.reviewed_at = Some(now);
        sighting.admin_notes = notes;
        sighting.updated_at = now;

        self.sightings.update(&sighting).await?;
        Ok(sighting)
    }
}

// ── CreateCaseFromSighting ───────────────────────────────────────────────────

#[derive(Default)]
pub struct CaseOverrides {
    pub person_name: Option<String>,
    pub description: Option<String>,
}

pub struct CreateCaseFromSightingUseCase<S: SightingRepository, P: CaseIntakePort> {
    pub sightings: S,
    pub intake: P,
}

impl<S: SightingRepository, P: CaseIntakePort> CreateCaseFromSightingUseCase<S, P> {
    /// Promote a general sighting into a new pending case owned by the
    /// sighting's reporter. The case insert and the sighting update are
    /// committed in a single transaction.
    pub async fn execute(
        &self,
        sighting_id: Uuid,
        admin_id: Uuid,
        overrides: CaseOverrides,
        notes: Option<String>,
    ) -> Result<(Case, Sighting), ApiServiceError> {
        let mut sighting = general_pending(&self.sightings, sighting_id).await?;

        let person_name = overrides
            .person_name
            .or_else(|| sighting.person_name.clone())
            .filter(|n| !n.trim().is_empty())
            .ok_or(ApiServiceError::MissingData)?;

        let now = Utc::now();
        let case = Case {
            id: Uuid::now_v7(),
            user_id: sighting.user_id,
            person_name,
            age: sighting.person_age,
            gender: sighting.person_gender.clone(),
            description: overrides
                .description
                .or_else(|| Some(sighting.description.clone())),
            clothing: sighting.person_clothing.clone(),
            last_seen_location: Some(sighting.location.clone()),
            last_seen_at: Some(sighting.sighted_at),
            last_seen_latitude: sighting.latitude,
            last_seen_longitude: sighting.longitude,
            photo: sighting.photo.clone(),
            informer_name: sighting.contact_name.clone(),
            informer_phone: sighting.contact_phone.clone(),
            informer_relation: None,
            status: CaseStatus::Pending,
            case_number: None,
            verified_by: None,
            verified_at: None,
            resolved_at: None,
            created_from_sighting: Some(sighting.id),
            created_at: now,
            updated_at: now,
        };

        sighting.status = SightingStatus::NewCase;
        sighting.matched_to_case = Some(case.id);
        sighting.is_public = true;
        sighting.reviewed_by = Some(admin_id);
        sighting.reviewed_at = Some(now);
        sighting.admin_notes = notes;
        sighting.updated_at = now;

        self.intake.create_case_from_sighting(&case, &sighting).await?;
        Ok((case, sighting))
    }
}

// ── RejectSighting ───────────────────────────────────────────────────────────

pub struct RejectSightingUseCase<S: SightingRepository> {
    pub sightings: S,
}

impl<S: SightingRepository> RejectSightingUseCase<S> {
    pub async fn execute(
        &self,
        sighting_id: Uuid,
        admin_id: Uuid,
        notes: Option<String>,
    ) -> Result<Sighting, ApiServiceError> {
        let mut sighting = general_pending(&self.sightings, sighting_id).await?;

        let now = Utc::now();
        sighting.status = SightingStatus::Irrelevant;
        sighting.matched_to_case = None;
        sighting.is_public = false;
        sighting.reviewed_by = Some(admin_id);
        sighting.reviewed_at = Some(now);
        sighting.admin_notes = notes;
        sighting.updated_at = now;

        self.sightings.update(&sighting).await?;
        Ok(sighting)
    }
}

/// General resolutions apply only to pending general sightings; the
/// resolution statuses are terminal.
async fn general_pending<S: SightingRepository>(
    sightings: &S,
    sighting_id: Uuid,
) -> Result<Sighting, ApiServiceError> {
    let sighting = sightings
        .find_by_id(sighting_id)
        .await?
        .ok_or(ApiServiceError::SightingNotFound)?;
    if !sighting.is_general {
        return Err(ApiServiceError::InvalidStatus);
    }
    if sighting.status != SightingStatus::Pending {
        return Err(ApiServiceError::InvalidTransition);
    }
    Ok(sighting)
}

// ── Listing ──────────────────────────────────────────────────────────────────

pub struct ListPublicSightingsForCaseUseCase<S: SightingRepository> {
    pub sightings: S,
}

impl<S: SightingRepository> ListPublicSightingsForCaseUseCase<S> {
    pub async fn execute(&self, case_id: Uuid) -> Result<Vec<Sighting>, ApiServiceError> {
        self.sightings.list_public_for_case(case_id).await
    }
}

pub struct ListSightingsForCaseUseCase<C: CaseRepository, S: SightingRepository> {
    pub cases: C,
    pub sightings: S,
}

impl<C: CaseRepository, S: SightingRepository> ListSightingsForCaseUseCase<C, S> {
    /// Owner-or-admin view including contact details.
    pub async fn execute(
        &self,
        case_id: Uuid,
        requester_id: Uuid,
        requester_is_admin: bool,
    ) -> Result<Vec<Sighting>, ApiServiceError> {
        let case = self
            .cases
            .find_by_id(case_id)
            .await?
            .ok_or(ApiServiceError::CaseNotFound)?;
        if case.user_id != requester_id && !requester_is_admin {
            return Err(ApiServiceError::Forbidden);
        }
        self.sightings.list_for_case(case_id).await
    }
}

pub struct ListPublicGeneralSightingsUseCase<S: SightingRepository> {
    pub sightings: S,
}

impl<S: SightingRepository> ListPublicGeneralSightingsUseCase<S> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Sighting>, ApiServiceError> {
        self.sightings.list_public_general(page).await
    }
}

pub struct AdminListSightingsUseCase<S: SightingRepository> {
    pub sightings: S,
}

impl<S: SightingRepository> AdminListSightingsUseCase<S> {
    pub async fn execute(
        &self,
        is_general: Option<bool>,
        status: Option<SightingStatus>,
        page: PageRequest,
    ) -> Result<Vec<Sighting>, ApiServiceError> {
        self.sightings.list_queue(is_general, status, page).await
    }
}

pub struct GeneralSightingCountsUseCase<S: SightingRepository> {
    pub sightings: S,
}

impl<S: SightingRepository> GeneralSightingCountsUseCase<S> {
    pub async fn execute(&self) -> Result<GeneralSightingCounts, ApiServiceError> {
        self.sightings.general_counts().await
    }
}

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use safereturn_domain::case_number::CaseNumber;
use safereturn_domain::pagination::PageRequest;
use safereturn_domain::status::CaseStatus;

use crate::domain::repository::{CaseRepository, CaseSequenceRepository, UserRepository};
use crate::domain::types::{Case, CaseCounts};
use crate::error::ApiServiceError;

// ── SubmitCase ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct SubmitCaseInput {
    pub person_name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub clothing: Option<String>,
    pub last_seen_location: Option<String>,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub last_seen_latitude: Option<f64>,
    pub last_seen_longitude: Option<f64>,
    pub photo: Option<String>,
    pub informer_name: Option<String>,
    pub informer_phone: Option<String>,
    pub informer_relation: Option<String>,
}

pub struct SubmitCaseUseCase<U: UserRepository, C: CaseRepository> {
    pub users: U,
    pub cases: C,
}

impl<U: UserRepository, C: CaseRepository> SubmitCaseUseCase<U, C> {
    /// All checks run before the insert; a failed submission writes nothing.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        input: SubmitCaseInput,
    ) -> Result<Case, ApiServiceError> {
        let owner = self
            .users
            .find_by_id(owner_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        if owner.is_flagged {
            return Err(ApiServiceError::AccountFlagged);
        }
        if !owner.verification_status.can_submit_cases() {
            return Err(ApiServiceError::VerificationRequired);
        }
        if input.person_name.trim().is_empty() {
            return Err(ApiServiceError::MissingData);
        }

        let now = Utc::now();
        let case = Case {
            id: Uuid::now_v7(),
            user_id: owner_id,
            person_name: input.person_name,
            age: input.age,
            gender: input.gender,
            description: input.description,
            clothing: input.clothing,
            last_seen_location: input.last_seen_location,
            last_seen_at: input.last_seen_at,
            last_seen_latitude: input.last_seen_latitude,
            last_seen_longitude: input.last_seen_longitude,
            photo: input.photo,
            informer_name: input.informer_name,
            informer_phone: input.informer_phone,
            informer_relation: input.informer_relation,
            status: CaseStatus::Pending,
            case_number: None,
            verified_by: None,
            verified_at: None,
            resolved_at: None,
            created_from_sighting: None,
            created_at: now,
            updated_at: now,
        };
        self.cases.create(&case).await?;
        Ok(case)
    }
}

// ── TransitionCase ───────────────────────────────────────────────────────────

pub struct TransitionCaseUseCase<U: UserRepository, C: CaseRepository, Q: CaseSequenceRepository> {
    pub users: U,
    pub cases: C,
    pub sequences: Q,
}

impl<U: UserRepository, C: CaseRepository, Q: CaseSequenceRepository>
    TransitionCaseUseCase<U, C, Q>
{
    pub async fn execute(
        &self,
        case_id: Uuid,
        new_status: CaseStatus,
        admin_id: Uuid,
    ) -> Result<Case, ApiServiceError> {
        let mut case = self
            .cases
            .find_by_id(case_id)
            .await?
            .ok_or(ApiServiceError::CaseNotFound)?;

        if !case.status.can_transition_to(new_status) {
            return Err(ApiServiceError::InvalidTransition);
        }

        let now = Utc::now();
        match new_status {
            CaseStatus::Approved => {
                let admin = self
                    .users
                    .find_by_id(admin_id)
                    .await?
                    .ok_or(ApiServiceError::UserNotFound)?;
                let district = admin.case_district().to_owned();
                let seq = self
                    .sequences
                    .next_seq(&district, now.year(), now.month())
                    .await?;
                // The transition table guarantees we came from pending, so the
                // number slot is still empty. Assigned once, never rewritten.
                case.case_number = Some(CaseNumber::new(district, now.year(), now.month(), seq));
                case.verified_by = Some(admin_id);
                case.verified_at = Some(now);
            }
            CaseStatus::Rejected => {
                case.verified_by = Some(admin_id);
                case.verified_at = Some(now);
            }
            CaseStatus::Resolved => {
                case.resolved_at = Some(now);
            }
            CaseStatus::Pending => unreachable!("no transition leads back to pending"),
        }
        case.status = new_status;
        case.updated_at = now;

        self.cases.update(&case).await?;
        Ok(case)
    }
}

// ── Public reads ─────────────────────────────────────────────────────────────

pub struct GetPublicCaseUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> GetPublicCaseUseCase<C> {
    /// Only approved cases are visible to the public; anything else reads as absent.
    pub async fn execute(&self, case_id: Uuid) -> Result<Case, ApiServiceError> {
        let case = self
            .cases
            .find_by_id(case_id)
            .await?
            .ok_or(ApiServiceError::CaseNotFound)?;
        if case.status != CaseStatus::Approved {
            return Err(ApiServiceError::CaseNotFound);
        }
        Ok(case)
    }
}

pub struct ListActiveCasesUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> ListActiveCasesUseCase<C> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Case>, ApiServiceError> {
        self.cases.list_approved(page).await
    }
}

// ── Owner / admin reads ──────────────────────────────────────────────────────

pub struct ListMyCasesUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> ListMyCasesUseCase<C> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Case>, ApiServiceError> {
        self.cases.list_by_owner(owner_id, page).await
    }
}

pub struct AdminListCasesUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> AdminListCasesUseCase<C> {
    pub async fn execute(
        &self,
        status: Option<CaseStatus>,
        page: PageRequest,
    ) -> Result<Vec<Case>, ApiServiceError> {
        self.cases.list_by_status(status, page).await
    }
}

pub struct AdminGetCaseUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> AdminGetCaseUseCase<C> {
    pub async fn execute(&self, case_id: Uuid) -> Result<Case, ApiServiceError> {
        self.cases
            .find_by_id(case_id)
            .await?
            .ok_or(ApiServiceError::CaseNotFound)
    }
}

pub struct CaseCountsUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> CaseCountsUseCase<C> {
    pub async fn execute(&self) -> Result<CaseCounts, ApiServiceError> {
        self.cases.counts().await
    }
}

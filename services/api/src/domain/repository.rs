#![allow(async_fn_in_trait)]

use uuid::Uuid;

use safereturn_domain::pagination::PageRequest;
use safereturn_domain::status::{CaseStatus, SightingStatus};
use safereturn_domain::user::VerificationStatus;

use crate::domain::types::{Case, CaseCounts, GeneralSightingCounts, Sighting, User};
use crate::error::ApiServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiServiceError>;
    async fn create(&self, user: &User) -> Result<(), ApiServiceError>;
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        home_latitude: Option<f64>,
        home_longitude: Option<f64>,
    ) -> Result<(), ApiServiceError>;
    async fn set_profile_photo(&self, id: Uuid, path: &str) -> Result<(), ApiServiceError>;
    /// Record a verification document submission and move status to `pending`.
    async fn set_verification_submission(
        &self,
        id: Uuid,
        doc_number: &str,
        doc_photo: Option<&str>,
    ) -> Result<(), ApiServiceError>;
    async fn set_verification_status(
        &self,
        id: Uuid,
        status: VerificationStatus,
    ) -> Result<(), ApiServiceError>;
    async fn set_fcm_token(&self, id: Uuid, token: &str) -> Result<(), ApiServiceError>;
    async fn set_flagged(&self, id: Uuid, flagged: bool) -> Result<(), ApiServiceError>;
    /// Delete an account. Returns `true` if a row was deleted.
    /// Cases and sightings go with it via FK cascade.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiServiceError>;
    async fn list_by_verification_status(
        &self,
        status: Option<VerificationStatus>,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiServiceError>;
}

/// Repository for missing-person cases.
pub trait CaseRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>, ApiServiceError>;
    async fn create(&self, case: &Case) -> Result<(), ApiServiceError>;
    /// Persist the full current state of a case (status transitions).
    async fn update(&self, case: &Case) -> Result<(), ApiServiceError>;
    async fn list_approved(&self, page: PageRequest) -> Result<Vec<Case>, ApiServiceError>;
    async fn list_by_owner(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Case>, ApiServiceError>;
    async fn list_by_status(
        &self,
        status: Option<CaseStatus>,
        page: PageRequest,
    ) -> Result<Vec<Case>, ApiServiceError>;
    async fn counts(&self) -> Result<CaseCounts, ApiServiceError>;
}

/// Repository for sightings, both linked and general.
pub trait SightingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sighting>, ApiServiceError>;
    async fn create(&self, sighting: &Sighting) -> Result<(), ApiServiceError>;
    /// Persist the full current state of a sighting (review/resolution).
    async fn update(&self, sighting: &Sighting) -> Result<(), ApiServiceError>;
    /// Linked sightings for a case that admins made public.
    async fn list_public_for_case(&self, case_id: Uuid) -> Result<Vec<Sighting>, ApiServiceError>;
    /// All linked sightings for a case (owner/admin view, contact info included).
    async fn list_for_case(&self, case_id: Uuid) -> Result<Vec<Sighting>, ApiServiceError>;
    async fn list_public_general(
        &self,
        page: PageRequest,
    ) -> Result<Vec<Sighting>, ApiServiceError>;
    /// Admin review queue, optionally filtered by kind and status.
    async fn list_queue(
        &self,
        is_general: Option<bool>,
        status: Option<SightingStatus>,
        page: PageRequest,
    ) -> Result<Vec<Sighting>, ApiServiceError>;
    async fn list_by_reporter(&self, user_id: Uuid) -> Result<Vec<Sighting>, ApiServiceError>;
    async fn general_counts(&self) -> Result<GeneralSightingCounts, ApiServiceError>;
}

/// Atomic counter for case-number assignment.
pub trait CaseSequenceRepository: Send + Sync {
    /// Increment and return the next sequence value for (district, year, month).
    /// Starts at 1 for a fresh scope. Must be atomic under concurrent approvals.
    async fn next_seq(
        &self,
        district: &str,
        year: i32,
        month: u32,
    ) -> Result<u32, ApiServiceError>;
}

/// Atomically insert a promoted case and update its source sighting.
pub trait CaseIntakePort: Send + Sync {
    async fn create_case_from_sighting(
        &self,
        case: &Case,
        sighting: &Sighting,
    ) -> Result<(), ApiServiceError>;
}

/// Storage for uploaded photos. Returns the public path stored on records.
pub trait UploadStore: Send + Sync {
    async fn store(
        &self,
        original_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiServiceError>;
}

use chrono::{DateTime, Utc};
use uuid::Uuid;

use safereturn_domain::case_number::{CaseNumber, DEFAULT_DISTRICT};
use safereturn_domain::status::{CaseStatus, PersonCondition, SightingStatus};
use safereturn_domain::user::{UserRole, VerificationStatus};

/// User account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
    pub district: Option<String>,
    pub verification_status: VerificationStatus,
    pub verification_doc_number: Option<String>,
    pub verification_doc_photo: Option<String>,
    pub home_latitude: Option<f64>,
    pub home_longitude: Option<f64>,
    pub profile_photo: Option<String>,
    pub fcm_token: Option<String>,
    pub is_flagged: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// District used to scope case numbers this user mints as an admin.
    pub fn case_district(&self) -> &str {
        self.district.as_deref().unwrap_or(DEFAULT_DISTRICT)
    }
}

/// Missing-person case.
#[derive(Debug, Clone)]
pub struct Case {
    pub id: Uuid,
    pub user_id: Uuid,
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
    pub status: CaseStatus,
    pub case_number: Option<CaseNumber>,
    pub verified_by: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_from_sighting: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sighting, linked (`case_id` set) or general (`is_general`).
#[derive(Debug, Clone)]
pub struct Sighting {
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
    pub sighted_at: DateTime<Utc>,
    pub description: String,
    pub person_condition: PersonCondition,
    pub photo: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub status: SightingStatus,
    pub matched_to_case: Option<Uuid>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dashboard counts of cases by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseCounts {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub resolved: u64,
}

/// Dashboard counts of general sightings by resolution status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneralSightingCounts {
    pub pending: u64,
    pub matched: u64,
    pub new_case: u64,
    pub irrelevant: u64,
}

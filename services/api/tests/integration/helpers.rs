use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use safereturn_api::domain::repository::{
    CaseIntakePort, CaseRepository, CaseSequenceRepository, SightingRepository, UserRepository,
};
use safereturn_api::domain::types::{Case, CaseCounts, GeneralSightingCounts, Sighting, User};
use safereturn_api::error::ApiServiceError;
use safereturn_domain::pagination::PageRequest;
use safereturn_domain::status::{CaseStatus, PersonCondition, SightingStatus};
use safereturn_domain::user::{UserRole, VerificationStatus};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// A regular user whose identity verification is approved.
pub fn test_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        name: "Asha Rahman".to_owned(),
        email: "asha@example.com".to_owned(),
        phone: "01700000000".to_owned(),
        password_hash: "unused".to_owned(),
        role: UserRole::User,
        district: None,
        verification_status: VerificationStatus::Approved,
        verification_doc_number: Some("123456789012".to_owned()),
        verification_doc_photo: None,
        home_latitude: None,
        home_longitude: None,
        profile_photo: None,
        fcm_token: None,
        is_flagged: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_admin() -> User {
    let mut user = test_user();
    user.email = "admin@example.com".to_owned();
    user.role = UserRole::Admin;
    user
}

pub fn test_case(owner_id: Uuid) -> Case {
    let now = Utc::now();
    Case {
        id: Uuid::now_v7(),
        user_id: owner_id,
        person_name: "Rafiq Islam".to_owned(),
        age: Some(67),
        gender: Some("male".to_owned()),
        description: Some("last seen near the market".to_owned()),
        clothing: Some("white panjabi".to_owned()),
        last_seen_location: Some("Karwan Bazar".to_owned()),
        last_seen_at: Some(now),
        last_seen_latitude: Some(23.751),
        last_seen_longitude: Some(90.393),
        photo: None,
        informer_name: None,
        informer_phone: None,
        informer_relation: Some("son".to_owned()),
        status: CaseStatus::Pending,
        case_number: None,
        verified_by: None,
        verified_at: None,
        resolved_at: None,
        created_from_sighting: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_general_sighting(reporter_id: Uuid) -> Sighting {
    let now = Utc::now();
    Sighting {
        id: Uuid::now_v7(),
        case_id: None,
        user_id: reporter_id,
        is_general: true,
        person_name: Some("unknown elderly man".to_owned()),
        person_age: Some(70),
        person_gender: Some("male".to_owned()),
        person_height: None,
        person_complexion: None,
        person_clothing: Some("grey shawl".to_owned()),
        location: "Sadarghat terminal".to_owned(),
        latitude: None,
        longitude: None,
        sighted_at: now,
        description: "sitting alone, seems disoriented".to_owned(),
        person_condition: PersonCondition::Confused,
        photo: None,
        contact_name: Some("Asha Rahman".to_owned()),
        contact_phone: Some("01700000000".to_owned()),
        contact_email: Some("asha@example.com".to_owned()),
        status: SightingStatus::Pending,
        matched_to_case: None,
        reviewed_by: None,
        reviewed_at: None,
        admin_notes: None,
        is_public: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_linked_sighting(reporter_id: Uuid, case_id: Uuid) -> Sighting {
    let mut sighting = test_general_sighting(reporter_id);
    sighting.case_id = Some(case_id);
    sighting.is_general = false;
    sighting
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        home_latitude: Option<f64>,
        home_longitude: Option<f64>,
    ) -> Result<(), ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            if let Some(name) = name {
                u.name = name.to_owned();
            }
            if let Some(phone) = phone {
                u.phone = phone.to_owned();
            }
            if home_latitude.is_some() {
                u.home_latitude = home_latitude;
            }
            if home_longitude.is_some() {
                u.home_longitude = home_longitude;
            }
        }
        Ok(())
    }

    async fn set_profile_photo(&self, id: Uuid, path: &str) -> Result<(), ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.profile_photo = Some(path.to_owned());
        }
        Ok(())
    }

    async fn set_verification_submission(
        &self,
        id: Uuid,
        doc_number: &str,
        doc_photo: Option<&str>,
    ) -> Result<(), ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.verification_doc_number = Some(doc_number.to_owned());
            u.verification_doc_photo = doc_photo.map(str::to_owned);
            u.verification_status = VerificationStatus::Pending;
        }
        Ok(())
    }

    async fn set_verification_status(
        &self,
        id: Uuid,
        status: VerificationStatus,
    ) -> Result<(), ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.verification_status = status;
        }
        Ok(())
    }

    async fn set_fcm_token(&self, id: Uuid, token: &str) -> Result<(), ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.fcm_token = Some(token.to_owned());
        }
        Ok(())
    }

    async fn set_flagged(&self, id: Uuid, flagged: bool) -> Result<(), ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.is_flagged = flagged;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    async fn list_by_verification_status(
        &self,
        status: Option<VerificationStatus>,
        _page: PageRequest,
    ) -> Result<Vec<User>, ApiServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| status.is_none_or(|s| u.verification_status == s))
            .cloned()
            .collect())
    }
}

// ── MockCaseRepo ─────────────────────────────────────────────────────────────

pub struct MockCaseRepo {
    pub cases: Arc<Mutex<Vec<Case>>>,
}

impl MockCaseRepo {
    pub fn new(cases: Vec<Case>) -> Self {
        Self {
            cases: Arc::new(Mutex::new(cases)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn cases_handle(&self) -> Arc<Mutex<Vec<Case>>> {
        Arc::clone(&self.cases)
    }
}

impl CaseRepository for MockCaseRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>, ApiServiceError> {
        Ok(self.cases.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, case: &Case) -> Result<(), ApiServiceError> {
        self.cases.lock().unwrap().push(case.clone());
        Ok(())
    }

    async fn update(&self, case: &Case) -> Result<(), ApiServiceError> {
        let mut cases = self.cases.lock().unwrap();
        if let Some(c) = cases.iter_mut().find(|c| c.id == case.id) {
            *c = case.clone();
        }
        Ok(())
    }

    async fn list_approved(&self, _page: PageRequest) -> Result<Vec<Case>, ApiServiceError> {
        Ok(self
            .cases
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.status == CaseStatus::Approved)
            .cloned()
            .collect())
    }

    async fn list_by_owner(
        &self,
        user_id: Uuid,
        _page: PageRequest,
    ) -> Result<Vec<Case>, ApiServiceError> {
        Ok(self
            .cases
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_status(
        &self,
        status: Option<CaseStatus>,
        _page: PageRequest,
    ) -> Result<Vec<Case>, ApiServiceError> {
        Ok(self
            .cases
            .lock()
            .unwrap()
            .iter()
            .filter(|c| status.is_none_or(|s| c.status == s))
            .cloned()
            .collect())
    }

    async fn counts(&self) -> Result<CaseCounts, ApiServiceError> {
        let mut counts = CaseCounts::default();
        for case in self.cases.lock().unwrap().iter() {
            match case.status {
                CaseStatus::Pending => counts.pending += 1,
                CaseStatus::Approved => counts.approved += 1,
                CaseStatus::Rejected => counts.rejected += 1,
                CaseStatus::Resolved => counts.resolved += 1,
            }
        }
        Ok(counts)
    }
}

// ── MockSightingRepo ─────────────────────────────────────────────────────────

pub struct MockSightingRepo {
    pub sightings: Arc<Mutex<Vec<Sighting>>>,
}

impl MockSightingRepo {
    pub fn new(sightings: Vec<Sighting>) -> Self {
        Self {
            sightings: Arc::new(Mutex::new(sightings)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn sightings_handle(&self) -> Arc<Mutex<Vec<Sighting>>> {
        Arc::clone(&self.sightings)
    }
}

impl SightingRepository for MockSightingRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sighting>, ApiServiceError> {
        Ok(self
            .sightings
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn create(&self, sighting: &Sighting) -> Result<(), ApiServiceError> {
        self.sightings.lock().unwrap().push(sighting.clone());
        Ok(())
    }

    async fn update(&self, sighting: &Sighting) -> Result<(), ApiServiceError> {
        let mut sightings = self.sightings.lock().unwrap();
        if let Some(s) = sightings.iter_mut().find(|s| s.id == sighting.id) {
            *s = sighting.clone();
        }
        Ok(())
    }

    async fn list_public_for_case(&self, case_id: Uuid) -> Result<Vec<Sighting>, ApiServiceError> {
        Ok(self
            .sightings
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.case_id == Some(case_id) && s.is_public)
            .cloned()
            .collect())
    }

    async fn list_for_case(&self, case_id: Uuid) -> Result<Vec<Sighting>, ApiServiceError> {
        Ok(self
            .sightings
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.case_id == Some(case_id))
            .cloned()
            .collect())
    }

    async fn list_public_general(
        &self,
        _page: PageRequest,
    ) -> Result<Vec<Sighting>, ApiServiceError> {
        Ok(self
            .sightings
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_general && s.is_public)
            .cloned()
            .collect())
    }

    async fn list_queue(
        &self,
        is_general: Option<bool>,
        status: Option<SightingStatus>,
        _page: PageRequest,
    ) -> Result<Vec<Sighting>, ApiServiceError> {
        Ok(self
            .sightings
            .lock()
            .unwrap()
            .iter()
            .filter(|s| is_general.is_none_or(|g| s.is_general == g))
            .filter(|s| status.is_none_or(|st| s.status == st))
            .cloned()
            .collect())
    }

    async fn list_by_reporter(&self, user_id: Uuid) -> Result<Vec<Sighting>, ApiServiceError> {
        Ok(self
            .sightings
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn general_counts(&self) -> Result<GeneralSightingCounts, ApiServiceError> {
        let mut counts = GeneralSightingCounts::default();
        for sighting in self.sightings.lock().unwrap().iter() {
            if !sighting.is_general {
                continue;
            }
            match sighting.status {
                SightingStatus::Pending => counts.pending += 1,
                SightingStatus::Matched => counts.matched += 1,
                SightingStatus::NewCase => counts.new_case += 1,
                SightingStatus::Irrelevant => counts.irrelevant += 1,
                _ => {}
            }
        }
        Ok(counts)
    }
}

// ── MockCaseSequenceRepo ─────────────────────────────────────────────────────

/// In-memory counter keyed by (district, year, month), like the SQL upsert.
pub struct MockCaseSequenceRepo {
    pub sequences: Arc<Mutex<HashMap<(String, i32, u32), u32>>>,
}

impl MockCaseSequenceRepo {
    pub fn new() -> Self {
        Self {
            sequences: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl CaseSequenceRepository for MockCaseSequenceRepo {
    async fn next_seq(
        &self,
        district: &str,
        year: i32,
        month: u32,
    ) -> Result<u32, ApiServiceError> {
        let mut sequences = self.sequences.lock().unwrap();
        let seq = sequences
            .entry((district.to_owned(), year, month))
            .or_insert(0);
        *seq += 1;
        Ok(*seq)
    }
}

// ── MockCaseIntakePort ───────────────────────────────────────────────────────

pub struct MockCaseIntakePort {
    pub committed: Arc<Mutex<Vec<(Case, Sighting)>>>,
}

impl MockCaseIntakePort {
    pub fn new() -> Self {
        Self {
            committed: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn committed_handle(&self) -> Arc<Mutex<Vec<(Case, Sighting)>>> {
        Arc::clone(&self.committed)
    }
}

impl CaseIntakePort for MockCaseIntakePort {
    async fn create_case_from_sighting(
        &self,
        case: &Case,
        sighting: &Sighting,
    ) -> Result<(), ApiServiceError> {
        self.committed
            .lock()
            .unwrap()
            .push((case.clone(), sighting.clone()));
        Ok(())
    }
}

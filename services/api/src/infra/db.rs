use anyhow::{Context as _, anyhow};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Statement,
    TransactionTrait,
};
use uuid::Uuid;

use safereturn_domain::case_number::CaseNumber;
use safereturn_domain::pagination::PageRequest;
use safereturn_domain::status::{CaseStatus, PersonCondition, SightingStatus};
use safereturn_domain::user::{UserRole, VerificationStatus};
use safereturn_schema::{cases, sightings, users};

use crate::domain::repository::{
    CaseIntakePort, CaseRepository, CaseSequenceRepository, SightingRepository, UserRepository,
};
use crate::domain::types::{Case, CaseCounts, GeneralSightingCounts, Sighting, User};
use crate::error::ApiServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), ApiServiceError> {
        user_to_active_model(user)
            .insert(&self.db)
            .await
            .context("create user")?;
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
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = name {
            am.name = Set(name.to_owned());
        }
        if let Some(phone) = phone {
            am.phone = Set(phone.to_owned());
        }
        if let Some(lat) = home_latitude {
            am.home_latitude = Set(Some(lat));
        }
        if let Some(lng) = home_longitude {
            am.home_longitude = Set(Some(lng));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update user profile")?;
        Ok(())
    }

    async fn set_profile_photo(&self, id: Uuid, path: &str) -> Result<(), ApiServiceError> {
        users::ActiveModel {
            id: Set(id),
            profile_photo: Set(Some(path.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set profile photo")?;
        Ok(())
    }

    async fn set_verification_submission(
        &self,
        id: Uuid,
        doc_number: &str,
        doc_photo: Option<&str>,
    ) -> Result<(), ApiServiceError> {
        users::ActiveModel {
            id: Set(id),
            verification_status: Set(VerificationStatus::Pending.as_str().to_owned()),
            verification_doc_number: Set(Some(doc_number.to_owned())),
            verification_doc_photo: Set(doc_photo.map(str::to_owned)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set verification submission")?;
        Ok(())
    }

    async fn set_verification_status(
        &self,
        id: Uuid,
        status: VerificationStatus,
    ) -> Result<(), ApiServiceError> {
        users::ActiveModel {
            id: Set(id),
            verification_status: Set(status.as_str().to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set verification status")?;
        Ok(())
    }

    async fn set_fcm_token(&self, id: Uuid, token: &str) -> Result<(), ApiServiceError> {
        users::ActiveModel {
            id: Set(id),
            fcm_token: Set(Some(token.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set fcm token")?;
        Ok(())
    }

    async fn set_flagged(&self, id: Uuid, flagged: bool) -> Result<(), ApiServiceError> {
        users::ActiveModel {
            id: Set(id),
            is_flagged: Set(flagged),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set flagged")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_verification_status(
        &self,
        status: Option<VerificationStatus>,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = users::Entity::find();
        if let Some(status) = status {
            query = query.filter(users::Column::VerificationStatus.eq(status.as_str()));
        }
        let models = query
            .order_by_desc(users::Column::CreatedAt)
            .limit(per_page as u64)
            .offset(((page - 1) * per_page) as u64)
            .all(&self.db)
            .await
            .context("list users by verification status")?;
        models.into_iter().map(user_from_model).collect()
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiServiceError> {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .ok_or_else(|| anyhow!("unknown user role {}", model.role))?;
    let verification_status = VerificationStatus::from_str_opt(&model.verification_status)
        .ok_or_else(|| anyhow!("unknown verification status {:?}", model.verification_status))?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        password_hash: model.password_hash,
        role,
        district: model.district,
        verification_status,
        verification_doc_number: model.verification_doc_number,
        verification_doc_photo: model.verification_doc_photo,
        home_latitude: model.home_latitude,
        home_longitude: model.home_longitude,
        profile_photo: model.profile_photo,
        fcm_token: model.fcm_token,
        is_flagged: model.is_flagged,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn user_to_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        phone: Set(user.phone.clone()),
        password_hash: Set(user.password_hash.clone()),
        role: Set(user.role.as_u8() as i16),
        district: Set(user.district.clone()),
        verification_status: Set(user.verification_status.as_str().to_owned()),
        verification_doc_number: Set(user.verification_doc_number.clone()),
        verification_doc_photo: Set(user.verification_doc_photo.clone()),
        home_latitude: Set(user.home_latitude),
        home_longitude: Set(user.home_longitude),
        profile_photo: Set(user.profile_photo.clone()),
        fcm_token: Set(user.fcm_token.clone()),
        is_flagged: Set(user.is_flagged),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

// ── Case repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCaseRepository {
    pub db: DatabaseConnection,
}

impl CaseRepository for DbCaseRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>, ApiServiceError> {
        let model = cases::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find case by id")?;
        model.map(case_from_model).transpose()
    }

    async fn create(&self, case: &Case) -> Result<(), ApiServiceError> {
        case_to_active_model(case)
            .insert(&self.db)
            .await
            .context("create case")?;
        Ok(())
    }

    async fn update(&self, case: &Case) -> Result<(), ApiServiceError> {
        case_to_active_model(case)
            .update(&self.db)
            .await
            .context("update case")?;
        Ok(())
    }

    async fn list_approved(&self, page: PageRequest) -> Result<Vec<Case>, ApiServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let models = cases::Entity::find()
            .filter(cases::Column::Status.eq(CaseStatus::Approved.as_str()))
            .order_by_desc(cases::Column::CreatedAt)
            .limit(per_page as u64)
            .offset(((page - 1) * per_page) as u64)
            .all(&self.db)
            .await
            .context("list approved cases")?;
        models.into_iter().map(case_from_model).collect()
    }

    async fn list_by_owner(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Case>, ApiServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let models = cases::Entity::find()
            .filter(cases::Column::UserId.eq(user_id))
            .order_by_desc(cases::Column::CreatedAt)
            .limit(per_page as u64)
            .offset(((page - 1) * per_page) as u64)
            .all(&self.db)
            .await
            .context("list cases by owner")?;
        models.into_iter().map(case_from_model).collect()
    }

    async fn list_by_status(
        &self,
        status: Option<CaseStatus>,
        page: PageRequest,
    ) -> Result<Vec<Case>, ApiServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = cases::Entity::find();
        if let Some(status) = status {
            query = query.filter(cases::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_desc(cases::Column::CreatedAt)
            .limit(per_page as u64)
            .offset(((page - 1) * per_page) as u64)
            .all(&self.db)
            .await
            .context("list cases by status")?;
        models.into_iter().map(case_from_model).collect()
    }

    async fn counts(&self) -> Result<CaseCounts, ApiServiceError> {
        #[derive(FromQueryResult)]
        struct StatusCount {
            status: String,
            count: i64,
        }

        let rows = cases::Entity::find()
            .select_only()
            .column(cases::Column::Status)
            .column_as(cases::Column::Id.count(), "count")
            .group_by(cases::Column::Status)
            .into_model::<StatusCount>()
            .all(&self.db)
            .await
            .context("count cases by status")?;

        let mut counts = CaseCounts::default();
        for row in rows {
            let n = row.count as u64;
            match CaseStatus::from_str_opt(&row.status) {
                Some(CaseStatus::Pending) => counts.pending = n,
                Some(CaseStatus::Approved) => counts.approved = n,
                Some(CaseStatus::Rejected) => counts.rejected = n,
                Some(CaseStatus::Resolved) => counts.resolved = n,
                None => return Err(anyhow!("unknown case status {:?}", row.status).into()),
            }
        }
        Ok(counts)
    }
}

fn case_from_model(model: cases::Model) -> Result<Case, ApiServiceError> {
    let status = CaseStatus::from_str_opt(&model.status)
        .ok_or_else(|| anyhow!("unknown case status {:?}", model.status))?;
    let case_number = model
        .case_number
        .as_deref()
        .map(str::parse::<CaseNumber>)
        .transpose()
        .map_err(|_| anyhow!("malformed case number on case {}", model.id))?;
    Ok(Case {
        id: model.id,
        user_id: model.user_id,
        person_name: model.person_name,
        age: model.age,
        gender: model.gender,
        description: model.description,
        clothing: model.clothing,
        last_seen_location: model.last_seen_location,
        last_seen_at: model.last_seen_at,
        last_seen_latitude: model.last_seen_latitude,
        last_seen_longitude: model.last_seen_longitude,
        photo: model.photo,
        informer_name: model.informer_name,
        informer_phone: model.informer_phone,
        informer_relation: model.informer_relation,
        status,
        case_number,
        verified_by: model.verified_by,
        verified_at: model.verified_at,
        resolved_at: model.resolved_at,
        created_from_sighting: model.created_from_sighting,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn case_to_active_model(case: &Case) -> cases::ActiveModel {
    cases::ActiveModel {
        id: Set(case.id),
        user_id: Set(case.user_id),
        person_name: Set(case.person_name.clone()),
        age: Set(case.age),
        gender: Set(case.gender.clone()),
        description: Set(case.description.clone()),
        clothing: Set(case.clothing.clone()),
        last_seen_location: Set(case.last_seen_location.clone()),
        last_seen_at: Set(case.last_seen_at),
        last_seen_latitude: Set(case.last_seen_latitude),
        last_seen_longitude: Set(case.last_seen_longitude),
        photo: Set(case.photo.clone()),
        informer_name: Set(case.informer_name.clone()),
        informer_phone: Set(case.informer_phone.clone()),
        informer_relation: Set(case.informer_relation.clone()),
        status: Set(case.status.as_str().to_owned()),
        case_number: Set(case.case_number.as_ref().map(|n| n.to_string())),
        verified_by: Set(case.verified_by),
        verified_at: Set(case.verified_at),
        resolved_at: Set(case.resolved_at),
        created_from_sighting: Set(case.created_from_sighting),
        created_at: Set(case.created_at),
        updated_at: Set(case.updated_at),
    }
}

// ── Sighting repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSightingRepository {
    pub db: DatabaseConnection,
}

impl SightingRepository for DbSightingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sighting>, ApiServiceError> {
        let model = sightings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find sighting by id")?;
        model.map(sighting_from_model).transpose()
    }

    async fn create(&self, sighting: &Sighting) -> Result<(), ApiServiceError> {
        sighting_to_active_model(sighting)
            .insert(&self.db)
            .await
            .context("create sighting")?;
        Ok(())
    }

    async fn update(&self, sighting: &Sighting) -> Result<(), ApiServiceError> {
        sighting_to_active_model(sighting)
            .update(&self.db)
            .await
            .context("update sighting")?;
        Ok(())
    }

    async fn list_public_for_case(&self, case_id: Uuid) -> Result<Vec<Sighting>, ApiServiceError> {
        let models = sightings::Entity::find()
            .filter(sightings::Column::CaseId.eq(case_id))
            .filter(sightings::Column::IsGeneral.eq(false))
            .filter(sightings::Column::IsPublic.eq(true))
            .order_by_desc(sightings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list public sightings for case")?;
        models.into_iter().map(sighting_from_model).collect()
    }

    async fn list_for_case(&self, case_id: Uuid) -> Result<Vec<Sighting>, ApiServiceError> {
        let models = sightings::Entity::find()
            .filter(sightings::Column::CaseId.eq(case_id))
            .filter(sightings::Column::IsGeneral.eq(false))
            .order_by_desc(sightings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list sightings for case")?;
        models.into_iter().map(sighting_from_model).collect()
    }

    async fn list_public_general(
        &self,
        page: PageRequest,
    ) -> Result<Vec<Sighting>, ApiServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let models = sightings::Entity::find()
            .filter(sightings::Column::IsGeneral.eq(true))
            .filter(sightings::Column::IsPublic.eq(true))
            .order_by_desc(sightings::Column::CreatedAt)
            .limit(per_page as u64)
            .offset(((page - 1) * per_page) as u64)
            .all(&self.db)
            .await
            .context("list public general sightings")?;
        models.into_iter().map(sighting_from_model).collect()
    }

    async fn list_queue(
        &self,
        is_general: Option<bool>,
        status: Option<SightingStatus>,
        page: PageRequest,
    ) -> Result<Vec<Sighting>, ApiServiceError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = sightings::Entity::find();
        if let Some(is_general) = is_general {
            query = query.filter(sightings::Column::IsGeneral.eq(is_general));
        }
        if let Some(status) = status {
            query = query.filter(sightings::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_desc(sightings::Column::CreatedAt)
            .limit(per_page as u64)
            .offset(((page - 1) * per_page) as u64)
            .all(&self.db)
            .await
            .context("list sighting queue")?;
        models.into_iter().map(sighting_from_model).collect()
    }

    async fn list_by_reporter(&self, user_id: Uuid) -> Result<Vec<Sighting>, ApiServiceError> {
        let models = sightings::Entity::find()
            .filter(sightings::Column::UserId.eq(user_id))
            .order_by_desc(sightings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list sightings by reporter")?;
        models.into_iter().map(sighting_from_model).collect()
    }

    async fn general_counts(&self) -> Result<GeneralSightingCounts, ApiServiceError> {
        #[derive(FromQueryResult)]
        struct StatusCount {
            status: String,
            count: i64,
        }

        let rows = sightings::Entity::find()
            .select_only()
            .column(sightings::Column::Status)
            .column_as(sightings::Column::Id.count(), "count")
            .filter(sightings::Column::IsGeneral.eq(true))
            .group_by(sightings::Column::Status)
            .into_model::<StatusCount>()
            .all(&self.db)
            .await
            .context("count general sightings by status")?;

        let mut counts = GeneralSightingCounts::default();
        for row in rows {
            let n = row.count as u64;
            match SightingStatus::from_str_opt(&row.status) {
                Some(SightingStatus::Pending) => counts.pending = n,
                Some(SightingStatus::Matched) => counts.matched = n,
                Some(SightingStatus::NewCase) => counts.new_case = n,
                Some(SightingStatus::Irrelevant) => counts.irrelevant = n,
                // Linked review statuses never occur on general sightings.
                Some(_) => {}
                None => return Err(anyhow!("unknown sighting status {:?}", row.status).into()),
            }
        }
        Ok(counts)
    }
}

fn sighting_from_model(model: sightings::Model) -> Result<Sighting, ApiServiceError> {
    let status = SightingStatus::from_str_opt(&model.status)
        .ok_or_else(|| anyhow!("unknown sighting status {:?}", model.status))?;
    let person_condition = PersonCondition::from_str_opt(&model.person_condition)
        .ok_or_else(|| anyhow!("unknown person condition {:?}", model.person_condition))?;
    Ok(Sighting {
        id: model.id,
        case_id: model.case_id,
        user_id: model.user_id,
        is_general: model.is_general,
        person_name: model.person_name,
        person_age: model.person_age,
        person_gender: model.person_gender,
        person_height: model.person_height,
        person_complexion: model.person_complexion,
        person_clothing: model.person_clothing,
        location: model.location,
        latitude: model.latitude,
        longitude: model.longitude,
        sighted_at: model.sighted_at,
        description: model.description,
        person_condition,
        photo: model.photo,
        contact_name: model.contact_name,
        contact_phone: model.contact_phone,
        contact_email: model.contact_email,
        status,
        matched_to_case: model.matched_to_case,
        reviewed_by: model.reviewed_by,
        reviewed_at: model.reviewed_at,
        admin_notes: model.admin_notes,
        is_public: model.is_public,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn sighting_to_active_model(sighting: &Sighting) -> sightings::ActiveModel {
    sightings::ActiveModel {
        id: Set(sighting.id),
        case_id: Set(sighting.case_id),
        user_id: Set(sighting.user_id),
        is_general: Set(sighting.is_general),
        person_name: Set(sighting.person_name.clone()),
        person_age: Set(sighting.person_age),
        person_gender: Set(sighting.person_gender.clone()),
        person_height: Set(sighting.person_height.clone()),
        person_complexion: Set(sighting.person_complexion.clone()),
        person_clothing: Set(sighting.person_clothing.clone()),
        location: Set(sighting.location.clone()),
        latitude: Set(sighting.latitude),
        longitude: Set(sighting.longitude),
        sighted_at: Set(sighting.sighted_at),
        description: Set(sighting.description.clone()),
        person_condition: Set(sighting.person_condition.as_str().to_owned()),
        photo: Set(sighting.photo.clone()),
        contact_name: Set(sighting.contact_name.clone()),
        contact_phone: Set(sighting.contact_phone.clone()),
        contact_email: Set(sighting.contact_email.clone()),
        status: Set(sighting.status.as_str().to_owned()),
        matched_to_case: Set(sighting.matched_to_case),
        reviewed_by: Set(sighting.reviewed_by),
        reviewed_at: Set(sighting.reviewed_at),
        admin_notes: Set(sighting.admin_notes.clone()),
        is_public: Set(sighting.is_public),
        created_at: Set(sighting.created_at),
        updated_at: Set(sighting.updated_at),
    }
}

// ── Case sequence repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCaseSequenceRepository {
    pub db: DatabaseConnection,
}

impl CaseSequenceRepository for DbCaseSequenceRepository {
    /// Single-statement upsert so concurrent approvals in the same scope get
    /// distinct, gap-free sequence values.
    async fn next_seq(
        &self,
        district: &str,
        year: i32,
        month: u32,
    ) -> Result<u32, ApiServiceError> {
        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                r#"
                INSERT INTO case_sequences (district, year, month, last_seq)
                VALUES ($1, $2, $3, 1)
                ON CONFLICT (district, year, month)
                DO UPDATE SET last_seq = case_sequences.last_seq + 1
                RETURNING last_seq
                "#,
                [district.into(), year.into(), (month as i16).into()],
            ))
            .await
            .context("next case sequence")?
            .ok_or_else(|| anyhow!("case sequence upsert returned no row"))?;

        let seq: i32 = row.try_get("", "last_seq").context("read last_seq")?;
        Ok(seq as u32)
    }
}

// ── Case intake port ─────────────────────────────────────────────────────────

/// Promoting a general sighting writes two tables; both land or neither does.
#[derive(Clone)]
pub struct DbCaseIntakePort {
    pub db: DatabaseConnection,
}

impl CaseIntakePort for DbCaseIntakePort {
    async fn create_case_from_sighting(
        &self,
        case: &Case,
        sighting: &Sighting,
    ) -> Result<(), ApiServiceError> {
        let txn = self
            .db
            .begin()
            .await
            .context("begin case intake transaction")?;

        case_to_active_model(case)
            .insert(&txn)
            .await
            .context("insert promoted case")?;
        sighting_to_active_model(sighting)
            .update(&txn)
            .await
            .context("update source sighting")?;

        txn.commit().await.context("commit case intake")?;
        Ok(())
    }
}

use sea_orm::entity::prelude::*;

/// User account record. Role and statuses are stored as wire values
/// (`role` as a small int, statuses as their snake_case strings).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: i16,
    /// Admins only; scopes the case numbers they mint.
    pub district: Option<String>,
    pub verification_status: String,
    pub verification_doc_number: Option<String>,
    pub verification_doc_photo: Option<String>,
    pub home_latitude: Option<f64>,
    pub home_longitude: Option<f64>,
    pub profile_photo: Option<String>,
    pub fcm_token: Option<String>,
    pub is_flagged: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cases::Entity")]
    Cases,
    #[sea_orm(has_many = "super::sightings::Entity")]
    Sightings,
}

impl Related<super::cases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cases.def()
    }
}

impl Related<super::sightings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sightings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

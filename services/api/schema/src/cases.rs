use sea_orm::entity::prelude::*;

/// Missing-person case record.
///
/// `case_number` stays null while the case is pending and is written exactly
/// once at approval.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub person_name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub clothing: Option<String>,
    pub last_seen_location: Option<String>,
    pub last_seen_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_seen_latitude: Option<f64>,
    pub last_seen_longitude: Option<f64>,
    pub photo: Option<String>,
    pub informer_name: Option<String>,
    pub informer_phone: Option<String>,
    pub informer_relation: Option<String>,
    pub status: String,
    #[sea_orm(unique)]
    pub case_number: Option<String>,
    pub verified_by: Option<Uuid>,
    pub verified_at: Option<chrono::DateTime<chrono::Utc>>,
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_from_sighting: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::sightings::Entity")]
    Sightings,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::sightings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sightings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sightings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sightings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sightings::CaseId).uuid())
                    .col(ColumnDef::new(Sightings::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Sightings::IsGeneral)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Sightings::PersonName).string())
                    .col(ColumnDef::new(Sightings::PersonAge).integer())
                    .col(ColumnDef::new(Sightings::PersonGender).string())
                    .col(ColumnDef::new(Sightings::PersonHeight).string())
                    .col(ColumnDef::new(Sightings::PersonComplexion).string())
                    .col(ColumnDef::new(Sightings::PersonClothing).string())
                    .col(ColumnDef::new(Sightings::Location).string().not_null())
                    .col(ColumnDef::new(Sightings::Latitude).double())
                    .col(ColumnDef::new(Sightings::Longitude).double())
                    .col(
                        ColumnDef::new(Sightings::SightedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sightings::Description).text().not_null())
                    .col(
                        ColumnDef::new(Sightings::PersonCondition)
                            .string()
                            .not_null()
                            .default("healthy"),
                    )
                    .col(ColumnDef::new(Sightings::Photo).string())
                    .col(ColumnDef::new(Sightings::ContactName).string())
                    .col(ColumnDef::new(Sightings::ContactPhone).string())
                    .col(ColumnDef::new(Sightings::ContactEmail).string())
                    .col(
                        ColumnDef::new(Sightings::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Sightings::MatchedToCase).uuid())
                    .col(ColumnDef::new(Sightings::ReviewedBy).uuid())
                    .col(ColumnDef::new(Sightings::ReviewedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Sightings::AdminNotes).text())
                    .col(
                        ColumnDef::new(Sightings::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Sightings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Sightings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Sightings::Table, Sightings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Sightings::Table, Sightings::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sightings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sightings {
    Table,
    Id,
    CaseId,
    UserId,
    IsGeneral,
    PersonName,
    PersonAge,
    PersonGender,
    PersonHeight,
    PersonComplexion,
    PersonClothing,
    Location,
    Latitude,
    Longitude,
    SightedAt,
    Description,
    PersonCondition,
    Photo,
    ContactName,
    ContactPhone,
    ContactEmail,
    Status,
    MatchedToCase,
    ReviewedBy,
    ReviewedAt,
    AdminNotes,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
}

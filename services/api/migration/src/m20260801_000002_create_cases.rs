use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cases::UserId).uuid().not_null())
                    .col(ColumnDef::new(Cases::PersonName).string().not_null())
                    .col(ColumnDef::new(Cases::Age).integer())
                    .col(ColumnDef::new(Cases::Gender).string())
                    .col(ColumnDef::new(Cases::Description).text())
                    .col(ColumnDef::new(Cases::Clothing).string())
                    .col(ColumnDef::new(Cases::LastSeenLocation).string())
                    .col(ColumnDef::new(Cases::LastSeenAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Cases::LastSeenLatitude).double())
                    .col(ColumnDef::new(Cases::LastSeenLongitude).double())
                    .col(ColumnDef::new(Cases::Photo).string())
                    .col(ColumnDef::new(Cases::InformerName).string())
                    .col(ColumnDef::new(Cases::InformerPhone).string())
                    .col(ColumnDef::new(Cases::InformerRelation).string())
                    .col(
                        ColumnDef::new(Cases::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Cases::CaseNumber).string().unique_key())
                    .col(ColumnDef::new(Cases::VerifiedBy).uuid())
                    .col(ColumnDef::new(Cases::VerifiedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Cases::ResolvedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Cases::CreatedFromSighting).uuid())
                    .col(
                        ColumnDef::new(Cases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Cases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cases::Table, Cases::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cases::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
    UserId,
    PersonName,
    Age,
    Gender,
    Description,
    Clothing,
    LastSeenLocation,
    LastSeenAt,
    LastSeenLatitude,
    LastSeenLongitude,
    Photo,
    InformerName,
    InformerPhone,
    InformerRelation,
    Status,
    CaseNumber,
    VerifiedBy,
    VerifiedAt,
    ResolvedAt,
    CreatedFromSighting,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

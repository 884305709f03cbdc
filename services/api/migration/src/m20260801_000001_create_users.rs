use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Phone).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::District).string())
                    .col(
                        ColumnDef::new(Users::VerificationStatus)
                            .string()
                            .not_null()
                            .default("not_uploaded"),
                    )
                    .col(ColumnDef::new(Users::VerificationDocNumber).string())
                    .col(ColumnDef::new(Users::VerificationDocPhoto).string())
                    .col(ColumnDef::new(Users::HomeLatitude).double())
                    .col(ColumnDef::new(Users::HomeLongitude).double())
                    .col(ColumnDef::new(Users::ProfilePhoto).string())
                    .col(ColumnDef::new(Users::FcmToken).string())
                    .col(
                        ColumnDef::new(Users::IsFlagged)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Phone,
    PasswordHash,
    Role,
    District,
    VerificationStatus,
    VerificationDocNumber,
    VerificationDocPhoto,
    HomeLatitude,
    HomeLongitude,
    ProfilePhoto,
    FcmToken,
    IsFlagged,
    CreatedAt,
    UpdatedAt,
}

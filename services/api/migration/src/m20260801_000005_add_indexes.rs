use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_cases_status")
                    .table(Cases::Table)
                    .col(Cases::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cases_user_id")
                    .table(Cases::Table)
                    .col(Cases::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sightings_case_id")
                    .table(Sightings::Table)
                    .col(Sightings::CaseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sightings_general_status")
                    .table(Sightings::Table)
                    .col(Sightings::IsGeneral)
                    .col(Sightings::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_verification_status")
                    .table(Users::Table)
                    .col(Users::VerificationStatus)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_users_verification_status")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_sightings_general_status")
                    .table(Sightings::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_sightings_case_id")
                    .table(Sightings::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cases_user_id")
                    .table(Cases::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cases_status")
                    .table(Cases::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Cases {
    Table,
    Status,
    UserId,
}

#[derive(Iden)]
enum Sightings {
    Table,
    CaseId,
    IsGeneral,
    Status,
}

#[derive(Iden)]
enum Users {
    Table,
    VerificationStatus,
}

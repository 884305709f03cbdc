use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseSequences::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CaseSequences::District).string().not_null())
                    .col(ColumnDef::new(CaseSequences::Year).integer().not_null())
                    .col(
                        ColumnDef::new(CaseSequences::Month)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CaseSequences::LastSeq)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(CaseSequences::District)
                            .col(CaseSequences::Year)
                            .col(CaseSequences::Month),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaseSequences::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CaseSequences {
    Table,
    District,
    Year,
    Month,
    LastSeq,
}

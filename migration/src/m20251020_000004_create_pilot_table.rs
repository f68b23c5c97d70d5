use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pilot::Table)
                    .if_not_exists()
                    .col(pk_auto(Pilot::Id))
                    .col(string_len_uniq(Pilot::Name, 150))
                    .col(string_len(Pilot::Gender, 2).default("M"))
                    .col(integer(Pilot::RacesCount))
                    .col(
                        timestamp_with_time_zone(Pilot::InsertedTimestamp)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pilot::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Pilot {
    Table,
    Id,
    Name,
    Gender,
    RacesCount,
    InsertedTimestamp,
}

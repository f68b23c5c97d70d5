use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251020_000001_create_user_table::User,
    m20251020_000002_create_drone_category_table::DroneCategory,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drone::Table)
                    .if_not_exists()
                    .col(pk_auto(Drone::Id))
                    .col(string_len_uniq(Drone::Name, 250))
                    .col(integer(Drone::DroneCategoryId))
                    .col(timestamp_with_time_zone(Drone::ManufacturingDate))
                    .col(boolean(Drone::HasItCompeted).default(false))
                    .col(
                        timestamp_with_time_zone(Drone::InsertedTimestamp)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(integer_null(Drone::OwnerId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_drone_drone_category_id")
                            .from(Drone::Table, Drone::DroneCategoryId)
                            .to(DroneCategory::Table, DroneCategory::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_drone_owner_id")
                            .from(Drone::Table, Drone::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Drone::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Drone {
    Table,
    Id,
    Name,
    DroneCategoryId,
    ManufacturingDate,
    HasItCompeted,
    InsertedTimestamp,
    OwnerId,
}

pub use sea_orm_migration::prelude::*;

mod m20251020_000001_create_user_table;
mod m20251020_000002_create_drone_category_table;
mod m20251020_000003_create_drone_table;
mod m20251020_000004_create_pilot_table;
mod m20251020_000005_create_competition_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_create_user_table::Migration),
            Box::new(m20251020_000002_create_drone_category_table::Migration),
            Box::new(m20251020_000003_create_drone_table::Migration),
            Box::new(m20251020_000004_create_pilot_table::Migration),
            Box::new(m20251020_000005_create_competition_table::Migration),
        ]
    }
}

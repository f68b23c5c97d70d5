//! Drone category factory for creating test drone category entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test drone categories.
///
/// # Example
///
/// ```rust,ignore
/// let category = DroneCategoryFactory::new(&db).name("Quadcopter").build().await?;
/// ```
pub struct DroneCategoryFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
}

impl<'a> DroneCategoryFactory<'a> {
    /// Creates a new factory with a unique default name of `"Category {id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Category {}", next_id()),
        }
    }

    /// Sets the category name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds and inserts the drone category entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::drone_category::Model)` - Created category entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::drone_category::Model, DbErr> {
        entity::drone_category::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(self.name),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a drone category with default values.
pub async fn create_category(
    db: &DatabaseConnection,
) -> Result<entity::drone_category::Model, DbErr> {
    DroneCategoryFactory::new(db).build().await
}

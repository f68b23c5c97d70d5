//! Drone factory for creating test drone entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test drones with customizable fields.
///
/// Defaults:
/// - name: `"Drone {id}"`
/// - manufacturing_date: 2017-10-01T00:00:00Z
/// - has_it_competed: `false`
/// - owner: none
///
/// # Example
///
/// ```rust,ignore
/// let drone = DroneFactory::new(&db, category.id)
///     .name("Falcon")
///     .owner(Some(user.id))
///     .build()
///     .await?;
/// ```
pub struct DroneFactory<'a> {
    db: &'a DatabaseConnection,
    entity: entity::drone::Model,
}

impl<'a> DroneFactory<'a> {
    /// Creates a new DroneFactory for a drone in the given category.
    pub fn new(db: &'a DatabaseConnection, drone_category_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            entity: entity::drone::Model {
                id: 0,
                name: format!("Drone {}", id),
                drone_category_id,
                manufacturing_date: Utc.with_ymd_and_hms(2017, 10, 1, 0, 0, 0).unwrap(),
                has_it_competed: false,
                inserted_timestamp: Utc::now(),
                owner_id: None,
            },
        }
    }

    /// Sets the drone name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.entity.name = name.into();
        self
    }

    /// Sets the manufacturing date.
    pub fn manufacturing_date(mut self, date: DateTime<Utc>) -> Self {
        self.entity.manufacturing_date = date;
        self
    }

    /// Sets whether the drone has competed.
    pub fn has_it_competed(mut self, has_it_competed: bool) -> Self {
        self.entity.has_it_competed = has_it_competed;
        self
    }

    /// Sets the owning user, `None` for an unowned drone.
    pub fn owner(mut self, owner_id: Option<i32>) -> Self {
        self.entity.owner_id = owner_id;
        self
    }

    /// Builds and inserts the drone entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::drone::Model)` - Created drone entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::drone::Model, DbErr> {
        entity::drone::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(self.entity.name),
            drone_category_id: ActiveValue::Set(self.entity.drone_category_id),
            manufacturing_date: ActiveValue::Set(self.entity.manufacturing_date),
            has_it_competed: ActiveValue::Set(self.entity.has_it_competed),
            inserted_timestamp: ActiveValue::Set(self.entity.inserted_timestamp),
            owner_id: ActiveValue::Set(self.entity.owner_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a drone with default values in the given category.
///
/// # Arguments
/// - `db` - Database connection
/// - `drone_category_id` - Category the drone belongs to
/// - `owner_id` - Owning user, if any
pub async fn create_drone(
    db: &DatabaseConnection,
    drone_category_id: i32,
    owner_id: Option<i32>,
) -> Result<entity::drone::Model, DbErr> {
    DroneFactory::new(db, drone_category_id)
        .owner(owner_id)
        .build()
        .await
}

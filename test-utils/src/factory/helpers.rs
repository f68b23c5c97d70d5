//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an owned drone with all dependencies.
///
/// Creates a user (the owner), a drone category and a drone in that category
/// owned by the user. All entities use default values.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((owner, category, drone))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_drone_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::drone_category::Model,
        entity::drone::Model,
    ),
    DbErr,
> {
    let owner = crate::factory::user::create_user(db).await?;
    let category = crate::factory::drone_category::create_category(db).await?;
    let drone = crate::factory::drone::create_drone(db, category.id, Some(owner.id)).await?;

    Ok((owner, category, drone))
}

/// Creates a competition with all dependencies.
///
/// Creates an owned drone (see `create_drone_with_dependencies`), a pilot and a
/// competition linking them.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((drone, pilot, competition))` - Tuple of the created drone, pilot and competition
/// - `Err(DbErr)` - Database error during creation
pub async fn create_competition_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::drone::Model,
        entity::pilot::Model,
        entity::competition::Model,
    ),
    DbErr,
> {
    let (_, _, drone) = create_drone_with_dependencies(db).await?;
    let pilot = crate::factory::pilot::create_pilot(db).await?;
    let competition =
        crate::factory::competition::create_competition(db, pilot.id, drone.id).await?;

    Ok((drone, pilot, competition))
}

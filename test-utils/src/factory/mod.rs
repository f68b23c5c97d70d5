//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Every factory generates unique names so multiple entities
//! of the same type can be created in one test without tripping unique constraints.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let category = factory::drone_category::create_category(&db).await?;
//! let drone = factory::drone::create_drone(&db, category.id, Some(user.id)).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let drone = factory::drone::DroneFactory::new(&db, category.id)
//!     .name("Falcon")
//!     .owner(Some(user.id))
//!     .has_it_competed(true)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create users with API tokens
//! - `drone_category` - Create drone categories
//! - `drone` - Create drones
//! - `pilot` - Create pilots
//! - `competition` - Create competitions
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod competition;
pub mod drone;
pub mod drone_category;
pub mod helpers;
pub mod pilot;
pub mod user;

pub use competition::create_competition;
pub use drone::create_drone;
pub use drone_category::create_category;
pub use pilot::create_pilot;
pub use user::create_user;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        category::DroneCategoryRepository, competition::CompetitionRepository,
        drone::DroneRepository,
    },
    error::AppError,
    filter::ListQuery,
    model::drone::{CreateDroneParams, Drone, UpdateDroneParams},
    service::validate,
    util::pagination::PageRequest,
};

const NAME_TAKEN: &str = "drone with this name already exists.";

pub struct DroneService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DroneService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        query: ListQuery<entity::drone::Column>,
        page: PageRequest,
    ) -> Result<(Vec<Drone>, u64), AppError> {
        Ok(DroneRepository::new(self.db).list(query, page).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Drone>, AppError> {
        Ok(DroneRepository::new(self.db).get_by_id(id).await?)
    }

    /// Registers a drone owned by `params.owner_id`.
    ///
    /// The category is resolved by name and the name uniqueness is checked inside the same
    /// transaction as the insert.
    ///
    /// # Returns
    /// - `Ok(Drone)` - Created drone
    /// - `Err(AppError::BadRequest)` - Invalid or duplicate name, or unknown category
    pub async fn create(&self, params: CreateDroneParams) -> Result<Drone, AppError> {
        let name = validate::name("name", params.name, validate::MAX_NAME_LENGTH)?;

        let txn = self.db.begin().await?;
        let repo = DroneRepository::new(&txn);

        let category = DroneCategoryRepository::new(&txn)
            .find_by_name(&params.category_name)
            .await?
            .ok_or_else(|| validate::missing_reference("drone_category", &params.category_name))?;

        if repo.name_exists(&name, None).await? {
            return Err(AppError::BadRequest(NAME_TAKEN.to_string()));
        }

        let drone = repo
            .create(CreateDroneParams { name, ..params }, category.id, Utc::now())
            .await
            .map_err(|e| AppError::from_write(e, NAME_TAKEN))?;

        txn.commit().await?;

        self.get_by_id(drone.id).await?.ok_or_else(|| {
            AppError::InternalError(format!("Drone {} not found after creation", drone.id))
        })
    }

    /// Updates a drone's name, category, manufacturing date or competition flag.
    ///
    /// Ownership is checked by the caller before this runs; the owner itself is never
    /// changed.
    ///
    /// # Returns
    /// - `Ok(Some(Drone))` - Updated drone
    /// - `Ok(None)` - No drone with `params.id`
    /// - `Err(AppError::BadRequest)` - Invalid or duplicate name, or unknown category
    pub async fn update(&self, params: UpdateDroneParams) -> Result<Option<Drone>, AppError> {
        let name = params
            .name
            .map(|name| validate::name("name", name, validate::MAX_NAME_LENGTH))
            .transpose()?;

        let txn = self.db.begin().await?;
        let repo = DroneRepository::new(&txn);

        let drone_category_id = match &params.category_name {
            Some(category_name) => Some(
                DroneCategoryRepository::new(&txn)
                    .find_by_name(category_name)
                    .await?
                    .ok_or_else(|| validate::missing_reference("drone_category", category_name))?
                    .id,
            ),
            None => None,
        };

        if let Some(name) = &name {
            if repo.name_exists(name, Some(params.id)).await? {
                return Err(AppError::BadRequest(NAME_TAKEN.to_string()));
            }
        }

        let id = params.id;
        let updated = repo
            .update(UpdateDroneParams { name, ..params }, drone_category_id)
            .await
            .map_err(|e| AppError::from_write(e, NAME_TAKEN))?;
        if updated.is_none() {
            return Ok(None);
        }

        txn.commit().await?;

        self.get_by_id(id).await
    }

    /// Deletes a drone together with its competitions
    /// Returns false if the drone doesn't exist
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;

        CompetitionRepository::new(&txn)
            .delete_by_drones(vec![id])
            .await?;

        let result = DroneRepository::new(&txn).delete(id).await?;
        if result.rows_affected == 0 {
            return Ok(false);
        }

        txn.commit().await?;

        Ok(true)
    }
}

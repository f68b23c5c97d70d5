use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        category::DroneCategoryRepository, competition::CompetitionRepository,
        drone::DroneRepository,
    },
    error::AppError,
    filter::ListQuery,
    model::category::{CreateDroneCategoryParams, DroneCategory, UpdateDroneCategoryParams},
    service::validate,
    util::pagination::PageRequest,
};

const NAME_TAKEN: &str = "drone category with this name already exists.";

pub struct DroneCategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DroneCategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        query: ListQuery<entity::drone_category::Column>,
        page: PageRequest,
    ) -> Result<(Vec<DroneCategory>, u64), AppError> {
        Ok(DroneCategoryRepository::new(self.db).list(query, page).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<DroneCategory>, AppError> {
        Ok(DroneCategoryRepository::new(self.db).get_by_id(id).await?)
    }

    /// Creates a new drone category
    pub async fn create(
        &self,
        params: CreateDroneCategoryParams,
    ) -> Result<DroneCategory, AppError> {
        let name = validate::name("name", params.name, validate::MAX_NAME_LENGTH)?;

        let txn = self.db.begin().await?;
        let repo = DroneCategoryRepository::new(&txn);

        if repo.name_exists(&name, None).await? {
            return Err(AppError::BadRequest(NAME_TAKEN.to_string()));
        }

        let category = repo
            .create(CreateDroneCategoryParams { name })
            .await
            .map_err(|e| AppError::from_write(e, NAME_TAKEN))?;

        txn.commit().await?;

        self.get_by_id(category.id).await?.ok_or_else(|| {
            AppError::InternalError(format!("Category {} not found after creation", category.id))
        })
    }

    /// Renames a drone category
    /// Returns None if the category doesn't exist
    pub async fn update(
        &self,
        params: UpdateDroneCategoryParams,
    ) -> Result<Option<DroneCategory>, AppError> {
        let name = params
            .name
            .map(|name| validate::name("name", name, validate::MAX_NAME_LENGTH))
            .transpose()?;

        let txn = self.db.begin().await?;
        let repo = DroneCategoryRepository::new(&txn);

        if let Some(name) = &name {
            if repo.name_exists(name, Some(params.id)).await? {
                return Err(AppError::BadRequest(NAME_TAKEN.to_string()));
            }
        }

        let updated = repo
            .update(params.id, name)
            .await
            .map_err(|e| AppError::from_write(e, NAME_TAKEN))?;
        if updated.is_none() {
            return Ok(None);
        }

        txn.commit().await?;

        self.get_by_id(params.id).await
    }

    /// Deletes a category together with its drones and their competitions
    /// Returns false if the category doesn't exist
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;

        let drone_repo = DroneRepository::new(&txn);
        let drone_ids = drone_repo.ids_by_category(id).await?;

        if !drone_ids.is_empty() {
            CompetitionRepository::new(&txn)
                .delete_by_drones(drone_ids.clone())
                .await?;
            drone_repo.delete_many(drone_ids).await?;
        }

        let result = DroneCategoryRepository::new(&txn).delete(id).await?;
        if result.rows_affected == 0 {
            return Ok(false);
        }

        txn.commit().await?;

        Ok(true)
    }
}

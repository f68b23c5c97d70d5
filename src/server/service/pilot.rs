use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{competition::CompetitionRepository, pilot::PilotRepository},
    error::AppError,
    filter::ListQuery,
    model::pilot::{CreatePilotParams, Pilot, UpdatePilotParams},
    service::validate,
    util::pagination::PageRequest,
};

const NAME_TAKEN: &str = "pilot with this name already exists.";

pub struct PilotService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PilotService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        query: ListQuery<entity::pilot::Column>,
        page: PageRequest,
    ) -> Result<(Vec<Pilot>, u64), AppError> {
        Ok(PilotRepository::new(self.db).list(query, page).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Pilot>, AppError> {
        Ok(PilotRepository::new(self.db).get_by_id(id).await?)
    }

    /// Creates a new pilot
    pub async fn create(&self, params: CreatePilotParams) -> Result<Pilot, AppError> {
        let name = validate::name("name", params.name, validate::MAX_PILOT_NAME_LENGTH)?;

        let txn = self.db.begin().await?;
        let repo = PilotRepository::new(&txn);

        if repo.name_exists(&name, None).await? {
            return Err(AppError::BadRequest(NAME_TAKEN.to_string()));
        }

        let pilot = repo
            .create(CreatePilotParams { name, ..params }, Utc::now())
            .await
            .map_err(|e| AppError::from_write(e, NAME_TAKEN))?;

        txn.commit().await?;

        self.get_by_id(pilot.id).await?.ok_or_else(|| {
            AppError::InternalError(format!("Pilot {} not found after creation", pilot.id))
        })
    }

    /// Updates a pilot's name, gender or races count
    /// Returns None if the pilot doesn't exist
    pub async fn update(&self, params: UpdatePilotParams) -> Result<Option<Pilot>, AppError> {
        let name = params
            .name
            .map(|name| validate::name("name", name, validate::MAX_PILOT_NAME_LENGTH))
            .transpose()?;

        let txn = self.db.begin().await?;
        let repo = PilotRepository::new(&txn);

        if let Some(name) = &name {
            if repo.name_exists(name, Some(params.id)).await? {
                return Err(AppError::BadRequest(NAME_TAKEN.to_string()));
            }
        }

        let id = params.id;
        let updated = repo
            .update(UpdatePilotParams { name, ..params })
            .await
            .map_err(|e| AppError::from_write(e, NAME_TAKEN))?;
        if updated.is_none() {
            return Ok(None);
        }

        txn.commit().await?;

        self.get_by_id(id).await
    }

    /// Deletes a pilot together with their competitions
    /// Returns false if the pilot doesn't exist
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;

        CompetitionRepository::new(&txn).delete_by_pilot(id).await?;

        let result = PilotRepository::new(&txn).delete(id).await?;
        if result.rows_affected == 0 {
            return Ok(false);
        }

        txn.commit().await?;

        Ok(true)
    }
}

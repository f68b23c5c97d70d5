use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{competition::CompetitionRepository, drone::DroneRepository, pilot::PilotRepository},
    error::AppError,
    filter::ListQuery,
    model::competition::{Competition, CreateCompetitionParams, UpdateCompetitionParams},
    service::validate,
    util::pagination::PageRequest,
};

pub struct CompetitionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CompetitionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        query: ListQuery<entity::competition::Column>,
        page: PageRequest,
    ) -> Result<(Vec<Competition>, u64), AppError> {
        Ok(CompetitionRepository::new(self.db).list(query, page).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Competition>, AppError> {
        Ok(CompetitionRepository::new(self.db).get_by_id(id).await?)
    }

    /// Records a competition for a pilot and drone referenced by name
    pub async fn create(&self, params: CreateCompetitionParams) -> Result<Competition, AppError> {
        let txn = self.db.begin().await?;

        let pilot_id = resolve_pilot(&txn, &params.pilot_name).await?;
        let drone_id = resolve_drone(&txn, &params.drone_name).await?;

        let competition = CompetitionRepository::new(&txn)
            .create(params, pilot_id, drone_id)
            .await?;

        txn.commit().await?;

        self.get_by_id(competition.id).await?.ok_or_else(|| {
            AppError::InternalError(format!(
                "Competition {} not found after creation",
                competition.id
            ))
        })
    }

    /// Updates a competition
    /// Returns None if the competition doesn't exist
    pub async fn update(
        &self,
        params: UpdateCompetitionParams,
    ) -> Result<Option<Competition>, AppError> {
        let txn = self.db.begin().await?;

        let pilot_id = match &params.pilot_name {
            Some(name) => Some(resolve_pilot(&txn, name).await?),
            None => None,
        };
        let drone_id = match &params.drone_name {
            Some(name) => Some(resolve_drone(&txn, name).await?),
            None => None,
        };

        let id = params.id;
        let updated = CompetitionRepository::new(&txn)
            .update(params, pilot_id, drone_id)
            .await?;
        if updated.is_none() {
            return Ok(None);
        }

        txn.commit().await?;

        self.get_by_id(id).await
    }

    /// Deletes a competition
    /// Returns false if the competition doesn't exist
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = CompetitionRepository::new(self.db).delete(id).await?;

        Ok(result.rows_affected > 0)
    }
}

async fn resolve_pilot<C: ConnectionTrait>(db: &C, name: &str) -> Result<i32, AppError> {
    PilotRepository::new(db)
        .find_by_name(name)
        .await?
        .map(|pilot| pilot.id)
        .ok_or_else(|| validate::missing_reference("pilot", name))
}

async fn resolve_drone<C: ConnectionTrait>(db: &C, name: &str) -> Result<i32, AppError> {
    DroneRepository::new(db)
        .find_by_name(name)
        .await?
        .map(|drone| drone.id)
        .ok_or_else(|| validate::missing_reference("drone", name))
}

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QuerySelect,
};
use std::collections::HashMap;

use crate::server::{
    filter::ListQuery,
    model::competition::{Competition, CreateCompetitionParams, UpdateCompetitionParams},
    util::pagination::PageRequest,
};

pub struct CompetitionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompetitionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets one page of competitions matching `query`, with the total match count.
    pub async fn list(
        &self,
        query: ListQuery<entity::competition::Column>,
        page: PageRequest,
    ) -> Result<(Vec<Competition>, u64), DbErr> {
        let select = query.apply(entity::prelude::Competition::find());

        let total = select.clone().count(self.db).await?;
        let competitions = select
            .offset(page.offset)
            .limit(page.limit)
            .all(self.db)
            .await?;

        Ok((self.to_domain(competitions).await?, total))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Competition>, DbErr> {
        let Some(competition) = entity::prelude::Competition::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.to_domain(vec![competition]).await?.pop())
    }

    /// Inserts a competition for already resolved pilot and drone ids.
    pub async fn create(
        &self,
        params: CreateCompetitionParams,
        pilot_id: i32,
        drone_id: i32,
    ) -> Result<entity::competition::Model, DbErr> {
        entity::competition::ActiveModel {
            pilot_id: ActiveValue::Set(pilot_id),
            drone_id: ActiveValue::Set(drone_id),
            distance_in_feet: ActiveValue::Set(params.distance_in_feet),
            distance_achievement_date: ActiveValue::Set(params.distance_achievement_date),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Applies an update to a competition.
    ///
    /// # Arguments
    /// - `params` - Fields to change
    /// - `pilot_id` - Id of the new pilot, when `params` names one
    /// - `drone_id` - Id of the new drone, when `params` names one
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Updated competition
    /// - `Ok(None)` - No competition with `params.id`
    pub async fn update(
        &self,
        params: UpdateCompetitionParams,
        pilot_id: Option<i32>,
        drone_id: Option<i32>,
    ) -> Result<Option<entity::competition::Model>, DbErr> {
        let Some(competition) = entity::prelude::Competition::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = competition.clone().into_active_model();
        if let Some(distance) = params.distance_in_feet {
            active.distance_in_feet = ActiveValue::Set(distance);
        }
        if let Some(date) = params.distance_achievement_date {
            active.distance_achievement_date = ActiveValue::Set(date);
        }
        if let Some(pilot_id) = pilot_id {
            active.pilot_id = ActiveValue::Set(pilot_id);
        }
        if let Some(drone_id) = drone_id {
            active.drone_id = ActiveValue::Set(drone_id);
        }

        if !active.is_changed() {
            return Ok(Some(competition));
        }

        active.update(self.db).await.map(Some)
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Competition::delete_by_id(id)
            .exec(self.db)
            .await
    }

    /// Deletes every competition flown with one of `drone_ids`
    pub async fn delete_by_drones(&self, drone_ids: Vec<i32>) -> Result<DeleteResult, DbErr> {
        entity::prelude::Competition::delete_many()
            .filter(entity::competition::Column::DroneId.is_in(drone_ids))
            .exec(self.db)
            .await
    }

    /// Deletes every competition of a pilot
    pub async fn delete_by_pilot(&self, pilot_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Competition::delete_many()
            .filter(entity::competition::Column::PilotId.eq(pilot_id))
            .exec(self.db)
            .await
    }

    /// Converts competition entities to domain models, resolving pilot and drone names.
    async fn to_domain(
        &self,
        competitions: Vec<entity::competition::Model>,
    ) -> Result<Vec<Competition>, DbErr> {
        if competitions.is_empty() {
            return Ok(Vec::new());
        }

        let pilot_ids: Vec<i32> = competitions.iter().map(|c| c.pilot_id).collect();
        let drone_ids: Vec<i32> = competitions.iter().map(|c| c.drone_id).collect();

        let pilots_map: HashMap<i32, String> = entity::prelude::Pilot::find()
            .filter(entity::pilot::Column::Id.is_in(pilot_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let drones_map: HashMap<i32, String> = entity::prelude::Drone::find()
            .filter(entity::drone::Column::Id.is_in(drone_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect();

        competitions
            .into_iter()
            .map(|competition| {
                let pilot_name = pilots_map.get(&competition.pilot_id).cloned().ok_or_else(|| {
                    DbErr::RecordNotFound(format!(
                        "Pilot {} of competition {} not found",
                        competition.pilot_id, competition.id
                    ))
                })?;
                let drone_name = drones_map.get(&competition.drone_id).cloned().ok_or_else(|| {
                    DbErr::RecordNotFound(format!(
                        "Drone {} of competition {} not found",
                        competition.drone_id, competition.id
                    ))
                })?;

                Ok(Competition::from_entity(competition, pilot_name, drone_name))
            })
            .collect()
    }
}

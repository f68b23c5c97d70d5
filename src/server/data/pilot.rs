use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::{
    data::drone::DroneRepository,
    filter::ListQuery,
    model::pilot::{CreatePilotParams, Pilot, PilotCompetition, UpdatePilotParams},
    util::pagination::PageRequest,
};

pub struct PilotRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PilotRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets one page of pilots matching `query`, with the total match count.
    pub async fn list(
        &self,
        query: ListQuery<entity::pilot::Column>,
        page: PageRequest,
    ) -> Result<(Vec<Pilot>, u64), DbErr> {
        let select = query.apply(entity::prelude::Pilot::find());

        let total = select.clone().count(self.db).await?;
        let pilots = select
            .offset(page.offset)
            .limit(page.limit)
            .all(self.db)
            .await?;

        Ok((self.to_domain(pilots).await?, total))
    }

    /// Gets a pilot by ID with nested competitions and their drones
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Pilot>, DbErr> {
        let Some(pilot) = entity::prelude::Pilot::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.to_domain(vec![pilot]).await?.pop())
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::pilot::Model>, DbErr> {
        entity::prelude::Pilot::find()
            .filter(entity::pilot::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Checks whether another pilot already uses `name`.
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut select =
            entity::prelude::Pilot::find().filter(entity::pilot::Column::Name.eq(name));

        if let Some(id) = exclude_id {
            select = select.filter(entity::pilot::Column::Id.ne(id));
        }

        Ok(select.count(self.db).await? > 0)
    }

    pub async fn create(
        &self,
        params: CreatePilotParams,
        inserted_timestamp: DateTime<Utc>,
    ) -> Result<entity::pilot::Model, DbErr> {
        entity::pilot::ActiveModel {
            name: ActiveValue::Set(params.name),
            gender: ActiveValue::Set(params.gender.code().to_string()),
            races_count: ActiveValue::Set(params.races_count),
            inserted_timestamp: ActiveValue::Set(inserted_timestamp),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Applies an update to a pilot. The insertion timestamp is never touched.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Updated pilot
    /// - `Ok(None)` - No pilot with `params.id`
    pub async fn update(
        &self,
        params: UpdatePilotParams,
    ) -> Result<Option<entity::pilot::Model>, DbErr> {
        let Some(pilot) = entity::prelude::Pilot::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = pilot.clone().into_active_model();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(gender) = params.gender {
            active.gender = ActiveValue::Set(gender.code().to_string());
        }
        if let Some(races_count) = params.races_count {
            active.races_count = ActiveValue::Set(races_count);
        }

        if !active.is_changed() {
            return Ok(Some(pilot));
        }

        active.update(self.db).await.map(Some)
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Pilot::delete_by_id(id).exec(self.db).await
    }

    /// Converts pilot entities to domain models with their competitions.
    ///
    /// Competitions are loaded in one query, longest distance first, and their drones are
    /// resolved through `DroneRepository::to_domain`.
    async fn to_domain(&self, pilots: Vec<entity::pilot::Model>) -> Result<Vec<Pilot>, DbErr> {
        if pilots.is_empty() {
            return Ok(Vec::new());
        }

        let pilot_ids: Vec<i32> = pilots.iter().map(|p| p.id).collect();

        let competitions = entity::prelude::Competition::find()
            .filter(entity::competition::Column::PilotId.is_in(pilot_ids))
            .order_by_desc(entity::competition::Column::DistanceInFeet)
            .order_by_asc(entity::competition::Column::Id)
            .all(self.db)
            .await?;

        let drone_ids: Vec<i32> = competitions.iter().map(|c| c.drone_id).collect();
        let drones = if drone_ids.is_empty() {
            Vec::new()
        } else {
            entity::prelude::Drone::find()
                .filter(entity::drone::Column::Id.is_in(drone_ids))
                .all(self.db)
                .await?
        };
        let drones_map: HashMap<i32, _> = DroneRepository::new(self.db)
            .to_domain(drones)
            .await?
            .into_iter()
            .map(|drone| (drone.id, drone))
            .collect();

        let mut competitions_map: HashMap<i32, Vec<PilotCompetition>> = HashMap::new();
        for competition in competitions {
            let drone = drones_map.get(&competition.drone_id).cloned().ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "Drone {} of competition {} not found",
                    competition.drone_id, competition.id
                ))
            })?;
            competitions_map
                .entry(competition.pilot_id)
                .or_default()
                .push(PilotCompetition::from_entity(competition, drone));
        }

        pilots
            .into_iter()
            .map(|pilot| {
                let competitions = competitions_map.remove(&pilot.id).unwrap_or_default();
                Pilot::from_entity(pilot, competitions)
            })
            .collect()
    }
}

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QuerySelect,
};
use std::collections::HashMap;

use crate::server::{
    filter::ListQuery,
    model::drone::{CreateDroneParams, Drone, UpdateDroneParams},
    util::pagination::PageRequest,
};

pub struct DroneRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DroneRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets one page of drones matching `query`, with the total match count.
    pub async fn list(
        &self,
        query: ListQuery<entity::drone::Column>,
        page: PageRequest,
    ) -> Result<(Vec<Drone>, u64), DbErr> {
        let select = query.apply(entity::prelude::Drone::find());

        let total = select.clone().count(self.db).await?;
        let drones = select
            .offset(page.offset)
            .limit(page.limit)
            .all(self.db)
            .await?;

        Ok((self.to_domain(drones).await?, total))
    }

    /// Gets a drone by ID with its category name and owner resolved
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Drone>, DbErr> {
        let Some(drone) = entity::prelude::Drone::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.to_domain(vec![drone]).await?.pop())
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::drone::Model>, DbErr> {
        entity::prelude::Drone::find()
            .filter(entity::drone::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Checks whether another drone already uses `name`.
    ///
    /// # Arguments
    /// - `name` - Candidate name
    /// - `exclude_id` - Drone being updated, ignored by the check
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut select =
            entity::prelude::Drone::find().filter(entity::drone::Column::Name.eq(name));

        if let Some(id) = exclude_id {
            select = select.filter(entity::drone::Column::Id.ne(id));
        }

        Ok(select.count(self.db).await? > 0)
    }

    /// Inserts a drone.
    ///
    /// # Arguments
    /// - `params` - Validated creation parameters
    /// - `drone_category_id` - Id of the category named in `params`
    /// - `inserted_timestamp` - Server-side insertion time
    pub async fn create(
        &self,
        params: CreateDroneParams,
        drone_category_id: i32,
        inserted_timestamp: DateTime<Utc>,
    ) -> Result<entity::drone::Model, DbErr> {
        entity::drone::ActiveModel {
            name: ActiveValue::Set(params.name),
            drone_category_id: ActiveValue::Set(drone_category_id),
            manufacturing_date: ActiveValue::Set(params.manufacturing_date),
            has_it_competed: ActiveValue::Set(params.has_it_competed),
            inserted_timestamp: ActiveValue::Set(inserted_timestamp),
            owner_id: ActiveValue::Set(Some(params.owner_id)),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Applies an update to a drone. Owner and insertion timestamp are never touched.
    ///
    /// # Arguments
    /// - `params` - Fields to change
    /// - `drone_category_id` - Id of the new category, when `params` names one
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Updated drone
    /// - `Ok(None)` - No drone with `params.id`
    pub async fn update(
        &self,
        params: UpdateDroneParams,
        drone_category_id: Option<i32>,
    ) -> Result<Option<entity::drone::Model>, DbErr> {
        let Some(drone) = entity::prelude::Drone::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = drone.clone().into_active_model();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(category_id) = drone_category_id {
            active.drone_category_id = ActiveValue::Set(category_id);
        }
        if let Some(date) = params.manufacturing_date {
            active.manufacturing_date = ActiveValue::Set(date);
        }
        if let Some(has_it_competed) = params.has_it_competed {
            active.has_it_competed = ActiveValue::Set(has_it_competed);
        }

        if !active.is_changed() {
            return Ok(Some(drone));
        }

        active.update(self.db).await.map(Some)
    }

    /// Gets the ids of every drone in a category
    pub async fn ids_by_category(&self, drone_category_id: i32) -> Result<Vec<i32>, DbErr> {
        Ok(entity::prelude::Drone::find()
            .filter(entity::drone::Column::DroneCategoryId.eq(drone_category_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|drone| drone.id)
            .collect())
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Drone::delete_by_id(id).exec(self.db).await
    }

    pub async fn delete_many(&self, ids: Vec<i32>) -> Result<DeleteResult, DbErr> {
        entity::prelude::Drone::delete_many()
            .filter(entity::drone::Column::Id.is_in(ids))
            .exec(self.db)
            .await
    }

    /// Converts drone entities to domain models.
    ///
    /// Loads the referenced categories and owners in one query each and preserves the
    /// order of `drones`.
    pub async fn to_domain(&self, drones: Vec<entity::drone::Model>) -> Result<Vec<Drone>, DbErr> {
        if drones.is_empty() {
            return Ok(Vec::new());
        }

        let category_ids: Vec<i32> = drones.iter().map(|d| d.drone_category_id).collect();
        let owner_ids: Vec<i32> = drones.iter().filter_map(|d| d.owner_id).collect();

        let categories_map: HashMap<i32, String> = entity::prelude::DroneCategory::find()
            .filter(entity::drone_category::Column::Id.is_in(category_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let owners_map: HashMap<i32, String> = if !owner_ids.is_empty() {
            entity::prelude::User::find()
                .filter(entity::user::Column::Id.is_in(owner_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|u| (u.id, u.username))
                .collect()
        } else {
            HashMap::new()
        };

        drones
            .into_iter()
            .map(|drone| {
                let category_name = categories_map
                    .get(&drone.drone_category_id)
                    .cloned()
                    .ok_or_else(|| {
                        DbErr::RecordNotFound(format!(
                            "Drone category {} of drone {} not found",
                            drone.drone_category_id, drone.id
                        ))
                    })?;
                let owner_username = drone.owner_id.and_then(|id| owners_map.get(&id).cloned());

                Ok(Drone::from_entity(drone, category_name, owner_username))
            })
            .collect()
    }
}

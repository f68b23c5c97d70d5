use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::{
    filter::ListQuery,
    model::category::{CreateDroneCategoryParams, DroneCategory},
    util::pagination::PageRequest,
};

pub struct DroneCategoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DroneCategoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets one page of categories matching `query`, with the total match count.
    pub async fn list(
        &self,
        query: ListQuery<entity::drone_category::Column>,
        page: PageRequest,
    ) -> Result<(Vec<DroneCategory>, u64), DbErr> {
        let select = query.apply(entity::prelude::DroneCategory::find());

        let total = select.clone().count(self.db).await?;
        let categories = select
            .offset(page.offset)
            .limit(page.limit)
            .all(self.db)
            .await?;

        Ok((self.with_drones(categories).await?, total))
    }

    /// Gets a category by ID with the ids of its drones
    pub async fn get_by_id(&self, id: i32) -> Result<Option<DroneCategory>, DbErr> {
        let Some(category) = entity::prelude::DroneCategory::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.with_drones(vec![category]).await?.pop())
    }

    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<entity::drone_category::Model>, DbErr> {
        entity::prelude::DroneCategory::find()
            .filter(entity::drone_category::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Checks whether another category already uses `name`.
    ///
    /// # Arguments
    /// - `name` - Candidate name
    /// - `exclude_id` - Category being updated, ignored by the check
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut select = entity::prelude::DroneCategory::find()
            .filter(entity::drone_category::Column::Name.eq(name));

        if let Some(id) = exclude_id {
            select = select.filter(entity::drone_category::Column::Id.ne(id));
        }

        Ok(select.count(self.db).await? > 0)
    }

    pub async fn create(
        &self,
        params: CreateDroneCategoryParams,
    ) -> Result<entity::drone_category::Model, DbErr> {
        entity::drone_category::ActiveModel {
            name: ActiveValue::Set(params.name),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Renames a category.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Updated category
    /// - `Ok(None)` - No category with `id`
    pub async fn update(
        &self,
        id: i32,
        name: Option<String>,
    ) -> Result<Option<entity::drone_category::Model>, DbErr> {
        let Some(category) = entity::prelude::DroneCategory::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = category.clone().into_active_model();
        if let Some(name) = name {
            active.name = ActiveValue::Set(name);
        }

        if !active.is_changed() {
            return Ok(Some(category));
        }

        active.update(self.db).await.map(Some)
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::DroneCategory::delete_by_id(id)
            .exec(self.db)
            .await
    }

    /// Attaches drone ids to categories, loading all drones in one query.
    async fn with_drones(
        &self,
        categories: Vec<entity::drone_category::Model>,
    ) -> Result<Vec<DroneCategory>, DbErr> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let category_ids: Vec<i32> = categories.iter().map(|c| c.id).collect();

        let mut drones_map: HashMap<i32, Vec<i32>> = HashMap::new();
        for drone in entity::prelude::Drone::find()
            .filter(entity::drone::Column::DroneCategoryId.is_in(category_ids))
            .order_by_asc(entity::drone::Column::Name)
            .order_by_asc(entity::drone::Column::Id)
            .all(self.db)
            .await?
        {
            drones_map
                .entry(drone.drone_category_id)
                .or_default()
                .push(drone.id);
        }

        Ok(categories
            .into_iter()
            .map(|category| {
                let drone_ids = drones_map.remove(&category.id).unwrap_or_default();
                DroneCategory::from_entity(category, drone_ids)
            })
            .collect())
    }
}

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::collections::HashMap;

use crate::server::{filter::ListQuery, model::user::User, util::pagination::PageRequest};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds the user holding an API token.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Token belongs to this user
    /// - `Ok(None)` - Unknown token
    pub async fn find_by_token(&self, token: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Token.eq(token))
            .one(self.db)
            .await
    }

    /// Gets one page of users matching `query`, with the total match count.
    pub async fn list(
        &self,
        query: ListQuery<entity::user::Column>,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let select = query.apply(entity::prelude::User::find());

        let total = select.clone().count(self.db).await?;
        let users = select
            .offset(page.offset)
            .limit(page.limit)
            .all(self.db)
            .await?;

        Ok((self.with_drones(users).await?, total))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let Some(user) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.with_drones(vec![user]).await?.pop())
    }

    /// Attaches owned drones to users, loading all drones in one query.
    async fn with_drones(&self, users: Vec<entity::user::Model>) -> Result<Vec<User>, DbErr> {
        if users.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i32> = users.iter().map(|u| u.id).collect();

        let mut drones_map: HashMap<i32, Vec<entity::drone::Model>> = HashMap::new();
        for drone in entity::prelude::Drone::find()
            .filter(entity::drone::Column::OwnerId.is_in(user_ids))
            .order_by_asc(entity::drone::Column::Name)
            .order_by_asc(entity::drone::Column::Id)
            .all(self.db)
            .await?
        {
            if let Some(owner_id) = drone.owner_id {
                drones_map.entry(owner_id).or_default().push(drone);
            }
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let drones = drones_map.remove(&user.id).unwrap_or_default();
                User::from_entity(user, drones)
            })
            .collect())
    }
}

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository, error::AppError, filter::ListQuery, model::user::User,
    util::pagination::PageRequest,
};

/// Read-only access to users; accounts are provisioned outside the API.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        query: ListQuery<entity::user::Column>,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), AppError> {
        Ok(UserRepository::new(self.db).list(query, page).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(UserRepository::new(self.db).get_by_id(id).await?)
    }
}

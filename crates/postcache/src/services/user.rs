use std::sync::Arc;

use postcache_core::blog::{
    apply_user_update, validate_new_user, validate_user_id, CreateUserRequest, UpdateUserRequest,
    User,
};
use postcache_core::storage::UserRepository;

use super::error::Result;

/// User CRUD usecases.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<User> {
        let id = validate_user_id(id)?;
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let new_user = request.into_new_user();
        validate_new_user(&new_user)?;
        Ok(self.repo.create(&new_user).await?)
    }

    /// Applies a partial update. The current record is read through the same
    /// repository the write goes to.
    pub async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<User> {
        let id = validate_user_id(id)?;
        let mut user = self.repo.find_by_id(id).await?;
        apply_user_update(&mut user, &update)?;
        Ok(self.repo.update(&user).await?)
    }

    pub async fn delete_user(&self, id: i64) -> Result<()> {
        let id = validate_user_id(id)?;
        Ok(self.repo.delete(id).await?)
    }
}

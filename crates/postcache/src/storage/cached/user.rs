//! Cached user repository.
//!
//! Keys: `user:{id}` and `users:all`. Every successful write deletes both for the
//! affected user.

use async_trait::async_trait;

use postcache_core::blog::{NewUser, User};
use postcache_core::cache::{user_invalidation_keys, user_key, users_all_key, Cache};
use postcache_core::storage::{Result, UserRepository};

use super::CachedRepository;

#[async_trait]
impl<R, C> UserRepository for CachedRepository<R, C>
where
    R: UserRepository + 'static,
    C: Cache + 'static,
{
    async fn find_all(&self) -> Result<Vec<User>> {
        self.aside
            .read_through(users_all_key(), || self.repository.find_all())
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<User> {
        self.aside
            .read_through(user_key(id), || self.repository.find_by_id(id))
            .await
    }

    async fn create(&self, user: &NewUser) -> Result<User> {
        let created = self.repository.create(user).await?;

        self.aside
            .invalidate(&user_invalidation_keys(created.id))
            .await;

        tracing::debug!(user_id = created.id, name = %created.name, "User created");
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<User> {
        let updated = self.repository.update(user).await?;

        self.aside.invalidate(&user_invalidation_keys(user.id)).await;

        tracing::debug!(user_id = user.id, "User updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await?;

        self.aside.invalidate(&user_invalidation_keys(id)).await;

        tracing::debug!(user_id = id, "User deleted");
        Ok(())
    }
}

use std::sync::Arc;

use postcache_core::blog::{validate_user_id, validate_username, UserDetail};
use postcache_core::storage::UserDetailRepository;

use super::error::Result;

/// Aggregated user views. Always served from the data source.
pub struct UserDetailService {
    repo: Arc<dyn UserDetailRepository>,
}

impl UserDetailService {
    pub fn new(repo: Arc<dyn UserDetailRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_user_detail(&self, id: i64) -> Result<UserDetail> {
        let id = validate_user_id(id)?;
        Ok(self.repo.find_detail_by_id(id).await?)
    }

    pub async fn get_user_detail_by_username(&self, username: &str) -> Result<UserDetail> {
        let username = validate_username(username)?;
        Ok(self.repo.find_detail_by_username(username).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use crate::services::ServiceError;
    use crate::test_support::CountingRepository;

    #[tokio::test]
    async fn test_detail_by_id_and_username_agree() {
        let service = UserDetailService::new(Arc::new(CountingRepository::with_demo_data()));

        let by_id = service.get_user_detail(1).await.unwrap();
        let by_name = service.get_user_detail_by_username("alice").await.unwrap();

        assert_eq!(by_id, by_name);
        assert!(by_id.recent_posts.len() <= 5);
    }

    #[tokio::test]
    async fn test_empty_username_is_rejected() {
        let repo = Arc::new(CountingRepository::with_demo_data());
        let service = UserDetailService::new(repo.clone());

        let result = service.get_user_detail_by_username("").await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert_eq!(repo.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_username_is_not_found() {
        let service = UserDetailService::new(Arc::new(CountingRepository::with_demo_data()));

        let result = service.get_user_detail_by_username("mallory").await;

        assert!(matches!(
            result,
            Err(ServiceError::Repository(ref e)) if e.is_not_found()
        ));
    }
}

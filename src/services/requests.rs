//! Item request service

use crate::{
    error::{AppError, AppResult},
    models::{
        self,
        request::{CreateItemRequest, ItemRequestDetails},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create_request(
        &self,
        requestor_id: i64,
        request: CreateItemRequest,
    ) -> AppResult<ItemRequestDetails> {
        self.repository.users.get_by_id(requestor_id).await?;
        let created = self
            .repository
            .requests
            .create(requestor_id, &request.description, models::now())
            .await?;
        tracing::info!("Item request {} created by user {}", created.id, requestor_id);
        Ok(ItemRequestDetails::from(created))
    }

    /// Requestor's own requests, newest first, with the items listed against them
    pub async fn list_own(&self, requestor_id: i64) -> AppResult<Vec<ItemRequestDetails>> {
        self.repository.users.get_by_id(requestor_id).await?;
        let requests = self.repository.requests.list_by_requestor(requestor_id).await?;

        let request_ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        let items = self.repository.items.list_by_request_ids(&request_ids).await?;

        Ok(requests
            .into_iter()
            .map(|request| ItemRequestDetails::with_items(request, &items))
            .collect())
    }

    /// Everyone else's requests, newest first
    pub async fn list_all(&self, user_id: i64) -> AppResult<Vec<ItemRequestDetails>> {
        let requests = self.repository.requests.list_excluding_requestor(user_id).await?;
        Ok(requests.into_iter().map(ItemRequestDetails::from).collect())
    }

    pub async fn get_request(&self, request_id: i64, user_id: i64) -> AppResult<ItemRequestDetails> {
        self.repository.users.get_by_id(user_id).await?;
        let request = self
            .repository
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", request_id)))?;

        let items = self.repository.items.list_by_request_ids(&[request_id]).await?;
        Ok(ItemRequestDetails::with_items(request, &items))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        models::{item::Item, request::ItemRequest, user::User},
        repository::mocks::MockStores,
    };

    fn user(id: i64) -> User {
        User {
            id,
            name: format!("User {}", id),
            email: format!("user{}@example.com", id),
        }
    }

    fn request(id: i64, requestor_id: i64, age_days: i64) -> ItemRequest {
        ItemRequest {
            id,
            description: format!("Request {}", id),
            created: models::now() - Duration::days(age_days),
            requestor_id,
        }
    }

    fn answer(id: i64, request_id: i64) -> Item {
        Item {
            id,
            name: format!("Answer {}", id),
            description: "Here you go".to_string(),
            available: true,
            owner_id: 3,
            request_id: Some(request_id),
        }
    }

    #[tokio::test]
    async fn test_create_request_for_unknown_user_is_not_found() {
        let mut stores = MockStores::default();
        stores
            .users
            .expect_get_by_id()
            .returning(|id| Err(AppError::NotFound(format!("User with id {} not found", id))));
        stores.requests.expect_create().never();

        let service = RequestsService::new(stores.into_repository());
        let result = service
            .create_request(
                9,
                CreateItemRequest {
                    description: "Need a ladder".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_request_has_no_items() {
        let mut stores = MockStores::default();
        stores.users.expect_get_by_id().returning(|id| Ok(user(id)));
        stores
            .requests
            .expect_create()
            .returning(|requestor_id, description, created| {
                Ok(ItemRequest {
                    id: 1,
                    description: description.to_string(),
                    created,
                    requestor_id,
                })
            });

        let service = RequestsService::new(stores.into_repository());
        let created = service
            .create_request(
                1,
                CreateItemRequest {
                    description: "Need a ladder".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(created.description, "Need a ladder");
        assert!(created.items.is_empty());
    }

    #[tokio::test]
    async fn test_list_own_attaches_items_per_request() {
        let mut stores = MockStores::default();
        stores.users.expect_get_by_id().returning(|id| Ok(user(id)));
        stores
            .requests
            .expect_list_by_requestor()
            .with(eq(1))
            .returning(|id| Ok(vec![request(2, id, 0), request(1, id, 3)]));
        stores
            .items
            .expect_list_by_request_ids()
            .returning(|_| Ok(vec![answer(10, 1), answer(11, 2), answer(12, 1)]));

        let service = RequestsService::new(stores.into_repository());
        let requests = service.list_own(1).await.unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].id, 2);
        assert_eq!(requests[0].items.len(), 1);
        let first_ids: Vec<i64> = requests[1].items.iter().map(|i| i.id).collect();
        assert_eq!(first_ids, vec![10, 12]);
    }

    #[tokio::test]
    async fn test_list_all_excludes_caller() {
        let mut stores = MockStores::default();
        stores
            .requests
            .expect_list_excluding_requestor()
            .with(eq(1))
            .returning(|_| Ok(vec![request(5, 2, 0), request(4, 3, 1)]));

        let service = RequestsService::new(stores.into_repository());
        let requests = service.list_all(1).await.unwrap();

        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 4]);
        assert!(requests.iter().all(|r| r.items.is_empty()));
    }

    #[tokio::test]
    async fn test_get_missing_request_is_not_found() {
        let mut stores = MockStores::default();
        stores.users.expect_get_by_id().returning(|id| Ok(user(id)));
        stores.requests.expect_find_by_id().returning(|_| Ok(None));
        stores.items.expect_list_by_request_ids().never();

        let service = RequestsService::new(stores.into_repository());
        let result = service.get_request(8, 1).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_request_with_items() {
        let mut stores = MockStores::default();
        stores.users.expect_get_by_id().returning(|id| Ok(user(id)));
        stores
            .requests
            .expect_find_by_id()
            .with(eq(4))
            .returning(|id| Ok(Some(request(id, 2, 1))));
        stores
            .items
            .expect_list_by_request_ids()
            .returning(|_| Ok(vec![answer(20, 4)]));

        let service = RequestsService::new(stores.into_repository());
        let details = service.get_request(4, 1).await.unwrap();

        assert_eq!(details.id, 4);
        assert_eq!(details.items.len(), 1);
        assert_eq!(details.items[0].id, 20);
    }
}

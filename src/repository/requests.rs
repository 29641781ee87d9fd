//! Item requests repository for database operations

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::request::ItemRequest};

/// Item request persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn create(
        &self,
        requestor_id: i64,
        description: &str,
        created: NaiveDateTime,
    ) -> AppResult<ItemRequest>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<ItemRequest>>;

    /// Requests posted by `requestor_id`, newest first
    async fn list_by_requestor(&self, requestor_id: i64) -> AppResult<Vec<ItemRequest>>;

    /// Requests posted by anyone but `user_id`, newest first
    async fn list_excluding_requestor(&self, user_id: i64) -> AppResult<Vec<ItemRequest>>;
}

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for RequestsRepository {
    async fn create(
        &self,
        requestor_id: i64,
        description: &str,
        created: NaiveDateTime,
    ) -> AppResult<ItemRequest> {
        let request = sqlx::query_as::<_, ItemRequest>(
            r#"
            INSERT INTO requests (description, created, requestor_id)
            VALUES ($1, $2, $3)
            RETURNING id, description, created, requestor_id
            "#,
        )
        .bind(description)
        .bind(created)
        .bind(requestor_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<ItemRequest>> {
        let request = sqlx::query_as::<_, ItemRequest>(
            "SELECT id, description, created, requestor_id FROM requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(request)
    }

    async fn list_by_requestor(&self, requestor_id: i64) -> AppResult<Vec<ItemRequest>> {
        let requests = sqlx::query_as::<_, ItemRequest>(
            r#"
            SELECT id, description, created, requestor_id
            FROM requests
            WHERE requestor_id = $1
            ORDER BY created DESC, id DESC
            "#,
        )
        .bind(requestor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    async fn list_excluding_requestor(&self, user_id: i64) -> AppResult<Vec<ItemRequest>> {
        let requests = sqlx::query_as::<_, ItemRequest>(
            r#"
            SELECT id, description, created, requestor_id
            FROM requests
            WHERE requestor_id != $1
            ORDER BY created DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }
}

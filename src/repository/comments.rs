//! Comments repository for database operations

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::comment::{Comment, CommentDetails},
};

/// Comment persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create(
        &self,
        item_id: i64,
        author_id: i64,
        text: &str,
        created: NaiveDateTime,
    ) -> AppResult<Comment>;

    /// Comments of the given items with author names, oldest first
    async fn list_by_item_ids(&self, item_ids: &[i64]) -> AppResult<Vec<CommentDetails>>;
}

#[derive(Clone)]
pub struct CommentsRepository {
    pool: Pool<Postgres>,
}

impl CommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentsRepository {
    async fn create(
        &self,
        item_id: i64,
        author_id: i64,
        text: &str,
        created: NaiveDateTime,
    ) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (text, item_id, author_id, created)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text, item_id, author_id, created
            "#,
        )
        .bind(text)
        .bind(item_id)
        .bind(author_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn list_by_item_ids(&self, item_ids: &[i64]) -> AppResult<Vec<CommentDetails>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        let comments = sqlx::query_as::<_, CommentDetails>(
            r#"
            SELECT c.id, c.text, c.item_id, u.name AS author_name, c.created
            FROM comments c
            JOIN users u ON c.author_id = u.id
            WHERE c.item_id = ANY($1)
            ORDER BY c.created, c.id
            "#,
        )
        .bind(item_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }
}

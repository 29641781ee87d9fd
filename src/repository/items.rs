//! Items repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::item::{CreateItem, Item},
};

const ITEM_COLUMNS: &str = "id, name, description, available, owner_id, request_id";

/// Item persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Get item by ID
    async fn get_by_id(&self, id: i64) -> AppResult<Item>;

    /// Items of an owner, ordered by id
    async fn list_by_owner(&self, owner_id: i64) -> AppResult<Vec<Item>>;

    /// Available items whose name or description contains `text`, case-insensitive
    async fn search_available(&self, text: &str) -> AppResult<Vec<Item>>;

    /// Items listed in answer to any of the given requests
    async fn list_by_request_ids(&self, request_ids: &[i64]) -> AppResult<Vec<Item>>;

    async fn create(
        &self,
        owner_id: i64,
        item: &CreateItem,
        request_id: Option<i64>,
    ) -> AppResult<Item>;

    /// Persist name, description and availability of an existing item
    async fn update(&self, item: &Item) -> AppResult<Item>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so user text is matched literally
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped.to_lowercase())
}

#[async_trait]
impl ItemStore for ItemsRepository {
    async fn get_by_id(&self, id: i64) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(&format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    async fn list_by_owner(&self, owner_id: i64) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE owner_id = $1 ORDER BY id",
            ITEM_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn search_available(&self, text: &str) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            r#"
            SELECT {} FROM items
            WHERE available
              AND (LOWER(name) LIKE $1 OR LOWER(description) LIKE $1)
            ORDER BY id
            "#,
            ITEM_COLUMNS
        ))
        .bind(like_pattern(text))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn list_by_request_ids(&self, request_ids: &[i64]) -> AppResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE request_id = ANY($1) ORDER BY id",
            ITEM_COLUMNS
        ))
        .bind(request_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn create(
        &self,
        owner_id: i64,
        item: &CreateItem,
        request_id: Option<i64>,
    ) -> AppResult<Item> {
        let created = sqlx::query_as::<_, Item>(&format!(
            r#"
            INSERT INTO items (name, description, available, owner_id, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(owner_id)
        .bind(request_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, item: &Item) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items SET name = $1, description = $2, available = $3
            WHERE id = $4
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(item.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", item.id)))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

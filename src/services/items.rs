//! Item listing, search and comment service

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        self,
        booking::{Booking, BookingShort},
        comment::{CommentDetails, CreateComment},
        item::{CreateItem, Item, ItemDetails, UpdateItem},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create an item for `owner_id`. An unknown request id is dropped.
    pub async fn create_item(&self, owner_id: i64, item: CreateItem) -> AppResult<ItemDetails> {
        self.repository.users.get_by_id(owner_id).await?;

        let request_id = match item.request_id {
            Some(id) => self.repository.requests.find_by_id(id).await?.map(|r| r.id),
            None => None,
        };

        let created = self.repository.items.create(owner_id, &item, request_id).await?;
        tracing::info!("Item {} created by user {}", created.id, owner_id);
        Ok(ItemDetails::from(created))
    }

    /// Partial update, owner only
    pub async fn update_item(&self, id: i64, owner_id: i64, update: UpdateItem) -> AppResult<ItemDetails> {
        self.repository.users.get_by_id(owner_id).await?;
        let mut item = self.repository.items.get_by_id(id).await?;

        if item.owner_id != owner_id {
            return Err(AppError::PermissionDenied(format!(
                "Item {} does not belong to user {}",
                id, owner_id
            )));
        }

        update.apply(&mut item);
        let updated = self.repository.items.update(&item).await?;
        tracing::info!("Item {} updated", id);
        Ok(ItemDetails::from(updated))
    }

    pub async fn delete_item(&self, id: i64) -> AppResult<()> {
        self.repository.items.delete(id).await?;
        tracing::info!("Item {} deleted", id);
        Ok(())
    }

    /// Get item with last/next booking and comments
    pub async fn get_item(&self, id: i64) -> AppResult<ItemDetails> {
        let item = self.repository.items.get_by_id(id).await?;
        let mut details = self.aggregate(vec![item]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::Internal(format!("Item {} lost during aggregation", id)))
    }

    /// Owner's items ordered by id, each with last/next booking and comments
    pub async fn list_owner_items(&self, owner_id: i64) -> AppResult<Vec<ItemDetails>> {
        self.repository.users.get_by_id(owner_id).await?;
        let items = self.repository.items.list_by_owner(owner_id).await?;
        self.aggregate(items).await
    }

    /// Available items matching `text` in name or description. Blank text matches nothing.
    pub async fn search(&self, text: &str) -> AppResult<Vec<ItemDetails>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items = self.repository.items.search_available(text).await?;
        Ok(items.into_iter().map(ItemDetails::from).collect())
    }

    /// Add a comment. The author must have a booking of the item that already ended.
    pub async fn add_comment(
        &self,
        item_id: i64,
        author_id: i64,
        comment: CreateComment,
    ) -> AppResult<CommentDetails> {
        let author = self.repository.users.get_by_id(author_id).await?;
        self.repository.items.get_by_id(item_id).await?;

        let now = models::now();
        let rented = self
            .repository
            .bookings
            .has_finished_booking(author_id, item_id, now)
            .await?;
        if !rented {
            return Err(AppError::Validation(format!(
                "User {} has not rented item {}",
                author_id, item_id
            )));
        }

        let created = self
            .repository
            .comments
            .create(item_id, author_id, &comment.text, now)
            .await?;
        tracing::info!("Comment {} added to item {}", created.id, item_id);
        Ok(CommentDetails::new(created, author.name))
    }

    /// One query per booking category and one for comments, joined by item id
    async fn aggregate(&self, items: Vec<Item>) -> AppResult<Vec<ItemDetails>> {
        let item_ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let now = models::now();

        let mut last = by_item(self.repository.bookings.last_bookings(&item_ids, now).await?);
        let mut next = by_item(self.repository.bookings.next_bookings(&item_ids, now).await?);

        let mut comments: HashMap<i64, Vec<CommentDetails>> = HashMap::new();
        for comment in self.repository.comments.list_by_item_ids(&item_ids).await? {
            comments.entry(comment.item_id).or_default().push(comment);
        }

        Ok(items
            .into_iter()
            .map(|item| {
                let id = item.id;
                ItemDetails::new(
                    item,
                    last.remove(&id),
                    next.remove(&id),
                    comments.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }
}

/// Keeps the first booking seen per item
fn by_item(bookings: Vec<Booking>) -> HashMap<i64, BookingShort> {
    let mut map = HashMap::new();
    for booking in bookings {
        map.entry(booking.item_id).or_insert_with(|| BookingShort::from(booking));
    }
    map
}

//! Item (rentable object) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::{booking::BookingShort, comment::CommentDetails, non_blank};

/// Item model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    /// Item request this item was listed in answer to
    pub request_id: Option<i64>,
}

/// Create item request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// Update item request. Absent or blank fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl UpdateItem {
    /// Apply the present fields on top of an existing item
    pub fn apply(&self, item: &mut Item) {
        if let Some(name) = non_blank(&self.name) {
            item.name = name.to_string();
        }
        if let Some(description) = non_blank(&self.description) {
            item.description = description.to_string();
        }
        if let Some(available) = self.available {
            item.available = available;
        }
    }
}

/// Search query (`GET /items/search?text=`)
#[derive(Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemSearchQuery {
    pub text: Option<String>,
}

/// Item with booking window and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    /// Most recent approved booking that already ended
    pub last_booking: Option<BookingShort>,
    /// Nearest booking that has not started yet
    pub next_booking: Option<BookingShort>,
    pub comments: Vec<CommentDetails>,
}

impl ItemDetails {
    pub fn new(
        item: Item,
        last_booking: Option<BookingShort>,
        next_booking: Option<BookingShort>,
        comments: Vec<CommentDetails>,
    ) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking,
            next_booking,
            comments,
        }
    }
}

impl From<Item> for ItemDetails {
    fn from(item: Item) -> Self {
        ItemDetails::new(item, None, None, Vec::new())
    }
}

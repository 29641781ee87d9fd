//! Item request ("want-ad") model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::item::Item;

/// Item request model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub created: NaiveDateTime,
    pub requestor_id: i64,
}

/// Create item request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    pub description: String,
}

/// Item request with the items listed against it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemRequestDetails {
    pub id: i64,
    pub description: String,
    pub created: NaiveDateTime,
    pub items: Vec<Item>,
}

impl ItemRequestDetails {
    /// Build details keeping only the items that answer this request
    pub fn with_items(request: ItemRequest, items: &[Item]) -> Self {
        let items = items
            .iter()
            .filter(|item| item.request_id == Some(request.id))
            .cloned()
            .collect();

        Self {
            id: request.id,
            description: request.description,
            created: request.created,
            items,
        }
    }
}

impl From<ItemRequest> for ItemRequestDetails {
    fn from(request: ItemRequest) -> Self {
        Self {
            id: request.id,
            description: request.description,
            created: request.created,
            items: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, request_id: Option<i64>) -> Item {
        Item {
            id,
            name: format!("item {}", id),
            description: "desc".to_string(),
            available: true,
            owner_id: 2,
            request_id,
        }
    }

    #[test]
    fn test_with_items_keeps_only_matching() {
        let request = ItemRequest {
            id: 5,
            description: "Need a ladder".to_string(),
            created: crate::models::now(),
            requestor_id: 1,
        };
        let items = vec![item(1, Some(5)), item(2, None), item(3, Some(6)), item(4, Some(5))];

        let details = ItemRequestDetails::with_items(request, &items);
        let ids: Vec<i64> = details.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }
}

//! Item and comment endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        comment::{CommentDetails, CreateComment},
        item::{CreateItem, ItemDetails, ItemSearchQuery, UpdateItem},
    },
    AppState,
};

use super::{AppJson, AppPath, AppQuery, SharerUserId};

/// List the caller's items with their booking window and comments
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user")),
    responses(
        (status = 200, description = "Owner's items ordered by id", body = Vec<ItemDetails>),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_owner_items(
    State(state): State<AppState>,
    SharerUserId(owner_id): SharerUserId,
) -> AppResult<Json<Vec<ItemDetails>>> {
    let items = state.services.items.list_owner_items(owner_id).await?;
    Ok(Json(items))
}

/// Get item by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item with last/next booking and comments", body = ItemDetails),
        (status = 404, description = "Item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<ItemDetails>> {
    let item = state.services.items.get_item(id).await?;
    Ok(Json(item))
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(ItemSearchQuery),
    responses(
        (status = 200, description = "Matching available items", body = Vec<ItemDetails>)
    )
)]
pub async fn search_items(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ItemSearchQuery>,
) -> AppResult<Json<Vec<ItemDetails>>> {
    let text = query.text.unwrap_or_default();
    let items = state.services.items.search(&text).await?;
    Ok(Json(items))
}

/// Create a new item owned by the caller
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user")),
    request_body = CreateItem,
    responses(
        (status = 200, description = "Item created", body = ItemDetails),
        (status = 404, description = "Owner not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    SharerUserId(owner_id): SharerUserId,
    AppJson(item): AppJson<CreateItem>,
) -> AppResult<Json<ItemDetails>> {
    let created = state.services.items.create_item(owner_id, item).await?;
    Ok(Json(created))
}

/// Update an item. Only the owner may update.
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = ItemDetails),
        (status = 400, description = "Caller is not the owner", body = crate::error::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    SharerUserId(owner_id): SharerUserId,
    AppPath(id): AppPath<i64>,
    AppJson(update): AppJson<UpdateItem>,
) -> AppResult<Json<ItemDetails>> {
    let updated = state.services.items.update_item(id, owner_id, update).await?;
    Ok(Json(updated))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item deleted")
    )
)]
pub async fn delete_item(State(state): State<AppState>, AppPath(id): AppPath<i64>) -> AppResult<()> {
    state.services.items.delete_item(id).await
}

/// Comment on an item the caller has rented
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    request_body = CreateComment,
    responses(
        (status = 200, description = "Comment added", body = CommentDetails),
        (status = 400, description = "Caller has no finished booking of the item", body = crate::error::ErrorResponse),
        (status = 404, description = "User or item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    SharerUserId(author_id): SharerUserId,
    AppPath(item_id): AppPath<i64>,
    AppJson(comment): AppJson<CreateComment>,
) -> AppResult<Json<CommentDetails>> {
    let created = state.services.items.add_comment(item_id, author_id, comment).await?;
    Ok(Json(created))
}

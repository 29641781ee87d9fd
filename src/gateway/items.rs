//! Gateway item and comment routes

use axum::{extract::State, http::Method, response::Response};

use super::{
    dto::{ItemPatch, NewComment, NewItem, ValidatedJson},
    GatewayState,
};
use crate::{
    api::{AppJson, AppPath, AppQuery, SharerUserId},
    error::AppResult,
    models::item::ItemSearchQuery,
};

pub async fn list_owner_items(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
) -> AppResult<Response> {
    state.client.get("/items", Some(user_id)).await
}

pub async fn get_item(State(state): State<GatewayState>, AppPath(id): AppPath<i64>) -> AppResult<Response> {
    state.client.get(&format!("/items/{}", id), None).await
}

pub async fn search_items(
    State(state): State<GatewayState>,
    AppQuery(query): AppQuery<ItemSearchQuery>,
) -> AppResult<Response> {
    let request = state
        .client
        .request(Method::GET, "/items/search", None)
        .query(&query);
    state.client.relay(request).await
}

pub async fn create_item(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(item): ValidatedJson<NewItem>,
) -> AppResult<Response> {
    let request = state
        .client
        .request(Method::POST, "/items", Some(user_id))
        .json(&item);
    state.client.relay(request).await
}

pub async fn update_item(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    AppPath(id): AppPath<i64>,
    AppJson(patch): AppJson<ItemPatch>,
) -> AppResult<Response> {
    let request = state
        .client
        .request(Method::PATCH, &format!("/items/{}", id), Some(user_id))
        .json(&patch);
    state.client.relay(request).await
}

pub async fn delete_item(State(state): State<GatewayState>, AppPath(id): AppPath<i64>) -> AppResult<Response> {
    state.client.delete(&format!("/items/{}", id), None).await
}

pub async fn add_comment(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    AppPath(item_id): AppPath<i64>,
    ValidatedJson(comment): ValidatedJson<NewComment>,
) -> AppResult<Response> {
    let request = state
        .client
        .request(Method::POST, &format!("/items/{}/comment", item_id), Some(user_id))
        .json(&comment);
    state.client.relay(request).await
}

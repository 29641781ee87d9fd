//! Gateway item request routes

use axum::{extract::State, http::Method, response::Response};

use super::{
    dto::{NewItemRequest, ValidatedJson},
    GatewayState,
};
use crate::{
    api::{AppPath, SharerUserId},
    error::AppResult,
};

pub async fn create_request(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(request): ValidatedJson<NewItemRequest>,
) -> AppResult<Response> {
    let upstream = state
        .client
        .request(Method::POST, "/requests", Some(user_id))
        .json(&request);
    state.client.relay(upstream).await
}

pub async fn list_own_requests(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
) -> AppResult<Response> {
    state.client.get("/requests", Some(user_id)).await
}

pub async fn list_all_requests(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
) -> AppResult<Response> {
    state.client.get("/requests/all", Some(user_id)).await
}

pub async fn get_request(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    AppPath(id): AppPath<i64>,
) -> AppResult<Response> {
    state.client.get(&format!("/requests/{}", id), Some(user_id)).await
}

//! Gateway user routes

use axum::{extract::State, http::Method, response::Response};

use super::{
    dto::{NewUser, UserPatch, ValidatedJson},
    GatewayState,
};
use crate::{api::AppPath, error::AppResult};

pub async fn list_users(State(state): State<GatewayState>) -> AppResult<Response> {
    state.client.get("/users", None).await
}

pub async fn get_user(State(state): State<GatewayState>, AppPath(id): AppPath<i64>) -> AppResult<Response> {
    state.client.get(&format!("/users/{}", id), None).await
}

pub async fn create_user(
    State(state): State<GatewayState>,
    ValidatedJson(user): ValidatedJson<NewUser>,
) -> AppResult<Response> {
    let request = state.client.request(Method::POST, "/users", None).json(&user);
    state.client.relay(request).await
}

pub async fn update_user(
    State(state): State<GatewayState>,
    AppPath(id): AppPath<i64>,
    ValidatedJson(patch): ValidatedJson<UserPatch>,
) -> AppResult<Response> {
    let request = state
        .client
        .request(Method::PATCH, &format!("/users/{}", id), None)
        .json(&patch);
    state.client.relay(request).await
}

pub async fn delete_user(State(state): State<GatewayState>, AppPath(id): AppPath<i64>) -> AppResult<Response> {
    state.client.delete(&format!("/users/{}", id), None).await
}

//! Item request endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::request::{CreateItemRequest, ItemRequestDetails},
    AppState,
};

use super::{AppJson, AppPath, SharerUserId};

/// Post a request for an item nobody lists yet
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user")),
    request_body = CreateItemRequest,
    responses(
        (status = 200, description = "Request created", body = ItemRequestDetails),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    SharerUserId(requestor_id): SharerUserId,
    AppJson(request): AppJson<CreateItemRequest>,
) -> AppResult<Json<ItemRequestDetails>> {
    let created = state.services.requests.create_request(requestor_id, request).await?;
    Ok(Json(created))
}

/// The caller's own requests with the items listed against them
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user")),
    responses(
        (status = 200, description = "Own requests, newest first", body = Vec<ItemRequestDetails>),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_own_requests(
    State(state): State<AppState>,
    SharerUserId(requestor_id): SharerUserId,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let requests = state.services.requests.list_own(requestor_id).await?;
    Ok(Json(requests))
}

/// Requests posted by other users
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user")),
    responses(
        (status = 200, description = "Other users' requests, newest first", body = Vec<ItemRequestDetails>)
    )
)]
pub async fn list_all_requests(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let requests = state.services.requests.list_all(user_id).await?;
    Ok(Json(requests))
}

/// Get request by ID
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("id" = i64, Path, description = "Request ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Request with its items", body = ItemRequestDetails),
        (status = 404, description = "User or request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_request(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<ItemRequestDetails>> {
    let request = state.services.requests.get_request(id, user_id).await?;
    Ok(Json(request))
}

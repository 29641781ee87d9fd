//! Gateway booking routes

use axum::{extract::State, http::Method, response::Response};

use super::{
    dto::{NewBooking, ValidatedJson},
    GatewayState,
};
use crate::{
    api::{AppPath, AppQuery, SharerUserId},
    error::AppResult,
    models::booking::{ApproveQuery, BookingListQuery},
};

pub async fn create_booking(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(booking): ValidatedJson<NewBooking>,
) -> AppResult<Response> {
    let request = state
        .client
        .request(Method::POST, "/bookings", Some(user_id))
        .json(&booking);
    state.client.relay(request).await
}

pub async fn approve_booking(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    AppPath(id): AppPath<i64>,
    AppQuery(query): AppQuery<ApproveQuery>,
) -> AppResult<Response> {
    let request = state
        .client
        .request(Method::PATCH, &format!("/bookings/{}", id), Some(user_id))
        .query(&query);
    state.client.relay(request).await
}

pub async fn get_booking(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    AppPath(id): AppPath<i64>,
) -> AppResult<Response> {
    state.client.get(&format!("/bookings/{}", id), Some(user_id)).await
}

pub async fn list_booker_bookings(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    AppQuery(query): AppQuery<BookingListQuery>,
) -> AppResult<Response> {
    list(state, "/bookings", user_id, query).await
}

pub async fn list_owner_bookings(
    State(state): State<GatewayState>,
    SharerUserId(user_id): SharerUserId,
    AppQuery(query): AppQuery<BookingListQuery>,
) -> AppResult<Response> {
    list(state, "/bookings/owner", user_id, query).await
}

/// Unknown states stop here; known ones are forwarded in canonical form
async fn list(state: GatewayState, path: &str, user_id: i64, query: BookingListQuery) -> AppResult<Response> {
    let booking_state = query.state()?;
    let request = state
        .client
        .request(Method::GET, path, Some(user_id))
        .query(&[("state", booking_state.as_str())]);
    state.client.relay(request).await
}

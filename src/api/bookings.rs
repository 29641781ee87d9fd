//! Booking endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::booking::{ApproveQuery, BookingDetails, BookingListQuery, CreateBooking},
    AppState,
};

use super::{AppJson, AppPath, AppQuery, SharerUserId};

/// Book an item
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user")),
    request_body = CreateBooking,
    responses(
        (status = 200, description = "Booking created in WAITING", body = BookingDetails),
        (status = 404, description = "User or item not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Item is not available", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    SharerUserId(booker_id): SharerUserId,
    AppJson(booking): AppJson<CreateBooking>,
) -> AppResult<Json<BookingDetails>> {
    let created = state.services.bookings.create_booking(booker_id, booking).await?;
    Ok(Json(created))
}

/// Approve or reject a WAITING booking (item owner only)
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner"),
        ApproveQuery
    ),
    responses(
        (status = 200, description = "Booking decided", body = BookingDetails),
        (status = 400, description = "Caller is not the item owner", body = crate::error::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Booking already decided", body = crate::error::ErrorResponse)
    )
)]
pub async fn approve_booking(
    State(state): State<AppState>,
    SharerUserId(owner_id): SharerUserId,
    AppPath(id): AppPath<i64>,
    AppQuery(query): AppQuery<ApproveQuery>,
) -> AppResult<Json<BookingDetails>> {
    let decided = state
        .services
        .bookings
        .approve_booking(id, owner_id, query.approved)
        .await?;
    Ok(Json(decided))
}

/// Get booking by ID
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "User or booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    SharerUserId(user_id): SharerUserId,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get_booking(id, user_id).await?;
    Ok(Json(booking))
}

/// Bookings made by the caller
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Caller's bookings", body = Vec<BookingDetails>),
        (status = 400, description = "Unknown state", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_booker_bookings(
    State(state): State<AppState>,
    SharerUserId(booker_id): SharerUserId,
    AppQuery(query): AppQuery<BookingListQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state
        .services
        .bookings
        .list_for_booker(booker_id, query.state()?)
        .await?;
    Ok(Json(bookings))
}

/// Bookings of the caller's items
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings of the owner's items", body = Vec<BookingDetails>),
        (status = 400, description = "Unknown state", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_owner_bookings(
    State(state): State<AppState>,
    SharerUserId(owner_id): SharerUserId,
    AppQuery(query): AppQuery<BookingListQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state
        .services
        .bookings
        .list_for_owner(owner_id, query.state()?)
        .await?;
    Ok(Json(bookings))
}

//! API handlers for ShareIt REST endpoints

pub mod bookings;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    routing::{get, post},
    Router,
};

use crate::{error::AppError, AppState};

/// Header carrying the id of the acting user
pub const SHARER_USER_ID: &str = "X-Sharer-User-Id";

/// Extractor for the acting user id from the `X-Sharer-User-Id` header.
/// The id is trusted as sent.
#[derive(Debug, Clone, Copy)]
pub struct SharerUserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SHARER_USER_ID)
            .ok_or_else(|| AppError::Validation(format!("Missing {} header", SHARER_USER_ID)))?;

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(SharerUserId)
            .ok_or_else(|| AppError::Validation(format!("Invalid {} header", SHARER_USER_ID)))
    }
}

/// `Json` whose rejection is rendered as an `AppError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Query` whose rejection is rendered as an `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// `Path` whose rejection is rendered as an `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Create the server router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // Items
        .route("/items", get(items::list_owner_items).post(items::create_item))
        .route("/items/search", get(items::search_items))
        .route(
            "/items/:id",
            get(items::get_item)
                .patch(items::update_item)
                .delete(items::delete_item),
        )
        .route("/items/:id/comment", post(items::add_comment))
        // Bookings
        .route(
            "/bookings",
            get(bookings::list_booker_bookings).post(bookings::create_booking),
        )
        .route("/bookings/owner", get(bookings::list_owner_bookings))
        .route(
            "/bookings/:id",
            get(bookings::get_booking).patch(bookings::approve_booking),
        )
        // Item requests
        .route("/requests", get(requests::list_own_requests).post(requests::create_request))
        .route("/requests/all", get(requests::list_all_requests))
        .route("/requests/:id", get(requests::get_request))
        .with_state(state)
}

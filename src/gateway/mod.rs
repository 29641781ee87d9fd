//! Validating gateway in front of the ShareIt server
//!
//! Every route mirrors a server route. Request shape is checked here, then
//! the request is forwarded and the server's answer relayed unchanged.

pub mod bookings;
pub mod client;
pub mod dto;
pub mod items;
pub mod requests;
pub mod users;

use std::sync::Arc;

use axum::{
    extract::State,
    http::Method,
    routing::{get, post},
    Json, Router,
};

use crate::{api::health::HealthResponse, config::AppConfig, error::AppResult};

pub use client::ShareItClient;

/// Gateway state shared across all handlers
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<AppConfig>,
    pub client: ShareItClient,
}

impl GatewayState {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let client = ShareItClient::new(&config.gateway)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

/// Ready once the server answers its own health check
async fn readiness_check(State(state): State<GatewayState>) -> AppResult<Json<HealthResponse>> {
    state
        .client
        .request(Method::GET, "/health", None)
        .send()
        .await?
        .error_for_status()?;
    Ok(Json(HealthResponse::new("ready")))
}

/// Create the gateway router with all routes
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
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

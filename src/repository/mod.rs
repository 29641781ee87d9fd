//! Repository layer for database operations

pub mod bookings;
pub mod comments;
pub mod items;
pub mod requests;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use bookings::BookingStore;
pub use comments::CommentStore;
pub use items::ItemStore;
pub use requests::RequestStore;
pub use users::UserStore;

/// Store handles shared by all services
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn UserStore>,
    pub items: Arc<dyn ItemStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub comments: Arc<dyn CommentStore>,
    pub requests: Arc<dyn RequestStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(users::UsersRepository::new(pool.clone())),
            items: Arc::new(items::ItemsRepository::new(pool.clone())),
            bookings: Arc::new(bookings::BookingsRepository::new(pool.clone())),
            comments: Arc::new(comments::CommentsRepository::new(pool.clone())),
            requests: Arc::new(requests::RequestsRepository::new(pool)),
        }
    }
}

//! Data models for ShareIt

pub mod booking;
pub mod comment;
pub mod item;
pub mod request;
pub mod user;

use chrono::{Local, NaiveDateTime};

// Re-export commonly used types
pub use booking::{Booking, BookingDetails, BookingShort, BookingState, BookingStatus};
pub use comment::{Comment, CommentDetails};
pub use item::{Item, ItemDetails};
pub use request::{ItemRequest, ItemRequestDetails};
pub use user::User;

/// Current wall-clock time, as used for booking windows and `created` stamps
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Returns the value only when it is present and not blank
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

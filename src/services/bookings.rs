//! Booking lifecycle service

use crate::{
    error::{AppError, AppResult},
    models::{
        self,
        booking::{BookingDetails, BookingState, BookingStatus, CreateBooking},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Book an available item. The booking starts WAITING.
    pub async fn create_booking(&self, booker_id: i64, booking: CreateBooking) -> AppResult<BookingDetails> {
        self.repository.users.get_by_id(booker_id).await?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;

        if !item.available {
            tracing::warn!("User {} tried to book unavailable item {}", booker_id, item.id);
            return Err(AppError::InvalidState(format!("Item {} is not available", item.id)));
        }

        let created = self.repository.bookings.create(booker_id, &booking).await?;
        tracing::info!("Booking {} created for item {} by user {}", created.id, item.id, booker_id);
        Ok(created)
    }

    /// Owner's decision on a WAITING booking
    pub async fn approve_booking(&self, booking_id: i64, owner_id: i64, approved: bool) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_details(booking_id).await?;

        if booking.item.owner_id != owner_id {
            tracing::warn!("User {} is not the owner of booking {}", owner_id, booking_id);
            return Err(AppError::PermissionDenied(format!(
                "User {} is not the owner of item {}",
                owner_id, booking.item.id
            )));
        }

        if booking.status != BookingStatus::Waiting {
            return Err(already_decided(booking_id, booking.status));
        }

        let status = BookingStatus::decided(approved);
        match self.repository.bookings.decide(booking_id, status).await? {
            Some(decided) => {
                tracing::info!("Booking {} {}", booking_id, decided.status);
                Ok(decided)
            }
            // Another decision landed between the read and the update
            None => {
                let current = self.repository.bookings.get_details(booking_id).await?;
                Err(already_decided(booking_id, current.status))
            }
        }
    }

    pub async fn get_booking(&self, booking_id: i64, user_id: i64) -> AppResult<BookingDetails> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.bookings.get_details(booking_id).await
    }

    /// Bookings made by `booker_id`
    pub async fn list_for_booker(&self, booker_id: i64, state: BookingState) -> AppResult<Vec<BookingDetails>> {
        self.repository.users.get_by_id(booker_id).await?;
        self.repository
            .bookings
            .list_by_booker(booker_id, state, models::now())
            .await
    }

    /// Bookings of the items owned by `owner_id`
    pub async fn list_for_owner(&self, owner_id: i64, state: BookingState) -> AppResult<Vec<BookingDetails>> {
        self.repository.users.get_by_id(owner_id).await?;
        self.repository
            .bookings
            .list_by_owner(owner_id, state, models::now())
            .await
    }
}

fn already_decided(booking_id: i64, status: BookingStatus) -> AppError {
    tracing::warn!("Booking {} is already {}", booking_id, status);
    AppError::InvalidState(format!("Booking {} is already {}", booking_id, status))
}

//! Bookings repository for database operations

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::booking::{
        Booking, BookingDetails, BookingDetailsRow, BookingState, BookingStatus, CreateBooking,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.status,
           i.id AS item_id, i.name AS item_name, i.description AS item_description,
           i.available AS item_available, i.owner_id AS item_owner_id,
           i.request_id AS item_request_id,
           u.id AS booker_id, u.name AS booker_name, u.email AS booker_email
    FROM bookings b
    JOIN items i ON b.item_id = i.id
    JOIN users u ON b.booker_id = u.id
"#;

/// Listing filter. `$2` is the state name, `$3` the current time.
const STATE_FILTER: &str = r#"
    (
        $2 = 'ALL'
        OR ($2 = 'CURRENT' AND b.start_date <= $3 AND b.end_date >= $3)
        OR ($2 = 'PAST' AND b.end_date < $3)
        OR ($2 = 'FUTURE' AND b.start_date > $3)
        OR ($2 IN ('WAITING', 'REJECTED') AND b.status = $2)
    )
"#;

/// Booking persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Get booking with its item and booker
    async fn get_details(&self, id: i64) -> AppResult<BookingDetails>;

    /// Insert a WAITING booking
    async fn create(&self, booker_id: i64, booking: &CreateBooking) -> AppResult<BookingDetails>;

    /// Move a WAITING booking to `status`.
    /// Returns `None` when the booking is no longer WAITING.
    async fn decide(&self, id: i64, status: BookingStatus) -> AppResult<Option<BookingDetails>>;

    /// Bookings made by `booker_id`: newest start first, ALL in insertion order
    async fn list_by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingDetails>>;

    /// Bookings of items owned by `owner_id`, newest start first
    async fn list_by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingDetails>>;

    /// Per item, the approved booking that ended most recently before `now`
    async fn last_bookings(&self, item_ids: &[i64], now: NaiveDateTime) -> AppResult<Vec<Booking>>;

    /// Per item, the booking starting soonest after `now`
    async fn next_bookings(&self, item_ids: &[i64], now: NaiveDateTime) -> AppResult<Vec<Booking>>;

    /// Whether `booker_id` has a booking of `item_id` that ended before `now`
    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn fetch_details(&self, id: i64) -> AppResult<Option<BookingDetails>> {
        let row = sqlx::query_as::<_, BookingDetailsRow>(&format!("{} WHERE b.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(BookingDetails::from))
    }
}

#[async_trait]
impl BookingStore for BookingsRepository {
    async fn get_details(&self, id: i64) -> AppResult<BookingDetails> {
        self.fetch_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    async fn create(&self, booker_id: i64, booking: &CreateBooking) -> AppResult<BookingDetails> {
        let booking_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(booking.start)
        .bind(booking.end)
        .bind(booking.item_id)
        .bind(booker_id)
        .bind(BookingStatus::Waiting)
        .fetch_one(&self.pool)
        .await?;

        self.get_details(booking_id).await
    }

    async fn decide(&self, id: i64, status: BookingStatus) -> AppResult<Option<BookingDetails>> {
        // Conditional on WAITING so two concurrent decisions cannot both win
        let updated = sqlx::query("UPDATE bookings SET status = $1 WHERE id = $2 AND status = $3")
            .bind(status)
            .bind(id)
            .bind(BookingStatus::Waiting)
            .execute(&self.pool)
            .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_details(id).await
    }

    async fn list_by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingDetails>> {
        let query = format!(
            r#"
            {}
            WHERE b.booker_id = $1 AND {}
            ORDER BY CASE WHEN $2 = 'ALL' THEN NULL ELSE b.start_date END DESC NULLS LAST, b.id
            "#,
            DETAILS_SELECT, STATE_FILTER
        );

        let rows = sqlx::query_as::<_, BookingDetailsRow>(&query)
            .bind(booker_id)
            .bind(state.as_str())
            .bind(now)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(BookingDetails::from).collect())
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: NaiveDateTime,
    ) -> AppResult<Vec<BookingDetails>> {
        let query = format!(
            r#"
            {}
            WHERE i.owner_id = $1 AND {}
            ORDER BY b.start_date DESC, b.id
            "#,
            DETAILS_SELECT, STATE_FILTER
        );

        let rows = sqlx::query_as::<_, BookingDetailsRow>(&query)
            .bind(owner_id)
            .bind(state.as_str())
            .bind(now)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(BookingDetails::from).collect())
    }

    async fn last_bookings(&self, item_ids: &[i64], now: NaiveDateTime) -> AppResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT DISTINCT ON (item_id) id, start_date, end_date, item_id, booker_id, status
            FROM bookings
            WHERE item_id = ANY($1) AND status = $2 AND end_date < $3
            ORDER BY item_id, end_date DESC
            "#,
        )
        .bind(item_ids)
        .bind(BookingStatus::Approved)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn next_bookings(&self, item_ids: &[i64], now: NaiveDateTime) -> AppResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT DISTINCT ON (item_id) id, start_date, end_date, item_id, booker_id, status
            FROM bookings
            WHERE item_id = ANY($1) AND start_date > $2
            ORDER BY item_id, start_date ASC
            "#,
        )
        .bind(item_ids)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE booker_id = $1 AND item_id = $2 AND end_date < $3)",
        )
        .bind(booker_id)
        .bind(item_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

//! `ArtistStore` — the façade callers use instead of the raw repository functions.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::{
    DbError, DbPool,
    models::{ArtistDetail, ArtistSummary, Booking, NewSchedule, Schedule},
    repository::{artists, bookings, schedules},
};

/// The artist data-access contract.
///
/// Every call is independent: implementations hold no state between calls
/// beyond their connection provider.
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    /// Up to `limit` artist summaries, one per artist, each with one image.
    async fn list_top(&self, limit: i64) -> Result<Vec<ArtistSummary>, DbError>;

    /// Full profile and images, or `None` if the artist has no image rows.
    async fn detail(&self, id: i32) -> Result<Option<ArtistDetail>, DbError>;

    /// Schedule rows with both dates shifted one day forward.
    async fn get_artist_schedule(&self, artist_id: i32) -> Result<Vec<Schedule>, DbError>;

    /// Schedule rows as stored, suitable for writing back.
    async fn get_artist_schedule_to_update(&self, artist_id: i32) -> Result<Vec<Schedule>, DbError>;

    /// Bookings starting exactly on `date`.
    async fn get_artist_booking(&self, artist_id: i32, date: NaiveDate) -> Result<Vec<Booking>, DbError>;

    /// Overwrite the description and replace all images.
    async fn update(&self, artist_id: i32, description: &str, images: &[String]) -> Result<(), DbError>;

    /// Returns the number of schedule rows removed.
    async fn delete_artist_schedule(
        &self,
        artist_id: i32,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> Result<u64, DbError>;

    /// Returns the number of schedule rows inserted.
    async fn add_artist_schedule(&self, schedule: &NewSchedule) -> Result<u64, DbError>;
}

/// Postgres-backed [`ArtistRepository`].
///
/// Cloning is cheap; clones share the injected pool.
#[derive(Debug, Clone)]
pub struct ArtistStore {
    pool: DbPool,
}

impl ArtistStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtistRepository for ArtistStore {
    async fn list_top(&self, limit: i64) -> Result<Vec<ArtistSummary>, DbError> {
        artists::list_top(&self.pool, limit).await
    }

    async fn detail(&self, id: i32) -> Result<Option<ArtistDetail>, DbError> {
        artists::detail(&self.pool, id).await
    }

    async fn get_artist_schedule(&self, artist_id: i32) -> Result<Vec<Schedule>, DbError> {
        schedules::get_artist_schedule(&self.pool, artist_id).await
    }

    async fn get_artist_schedule_to_update(&self, artist_id: i32) -> Result<Vec<Schedule>, DbError> {
        schedules::get_artist_schedule_to_update(&self.pool, artist_id).await
    }

    async fn get_artist_booking(&self, artist_id: i32, date: NaiveDate) -> Result<Vec<Booking>, DbError> {
        bookings::get_artist_booking(&self.pool, artist_id, date).await
    }

    async fn update(&self, artist_id: i32, description: &str, images: &[String]) -> Result<(), DbError> {
        artists::update(&self.pool, artist_id, description, images).await
    }

    async fn delete_artist_schedule(
        &self,
        artist_id: i32,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> Result<u64, DbError> {
        schedules::delete_artist_schedule(&self.pool, artist_id, date, start_time).await
    }

    async fn add_artist_schedule(&self, schedule: &NewSchedule) -> Result<u64, DbError> {
        schedules::add_artist_schedule(&self.pool, schedule).await
    }
}

//! Read-only booking lookups.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use crate::{DbError, models::Booking};

/// Committed bookings of `artist_id` whose start date is exactly `date`.
pub async fn get_artist_booking(
    pool: &PgPool,
    artist_id: i32,
    date: NaiveDate,
) -> Result<Vec<Booking>, DbError> {
    let rows = sqlx::query_as::<_, Booking>(
        r#"
        SELECT start_date, end_date, start_time, end_time
        FROM booking
        WHERE start_date = $1 AND artist_id = $2
        ORDER BY start_time
        "#,
    )
    .bind(date)
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    debug!(artist_id, %date, rows = rows.len(), "fetched artist bookings");
    Ok(rows)
}

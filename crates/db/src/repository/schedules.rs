//! Artist availability (`artist_schedule`) operations.
//!
//! The two writes log their failure before handing it back as
//! `DbError::Schedule`; nothing here retries.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use tracing::{debug, error};

use crate::{
    DbError,
    error::ScheduleAction,
    models::{NewSchedule, Schedule},
};

/// Schedule rows for display: both dates are shifted one day forward.
///
/// Use [`get_artist_schedule_to_update`] for values that will be written
/// back; the two reads disagree by exactly one day on every row.
pub async fn get_artist_schedule(pool: &PgPool, artist_id: i32) -> Result<Vec<Schedule>, DbError> {
    let rows = sqlx::query_as::<_, Schedule>(
        r#"
        SELECT id, artist_id,
               start_date + 1 AS start_date,
               end_date + 1 AS end_date,
               start_time, end_time
        FROM artist_schedule
        WHERE artist_id = $1
        ORDER BY start_date, start_time, id
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    debug!(artist_id, rows = rows.len(), "fetched artist schedule");
    Ok(rows)
}

/// Schedule rows exactly as stored.
pub async fn get_artist_schedule_to_update(
    pool: &PgPool,
    artist_id: i32,
) -> Result<Vec<Schedule>, DbError> {
    let rows = sqlx::query_as::<_, Schedule>(
        r#"
        SELECT id, artist_id, start_date, end_date, start_time, end_time
        FROM artist_schedule
        WHERE artist_id = $1
        ORDER BY start_date, start_time, id
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    debug!(artist_id, rows = rows.len(), "fetched stored artist schedule");
    Ok(rows)
}

/// Insert one availability window. Returns the number of rows inserted.
pub async fn add_artist_schedule(pool: &PgPool, schedule: &NewSchedule) -> Result<u64, DbError> {
    let result = sqlx::query(
        r#"
        INSERT INTO artist_schedule (artist_id, start_date, end_date, start_time, end_time)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(schedule.artist_id)
    .bind(schedule.start_date)
    .bind(schedule.end_date)
    .bind(schedule.start_time)
    .bind(schedule.end_time)
    .execute(pool)
    .await;

    match result {
        Ok(done) => {
            debug!(artist_id = schedule.artist_id, "added artist schedule");
            Ok(done.rows_affected())
        }
        Err(e) => {
            error!(
                artist_id = schedule.artist_id,
                start_date = %schedule.start_date,
                error = %e,
                "error occurred while adding artist schedule"
            );
            Err(DbError::Schedule {
                action: ScheduleAction::Add,
                artist_id: schedule.artist_id,
                source: e,
            })
        }
    }
}

/// Delete the schedule rows matching artist, start date and start time.
///
/// Returns the number of rows removed; `0` when nothing matched.
pub async fn delete_artist_schedule(
    pool: &PgPool,
    artist_id: i32,
    date: NaiveDate,
    start_time: NaiveTime,
) -> Result<u64, DbError> {
    let result = sqlx::query(
        r#"
        DELETE FROM artist_schedule
        WHERE artist_id = $1
          AND start_date = $2
          AND start_time = $3
        "#,
    )
    .bind(artist_id)
    .bind(date)
    .bind(start_time)
    .execute(pool)
    .await;

    match result {
        Ok(done) => {
            debug!(artist_id, %date, removed = done.rows_affected(), "deleted artist schedule");
            Ok(done.rows_affected())
        }
        Err(e) => {
            error!(
                artist_id,
                %date,
                error = %e,
                "error occurred while deleting artist schedule"
            );
            Err(DbError::Schedule {
                action: ScheduleAction::Delete,
                artist_id,
                source: e,
            })
        }
    }
}

//! `artist-store` CLI entry-point.
//!
//! Available sub-commands:
//! - `migrate`         — apply the artist schema migrations.
//! - `top`             — list top artists with one image each.
//! - `detail`          — show one artist with all images.
//! - `schedule`        — show an artist's availability windows.
//! - `bookings`        — show an artist's bookings on one date.
//! - `update`          — replace an artist's description and images.
//! - `add-schedule`    — add an availability window.
//! - `delete-schedule` — remove an availability window.
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use db::{
    models::NewSchedule,
    pool::{self, PoolSettings},
    ArtistRepository, ArtistStore,
};

#[derive(Parser)]
#[command(
    name = "artist-store",
    about = "Query and maintain artist profiles, schedules and bookings",
    version
)]
struct Cli {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = pool::DEFAULT_MAX_CONNECTIONS)]
    max_connections: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending database migrations.
    Migrate,
    #[command(flatten)]
    Op(Operation),
}

#[derive(Subcommand, Debug, PartialEq)]
enum Operation {
    /// List up to `limit` artists with their representative image.
    Top {
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        limit: i64,
    },
    /// Show an artist's profile and every image.
    Detail { id: i32 },
    /// Show an artist's schedule.
    Schedule {
        artist_id: i32,
        /// Print dates as stored instead of shifted for display.
        #[arg(long)]
        raw: bool,
    },
    /// Show an artist's bookings starting on DATE (YYYY-MM-DD).
    Bookings {
        artist_id: i32,
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Overwrite the description and replace all images.
    Update {
        artist_id: i32,
        #[arg(long)]
        description: String,
        /// Image URL; repeat for several. Omitting it clears all images.
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// Add an availability window.
    AddSchedule {
        artist_id: i32,
        #[arg(value_parser = parse_date)]
        start_date: NaiveDate,
        #[arg(value_parser = parse_date)]
        end_date: NaiveDate,
        #[arg(value_parser = parse_time)]
        start_time: NaiveTime,
        #[arg(value_parser = parse_time)]
        end_time: NaiveTime,
    },
    /// Remove the window starting at DATE and START_TIME.
    DeleteSchedule {
        artist_id: i32,
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        #[arg(value_parser = parse_time)]
        start_time: NaiveTime,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| format!("expected HH:MM[:SS]: {e}"))
}

/// Run one store operation and render its result as JSON.
async fn run(op: Operation, repo: &dyn ArtistRepository) -> Result<Value> {
    let out = match op {
        Operation::Top { limit } => {
            let artists = repo.list_top(limit).await.context("failed to list top artists")?;
            serde_json::to_value(artists)?
        }
        Operation::Detail { id } => {
            let artist = repo
                .detail(id)
                .await
                .with_context(|| format!("failed to load artist {id}"))?;
            serde_json::to_value(artist)?
        }
        Operation::Schedule { artist_id, raw } => {
            let result = if raw {
                repo.get_artist_schedule_to_update(artist_id).await
            } else {
                repo.get_artist_schedule(artist_id).await
            };
            let rows = result.with_context(|| format!("failed to load schedule of artist {artist_id}"))?;
            serde_json::to_value(rows)?
        }
        Operation::Bookings { artist_id, date } => {
            let rows = repo
                .get_artist_booking(artist_id, date)
                .await
                .with_context(|| format!("failed to load bookings of artist {artist_id}"))?;
            serde_json::to_value(rows)?
        }
        Operation::Update { artist_id, description, images } => {
            repo.update(artist_id, &description, &images)
                .await
                .with_context(|| format!("failed to update artist {artist_id}"))?;
            json!({ "artist_id": artist_id, "images": images.len() })
        }
        Operation::AddSchedule { artist_id, start_date, end_date, start_time, end_time } => {
            let schedule = NewSchedule { artist_id, start_date, end_date, start_time, end_time };
            let inserted = repo.add_artist_schedule(&schedule).await?;
            json!({ "rows_affected": inserted })
        }
        Operation::DeleteSchedule { artist_id, date, start_time } => {
            let removed = repo.delete_artist_schedule(artist_id, date, start_time).await?;
            json!({ "rows_affected": removed })
        }
    };
    Ok(out)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = PoolSettings::new(cli.database_url).max_connections(cli.max_connections);
    let pool = pool::connect(&settings)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Command::Migrate => {
            pool::run_migrations(&pool).await.context("migration failed")?;
            info!("Migrations applied successfully");
        }
        Command::Op(op) => {
            let store = ArtistStore::new(pool);
            let out = run(op, &store).await?;
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use clap::CommandFactory;
    use db::{
        models::{ArtistDetail, ArtistSummary, Booking, Schedule},
        error::SqlxError,
        DbError,
    };

    use super::*;

    /// Records which operation was called and with what.
    #[derive(Default)]
    struct RecordingRepo {
        calls: Mutex<Vec<String>>,
        added: Mutex<Vec<NewSchedule>>,
    }

    impl RecordingRepo {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn schedule_row(artist_id: i32, day: u32) -> Schedule {
        Schedule {
            id: 1,
            artist_id,
            start_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, day + 2).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }

    #[async_trait]
    impl ArtistRepository for RecordingRepo {
        async fn list_top(&self, limit: i64) -> Result<Vec<ArtistSummary>, DbError> {
            self.record(format!("list_top {limit}"));
            Ok(Vec::new())
        }

        async fn detail(&self, id: i32) -> Result<Option<ArtistDetail>, DbError> {
            self.record(format!("detail {id}"));
            Ok(None)
        }

        async fn get_artist_schedule(&self, artist_id: i32) -> Result<Vec<Schedule>, DbError> {
            self.record(format!("schedule {artist_id}"));
            Ok(vec![schedule_row(artist_id, 11)])
        }

        async fn get_artist_schedule_to_update(&self, artist_id: i32) -> Result<Vec<Schedule>, DbError> {
            self.record(format!("schedule_to_update {artist_id}"));
            Ok(vec![schedule_row(artist_id, 10)])
        }

        async fn get_artist_booking(&self, artist_id: i32, date: NaiveDate) -> Result<Vec<Booking>, DbError> {
            self.record(format!("booking {artist_id} {date}"));
            Ok(Vec::new())
        }

        async fn update(&self, artist_id: i32, description: &str, images: &[String]) -> Result<(), DbError> {
            self.record(format!("update {artist_id} {description} {}", images.join(",")));
            Ok(())
        }

        async fn delete_artist_schedule(
            &self,
            artist_id: i32,
            date: NaiveDate,
            start_time: NaiveTime,
        ) -> Result<u64, DbError> {
            self.record(format!("delete {artist_id} {date} {start_time}"));
            Err(DbError::Schedule {
                action: db::ScheduleAction::Delete,
                artist_id,
                source: SqlxError::PoolClosed,
            })
        }

        async fn add_artist_schedule(&self, schedule: &NewSchedule) -> Result<u64, DbError> {
            self.record(format!("add {}", schedule.artist_id));
            self.added.lock().unwrap().push(schedule.clone());
            Ok(1)
        }
    }

    fn parse_op(args: &[&str]) -> Operation {
        let mut argv = vec!["artist-store", "--database-url", "postgres://localhost/test"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Op(op) => op,
            Command::Migrate => panic!("expected an operation"),
        }
    }

    #[test]
    fn max_connections_defaults_when_not_given() {
        let cmd = Cli::command();
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id() == "max_connections")
            .unwrap();
        let defaults: Vec<String> = arg
            .get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect();

        assert_eq!(defaults, vec![pool::DEFAULT_MAX_CONNECTIONS.to_string()]);
        assert_eq!(arg.get_env().and_then(|e| e.to_str()), Some("DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn max_connections_flag_overrides_default() {
        let cli = Cli::try_parse_from([
            "artist-store",
            "--database-url",
            "postgres://localhost/test",
            "--max-connections",
            "12",
            "migrate",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Migrate));
        assert_eq!(cli.max_connections, 12);
    }

    #[test]
    fn update_collects_repeated_images() {
        let op = parse_op(&["update", "4", "--description", "new bio", "--image", "u1", "--image", "u2"]);
        assert_eq!(
            op,
            Operation::Update {
                artist_id: 4,
                description: "new bio".into(),
                images: vec!["u1".into(), "u2".into()],
            }
        );
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let argv = [
            "artist-store", "--database-url", "postgres://localhost/test",
            "bookings", "1", "01/02/2024",
        ];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn times_accept_optional_seconds() {
        assert_eq!(parse_time("09:00").unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(parse_time("09:00:30").unwrap(), NaiveTime::from_hms_opt(9, 0, 30).unwrap());
        assert!(parse_time("9am").is_err());
    }

    #[tokio::test]
    async fn raw_flag_selects_stored_schedule() {
        let repo = RecordingRepo::default();

        let shifted = run(parse_op(&["schedule", "3"]), &repo).await.unwrap();
        let stored = run(parse_op(&["schedule", "3", "--raw"]), &repo).await.unwrap();

        assert_eq!(repo.calls(), vec!["schedule 3", "schedule_to_update 3"]);
        assert_eq!(shifted[0]["start_date"], "2024-01-11");
        assert_eq!(stored[0]["start_date"], "2024-01-10");
    }

    #[tokio::test]
    async fn add_schedule_forwards_all_five_fields() {
        let repo = RecordingRepo::default();
        let op = parse_op(&["add-schedule", "7", "2024-01-10", "2024-01-12", "09:00", "17:00"]);

        let out = run(op, &repo).await.unwrap();

        assert_eq!(out, json!({ "rows_affected": 1 }));
        let added = repo.added.lock().unwrap();
        assert_eq!(
            added[0],
            NewSchedule {
                artist_id: 7,
                start_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            }
        );
    }

    #[tokio::test]
    async fn missing_artist_renders_as_null() {
        let repo = RecordingRepo::default();
        let out = run(parse_op(&["detail", "99"]), &repo).await.unwrap();
        assert_eq!(out, Value::Null);
    }

    #[tokio::test]
    async fn schedule_failures_reach_the_caller() {
        let repo = RecordingRepo::default();
        let op = parse_op(&["delete-schedule", "5", "2024-01-10", "09:00"]);

        let err = run(op, &repo).await.unwrap_err();

        let db_err = err.downcast_ref::<DbError>().expect("DbError in chain");
        assert!(db_err.is_connectivity());
        assert_eq!(repo.calls(), vec!["delete 5 2024-01-10 09:00:00"]);
    }

    #[tokio::test]
    async fn negative_limit_is_passed_through() {
        let repo = RecordingRepo::default();
        run(parse_op(&["top", "--limit", "-1"]), &repo).await.unwrap();
        assert_eq!(repo.calls(), vec!["list_top -1"]);
    }
}

//! Row and response structs for the artist schema.
//!
//! These are *persistence* shapes — they carry no behaviour beyond the
//! grouping of joined detail rows.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// artist / artist_image
// ---------------------------------------------------------------------------

/// One entry of the top-artists listing, carrying a single representative
/// image (the lexically first one stored for the artist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ArtistSummary {
    pub id: i32,
    pub image: String,
    pub category: Option<String>,
    pub job: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub fullname: String,
    pub dob: Option<NaiveDate>,
    pub phone: Option<String>,
}

/// A single row of the `artist ⨝ artist_image` join used by the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ArtistDetailRow {
    pub id: i32,
    pub fullname: String,
    pub job: Option<String>,
    pub address: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub dob: Option<NaiveDate>,
    pub image: String,
}

/// Full artist profile with every associated image URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub fullname: String,
    pub job: Option<String>,
    pub address: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub dob: Option<NaiveDate>,
    pub images: Vec<String>,
}

impl From<ArtistDetailRow> for ArtistDetail {
    fn from(row: ArtistDetailRow) -> Self {
        Self {
            id: row.id,
            fullname: row.fullname,
            job: row.job,
            address: row.address,
            category: row.category,
            description: row.description,
            phone: row.phone,
            rating: row.rating,
            dob: row.dob,
            images: vec![row.image],
        }
    }
}

/// Collapse joined rows into one `ArtistDetail` per artist id.
///
/// Artists come out in the order their first row was seen; images keep the
/// row order within each artist. Profile fields are taken from the first row.
pub fn group_artist_rows(rows: impl IntoIterator<Item = ArtistDetailRow>) -> Vec<ArtistDetail> {
    let mut grouped: Vec<ArtistDetail> = Vec::new();
    let mut index: HashMap<i32, usize> = HashMap::new();

    for row in rows {
        match index.get(&row.id) {
            Some(&at) => grouped[at].images.push(row.image),
            None => {
                index.insert(row.id, grouped.len());
                grouped.push(row.into());
            }
        }
    }

    grouped
}

// ---------------------------------------------------------------------------
// artist_schedule
// ---------------------------------------------------------------------------

/// An availability window of an artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    pub id: i32,
    pub artist_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Input for inserting a schedule row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub artist_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

// ---------------------------------------------------------------------------
// booking
// ---------------------------------------------------------------------------

/// A committed booking window (read-only projection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

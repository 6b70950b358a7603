//! `db` crate — data-access layer for artists.
//!
//! Provides the `ArtistStore` façade, typed row structs, and repository
//! functions for the `artist`, `artist_image`, `artist_schedule` and
//! `booking` tables. No business logic lives here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;
pub mod store;

pub use pool::{DbPool, PoolSettings};
pub use error::{DbError, ScheduleAction};
pub use store::{ArtistRepository, ArtistStore};

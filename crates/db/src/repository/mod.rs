//! Repository functions — one function per store operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! No business logic, no validation beyond what the schema enforces.

pub mod artists;
pub mod schedules;
pub mod bookings;

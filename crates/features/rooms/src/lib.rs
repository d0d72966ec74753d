//! Rooms feature slice.
//!
//! Exposes the rooms listing route. There is no rooms domain model yet; the
//! route answers with a fixed payload.

mod routes;

pub use crate::routes::router;

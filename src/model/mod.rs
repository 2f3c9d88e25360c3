//! Wire-format data transfer objects shared across the API surface.

pub mod api;
pub mod favorite;
pub mod inquiry;
pub mod listing;
pub mod user;

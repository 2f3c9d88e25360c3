//! Axum request handlers, one module per API surface.

pub mod auth;
pub mod favorite;
pub mod inquiry;
pub mod listing;
pub mod seo;
pub mod util;

//! Data access layer repositories.
//!
//! Repositories provide an abstraction layer over database operations,
//! organized by domain: listings, agent users, inquiries, and favorites.

pub mod favorite;
pub mod inquiry;
pub mod listing;
pub mod user;

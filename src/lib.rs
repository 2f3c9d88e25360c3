//! Prona: server-side API for an Albanian real estate listing portal.
//!
//! Provides property browse/search with filtering and pagination, listing
//! CRUD for agents and admins, visitor inquiries, per-user favorites,
//! session-based authentication, and SEO endpoints (sitemap, robots.txt).

pub mod model;
pub mod server;

//! Server application core modules.
//!
//! This module contains all server-side functionality for the Prona API,
//! including HTTP routing, session-based authentication, the data access
//! layer, the listing search/filter/pagination services, and the short-TTL
//! response cache in front of the hot paginated read path.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;

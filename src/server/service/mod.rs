//! Business-logic services coordinating repositories and response shaping.

pub mod auth;
pub mod listing;

//! Utility helpers shared across server modules.

pub mod cache;

#[cfg(test)]
pub mod test;

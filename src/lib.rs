//! Ranks off-campus rental listings by a weighted score over price, lease
//! flexibility, commute and unit type.

pub mod commands;
pub mod commute;
pub mod config;
pub mod error;
pub mod geocode;
pub mod listing;
pub mod output;
pub mod scoring;
pub mod store;
pub mod units;
pub mod validation;

#[cfg(test)]
mod testing;

pub use error::{Error, ErrorKind, Result};

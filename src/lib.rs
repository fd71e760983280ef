//! `equilibrium`: a personal finance dashboard over a hosted transactions table.
//!
//! Transactions are fetched from a PostgREST endpoint, aggregated by the pure functions in
//! [`ledger`] and rendered with the locale-aware helpers in [`format`].

mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod format;
pub mod ledger;
pub mod model;
mod utils;

#[cfg(test)]
mod test;

pub use api::Mode;
pub use config::Config;
pub use error::Error;
pub use error::Result;

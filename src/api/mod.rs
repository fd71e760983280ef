//! The external collaborators: the hosted transactions store and the exchange-rate service.
//!
//! Each is hidden behind a small trait so that the rest of the program does not care whether
//! data comes over HTTP or from the seeded in-memory implementations.

mod rates;
mod store;
mod test_client;

use crate::model::{ExchangeRate, Transaction, User};
use crate::{Config, Result};
use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub(crate) use rates::Bluelytics;
pub(crate) use store::PostgrestStore;
pub(crate) use test_client::{TestRates, TestStore};

/// Environment variable which, when set and non-empty, swaps the HTTP clients for in-memory data.
pub const TEST_MODE_ENV: &str = "EQUILIBRIUM_IN_TEST_MODE";

/// The remote table of transactions and users.
#[async_trait::async_trait]
pub(crate) trait Store: Send + Sync {
    /// Every transaction in the table, newest first.
    async fn transactions(&self) -> Result<Vec<Transaction>>;

    async fn users(&self) -> Result<Vec<User>>;
}

/// The exchange-rate reference service.
#[async_trait::async_trait]
pub(crate) trait Rates: Send + Sync {
    async fn latest(&self) -> Result<ExchangeRate>;
}

/// Selects which implementations of `Store` and `Rates` are used.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// Talk to the configured HTTP endpoints.
    #[default]
    Remote,
    /// Use seeded in-memory data.
    Test,
}

impl Mode {
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Remote,
        }
    }
}

pub(crate) async fn store(config: &Config, mode: Mode) -> Result<Box<dyn Store>> {
    match mode {
        Mode::Remote => {
            let key = config.anon_key().await?;
            Ok(Box::new(PostgrestStore::new(config, key)?))
        }
        Mode::Test => Ok(Box::new(TestStore::default())),
    }
}

pub(crate) fn rates(config: &Config, mode: Mode) -> Result<Box<dyn Rates>> {
    match mode {
        Mode::Remote => Ok(Box::new(Bluelytics::new(config.rates_url().clone())?)),
        Mode::Test => Ok(Box::new(TestRates::default())),
    }
}

/// Decodes a JSON array of rows. A body that is not an array is an error; individual rows that do
/// not decode into `T` are skipped with a warning so one bad record does not hide the rest.
pub(crate) fn decode_rows<T>(body: &str, what: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let rows: Vec<serde_json::Value> = serde_json::from_str(body)
        .with_context(|| format!("The {what} response is not a JSON array"))?;
    let total = rows.len();
    let decoded: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(ix, row)| match serde_json::from_value(row) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping {what} row {ix}: {e}");
                None
            }
        })
        .collect();
    debug!("Decoded {} of {total} {what} rows", decoded.len());
    Ok(decoded)
}

//! Implements `Store` and `Rates` with in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without network access.

use crate::api::{decode_rows, Rates, Store};
use crate::model::{ExchangeRate, Transaction, User};
use crate::Result;
use anyhow::bail;

/// An implementation of `Store` that holds its rows in memory. `None` makes every fetch fail.
pub(crate) struct TestStore {
    transactions: Option<Vec<Transaction>>,
    users: Option<Vec<User>>,
}

impl TestStore {
    pub(crate) fn new(transactions: Vec<Transaction>, users: Vec<User>) -> Self {
        Self {
            transactions: Some(transactions),
            users: Some(users),
        }
    }

    /// A store whose every request fails, as an unreachable host would.
    pub(crate) fn failing() -> Self {
        Self {
            transactions: None,
            users: None,
        }
    }
}

impl Default for TestStore {
    /// Loads seed data from this module.
    fn default() -> Self {
        // The seed constants are valid JSON; a failure here is a bug in this file.
        let transactions = decode_rows(TRANSACTION_DATA, "transactions").unwrap_or_default();
        let users = decode_rows(USER_DATA, "users").unwrap_or_default();
        Self::new(transactions, users)
    }
}

#[async_trait::async_trait]
impl Store for TestStore {
    async fn transactions(&self) -> Result<Vec<Transaction>> {
        match &self.transactions {
            Some(rows) => Ok(rows.clone()),
            None => bail!("Connection refused while fetching transactions"),
        }
    }

    async fn users(&self) -> Result<Vec<User>> {
        match &self.users {
            Some(rows) => Ok(rows.clone()),
            None => bail!("Connection refused while fetching users"),
        }
    }
}

/// An implementation of `Rates` that returns a fixed rate, or fails when it has none.
pub(crate) struct TestRates {
    rate: Option<ExchangeRate>,
}

impl TestRates {
    pub(crate) fn new(rate: Option<ExchangeRate>) -> Self {
        Self { rate }
    }
}

impl Default for TestRates {
    fn default() -> Self {
        Self::new(Some(ExchangeRate {
            value_avg: 1225.0,
            value_sell: 1240.0,
            value_buy: 1210.0,
        }))
    }
}

#[async_trait::async_trait]
impl Rates for TestRates {
    async fn latest(&self) -> Result<ExchangeRate> {
        match self.rate {
            Some(rate) => Ok(rate),
            None => bail!("Connection refused while fetching the exchange rate"),
        }
    }
}

/// Seed transaction data, newest first as the store orders it.
const TRANSACTION_DATA: &str = r##"[
  {"transaccion_id": 8, "usuario_id": 1, "nombre": "Sueldo", "motivo": "Marzo",
   "fecha": "2025-03-31T12:00:00+00:00", "tipo_movimiento": "ingreso",
   "tipo_category": "trabajo", "monto": 850000},
  {"transaccion_id": 7, "usuario_id": 1, "nombre": "Notebook", "motivo": null,
   "fecha": "2025-03-28T16:20:00+00:00", "tipo_movimiento": "egreso",
   "tipo_category": "tecnologia", "monto": 420000},
  {"transaccion_id": 6, "usuario_id": 1, "nombre": null, "motivo": "Consulta",
   "fecha": "2025-03-20T09:00:00+00:00", "tipo_movimiento": "egreso",
   "tipo_category": "salud", "monto": 15000.5},
  {"transaccion_id": 5, "usuario_id": 1, "nombre": "Supermercado", "motivo": "Compra semanal",
   "fecha": "2025-03-15T18:45:00+00:00", "tipo_movimiento": "egreso",
   "tipo_category": "alimentos", "monto": 62340.75},
  {"transaccion_id": 4, "usuario_id": 1, "nombre": "Reintegro", "motivo": null,
   "fecha": "2025-03-12T10:00:00+00:00", "tipo_movimiento": "ingreso",
   "tipo_category": "alimentos", "monto": 3500},
  {"transaccion_id": 3, "usuario_id": 1, "nombre": "Alquiler", "motivo": "Marzo",
   "fecha": "2025-03-05T08:00:00+00:00", "tipo_movimiento": "egreso",
   "tipo_category": "inmueble", "monto": 300000},
  {"transaccion_id": 2, "usuario_id": 1, "nombre": "Freelance", "motivo": "Sitio web",
   "fecha": "2025-03-03T15:30:00+00:00", "tipo_movimiento": "ingreso",
   "tipo_category": "trabajo", "monto": 120000},
  {"transaccion_id": 1, "usuario_id": 1, "nombre": "Cine", "motivo": null,
   "fecha": "2025-03-01T21:00:00+00:00", "tipo_movimiento": "egreso",
   "tipo_category": "entretenimiento", "monto": 8000}
]"##;

/// Seed user data.
const USER_DATA: &str = r##"[
  {"id": 1, "user": "ana", "correo": "ana@example.com"},
  {"id": 2, "user": "bruno", "correo": "bruno@example.com"}
]"##;

use crate::model::{Amount, Category, Direction};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Represents a single row of the transactions table. Field names on the wire are those of the
/// table's columns.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "transaccion_id")]
    id: i64,
    #[serde(rename = "usuario_id")]
    owner_id: i64,
    #[serde(rename = "nombre", default)]
    name: Option<String>,
    #[serde(rename = "motivo", default)]
    memo: Option<String>,
    #[serde(rename = "fecha", deserialize_with = "deserialize_timestamp")]
    date: DateTime<FixedOffset>,
    #[serde(rename = "tipo_movimiento")]
    direction: Direction,
    #[serde(rename = "tipo_category")]
    category: Category,
    #[serde(rename = "monto")]
    amount: Amount,
}

impl Transaction {
    pub fn new(
        id: i64,
        date: DateTime<FixedOffset>,
        direction: Direction,
        category: Category,
        amount: Amount,
    ) -> Self {
        Self {
            id,
            owner_id: 0,
            name: None,
            memo: None,
            date,
            direction,
            category,
            amount,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The amount with the sign implied by `direction`: negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        self.direction.signed(self.amount.value())
    }
}

/// Parses `s` as an ISO-8601 timestamp. Offsets are honored when present; naive date-times and
/// bare dates are taken to be UTC.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("Invalid ISO-8601 timestamp '{s}'")))
}

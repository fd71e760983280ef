use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a transaction brought money in or took it out. Serialized with the values of the
/// `tipo_movimiento` column.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "ingreso")]
    Income,
    #[serde(rename = "egreso")]
    Expense,
}

serde_plain::derive_display_from_serialize!(Direction);
serde_plain::derive_fromstr_from_deserialize!(Direction);

impl Direction {
    /// Applies the direction's sign to a non-negative magnitude.
    pub fn signed(&self, magnitude: Decimal) -> Decimal {
        match self {
            Direction::Income => magnitude,
            Direction::Expense => -magnitude,
        }
    }
}

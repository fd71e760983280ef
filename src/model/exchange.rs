use serde::{Deserialize, Serialize};

/// Reference rates for one currency pair as published by the exchange-rate service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub value_avg: f64,
    pub value_sell: f64,
    pub value_buy: f64,
}

/// The part of the service's response we care about. Other members, e.g. `oficial`, are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LatestRates {
    pub(crate) blue: ExchangeRate,
}

//! Types that represent the core data model, such as `Transaction` and `Category`.
mod amount;
mod category;
mod direction;
mod exchange;
mod transaction;
mod user;

pub use amount::{Amount, AmountError};
pub use category::Category;
pub use direction::Direction;
pub use exchange::ExchangeRate;
pub(crate) use exchange::LatestRates;
#[cfg(test)]
pub(crate) use transaction::parse_timestamp;
pub use transaction::Transaction;
pub use user::User;

/// An immutable point-in-time view of the data the dashboard renders. It is built once per
/// command from the external collaborators and handed to the ledger functions explicitly.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Snapshot {
    transactions: Vec<Transaction>,
    rate: Option<ExchangeRate>,
}

impl Snapshot {
    pub fn new(transactions: Vec<Transaction>, rate: Option<ExchangeRate>) -> Self {
        Self { transactions, rate }
    }

    /// Transactions in the order the store returned them (newest first).
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// `None` when the exchange-rate service could not be reached.
    pub fn rate(&self) -> Option<&ExchangeRate> {
        self.rate.as_ref()
    }
}

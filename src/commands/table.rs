//! The transactions table: every transaction with its direction marks and signed amount, followed
//! by the final balance.

use crate::api::{self, Mode, Rates, Store};
use crate::commands::{markdown_table, snapshot, Out};
use crate::format::{format_money, row_amount, short_date, Locale};
use crate::ledger::{compute_balance, view, ViewOptions};
use crate::model::{Direction, Snapshot};
use crate::{Config, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MARK: &str = "✔";
const NO_MARK: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
    /// Balance of the whole snapshot, regardless of the filters applied to `rows`.
    pub balance: Decimal,
    pub balance_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub date: String,
    pub income: String,
    pub expense: String,
    pub amount: String,
}

impl Table {
    pub fn new(snapshot: &Snapshot, options: &ViewOptions, locale: Locale) -> Self {
        let rows = view(snapshot.transactions(), options)
            .into_iter()
            .map(|t| {
                let (income, expense) = match t.direction() {
                    Direction::Income => (MARK, NO_MARK),
                    Direction::Expense => (NO_MARK, MARK),
                };
                TableRow {
                    id: t.id(),
                    name: t.name().unwrap_or("-").to_string(),
                    category: t.category().to_string(),
                    date: short_date(t.date(), locale),
                    income: income.to_string(),
                    expense: expense.to_string(),
                    amount: row_amount(t.signed_amount()),
                }
            })
            .collect();
        let balance = compute_balance(snapshot.transactions());
        Self {
            rows,
            balance,
            balance_text: format_money(balance, locale),
        }
    }

    pub fn render(&self) -> String {
        let rows: Vec<Vec<&str>> = self
            .rows
            .iter()
            .map(|r| {
                vec![
                    &*r.name,
                    &*r.category,
                    &*r.date,
                    &*r.income,
                    &*r.expense,
                    &*r.amount,
                ]
            })
            .collect();
        format!(
            "{}\n\nFinal balance: {}",
            markdown_table(
                &["Name", "Category", "Date", "Income", "Expense", "Amount"],
                &rows
            ),
            self.balance_text
        )
    }
}

/// Fetches a snapshot and renders the transactions selected by `options`.
pub async fn table(config: Config, mode: Mode, options: ViewOptions) -> Result<Out<Table>> {
    let store = api::store(&config, mode).await?;
    let rates = api::rates(&config, mode)?;
    Ok(build(store.as_ref(), rates.as_ref(), &options, config.locale()).await)
}

async fn build(
    store: &dyn Store,
    rates: &dyn Rates,
    options: &ViewOptions,
    locale: Locale,
) -> Out<Table> {
    let snapshot = snapshot(store, rates).await;
    let table = Table::new(&snapshot, options, locale);
    Out::new(table.render(), table)
}

//! The dashboard: balance card, exchange-rate card, per-category chart and the latest
//! transactions.

use crate::api::{self, Mode, Rates, Store};
use crate::commands::{markdown_table, snapshot, Out};
use crate::format::{format_currency, row_amount, short_date, Locale};
use crate::ledger::{chart_series, compute_balance, compute_category_totals, ChartSeries};
use crate::model::{ExchangeRate, Snapshot};
use crate::{Config, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How many of the newest transactions the dashboard lists.
const RECENT_ROWS: usize = 4;

/// Shown in place of the exchange rate when it could not be fetched.
const RATE_PLACEHOLDER: &str = "Loading...";

/// Everything the dashboard shows, already formatted where the display contract requires it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub locale: Locale,
    pub balance: Decimal,
    pub balance_text: String,
    pub rate: Option<ExchangeRate>,
    pub chart: ChartSeries,
    pub recent: Vec<RecentRow>,
}

/// One line of the dashboard's recent-transactions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub date: String,
    pub memo: String,
    pub amount: String,
}

impl Dashboard {
    pub fn new(snapshot: &Snapshot, locale: Locale) -> Self {
        let transactions = snapshot.transactions();
        let balance = compute_balance(transactions);
        let recent = transactions
            .iter()
            .take(RECENT_ROWS)
            .map(|t| RecentRow {
                id: t.id(),
                name: t.name().unwrap_or("-").to_string(),
                category: t.category().to_string(),
                date: short_date(t.date(), locale),
                memo: t.memo().unwrap_or("-").to_string(),
                amount: row_amount(t.signed_amount()),
            })
            .collect();
        Self {
            locale,
            balance,
            balance_text: format!("${}", format_currency(balance, locale)),
            rate: snapshot.rate().copied(),
            chart: chart_series(&compute_category_totals(transactions)),
            recent,
        }
    }

    pub fn render(&self) -> String {
        let mut sections = vec![format!("BALANCE: {}", self.balance_text)];

        sections.push(match &self.rate {
            Some(rate) => format!(
                "DOLAR BLUE: ${}  (buy ${}, sell ${})",
                rate.value_avg, rate.value_buy, rate.value_sell
            ),
            None => format!("DOLAR BLUE: {RATE_PLACEHOLDER}"),
        });

        let chart_rows: Vec<Vec<String>> = self
            .chart
            .labels
            .iter()
            .zip(self.chart.income.iter().zip(&self.chart.expense))
            .map(|(label, (income, expense))| {
                vec![
                    label.clone(),
                    money_from_f64(*income, self.locale),
                    money_from_f64(*expense, self.locale),
                ]
            })
            .collect();
        sections.push(format!(
            "Income and expenses by category\n{}",
            markdown_table(&["Category", "Income", "Expense"], &chart_rows)
        ));

        let recent_rows: Vec<Vec<&str>> = self
            .recent
            .iter()
            .map(|r| vec![&*r.name, &*r.category, &*r.date, &*r.memo, &*r.amount])
            .collect();
        sections.push(format!(
            "Latest transactions\n{}",
            markdown_table(
                &["Name", "Category", "Date", "Memo", "Amount"],
                &recent_rows
            )
        ));

        sections.join("\n\n")
    }
}

fn money_from_f64(value: f64, locale: Locale) -> String {
    format_currency(Decimal::try_from(value).unwrap_or_default(), locale)
}

/// Fetches a snapshot and builds the dashboard from it.
pub async fn dashboard(config: Config, mode: Mode) -> Result<Out<Dashboard>> {
    let store = api::store(&config, mode).await?;
    let rates = api::rates(&config, mode)?;
    Ok(build(store.as_ref(), rates.as_ref(), config.locale()).await)
}

async fn build(store: &dyn Store, rates: &dyn Rates, locale: Locale) -> Out<Dashboard> {
    let snapshot = snapshot(store, rates).await;
    let dashboard = Dashboard::new(&snapshot, locale);
    Out::new(dashboard.render(), dashboard)
}

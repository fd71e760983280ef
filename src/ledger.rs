//! Aggregation of a transaction snapshot into the figures the dashboard shows.
//!
//! Everything here is a pure function of its input: no I/O, no retained state, and calling a
//! function twice on the same slice gives the same answer.

use crate::model::{Category, Direction, Transaction};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Income and expense sums for one category. Both are non-negative.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

/// Per-category totals, in the order categories first appear among income records followed by
/// those that first appear among expense records. Only categories present in the input are
/// listed.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals(Vec<(Category, Totals)>);

impl CategoryTotals {
    pub fn get(&self, category: Category) -> Option<&Totals> {
        self.0
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, totals)| totals)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().map(|(c, _)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &Totals)> + '_ {
        self.0.iter().map(|(c, t)| (*c, t))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Adds every transaction's amount to the income or expense sum of its category.
pub fn compute_category_totals(transactions: &[Transaction]) -> CategoryTotals {
    let mut sums: HashMap<Category, Totals> = HashMap::new();
    let mut income_order = Vec::new();
    let mut expense_order = Vec::new();

    for t in transactions {
        let totals = sums.entry(t.category()).or_default();
        let amount = t.amount().value();
        match t.direction() {
            Direction::Income => {
                totals.income += amount;
                if !income_order.contains(&t.category()) {
                    income_order.push(t.category());
                }
            }
            Direction::Expense => {
                totals.expense += amount;
                if !expense_order.contains(&t.category()) {
                    expense_order.push(t.category());
                }
            }
        }
    }

    let mut order = income_order;
    for category in expense_order {
        if !order.contains(&category) {
            order.push(category);
        }
    }

    CategoryTotals(
        order
            .into_iter()
            .map(|c| (c, sums.get(&c).copied().unwrap_or_default()))
            .collect(),
    )
}

/// The net signed sum of the snapshot: income adds, expense subtracts. Empty input yields zero.
pub fn compute_balance(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .fold(Decimal::ZERO, |total, t| total + t.signed_amount())
}

/// Bar chart input: one label per category with the income and expense sums aligned to it.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub income: Vec<f64>,
    pub expense: Vec<f64>,
}

pub fn chart_series(totals: &CategoryTotals) -> ChartSeries {
    let mut series = ChartSeries::default();
    for (category, t) in totals.iter() {
        series.labels.push(category.to_string());
        series.income.push(t.income.to_f64().unwrap_or_default());
        series.expense.push(t.expense.to_f64().unwrap_or_default());
    }
    series
}

/// The column a table view is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Amount,
    Name,
    Category,
}

serde_plain::derive_display_from_serialize!(SortKey);
serde_plain::derive_fromstr_from_deserialize!(SortKey);

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

serde_plain::derive_display_from_serialize!(SortOrder);
serde_plain::derive_fromstr_from_deserialize!(SortOrder);

/// How to select and order transactions for tabular display. The default keeps every
/// transaction in its original order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub sort: Option<SortKey>,
    pub order: SortOrder,
    pub direction: Option<Direction>,
    pub category: Option<Category>,
    pub limit: Option<usize>,
}

/// Filters, then stably sorts, then truncates. Ties keep their input order in both ascending
/// and descending views.
pub fn view<'a>(transactions: &'a [Transaction], options: &ViewOptions) -> Vec<&'a Transaction> {
    let mut rows: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| options.direction.map_or(true, |d| t.direction() == d))
        .filter(|t| options.category.map_or(true, |c| t.category() == c))
        .collect();

    if let Some(key) = options.sort {
        rows.sort_by(|a, b| {
            let ordering = compare(a, b, key);
            match options.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    if let Some(limit) = options.limit {
        rows.truncate(limit);
    }
    rows
}

fn compare(a: &Transaction, b: &Transaction, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date().cmp(&b.date()),
        SortKey::Amount => a.signed_amount().cmp(&b.signed_amount()),
        SortKey::Name => a.name().unwrap_or_default().cmp(b.name().unwrap_or_default()),
        SortKey::Category => a.category().to_string().cmp(&b.category().to_string()),
    }
}

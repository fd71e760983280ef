//! Command handlers for the equilibrium CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod dashboard;
mod init;
mod table;
mod users;

use crate::api::{Rates, Store};
use crate::model::Snapshot;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, error};

pub use dashboard::{dashboard, Dashboard, RecentRow};
pub use init::init;
pub use table::{table, Table, TableRow};
pub use users::users;

/// The output type for a command: a message rendered for the terminal and, optionally, the
/// structured data it was rendered from.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to stdout and the structured data (if it exists) as JSON to `debug!`.
    /// With `json`, the structured data is printed to stdout instead of the message.
    pub fn print(&self, json: bool) {
        let rendered = self
            .structure()
            .and_then(|s| serde_json::to_string_pretty(s).ok());
        match (json, rendered) {
            (true, Some(rendered)) => println!("{rendered}"),
            (false, Some(rendered)) => {
                println!("{}", self.message);
                debug!("Command output:\n\n{rendered}\n\n");
            }
            (_, None) => println!("{}", self.message),
        }
    }
}

/// Fetches both external inputs concurrently. A failed fetch is logged and replaced by an empty
/// transaction list or a missing rate; it never fails the command.
pub(crate) async fn snapshot(store: &dyn Store, rates: &dyn Rates) -> Snapshot {
    let (transactions, rate) = tokio::join!(store.transactions(), rates.latest());
    let transactions = transactions.unwrap_or_else(|e| {
        error!("Error fetching transactions: {e:#}");
        Vec::new()
    });
    let rate = rate
        .map_err(|e| error!("Error fetching the exchange rate: {e:#}"))
        .ok();
    debug!("Loaded {} transactions", transactions.len());
    Snapshot::new(transactions, rate)
}

/// Renders a Markdown table. Columns are padded to their widest cell and `|` inside a cell is
/// escaped.
pub(crate) fn markdown_table<S>(headers: &[&str], rows: &[Vec<S>]) -> String
where
    S: AsRef<str>,
{
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| escape_cell(c.as_ref())).collect())
        .collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (ix, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(ix) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell}{}", " ".repeat(w - cell.chars().count())))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut out = vec![line(headers.to_vec())];
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push(format!("|-{}-|", rule.join("-|-")));
    for row in &rows {
        out.push(line(row.iter().map(String::as_str).take(widths.len()).collect()));
    }
    out.join("\n")
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{TestRates, TestStore};

    #[tokio::test]
    async fn test_snapshot_fetch_failure_is_empty() {
        let snapshot = snapshot(&TestStore::failing(), &TestRates::new(None)).await;
        assert!(snapshot.transactions().is_empty());
        assert!(snapshot.rate().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_partial_failure() {
        let snapshot = snapshot(&TestStore::default(), &TestRates::new(None)).await;
        assert_eq!(snapshot.transactions().len(), 8);
        assert!(snapshot.rate().is_none());
    }

    #[test]
    fn test_markdown_table() {
        let rows = vec![vec!["Cine", "-$8000.00"], vec!["Sueldo", "$850000.00"]];
        let table = markdown_table(&["Name", "Amount"], &rows);
        let expected = "\
| Name   | Amount     |
|--------|------------|
| Cine   | -$8000.00  |
| Sueldo | $850000.00 |";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_markdown_table_escapes_pipes() {
        let rows = vec![vec!["Cena | amigos", "$10.00"]];
        let table = markdown_table(&["Name", "Amount"], &rows);
        let expected = "\
| Name           | Amount |
|----------------|--------|
| Cena \\| amigos | $10.00 |";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_markdown_table_no_rows() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert_eq!(markdown_table(&["A"], &rows), "| A |\n|---|");
    }

    #[test]
    fn test_out_from_message() {
        let out: Out<()> = "done".into();
        assert_eq!(out.message(), "done");
        assert!(out.structure().is_none());
    }
}

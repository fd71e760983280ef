//! These structs provide the CLI interface for the equilibrium CLI.

use crate::format::Locale;
use crate::ledger::{SortKey, SortOrder, ViewOptions};
use crate::model::{Category, Direction};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// equilibrium: a personal finance dashboard for the terminal.
///
/// Reads your income and expense transactions from a hosted table (any PostgREST endpoint, such
/// as a Supabase project), shows your balance, totals per category, and the current "dólar blue"
/// reference rate.
///
/// Set EQUILIBRIUM_IN_TEST_MODE to a non-empty value to run against built-in sample data.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and the configuration file.
    ///
    /// You need the URL of your hosted project and a file holding its anonymous (public) API key.
    /// The key file is moved into $EQUILIBRIUM_HOME/.secrets.
    Init(InitArgs),
    /// Show the balance, the exchange rate, totals per category and the latest transactions.
    Dashboard(OutputArgs),
    /// Show every transaction with the final balance. Supports sorting and filtering.
    Table(TableArgs),
    /// List the users of the hosted project.
    Users(OutputArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where configuration is held. Defaults to ~/equilibrium
    #[arg(long, env = "EQUILIBRIUM_HOME", default_value_t = default_home())]
    equilibrium_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn equilibrium_home(&self) -> &DisplayPath {
        &self.equilibrium_home
    }
}

/// Args for the `equilibrium init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The base URL of the hosted project, e.g. https://xyzcompany.supabase.co
    #[arg(long)]
    store_url: String,

    /// A file containing the project's anonymous API key.
    #[arg(long)]
    anon_key: PathBuf,

    /// The locale amounts and dates are shown in: es-AR or en-US.
    #[arg(long, default_value_t = Locale::EsAr)]
    locale: Locale,
}

impl InitArgs {
    pub fn store_url(&self) -> &str {
        &self.store_url
    }

    pub fn anon_key(&self) -> &Path {
        &self.anon_key
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

/// Args for commands that only choose between text and JSON output.
#[derive(Debug, Default, Parser, Clone)]
pub struct OutputArgs {
    /// Print the structured result as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl OutputArgs {
    pub fn json(&self) -> bool {
        self.json
    }
}

/// Args for the `equilibrium table` command.
#[derive(Debug, Parser, Clone)]
pub struct TableArgs {
    /// Sort by this column. Without it the store's order (newest first) is kept.
    #[arg(long, value_enum)]
    sort: Option<SortKey>,

    /// The sort direction.
    #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
    order: SortOrder,

    /// Only show "ingreso" (income) or "egreso" (expense) transactions.
    #[arg(long)]
    direction: Option<Direction>,

    /// Only show transactions in this category, e.g. "alimentos".
    #[arg(long)]
    category: Option<Category>,

    /// Show at most this many rows.
    #[arg(long)]
    limit: Option<usize>,

    #[clap(flatten)]
    output: OutputArgs,
}

impl TableArgs {
    pub fn output(&self) -> &OutputArgs {
        &self.output
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            sort: self.sort,
            order: self.order,
            direction: self.direction,
            category: self.category,
            limit: self.limit,
        }
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("equilibrium"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --equilibrium-home or EQUILIBRIUM_HOME instead of relying on \
                the default home directory.",
            );
            PathBuf::from("equilibrium")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_table_args() {
        let args = parse(&[
            "equilibrium",
            "--equilibrium-home",
            "/tmp/eq",
            "table",
            "--sort",
            "amount",
            "--order",
            "desc",
            "--direction",
            "egreso",
            "--category",
            "alimentos",
            "--limit",
            "3",
            "--json",
        ]);
        assert_eq!(args.common().equilibrium_home().path(), Path::new("/tmp/eq"));
        let Command::Table(table) = args.command() else {
            panic!("expected the table command");
        };
        assert!(table.output().json());
        assert_eq!(
            table.view_options(),
            ViewOptions {
                sort: Some(SortKey::Amount),
                order: SortOrder::Desc,
                direction: Some(Direction::Expense),
                category: Some(Category::Food),
                limit: Some(3),
            }
        );
    }

    #[test]
    fn test_parse_table_defaults() {
        let args = parse(&["equilibrium", "table"]);
        let Command::Table(table) = args.command() else {
            panic!("expected the table command");
        };
        assert!(!table.output().json());
        assert_eq!(table.view_options(), ViewOptions::default());
    }

    #[test]
    fn test_parse_init() {
        let args = parse(&[
            "equilibrium",
            "--log-level",
            "debug",
            "init",
            "--store-url",
            "https://xyz.supabase.co",
            "--anon-key",
            "key.txt",
            "--locale",
            "en-US",
        ]);
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        let Command::Init(init) = args.command() else {
            panic!("expected the init command");
        };
        assert_eq!(init.store_url(), "https://xyz.supabase.co");
        assert_eq!(init.anon_key(), Path::new("key.txt"));
        assert_eq!(init.locale(), Locale::EnUs);
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        assert!(Args::try_parse_from(["equilibrium", "table", "--category", "pets"]).is_err());
    }
}

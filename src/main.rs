use clap::Parser;
use equilibrium::args::{Args, Command};
use equilibrium::{commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().equilibrium_home().path();

    // When EQUILIBRIUM_IN_TEST_MODE is set and non-empty the mode will be Mode::Test and no
    // network requests are made, otherwise it will be Mode::Remote.
    let mode = Mode::from_env();

    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(
            home,
            init_args.anon_key(),
            init_args.store_url(),
            init_args.locale(),
        )
        .await?
        .print(false),

        Command::Dashboard(output) => {
            let config = Config::load(home).await?;
            commands::dashboard(config, mode)
                .await?
                .print(output.json())
        }

        Command::Table(table_args) => {
            let config = Config::load(home).await?;
            commands::table(config, mode, table_args.view_options())
                .await?
                .print(table_args.output().json())
        }

        Command::Users(output) => {
            let config = Config::load(home).await?;
            commands::users(config, mode).await?.print(output.json())
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_PKG_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

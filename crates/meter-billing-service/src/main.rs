//! Meter Billing - customers, monthly usage and electricity bills
//!
//! This is the main entry point for the `meter-billing` command.
//!
//! ```sh
//! # Interactive menu
//! meter-billing
//!
//! # One-shot commands
//! meter-billing add-customer M001 "Asha" "12 Lane" a@x.com
//! meter-billing record-usage M001 2024-01 250
//! meter-billing bill M001 2024-01
//! ```

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meter_billing_service::{
    dispatch, AppState, Command, Console, ServiceConfig, ServiceError, StoreBackend,
};

/// Track electricity customers and their monthly usage, and compute bills.
#[derive(Parser, Debug)]
#[command(name = "meter-billing", version, about)]
struct Cli {
    /// Ledger data directory (overrides `DATA_DIR` and the config file).
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Keep the ledger in memory only; nothing is saved.
    #[arg(long, global = true)]
    memory: bool,

    /// Log level when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Register a new customer.
    AddCustomer {
        /// Meter number (unique).
        meter_no: String,
        /// Full name.
        name: String,
        /// Postal address.
        address: String,
        /// Contact email.
        email: String,
    },
    /// Record the units a meter consumed in a month.
    RecordUsage {
        /// Meter number.
        meter_no: String,
        /// Billing month, e.g. 2024-01.
        month: String,
        /// Units consumed.
        #[arg(allow_negative_numbers = true)]
        units: i64,
    },
    /// Print the bill for a meter and month.
    Bill {
        /// Meter number.
        meter_no: String,
        /// Billing month.
        month: String,
    },
    /// Print every billed month of a meter.
    History {
        /// Meter number.
        meter_no: String,
    },
    /// Run the interactive menu (default).
    Shell,
}

impl CliCommand {
    /// The command to dispatch, or `None` for the interactive menu.
    fn into_command(self) -> Option<Command> {
        match self {
            CliCommand::AddCustomer {
                meter_no,
                name,
                address,
                email,
            } => Some(Command::AddCustomer {
                meter_no,
                name,
                address,
                email,
            }),
            CliCommand::RecordUsage {
                meter_no,
                month,
                units,
            } => Some(Command::RecordUsage {
                meter_no,
                month,
                units,
            }),
            CliCommand::Bill { meter_no, month } => Some(Command::GenerateBill { meter_no, month }),
            CliCommand::History { meter_no } => Some(Command::UsageHistory { meter_no }),
            CliCommand::Shell => None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ServiceError> {
    // Initialize tracing on stderr so it stays out of the console output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load configuration, then apply CLI overrides
    let mut config = ServiceConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if cli.memory {
        config.store_backend = StoreBackend::Memory;
    }

    tracing::debug!(
        data_dir = %config.data_dir,
        store_backend = ?config.store_backend,
        "Service configuration loaded"
    );

    let state = AppState::open(&config)?;

    match cli.command.and_then(CliCommand::into_command) {
        Some(command) => {
            let outcome = dispatch(&state, command)?;
            println!("{outcome}");
        }
        None => {
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout());
            console.run(&state)?;
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxc::cli::convert::ConvertArgs;
use fxc::core::log::init_logging;
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging and detailed error messages
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List supported currencies
    Currencies,
    /// Convert an amount between two currencies
    Convert {
        /// Amount in the source currency
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,

        /// Source currency code (defaults to `default_from` in config)
        #[arg(short, long)]
        from: Option<String>,

        /// Target currency code (defaults to `default_to` in config)
        #[arg(short, long)]
        to: Option<String>,

        /// Convert through this intermediary currency
        #[arg(long, conflicts_with = "direct")]
        via: Option<String>,

        /// Convert in a single request, ignoring any configured base currency
        #[arg(long)]
        direct: bool,
    },
}

impl From<Commands> for fxc::AppCommand {
    fn from(cmd: Commands) -> fxc::AppCommand {
        match cmd {
            Commands::Currencies => fxc::AppCommand::Currencies,
            Commands::Convert {
                amount,
                from,
                to,
                via,
                direct,
            } => fxc::AppCommand::Convert(ConvertArgs {
                amount,
                from,
                to,
                via,
                direct,
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxc::cli::setup::setup(),
        Some(cmd) => {
            fxc::run_command(cmd.into(), cli.config_path.as_deref(), cli.verbose).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::convert::ConvertArgs;
use crate::core::RateConverter;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Currencies,
    Convert(ConvertArgs),
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    verbose: bool,
) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::frankfurter::FrankfurterProvider::new(
        config.frankfurter_url(),
        Duration::from_secs(config.timeout_secs),
    );
    let converter = RateConverter::new(&provider);
    let show_details = verbose || config.show_error_details;

    match command {
        AppCommand::Currencies => cli::currencies::run(&converter, show_details).await,
        AppCommand::Convert(args) => {
            cli::convert::run(&converter, &config, &args, show_details).await
        }
    }
}

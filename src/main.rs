use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, instrument::WithSubscriber};

use crate::{config::Config, logger::init_logger, probe::NodeApiClient};

mod banner;
mod beacon;
mod config;
mod error;
mod execution;
mod logger;
mod payload;
mod probe;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    let logger = match init_logger(&config.log_file_name) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Unable to initialize logger: {e}");
            return ExitCode::FAILURE;
        }
    };
    check_node(config).with_subscriber(logger.dispatch().clone()).await
}

async fn check_node(config: Config) -> ExitCode {
    banner::print_banner(&config.node_name);
    debug!("Beacon node URL: {}", config.beacon_node_url);
    debug!("Execution node URL: {}", config.execution_node_url);

    let mut client = match NodeApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Unable to set up HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };
    match client.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Node check aborted: {e}");
            ExitCode::FAILURE
        }
    }
}

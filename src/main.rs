use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use zabctl::api::ZabbixClient;
use zabctl::cli::{is_falsy, CliOpts};
use zabctl::config::Configuration;
use zabctl::log::setup_logging;
use zabctl::monitor::Monitor;

use log::error;

#[tokio::main]
#[cfg(not(tarpaulin_include))] // ignore for code coverage
async fn main() -> Result<(), ExitCode> {
    let cli = CliOpts::parse();
    if let Err(err) = setup_logging(cli.debug()) {
        println!("Failed to setup logging: {:?}", err);
        return Err(ExitCode::from(1));
    };

    let config = Configuration::new(cli.server.clone());

    let api = ZabbixClient::connect(&config).await.map_err(|err| {
        error!("Failed to connect to {}: {:?}", config.server, err);
        ExitCode::from(1)
    })?;
    let monitor = Monitor::new(Arc::new(api));

    let result = cli.dispatch(&monitor).await.map_err(|err| {
        error!("{:?}", err);
        ExitCode::from(1)
    })?;

    println!(
        "{}",
        serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string())
    );

    // a falsy result (missing id, refused add, no-op toggle) is a failure
    // for scripting purposes even though nothing errored
    if is_falsy(&result) {
        return Err(ExitCode::from(1));
    }
    Ok(())
}

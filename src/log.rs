//! log configuration and setup module

use std::env;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Sets up logging
pub fn setup_logging(debug: bool) -> Result<(), log::SetLoggerError> {
    // check the env vars
    #[cfg(not(test))]
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    let mut builder = Builder::from_default_env();

    if debug {
        builder.filter_level(LevelFilter::Debug);
    }

    builder.target(Target::Stdout);

    #[cfg(not(test))]
    {
        builder.try_init()
    }

    #[cfg(test)]
    {
        if let Err(err) = builder.try_init() {
            use log::debug;
            debug!("Error init logging: {:?}", err);
        }
        Ok(())
    }
}

pub mod config;
pub mod layers;

pub use layers::console::{ConsoleOutput, LogFormat};

use crate::logging::config::LoggingConfig;
use crate::logging::layers::console;
use crate::Result;
use anyhow::{anyhow, Context};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;

/// Environment variable holding a tracing filter, e.g. `ghaflow=debug`.
pub const LOG_ENV_VAR: &str = "GHAFLOW_LOG";

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize logging for the current process.
///
/// The filter comes from `GHAFLOW_LOG` when set, otherwise from
/// `config.default_level`. Errors when invoked more than once per process.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if LOGGER_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(anyhow!("logging already initialized"));
    }

    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&config.default_level))
        .context("failed to configure tracing level")?;

    tracing_subscriber::registry()
        .with(console::console_layer::<Registry>(
            config.console_output,
            config.format,
        ))
        .with(env_filter)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
/// Reset the initialization guard so tests can reconfigure logging multiple times.
pub fn reset_for_tests() {
    LOGGER_INITIALIZED.store(false, Ordering::SeqCst);
}

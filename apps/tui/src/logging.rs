use color_eyre::Result;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub const fn default_level(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber. Headless runs log to stderr; the terminal
/// UI owns the screen, so it logs to `config.log_file` instead.
pub fn init_logging(config: &Config, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(config.debug)));

    let installed = if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    };

    installed.map_err(|e| color_eyre::eyre::eyre!("Failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::default_level;

    #[test]
    fn debug_flag_raises_default_level() {
        assert_eq!(default_level(false), "info");
        assert_eq!(default_level(true), "debug");
    }
}

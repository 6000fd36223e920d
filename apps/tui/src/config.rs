use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use wind_overlay_core::{Direction, SelectionError, Speed};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";
pub const DEFAULT_IMAGE_PATH: &str = "./public/assets/nust_img.jpg";
pub const DEFAULT_LOG_FILE: &str = "wind-overlay.log";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("invalid timeout {0:?}, expected whole seconds")]
    Timeout(String),
}

/// Where datasets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Http { base_url: String },
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub image_path: PathBuf,
    pub timeout: Duration,
    pub log_file: PathBuf,
    pub debug: bool,
    pub speed: Speed,
    pub direction: Direction,
}

/// Initializes the application configuration from `.env`, the environment and
/// the initial selection given on the command line.
pub fn init_app_config(
    speed: Option<&str>,
    direction: Option<&str>,
) -> Result<Config, ConfigError> {
    // Load environment variables from .env file
    dotenv().ok();

    resolve(|name| env::var(name).ok(), speed, direction)
}

pub fn resolve(
    lookup: impl Fn(&str) -> Option<String>,
    speed: Option<&str>,
    direction: Option<&str>,
) -> Result<Config, ConfigError> {
    let source = match lookup("WIND_DATA_DIR").filter(|dir| !dir.trim().is_empty()) {
        Some(dir) => SourceConfig::Directory(PathBuf::from(dir)),
        None => SourceConfig::Http {
            base_url: lookup("WIND_DATA_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        },
    };

    let timeout = match lookup("WIND_TIMEOUT_SECS") {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::Timeout(value))?,
        None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    };

    let speed = match speed {
        Some(value) => {
            Speed::parse(value).ok_or_else(|| SelectionError::UnknownSpeed(value.to_string()))?
        }
        None => Speed::default(),
    };
    let direction = match direction {
        Some(value) => Direction::parse(value)
            .ok_or_else(|| SelectionError::UnknownDirection(value.to_string()))?,
        None => Direction::default(),
    };

    Ok(Config {
        source,
        image_path: lookup("WIND_IMAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_IMAGE_PATH), PathBuf::from),
        timeout,
        log_file: lookup("WIND_LOG_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from),
        debug: lookup("DEBUG").is_some_and(|value| value != "0" && !value.is_empty()),
        speed,
        direction,
    })
}

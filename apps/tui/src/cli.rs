use clap::{CommandFactory, Parser};

#[derive(Debug, Default, Parser)]
#[command(name = "wind-overlay", version, about = "Campus wind overlay viewer")]
pub struct CliArgs {
    /// Print the overlay for one selection and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Origin serving /data/{speed}_{direction}.json
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Read datasets from a local directory instead of HTTP
    #[arg(long = "data-dir", value_name = "PATH")]
    pub data_dir: Option<String>,

    /// Background image shown under the labels
    #[arg(long, value_name = "PATH")]
    pub image: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout-secs", value_name = "SECS")]
    pub timeout_secs: Option<String>,

    /// Diagnostics log file used while the terminal UI is active
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Initial wind speed (1ms or 5ms)
    #[arg(long, value_name = "SPEED")]
    pub speed: Option<String>,

    /// Initial wind direction, label or code (e.g. "North (+y)" or y)
    #[arg(long, value_name = "DIRECTION")]
    pub direction: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.base_url {
            std::env::set_var("WIND_DATA_URL", url);
        }
        if let Some(dir) = &self.data_dir {
            std::env::set_var("WIND_DATA_DIR", dir);
        }
        if let Some(path) = &self.image {
            std::env::set_var("WIND_IMAGE_PATH", path);
        }
        if let Some(secs) = &self.timeout_secs {
            std::env::set_var("WIND_TIMEOUT_SECS", secs);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("WIND_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

use clap::Parser;
use color_eyre::Result;
use tracing::{info, warn};
use wind_overlay_tui::cli::CliArgs;
use wind_overlay_tui::source::DataSource;
use wind_overlay_tui::{event, init_app_config, logging, terminal, App};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config(args.speed.as_deref(), args.direction.as_deref())?;

    // Check if we're running in a terminal
    let headless = args.headless || !is_terminal();
    logging::init_logging(&config, headless)?;
    info!(source = ?config.source, headless, "starting wind overlay");

    let source = DataSource::from_config(&config.source, config.timeout)?;
    let mut app = App::new(&config, source);

    if headless {
        return event::run_headless(&mut app, args.json).await;
    }

    app.load_background(&config);

    let mut terminal = terminal::setup()?;

    app.start();
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup(true, true);

    if let Err(error) = &result {
        warn!(%error, "event loop exited with an error");
    }
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

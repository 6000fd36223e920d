use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use tracing::{debug, info};
use wind_overlay_core::{Bounds, ImageAsset, Label};

use crate::app::{handle_input, handle_mouse, App};
use crate::ui;

/// Everything the headless mode prints for one selection.
#[derive(Debug, serde::Serialize)]
pub struct HeadlessOverlay {
    pub key: String,
    pub request_path: String,
    pub status: String,
    pub error: Option<String>,
    pub image: ImageAsset,
    pub bounds: Bounds,
    pub labels: Vec<Label>,
}

pub fn headless_overlay(app: &App) -> HeadlessOverlay {
    let key = app.view.selection().key();
    let overlay = app.view.overlay();

    HeadlessOverlay {
        request_path: key.asset_path(),
        key: key.to_string(),
        status: app.view.status().to_string(),
        error: app.view.last_error().map(ToString::to_string),
        image: overlay.image,
        bounds: overlay.bounds,
        labels: overlay.labels,
    }
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.start();

    // Only one request is in flight, so the first result is the current one.
    let applied = app.next_result().await;
    debug!(?applied, "headless fetch finished");

    let overlay = headless_overlay(app);
    if json {
        println!("{}", serde_json::to_string_pretty(&overlay)?);
    } else {
        render_headless_text(&overlay, &app.source().describe(&app.view.selection().key()));
    }

    Ok(())
}

fn render_headless_text(overlay: &HeadlessOverlay, origin: &str) {
    println!("\nCampus Wind Overlay");
    println!("===================");
    println!("Dataset: {} ({origin})", overlay.key);
    println!("Status: {}", overlay.status);
    if let Some(error) = &overlay.error {
        println!("Error: {error}");
    }
    println!(
        "Image: {} over [[0, 0], [{}, {}]]",
        overlay.image.url,
        overlay.bounds.height(),
        overlay.bounds.width()
    );

    println!("\nLabels ({}):", overlay.labels.len());
    for label in &overlay.labels {
        println!(
            "- {} at left={} top={}",
            label.text, label.placement.left, label.placement.top
        );
    }
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    info!("event loop started");

    loop {
        // Update animations
        app.update();

        let applied = app.drain_results();
        if applied > 0 {
            debug!(applied, "fetch results applied");
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse),
                Ok(Event::Resize(width, height)) => {
                    debug!(width, height, "terminal resized");
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) => {}
                Err(error) => debug!(%error, "failed to read terminal event"),
            }
        }

        if !app.running {
            break;
        }

        // Let spawned fetches make progress between frames.
        tokio::task::yield_now().await;
    }

    info!("event loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::headless_overlay;
    use crate::app::App;
    use crate::config::{resolve, SourceConfig};
    use crate::source::DataSource;
    use wind_overlay_core::Applied;

    fn app_for(dir: &std::path::Path, direction: &str) -> App {
        let config = resolve(|_| None, Some("1ms"), Some(direction)).unwrap();
        let source =
            DataSource::from_config(&SourceConfig::Directory(dir.to_path_buf()), config.timeout)
                .unwrap();
        App::new(&config, source)
    }

    #[tokio::test]
    async fn headless_overlay_carries_projected_labels() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("1ms_-x.json"),
            r#"{"points":[{"x":10,"y":400,"v":2.04},{"x":90,"y":2,"v":0.34}]}"#,
        )
        .unwrap();
        let mut app = app_for(dir.path(), "-x");

        app.start();
        assert_eq!(app.next_result().await, Some(Applied::Loaded));

        let overlay = headless_overlay(&app);
        assert_eq!(overlay.key, "1ms_-x");
        assert_eq!(overlay.request_path, "/data/1ms_-x.json");
        assert_eq!(overlay.status, "Ready");
        assert_eq!(overlay.labels.len(), 2);
        assert_eq!(overlay.labels[0].text, "2.0 m/s");
        assert!((overlay.labels[0].placement.top - 52.0).abs() < f64::EPSILON);
        assert!((overlay.labels[1].placement.left - 90.0).abs() < f64::EPSILON);

        let json = serde_json::to_value(&overlay).unwrap();
        assert_eq!(json["labels"][1]["text"], "0.3 m/s");
        assert_eq!(json["labels"][1]["top"], 450.0);
        assert_eq!(json["image"]["url"], "/assets/nust_img.jpg");
    }

    #[tokio::test]
    async fn headless_overlay_reports_failures_without_labels() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(dir.path(), "y");

        app.start();
        assert_eq!(app.next_result().await, Some(Applied::Emptied));

        let overlay = headless_overlay(&app);
        assert_eq!(overlay.status, "Failed");
        assert!(overlay.error.is_some());
        assert!(overlay.labels.is_empty());
    }
}

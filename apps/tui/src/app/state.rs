use std::time::Instant;

use ratatui::layout::Rect;
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};
use wind_overlay_core::{
    Applied, Background, DataFetchError, Dataset, Extent, FetchTicket, Selection, Viewport,
    WindOverlayView,
};

use crate::config::Config;
use crate::source::DataSource;

type FetchResult = (FetchTicket, Result<Dataset, DataFetchError>);

/// Which selector the arrow keys drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Speed,
    Direction,
}

impl Focus {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Speed => Self::Direction,
            Self::Direction => Self::Speed,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub view: WindOverlayView,
    pub viewport: Viewport,
    pub map_extent: Extent,
    /// Screen rect of the map panel's interior; mouse drags start only here.
    pub map_area: Rect,
    pub focus: Focus,
    pub show_help: bool,
    pub status_message: String,
    pub background: Option<Background>,
    pub throbber: ThrobberState,
    pub drag_origin: Option<(u16, u16)>,
    pub last_frame: Instant,
    source: DataSource,
    results_tx: UnboundedSender<FetchResult>,
    results_rx: UnboundedReceiver<FetchResult>,
}

impl App {
    pub fn new(config: &Config, source: DataSource) -> Self {
        let (results_tx, results_rx) = unbounded_channel();

        Self {
            running: true,
            view: WindOverlayView::new(Selection::new(config.speed, config.direction)),
            viewport: Viewport::default(),
            map_extent: Extent::new(0, 0),
            map_area: Rect::default(),
            focus: Focus::Direction,
            show_help: false,
            status_message: String::new(),
            background: None,
            throbber: ThrobberState::default(),
            drag_origin: None,
            last_frame: Instant::now(),
            source,
            results_tx,
            results_rx,
        }
    }

    pub fn load_background(&mut self, config: &Config) {
        match Background::open(&config.image_path) {
            Ok(background) => {
                info!(path = %config.image_path.display(), "background image loaded");
                self.background = Some(background);
            }
            Err(error) => {
                warn!(
                    path = %config.image_path.display(),
                    %error,
                    "background image unavailable, drawing placeholder"
                );
                self.status_message = format!("No background image: {error}");
            }
        }
    }

    pub const fn source(&self) -> &DataSource {
        &self.source
    }

    /// Spawns the fetch for `ticket`; the result comes back through
    /// [`App::drain_results`] or [`App::next_result`].
    pub fn request(&self, ticket: FetchTicket) {
        let source = self.source.clone();
        let tx = self.results_tx.clone();

        tokio::spawn(async move {
            let result = source.fetch(&ticket.key).await;
            // The receiver only goes away on shutdown.
            let _ = tx.send((ticket, result));
        });
    }

    pub fn start(&mut self) {
        let ticket = self.view.start();
        self.request(ticket);
    }

    pub fn reload(&mut self) {
        let ticket = self.view.reload();
        self.status_message = format!("Reloading {}", ticket.key.asset_path());
        self.request(ticket);
    }

    pub fn next_option(&mut self) {
        let ticket = match self.focus {
            Focus::Speed => self.view.next_speed(),
            Focus::Direction => self.view.next_direction(),
        };
        self.status_message.clear();
        self.request(ticket);
    }

    pub fn prev_option(&mut self) {
        let ticket = match self.focus {
            Focus::Speed => self.view.prev_speed(),
            Focus::Direction => self.view.prev_direction(),
        };
        self.status_message.clear();
        self.request(ticket);
    }

    pub fn select_speed(&mut self, value: &str) {
        match self.view.set_speed(value) {
            Ok(ticket) => {
                self.focus = Focus::Speed;
                if let Some(ticket) = ticket {
                    self.status_message.clear();
                    self.request(ticket);
                }
            }
            Err(error) => self.status_message = error.to_string(),
        }
    }

    /// Applies every result that has already arrived.
    pub fn drain_results(&mut self) -> usize {
        let mut applied = 0;
        while let Ok((ticket, result)) = self.results_rx.try_recv() {
            self.apply(&ticket, result);
            applied += 1;
        }
        applied
    }

    /// Waits for the next fetch result and applies it.
    pub async fn next_result(&mut self) -> Option<Applied> {
        let (ticket, result) = self.results_rx.recv().await?;
        Some(self.apply(&ticket, result))
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_frame).as_millis() >= 100 {
            self.last_frame = now;
            self.throbber.calc_next();
        }
    }

    pub fn pan(&mut self, cols: f64, rows: f64) {
        self.viewport.pan(cols, rows, self.map_extent);
    }

    fn apply(&mut self, ticket: &FetchTicket, result: Result<Dataset, DataFetchError>) -> Applied {
        let applied = self.view.apply(ticket, result);
        if applied == Applied::Emptied {
            self.status_message = format!(
                "Failed to load {}: {}",
                self.source.describe(&ticket.key),
                self.view.last_error().unwrap_or("unknown error")
            );
        }
        applied
    }
}

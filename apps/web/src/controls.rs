use wind_overlay_core::{Background, Extent, FetchTicket, Speed, Viewport, WindOverlayView};

/// Cells moved per pan key press.
const PAN_STEP: f64 = 4.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Speed,
    Direction,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Control {
    ToggleFocus,
    Next,
    Prev,
    Speed(Speed),
    Pan(f64, f64),
    ZoomIn,
    ZoomOut,
    ResetView,
    Reload,
}

impl Control {
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::Speed(Speed::OneMs)),
            '2' => Some(Self::Speed(Speed::FiveMs)),
            'h' => Some(Self::Pan(-PAN_STEP, 0.0)),
            'l' => Some(Self::Pan(PAN_STEP, 0.0)),
            'k' => Some(Self::Pan(0.0, -PAN_STEP)),
            'j' => Some(Self::Pan(0.0, PAN_STEP)),
            '+' | '=' => Some(Self::ZoomIn),
            '-' => Some(Self::ZoomOut),
            '0' => Some(Self::ResetView),
            'r' => Some(Self::Reload),
            _ => None,
        }
    }
}

/// Page state shared between the key handler, the fetch task and the renderer.
#[derive(Debug)]
pub struct WebState {
    pub view: WindOverlayView,
    pub viewport: Viewport,
    pub focus: Focus,
    pub map_extent: Extent,
    /// Campus image once it has been fetched and decoded.
    pub background: Option<Background>,
}

impl Default for WebState {
    fn default() -> Self {
        Self {
            view: WindOverlayView::default(),
            viewport: Viewport::default(),
            focus: Focus::Direction,
            map_extent: Extent::new(0, 0),
            background: None,
        }
    }
}

impl WebState {
    /// Applies a control; returns the ticket to fetch when the selection changed.
    pub fn apply(&mut self, control: Control) -> Option<FetchTicket> {
        match control {
            Control::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Speed => Focus::Direction,
                    Focus::Direction => Focus::Speed,
                };
                None
            }
            Control::Next => Some(match self.focus {
                Focus::Speed => self.view.next_speed(),
                Focus::Direction => self.view.next_direction(),
            }),
            Control::Prev => Some(match self.focus {
                Focus::Speed => self.view.prev_speed(),
                Focus::Direction => self.view.prev_direction(),
            }),
            Control::Speed(speed) => {
                self.focus = Focus::Speed;
                self.view.select_speed(speed)
            }
            Control::Pan(cols, rows) => {
                self.viewport.pan(cols, rows, self.map_extent);
                None
            }
            Control::ZoomIn => {
                self.viewport.zoom_in();
                None
            }
            Control::ZoomOut => {
                self.viewport.zoom_out();
                None
            }
            Control::ResetView => {
                self.viewport.reset();
                None
            }
            Control::Reload => Some(self.view.reload()),
        }
    }
}

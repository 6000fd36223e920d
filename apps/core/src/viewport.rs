use crate::overlay::{LabelPlacement, IMAGE_HEIGHT, IMAGE_WIDTH};

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f64 = 2.0;
pub const MIN_ZOOM: i32 = 0;
pub const MAX_ZOOM: i32 = 4;
/// Rounding slack when a label sits exactly on the extent's top or bottom edge.
const EDGE_EPSILON: f64 = 1e-9;

/// Size of the drawing surface in cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Extent {
    pub width: u16,
    pub height: u16,
}

impl Extent {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where a centered label lands, in cells relative to the extent origin.
/// `col` may be negative when the label is clipped on the left.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellLabel {
    pub col: i32,
    pub row: u16,
    pub width: u16,
}

/// Pan/zoom state over the layout plane (`left` 0..100, `top` 0..452).
///
/// Zoom level 0 fits the whole image into the extent; each level doubles the
/// scale. The center never leaves the image.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    center_left: f64,
    center_top: f64,
    zoom: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center_left: IMAGE_WIDTH / 2.0,
            center_top: IMAGE_HEIGHT / 2.0,
            zoom: MIN_ZOOM,
        }
    }
}

impl Viewport {
    pub const fn center(&self) -> (f64, f64) {
        (self.center_left, self.center_top)
    }

    pub const fn zoom(&self) -> i32 {
        self.zoom
    }

    /// Horizontal cells per layout pixel.
    pub fn cols_per_px(&self, extent: Extent) -> f64 {
        let fit = (f64::from(extent.width) / IMAGE_WIDTH)
            .min(f64::from(extent.height) * CELL_ASPECT / IMAGE_HEIGHT);
        fit * 2_f64.powi(self.zoom)
    }

    pub fn rows_per_px(&self, extent: Extent) -> f64 {
        self.cols_per_px(extent) / CELL_ASPECT
    }

    pub fn to_screen(&self, left: f64, top: f64, extent: Extent) -> (f64, f64) {
        let col = (left - self.center_left)
            .mul_add(self.cols_per_px(extent), f64::from(extent.width) / 2.0);
        let row = (top - self.center_top)
            .mul_add(self.rows_per_px(extent), f64::from(extent.height) / 2.0);
        (col, row)
    }

    pub fn to_layout(&self, col: f64, row: f64, extent: Extent) -> Option<(f64, f64)> {
        if extent.is_empty() {
            return None;
        }

        let left = (col - f64::from(extent.width) / 2.0) / self.cols_per_px(extent)
            + self.center_left;
        let top = (row - f64::from(extent.height) / 2.0) / self.rows_per_px(extent)
            + self.center_top;
        Some((left, top))
    }

    pub fn pan(&mut self, cols: f64, rows: f64, extent: Extent) {
        if extent.is_empty() {
            return;
        }

        self.center_left += cols / self.cols_per_px(extent);
        self.center_top += rows / self.rows_per_px(extent);
        self.clamp_center();
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - 1).max(MIN_ZOOM);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn place_label(
        &self,
        text: &str,
        placement: LabelPlacement,
        extent: Extent,
    ) -> Option<CellLabel> {
        if extent.is_empty() {
            return None;
        }

        let width = u16::try_from(text.chars().count()).ok()?;
        let (col, row) = self.to_screen(placement.left, placement.top, extent);
        let rows = f64::from(extent.height);
        let row = if (row - rows).abs() < EDGE_EPSILON {
            rows - 1.0
        } else {
            (row + EDGE_EPSILON).floor()
        };
        let start = (col - f64::from(width) / 2.0).round();

        if row < 0.0 || row >= rows {
            return None;
        }
        if start + f64::from(width) <= 0.0 || start >= f64::from(extent.width) {
            return None;
        }

        Some(CellLabel {
            col: start as i32,
            row: row as u16,
            width,
        })
    }

    /// Cells `(col, row, char)` covered by a centered label, clipped to the
    /// extent.
    pub fn label_cells<'a>(
        &self,
        text: &'a str,
        placement: LabelPlacement,
        extent: Extent,
    ) -> impl Iterator<Item = (u16, u16, char)> + 'a {
        let placed = self.place_label(text, placement, extent);
        placed.into_iter().flat_map(move |placed| {
            (placed.col..).zip(text.chars()).filter_map(move |(col, ch)| {
                let col = u16::try_from(col).ok().filter(|col| *col < extent.width)?;
                Some((col, placed.row, ch))
            })
        })
    }

    fn clamp_center(&mut self) {
        self.center_left = self.center_left.clamp(0.0, IMAGE_WIDTH);
        self.center_top = self.center_top.clamp(0.0, IMAGE_HEIGHT);
    }
}

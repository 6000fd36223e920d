//! Projection of dataset points onto the campus image.
//!
//! Points live in image space with the origin at the bottom-left corner.
//! Layout space (pixels, terminal cells, DOM) grows downward, so the vertical
//! axis is flipped against the image height when placing labels.

use serde::Serialize;

use crate::dataset::{Dataset, Point};

pub const IMAGE_WIDTH: f64 = 100.0;
pub const IMAGE_HEIGHT: f64 = 452.0;
pub const LABEL_UNIT: &str = "m/s";
pub const IMAGE_URL: &str = "/assets/nust_img.jpg";

/// Logical rectangle the background image is stretched across, as
/// `[[south, west], [north, east]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: [f64; 2],
    pub north_east: [f64; 2],
}

impl Bounds {
    pub const CAMPUS: Self = Self {
        south_west: [0.0, 0.0],
        north_east: [IMAGE_HEIGHT, IMAGE_WIDTH],
    };

    pub fn width(&self) -> f64 {
        self.north_east[1] - self.south_west[1]
    }

    pub fn height(&self) -> f64 {
        self.north_east[0] - self.south_west[0]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageAsset {
    pub url: String,
}

impl Default for ImageAsset {
    fn default() -> Self {
        Self {
            url: IMAGE_URL.to_string(),
        }
    }
}

/// Label anchor in layout pixels; marks the label's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    #[serde(flatten)]
    pub placement: LabelPlacement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedOverlay {
    pub image: ImageAsset,
    pub bounds: Bounds,
    pub labels: Vec<Label>,
}

impl RenderedOverlay {
    pub fn is_background_only(&self) -> bool {
        self.labels.is_empty()
    }
}

pub fn project(point: &Point, bounds: &Bounds) -> LabelPlacement {
    LabelPlacement {
        left: point.x,
        top: bounds.height() - point.y,
    }
}

pub fn format_label(v: f64) -> String {
    format!("{v:.1} {LABEL_UNIT}")
}

pub fn render_overlay(dataset: &Dataset, bounds: &Bounds, image: &ImageAsset) -> RenderedOverlay {
    let labels = dataset
        .points
        .iter()
        .map(|point| Label {
            text: format_label(point.v),
            placement: project(point, bounds),
        })
        .collect();

    RenderedOverlay {
        image: image.clone(),
        bounds: *bounds,
        labels,
    }
}

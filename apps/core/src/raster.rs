use std::path::Path;

use image::{ImageError, RgbImage};

use crate::overlay::{IMAGE_HEIGHT, IMAGE_WIDTH};
use crate::viewport::{Extent, Viewport};

pub type Rgb = [u8; 3];

pub const LABEL_RGB: Rgb = [0, 123, 255];

/// Grid spacing of the placeholder, in layout pixels.
const PLACEHOLDER_GRID: f64 = 50.0;
const PLACEHOLDER_LINE: Rgb = [70, 92, 76];
const PLACEHOLDER_FILL: Rgb = [46, 64, 52];

/// Decoded campus image, stretched over the full layout rectangle.
#[derive(Debug)]
pub struct Background {
    image: RgbImage,
}

impl Background {
    pub fn open(path: &Path) -> Result<Self, ImageError> {
        Ok(Self::from_image(image::open(path)?.to_rgb8()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        Ok(Self::from_image(image::load_from_memory(bytes)?.to_rgb8()))
    }

    pub const fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample(&self, left: f64, top: f64) -> Option<Rgb> {
        if !on_image(left, top) {
            return None;
        }

        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return None;
        }

        let x = ((left / IMAGE_WIDTH) * f64::from(width)) as u32;
        let y = ((top / IMAGE_HEIGHT) * f64::from(height)) as u32;
        Some(self.image.get_pixel(x.min(width - 1), y.min(height - 1)).0)
    }
}

pub fn on_image(left: f64, top: f64) -> bool {
    (0.0..IMAGE_WIDTH).contains(&left) && (0.0..IMAGE_HEIGHT).contains(&top)
}

/// Shaded stand-in used when no image is available.
pub fn placeholder(left: f64, top: f64) -> Option<Rgb> {
    if !on_image(left, top) {
        return None;
    }

    let on_grid = (left % PLACEHOLDER_GRID) < 1.0 || (top % PLACEHOLDER_GRID) < 2.0;
    Some(if on_grid {
        PLACEHOLDER_LINE
    } else {
        PLACEHOLDER_FILL
    })
}

/// Colors of the upper and lower half of a cell, or `None` when the whole
/// cell is off the image.
pub fn cell_shades(
    viewport: &Viewport,
    background: Option<&Background>,
    col: u16,
    row: u16,
    extent: Extent,
) -> Option<[Option<Rgb>; 2]> {
    let shade = |row_offset: f64| {
        let (left, top) =
            viewport.to_layout(f64::from(col) + 0.5, f64::from(row) + row_offset, extent)?;
        match background {
            Some(background) => background.sample(left, top),
            None => placeholder(left, top),
        }
    };

    let halves = [shade(0.25), shade(0.75)];
    halves.iter().any(Option::is_some).then_some(halves)
}

// Shared model for the terminal and web front ends
pub mod dataset;
pub mod domain;
pub mod loader;
pub mod overlay;
pub mod raster;
pub mod selection;
pub mod view;
pub mod viewport;

pub use dataset::{DataFetchError, Dataset, Point};
pub use domain::{Direction, Speed};
pub use loader::{Applied, FetchTicket, LoadStatus};
pub use overlay::{Bounds, ImageAsset, Label, LabelPlacement, RenderedOverlay};
pub use raster::{Background, Rgb};
pub use selection::{DatasetKey, Selection, SelectionError};
pub use view::WindOverlayView;
pub use viewport::{CellLabel, Extent, Viewport};

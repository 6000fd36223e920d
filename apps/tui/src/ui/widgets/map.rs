use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;
use wind_overlay_core::raster::{cell_shades, LABEL_RGB};
use wind_overlay_core::{Background, Extent, RenderedOverlay, Rgb, Viewport};

const LABEL_COLOR: Color = rgb(LABEL_RGB);

const fn rgb([r, g, b]: Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Campus image with the wind labels on top, seen through a viewport.
///
/// Each cell shows two image rows with an upper half block. Labels are
/// written over the image and centered on their projected position.
pub struct OverlayMap<'a> {
    overlay: &'a RenderedOverlay,
    viewport: &'a Viewport,
    background: Option<&'a Background>,
}

impl<'a> OverlayMap<'a> {
    pub const fn new(
        overlay: &'a RenderedOverlay,
        viewport: &'a Viewport,
        background: Option<&'a Background>,
    ) -> Self {
        Self {
            overlay,
            viewport,
            background,
        }
    }

    fn render_background(&self, area: Rect, buf: &mut Buffer, extent: Extent) {
        for row in 0..area.height {
            for col in 0..area.width {
                let Some([upper, lower]) =
                    cell_shades(self.viewport, self.background, col, row, extent)
                else {
                    continue;
                };

                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("▀")
                        .set_fg(upper.map_or(Color::Reset, rgb))
                        .set_bg(lower.map_or(Color::Reset, rgb));
                }
            }
        }
    }

    fn render_labels(&self, area: Rect, buf: &mut Buffer, extent: Extent) {
        let style = Style::default()
            .fg(LABEL_COLOR)
            .add_modifier(Modifier::BOLD);

        for label in &self.overlay.labels {
            for (col, row, ch) in self.viewport.label_cells(&label.text, label.placement, extent) {
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(ch).set_style(style);
                }
            }
        }
    }
}

impl Widget for OverlayMap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let extent = Extent::new(area.width, area.height);
        self.render_background(area, buf, extent);
        self.render_labels(area, buf, extent);
    }
}

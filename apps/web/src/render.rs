use ratzilla::ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use wind_overlay_core::raster::{cell_shades, LABEL_RGB};
use wind_overlay_core::{Extent, LoadStatus, Rgb};

use crate::controls::{Focus, WebState};

const fn rgb([r, g, b]: Rgb) -> Color {
    Color::Rgb(r, g, b)
}

pub fn draw(state: &mut WebState, f: &mut Frame<'_>) {
    let area = f.area();
    let block = Block::default()
        .title("NUST Campus Wind Visualization")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area).inner(Margin::new(1, 0));
    f.render_widget(block, area);

    let layout = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_selectors(state, f, layout[0]);

    let map_block = Block::default()
        .title(" Campus Map ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let map_area = map_block.inner(layout[1]);
    f.render_widget(map_block, layout[1]);
    state.map_extent = Extent::new(map_area.width, map_area.height);
    render_map(state, f.buffer_mut(), map_area);

    let (text, color) = status_line(state);
    f.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(color))),
        layout[2],
    );
    render_footer(f, layout[3]);
}

fn render_selectors(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(24)])
        .split(area);

    render_dropdown(
        f,
        chunks[0],
        "Speed",
        state.view.speed().as_str(),
        state.focus == Focus::Speed,
    );
    render_dropdown(
        f,
        chunks[1],
        "Direction",
        state.view.direction().label(),
        state.focus == Focus::Direction,
    );
}

fn render_dropdown(f: &mut Frame<'_>, area: Rect, title: &str, value: &str, focused: bool) {
    let border = if focused { Color::Yellow } else { Color::Gray };
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let line = TextLine::from(vec![
        Span::styled(format!(" {value} "), Style::default().fg(Color::White)),
        Span::styled(" ▾", Style::default().fg(border)),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

/// Campus image (or its placeholder) with the labels drawn over it.
pub fn render_map(state: &WebState, buf: &mut Buffer, area: Rect) {
    let extent = Extent::new(area.width, area.height);
    let viewport = &state.viewport;
    let background = state.background.as_ref();

    for row in 0..area.height {
        for col in 0..area.width {
            let Some([upper, lower]) = cell_shades(viewport, background, col, row, extent) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol("▀")
                    .set_fg(upper.map_or(Color::Reset, rgb))
                    .set_bg(lower.map_or(Color::Reset, rgb));
            }
        }
    }

    let style = Style::default()
        .fg(rgb(LABEL_RGB))
        .add_modifier(Modifier::BOLD);
    for label in state.view.overlay().labels {
        for (col, row, ch) in viewport.label_cells(&label.text, label.placement, extent) {
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }
}

pub fn status_line(state: &WebState) -> (String, Color) {
    let path = state.view.selection().key().asset_path();
    match state.view.status() {
        LoadStatus::Idle => ("Waiting for a selection".to_string(), Color::Gray),
        LoadStatus::Loading => (format!("Loading {path}..."), Color::Cyan),
        LoadStatus::Ready => (
            format!("{} points from {path}", state.view.dataset().len()),
            Color::Green,
        ),
        LoadStatus::Failed => (
            format!(
                "Failed to load {path}: {}",
                state.view.last_error().unwrap_or("unknown error")
            ),
            Color::Red,
        ),
    }
}

fn render_footer(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default().fg(Color::Yellow);
    let line = TextLine::from(vec![
        Span::styled("←/→", key_style),
        Span::raw(" selector  "),
        Span::styled("↑/↓", key_style),
        Span::raw(" change  "),
        Span::styled("hjkl", key_style),
        Span::raw(" pan  "),
        Span::styled("+/-/0", key_style),
        Span::raw(" zoom  "),
        Span::styled("r", key_style),
        Span::raw(" reload"),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use wind_overlay_core::{Direction, Speed};

use crate::app::Focus;

pub fn render_selectors(
    f: &mut Frame<'_>,
    area: Rect,
    speed: Speed,
    direction: Direction,
    focus: Focus,
) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(24)])
        .split(area);

    render_dropdown(
        f,
        chunks[0],
        "Speed",
        speed.as_str(),
        speed.index(),
        Speed::ALL.len(),
        focus == Focus::Speed,
    );
    render_dropdown(
        f,
        chunks[1],
        "Direction",
        direction.label(),
        direction.index(),
        Direction::ALL.len(),
        focus == Focus::Direction,
    );
}

fn render_dropdown(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    value: &str,
    index: usize,
    len: usize,
    focused: bool,
) {
    let border = if focused { Color::Yellow } else { Color::Gray };
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let value_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let line = TextLine::from(vec![
        Span::styled(format!(" {value} "), value_style),
        Span::styled(" ▾", Style::default().fg(border)),
        Span::styled(
            format!("  {}/{len}", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

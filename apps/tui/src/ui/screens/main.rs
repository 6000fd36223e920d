use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;
use wind_overlay_core::{Extent, LoadStatus};

use crate::app::App;
use crate::ui::widgets::map::OverlayMap;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use crate::ui::widgets::selectors::render_selectors;

pub fn render_main(app: &mut App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Length(3), // Selectors
            Constraint::Min(6),    // Map
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title_section(f, main_layout[0]);
    render_selectors(
        f,
        main_layout[1],
        app.view.speed(),
        app.view.direction(),
        app.focus,
    );
    render_map_section(app, f, main_layout[2]);
    render_status_section(app, f, main_layout[3]);
    render_shortcuts(f, main_layout[4]);

    if app.show_help {
        render_help_popup(f, f.area());
    }
}

fn render_title_section(f: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "NUST Campus ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Wind Visualization Dashboard",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .alignment(Alignment::Left);

    f.render_widget(title, area);
}

fn render_map_section(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let key = app.view.selection().key();
    let block = Block::default()
        .title(" Campus Map ")
        .title_bottom(
            TextLine::from(format!(
                " {}  zoom {} ",
                key.asset_path(),
                app.viewport.zoom()
            ))
            .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    app.map_extent = Extent::new(inner.width, inner.height);
    app.map_area = inner;

    let overlay = app.view.overlay();
    f.render_widget(
        OverlayMap::new(&overlay, &app.viewport, app.background.as_ref()),
        inner,
    );
}

fn render_status_section(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(status_color(app.view.status())));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let key = app.view.selection().key();
    if app.view.status() == LoadStatus::Loading {
        let throbber = Throbber::default()
            .label(format!("Loading {}", key.asset_path()))
            .style(Style::default().fg(Color::Cyan));
        f.render_stateful_widget(throbber, inner, &mut app.throbber);
        return;
    }

    let summary = match app.view.status() {
        LoadStatus::Idle => "Waiting for a selection".to_string(),
        LoadStatus::Loading => String::new(),
        LoadStatus::Ready => format!(
            "{} points from {}",
            app.view.dataset().len(),
            key.asset_path()
        ),
        LoadStatus::Failed => "No data for this selection".to_string(),
    };

    let mut spans = vec![Span::styled(
        summary,
        Style::default().fg(status_color(app.view.status())),
    )];
    if !app.status_message.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::Gray),
        ));
    }

    f.render_widget(Paragraph::new(TextLine::from(spans)), inner);
}

const fn status_color(status: LoadStatus) -> Color {
    match status {
        LoadStatus::Idle => Color::Gray,
        LoadStatus::Loading => Color::Cyan,
        LoadStatus::Ready => Color::Green,
        LoadStatus::Failed => Color::Red,
    }
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Gray);

    let line = TextLine::from(vec![
        Span::styled("Tab", key_style),
        Span::styled(": Switch selector | ", text_style),
        Span::styled("↑/↓", key_style),
        Span::styled(": Change | ", text_style),
        Span::styled("hjkl", key_style),
        Span::styled(": Pan | ", text_style),
        Span::styled("+/-", key_style),
        Span::styled(": Zoom | ", text_style),
        Span::styled("?", key_style),
        Span::styled(": Help | ", text_style),
        Span::styled("q", key_style),
        Span::styled(": Quit", text_style),
    ]);

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn shortcut(key: &'static str, text: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            key,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(text),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(vec![Span::styled(
            "Campus Wind Overlay",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "Pick a wind speed and direction; the matching simulation is loaded and its samples are drawn over the campus image.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        shortcut("  Tab / ←/→", " - Switch between Speed and Direction"),
        shortcut("  ↑/↓", " - Previous / next option"),
        shortcut("  1 / 2", " - Speed 1ms / 5ms"),
        shortcut("  h j k l", " - Pan the map (mouse drag works too)"),
        shortcut("  + / -", " - Zoom in / out"),
        shortcut("  0", " - Reset the view"),
        shortcut("  r", " - Reload the current dataset"),
        shortcut("  ? / F1", " - Toggle this help popup"),
        shortcut("  q / Esc", " - Quit application"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "CLI Options:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}

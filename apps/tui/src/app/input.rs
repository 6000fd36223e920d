use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::state::App;

/// Cells moved per pan key press.
const PAN_STEP: f64 = 4.0;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if handle_help_toggle(app, key) {
        return;
    }

    handle_main_input(app, key);
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) || key == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

fn handle_main_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            app.focus = app.focus.toggle();
        }
        KeyCode::Up => app.prev_option(),
        KeyCode::Down => app.next_option(),
        KeyCode::Char('1') => app.select_speed("1ms"),
        KeyCode::Char('2') => app.select_speed("5ms"),
        KeyCode::Char('h') => app.pan(-PAN_STEP, 0.0),
        KeyCode::Char('l') => app.pan(PAN_STEP, 0.0),
        KeyCode::Char('k') => app.pan(0.0, -PAN_STEP),
        KeyCode::Char('j') => app.pan(0.0, PAN_STEP),
        KeyCode::Char('+' | '=') => app.viewport.zoom_in(),
        KeyCode::Char('-') => app.viewport.zoom_out(),
        KeyCode::Char('0') => app.viewport.reset(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
        }
        _ => {}
    }
}

/// Dragging moves the map with the cursor; labels never take the pointer.
pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let on_map = app
                .map_area
                .contains(Position::new(event.column, event.row));
            app.drag_origin = on_map.then_some((event.column, event.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some((column, row)) = app.drag_origin {
                let dx = f64::from(event.column) - f64::from(column);
                let dy = f64::from(event.row) - f64::from(row);
                app.pan(-dx, -dy);
                app.drag_origin = Some((event.column, event.row));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.drag_origin = None;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{handle_input, handle_mouse};
    use crate::app::state::{App, Focus};
    use crate::config::{resolve, SourceConfig};
    use crate::source::DataSource;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::layout::Rect;
    use wind_overlay_core::{Direction, Extent, LoadStatus, Speed};

    fn app() -> App {
        let config = resolve(|_| None, None, None).unwrap();
        let source = DataSource::from_config(
            &SourceConfig::Directory(std::env::temp_dir().join("wind-overlay-missing")),
            config.timeout,
        )
        .unwrap();
        let mut app = App::new(&config, source);
        app.map_extent = Extent::new(80, 40);
        app.map_area = Rect::new(1, 8, 80, 40);
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test]
    async fn arrows_drive_the_focused_selector() {
        let mut app = app();
        assert_eq!(app.focus, Focus::Direction);

        handle_input(&mut app, KeyCode::Down);
        assert_eq!(app.view.direction(), Direction::West);
        assert_eq!(app.view.status(), LoadStatus::Loading);

        handle_input(&mut app, KeyCode::Tab);
        handle_input(&mut app, KeyCode::Down);
        assert_eq!(app.view.speed(), Speed::FiveMs);
    }

    #[tokio::test]
    async fn number_keys_pick_speed() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('2'));
        assert_eq!(app.view.speed(), Speed::FiveMs);
        assert_eq!(app.focus, Focus::Speed);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        handle_input(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        handle_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);

        handle_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn zoom_and_pan_keys_move_viewport() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('+'));
        assert_eq!(app.viewport.zoom(), 1);

        let before = app.viewport.center();
        handle_input(&mut app, KeyCode::Char('j'));
        assert!(app.viewport.center().1 > before.1);

        handle_input(&mut app, KeyCode::Char('0'));
        assert_eq!(app.viewport.zoom(), 0);
    }

    #[test]
    fn dragging_pans_against_cursor_motion() {
        let mut app = app();
        app.viewport.zoom_in();
        let before = app.viewport.center();

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 10, 14));
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 10, 14));

        assert!(app.viewport.center().1 < before.1);
        assert_eq!(app.drag_origin, None);
    }

    #[test]
    fn drags_starting_outside_the_map_do_not_pan() {
        let mut app = app();
        app.viewport.zoom_in();
        let before = app.viewport.center();

        // Row 4 is the selector row, above the map panel.
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 10, 4));
        assert_eq!(app.drag_origin, None);
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 10, 12));

        assert_eq!(app.viewport.center(), before);
    }
}

mod controls;
mod fetch;
mod render;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::event::KeyCode;
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen_futures::spawn_local;
use wind_overlay_core::{Applied, Background, FetchTicket};

use crate::controls::{Control, WebState};
use crate::fetch::{fetch_bytes, fetch_dataset};

type SharedState = Rc<RefCell<WebState>>;

fn main() -> io::Result<()> {
    let state: SharedState = Rc::new(RefCell::new(WebState::default()));

    let ticket = state.borrow_mut().view.start();
    spawn_local(load_dataset(state.clone(), ticket));
    spawn_local(load_background(state.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = state.clone();
        move |event| {
            let control = match event.code {
                KeyCode::Left | KeyCode::Right => Some(Control::ToggleFocus),
                KeyCode::Up => Some(Control::Prev),
                KeyCode::Down => Some(Control::Next),
                KeyCode::Char(c) => Control::from_char(c),
                _ => None,
            };
            let Some(control) = control else {
                return;
            };

            let ticket = state.borrow_mut().apply(control);
            if let Some(ticket) = ticket {
                spawn_local(load_dataset(state.clone(), ticket));
            }
        }
    });

    terminal.draw_web(move |f| render::draw(&mut state.borrow_mut(), f));

    Ok(())
}

async fn load_dataset(state: SharedState, ticket: FetchTicket) {
    let path = ticket.key.asset_path();
    let result = fetch_dataset(&path).await;

    if let Err(error) = &result {
        web_sys::console::error_1(&format!("Failed to load {path}: {error}").into());
    }

    let applied = state.borrow_mut().view.apply(&ticket, result);
    if applied == Applied::Stale {
        web_sys::console::debug_1(&format!("Ignored stale response for {path}").into());
    }
}

/// Until this resolves the map shows the grid placeholder.
async fn load_background(state: SharedState) {
    let url = state.borrow().view.image().url.clone();
    let decoded = match fetch_bytes(&url).await {
        Ok(bytes) => Background::from_bytes(&bytes).map_err(|error| error.to_string()),
        Err(error) => Err(error.to_string()),
    };

    match decoded {
        Ok(background) => state.borrow_mut().background = Some(background),
        Err(error) => {
            web_sys::console::error_1(&format!("Failed to load {url}: {error}").into());
        }
    }
}

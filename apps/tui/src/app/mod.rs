// App module for wind-overlay
// Handles application state and input

pub mod input;
pub mod state;

pub use input::{handle_input, handle_mouse};
pub use state::{App, Focus};

mod loop_handler;

pub use loop_handler::{headless_overlay, run, run_headless, HeadlessOverlay};

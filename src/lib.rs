//! Page Tetris core crate.
//!
//! A Tetris game that mounts itself as an overlay on whatever page loads the
//! WASM module: a 10×20 board on a canvas, a speed slider and a restart button.
//! The gameplay modules (`board`, `piece`, `game`, `session`) are plain Rust
//! and run natively under `cargo test`; only `overlay` and `logging` touch the
//! browser.

use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod piece;
pub mod render;
pub mod session;

mod logging;
mod overlay;

pub use board::Board;
pub use error::GameError;
pub use game::{Command, GameState, Status, StepOutcome};
pub use piece::{Color, Piece, PieceGenerator, Shape, ShapeKind};
pub use session::{Host, Session};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(config::LOG_LEVEL);
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Mount the overlay on the current page and start a game. Calling it again
/// restarts the existing game.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    overlay::start().map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn restart_game() {
    overlay::restart();
}

/// Same as dragging the slider to `value` (clamped to 100..=1000).
#[wasm_bindgen]
pub fn set_speed(value: u32) {
    overlay::set_speed(config::SpeedSetting::new(value));
}

/// Current game state as JSON, or `undefined` before `start_game`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn game_snapshot() -> Option<String> {
    overlay::snapshot_json()
}

//! Build-time configuration: grid geometry, timing, and the DOM layout of the
//! overlay. Nothing here is adjustable at runtime except through the speed
//! slider, which is modelled by [`SpeedSetting`].

/// Number of columns on the board.
pub const COLS: usize = 10;
/// Number of rows on the board.
pub const ROWS: usize = 20;
/// Edge length of one cell in canvas pixels.
pub const CELL_SIZE: u32 = 40;

/// Canvas size follows the grid so the whole board is visible.
pub const CANVAS_WIDTH: u32 = COLS as u32 * CELL_SIZE;
pub const CANVAS_HEIGHT: u32 = ROWS as u32 * CELL_SIZE;

/// Column where new pieces appear (top-left corner of the shape).
pub const SPAWN_X: i32 = 3;
pub const SPAWN_Y: i32 = 0;

// --- Timing ---------------------------------------------------------------

pub const SPEED_MIN: u32 = 100;
pub const SPEED_MAX: u32 = 1000;
/// The step delay is `SPEED_BASE_MS - slider value`.
pub const SPEED_BASE_MS: u32 = 1000;
pub const DEFAULT_DELAY_MS: u32 = 500;

// --- Overlay DOM ----------------------------------------------------------

pub const CONTAINER_ID: &str = "page-tetris-container";
pub const CANVAS_ID: &str = "page-tetris-canvas";
pub const SLIDER_ID: &str = "page-tetris-speed";
pub const RESTART_ID: &str = "page-tetris-restart";

pub const RESTART_LABEL: &str = "Restart Game";
pub const GAME_OVER_MESSAGE: &str = "Game Over";

pub const CONTAINER_STYLE: &str = "position:fixed; top:50%; left:50%; transform:translate(-50%,-50%); width:400px; height:800px; background-color:black; z-index:10000; resize:both; overflow:auto;";
pub const SLIDER_STYLE: &str =
    "position:fixed; top:10px; left:50%; transform:translateX(-50%); z-index:10001;";
pub const RESTART_STYLE: &str =
    "position:fixed; top:50px; left:50%; transform:translateX(-50%); z-index:10001;";

/// Console verbosity installed by [`crate::logging::init`].
#[cfg(debug_assertions)]
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;
#[cfg(not(debug_assertions))]
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

/// Position of the speed slider, always within `[SPEED_MIN, SPEED_MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedSetting(u32);

impl SpeedSetting {
    /// Clamp a raw slider value into range.
    pub fn new(value: u32) -> Self {
        Self(value.clamp(SPEED_MIN, SPEED_MAX))
    }

    /// Parse the string value of an `<input type="range">`. Browsers may hand
    /// back fractional values, which are truncated.
    pub fn parse(raw: &str) -> Option<Self> {
        let value: f64 = raw.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Self::new(value.max(0.0) as u32))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Higher slider values mean shorter delays (faster drops).
    pub fn delay_ms(self) -> u32 {
        SPEED_BASE_MS - self.0
    }
}

impl Default for SpeedSetting {
    fn default() -> Self {
        Self(SPEED_BASE_MS - DEFAULT_DELAY_MS)
    }
}

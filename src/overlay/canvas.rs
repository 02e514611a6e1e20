use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlInputElement, Window};

use super::timer::StepTimer;
use crate::config::{GAME_OVER_MESSAGE, SpeedSetting};
use crate::error::GameError;
use crate::game::GameState;
use crate::piece::Color;
use crate::render::{Surface, render};
use crate::session::{Host, Session};

struct CanvasSurface<'a>(&'a CanvasRenderingContext2d);

impl Surface for CanvasSurface<'_> {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.0.clear_rect(x, y, w, h);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.0.set_fill_style(&JsValue::from_str(color.css()));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.0.fill_rect(x, y, w, h);
    }
}

/// Browser host: draws on the overlay canvas, alerts on game over and
/// schedules steps with `setTimeout`.
pub struct CanvasHost {
    window: Window,
    ctx: CanvasRenderingContext2d,
    slider: HtmlInputElement,
    /// Timer whose callback is running or has just run.
    spent: Option<StepTimer>,
}

impl CanvasHost {
    pub fn new(window: Window, ctx: CanvasRenderingContext2d, slider: HtmlInputElement) -> Self {
        Self {
            window,
            ctx,
            slider,
            spent: None,
        }
    }

    /// Move the slider thumb without emitting an `input` event.
    pub fn show_speed(&self, speed: SpeedSetting) {
        self.slider.set_value(&speed.value().to_string());
    }
}

impl Host for CanvasHost {
    type Task = StepTimer;

    fn draw(&mut self, state: &GameState) {
        render(state, &mut CanvasSurface(&self.ctx));
    }

    fn announce_game_over(&mut self) -> Result<(), GameError> {
        self.window.alert_with_message(GAME_OVER_MESSAGE)?;
        Ok(())
    }

    fn schedule_step(&mut self, delay_ms: u32) -> Result<StepTimer, GameError> {
        StepTimer::schedule(&self.window, delay_ms, || {
            super::with_session(Session::on_timer)
        })
    }

    fn reset_controls(&mut self) {
        self.show_speed(SpeedSetting::default());
    }

    fn retire(&mut self, task: StepTimer) {
        // the previous timer's callback has returned by now
        self.spent = Some(task);
    }
}

//! The game loop driver. A [`Session`] owns the [`GameState`] and at most one
//! pending step task; the [`Host`] supplies drawing, the game-over notice and
//! the timer. Dropping a task must cancel it, so replacing or clearing
//! `pending` is how restart and game over stop the previous loop.

use log::info;

use crate::error::GameError;
use crate::game::{Command, GameState, StepOutcome};

pub trait Host {
    /// Handle for a scheduled step. Dropping it cancels the step.
    type Task;

    fn draw(&mut self, state: &GameState);
    fn announce_game_over(&mut self) -> Result<(), GameError>;
    /// Arrange for [`Session::on_timer`] to run after `delay_ms`.
    fn schedule_step(&mut self, delay_ms: u32) -> Result<Self::Task, GameError>;
    /// Put host controls (the speed slider) back to their defaults.
    fn reset_controls(&mut self) {}
    /// Take back the task whose step is running now. Its callback may still
    /// be on the stack, so a host whose task owns that callback keeps it
    /// alive until the next one arrives.
    fn retire(&mut self, task: Self::Task) {
        drop(task);
    }
}

pub struct Session<H: Host> {
    state: GameState,
    host: H,
    pending: Option<H::Task>,
}

impl<H: Host> Session<H> {
    pub fn new(state: GameState, host: H) -> Self {
        Self {
            state,
            host,
            pending: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Whether an automatic step is scheduled.
    pub fn is_step_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin the loop with the current state: run one step right away and
    /// schedule the next.
    pub fn start(&mut self) -> Result<(), GameError> {
        info!("game started");
        self.advance()
    }

    /// Drop any pending step, reinitialise, and start again.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.pending = None;
        self.state.reset();
        self.host.reset_controls();
        info!("game restarted");
        self.advance()
    }

    /// Timer callback entry point.
    pub fn on_timer(&mut self) -> Result<(), GameError> {
        if let Some(fired) = self.pending.take() {
            self.host.retire(fired);
        }
        self.advance()
    }

    pub fn dispatch(&mut self, command: Command) -> Result<(), GameError> {
        if command == Command::Restart {
            return self.restart();
        }
        let was_running = self.state.is_running();
        if self.state.apply(command) {
            self.host.draw(&self.state);
        }
        if was_running && !self.state.is_running() {
            return self.finish();
        }
        Ok(())
    }

    fn advance(&mut self) -> Result<(), GameError> {
        if !self.state.is_running() {
            return Ok(());
        }
        let outcome = self.state.step();
        self.host.draw(&self.state);
        if let StepOutcome::ToppedOut { .. } = outcome {
            return self.finish();
        }
        let task = self.host.schedule_step(self.state.delay_ms())?;
        self.pending = Some(task);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), GameError> {
        self.pending = None;
        self.host.announce_game_over()
    }
}

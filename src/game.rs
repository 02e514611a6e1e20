//! Game state machine: the active piece, the board, and the step logic shared
//! by the timer and the soft-drop key.

use log::{debug, info};

use crate::board::{Board, Cell};
use crate::config::SpeedSetting;
use crate::piece::{Color, Piece, PieceGenerator, ShapeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Running,
    GameOver,
}

/// Everything the host can ask of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    SetSpeed(SpeedSetting),
    Restart,
}

/// Result of one downward step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The piece moved one row down.
    Fell,
    /// The piece landed; a new one spawned.
    Landed { lines: usize },
    /// The piece landed and the next spawn is blocked.
    ToppedOut { lines: usize },
    /// Nothing happens after game over.
    Idle,
}

pub struct GameState {
    board: Board,
    piece: Piece,
    status: Status,
    speed: SpeedSetting,
    lines_cleared: u32,
    generator: PieceGenerator,
}

impl GameState {
    /// Fresh game in the `Running` state.
    pub fn new(mut generator: PieceGenerator) -> Self {
        let piece = generator.next_piece();
        Self {
            board: Board::new(),
            piece,
            status: Status::Running,
            speed: SpeedSetting::default(),
            lines_cleared: 0,
            generator,
        }
    }

    /// Start over: empty board, new piece, default speed, running.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.piece = self.generator.next_piece();
        self.status = Status::Running;
        self.speed = SpeedSetting::default();
        self.lines_cleared = 0;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn speed(&self) -> SpeedSetting {
        self.speed
    }

    /// Milliseconds until the next automatic step.
    pub fn delay_ms(&self) -> u32 {
        self.speed.delay_ms()
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Replace the board and active piece. Used to stage positions in tests and
    /// demos; the piece is accepted as-is even when it collides.
    pub fn load(&mut self, board: Board, piece: Piece) {
        self.board = board;
        self.piece = piece;
        self.status = Status::Running;
    }

    /// Shift the piece; reverted when the target position collides.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let moved = self.piece.shifted(dx, dy);
        if self.board.is_collision(&moved) {
            return false;
        }
        self.piece = moved;
        true
    }

    /// Quarter turn clockwise in place; no wall kicks.
    pub fn rotate(&mut self) -> bool {
        let rotated = self.piece.rotated();
        if self.board.is_collision(&rotated) {
            return false;
        }
        self.piece = rotated;
        true
    }

    pub fn set_speed(&mut self, speed: SpeedSetting) {
        debug!("step delay set to {}ms", speed.delay_ms());
        self.speed = speed;
    }

    /// One loop step: fall one row, or land, clear lines and spawn.
    pub fn step(&mut self) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Idle;
        }
        if self.try_move(0, 1) {
            return StepOutcome::Fell;
        }

        self.board.merge(&self.piece);
        let lines = self.board.clear_lines();
        self.lines_cleared += lines as u32;
        debug!(
            "{:?} landed at ({}, {}), {} line(s) cleared",
            self.piece.kind, self.piece.x, self.piece.y, lines
        );

        self.piece = self.generator.next_piece();
        if self.board.is_collision(&self.piece) {
            self.status = Status::GameOver;
            info!("game over after {} line(s)", self.lines_cleared);
            return StepOutcome::ToppedOut { lines };
        }
        StepOutcome::Landed { lines }
    }

    /// Apply a gameplay command. `Restart` resets in place; callers that own a
    /// timer should cancel it as well. Returns true when the board should be
    /// redrawn.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::SetSpeed(speed) => {
                self.set_speed(speed);
                false
            }
            Command::Restart => {
                self.reset();
                true
            }
            _ if !self.is_running() => false,
            Command::MoveLeft => {
                self.try_move(-1, 0);
                true
            }
            Command::MoveRight => {
                self.try_move(1, 0);
                true
            }
            Command::Rotate => {
                self.rotate();
                true
            }
            Command::SoftDrop => {
                self.step();
                true
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.rows().iter().map(|r| r.to_vec()).collect(),
            piece: PieceSnapshot {
                kind: self.piece.kind,
                color: self.piece.color,
                x: self.piece.x,
                y: self.piece.y,
                cells: self.piece.cells().collect(),
            },
            status: self.status,
            delay_ms: self.delay_ms(),
            lines_cleared: self.lines_cleared,
        }
    }
}

/// Plain-data view of the game for debugging hooks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub board: Vec<Vec<Cell>>,
    pub piece: PieceSnapshot,
    pub status: Status,
    pub delay_ms: u32,
    pub lines_cleared: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub color: Color,
    pub x: i32,
    pub y: i32,
    pub cells: Vec<(i32, i32)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{COLS, ROWS};

    fn game_with(kind: ShapeKind) -> GameState {
        let mut g = GameState::new(PieceGenerator::with_seed(1));
        g.load(Board::new(), Piece::spawn(kind, Color::PaleGreen));
        g
    }

    #[test]
    fn new_game_is_running_with_default_delay() {
        let g = GameState::new(PieceGenerator::with_seed(3));
        assert!(g.is_running());
        assert_eq!(g.delay_ms(), 500);
        assert_eq!(g.board(), &Board::new());
        assert_eq!((g.piece().x, g.piece().y), (3, 0));
    }

    #[test]
    fn blocked_move_leaves_piece_untouched() {
        let mut g = game_with(ShapeKind::I);
        for _ in 0..3 {
            assert!(g.try_move(-1, 0));
        }
        let before = *g.piece();
        assert!(!g.try_move(-1, 0));
        assert_eq!(*g.piece(), before);
    }

    #[test]
    fn blocked_rotation_leaves_piece_untouched() {
        let mut g = game_with(ShapeKind::I);
        // vertical bar cannot fit in the bottom row
        while g.try_move(0, 1) {}
        let before = *g.piece();
        assert!(!g.rotate());
        assert_eq!(*g.piece(), before);
    }

    #[test]
    fn rotation_next_to_wall_is_rejected_not_kicked() {
        let mut g = game_with(ShapeKind::I);
        g.rotate();
        assert!(g.try_move(0, 1));
        while g.try_move(1, 0) {}
        assert_eq!(g.piece().x, 9);
        let before = *g.piece();
        assert!(!g.rotate());
        assert_eq!(*g.piece(), before);
    }

    #[test]
    fn step_falls_then_lands() {
        let mut g = game_with(ShapeKind::O);
        for _ in 0..18 {
            assert_eq!(g.step(), StepOutcome::Fell);
        }
        assert_eq!(g.step(), StepOutcome::Landed { lines: 0 });
        assert_eq!(g.board().get(3, 18), Some(Some(Color::PaleGreen)));
        assert_eq!(g.board().get(4, 19), Some(Some(Color::PaleGreen)));
        assert_eq!((g.piece().x, g.piece().y), (3, 0));
    }

    #[test]
    fn commands_are_ignored_after_game_over() {
        let mut rows = [[None; COLS]; ROWS];
        for row in rows.iter_mut().take(2) {
            row[3..7].copy_from_slice(&[Some(Color::Plum); 4]);
        }
        let mut g = GameState::new(PieceGenerator::with_seed(5));
        // piece sitting on top of the stack cannot move down
        g.load(
            Board::from_rows(rows),
            Piece::spawn(ShapeKind::O, Color::SkyBlue).shifted(0, -2),
        );
        assert!(matches!(g.step(), StepOutcome::ToppedOut { .. }));
        assert_eq!(g.status(), Status::GameOver);

        let frozen = *g.piece();
        let board = g.board().clone();
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::Rotate,
            Command::SoftDrop,
        ] {
            assert!(!g.apply(cmd));
        }
        assert_eq!(*g.piece(), frozen);
        assert_eq!(g.board(), &board);
        assert_eq!(g.step(), StepOutcome::Idle);
    }

    #[test]
    fn restart_resets_everything() {
        let mut g = game_with(ShapeKind::T);
        g.apply(Command::SetSpeed(SpeedSetting::new(900)));
        while g.step() == StepOutcome::Fell {}
        assert_ne!(g.board(), &Board::new());

        assert!(g.apply(Command::Restart));
        assert!(g.is_running());
        assert_eq!(g.board(), &Board::new());
        assert_eq!(g.delay_ms(), 500);
        assert_eq!(g.lines_cleared(), 0);
    }

    #[test]
    fn set_speed_does_not_request_redraw() {
        let mut g = game_with(ShapeKind::S);
        assert!(!g.apply(Command::SetSpeed(SpeedSetting::new(200))));
        assert_eq!(g.delay_ms(), 800);
    }

    #[test]
    fn snapshot_mirrors_state() {
        let g = game_with(ShapeKind::J);
        let snap = g.snapshot();
        assert_eq!(snap.board.len(), ROWS);
        assert_eq!(snap.piece.kind, ShapeKind::J);
        assert_eq!(snap.piece.cells, vec![(3, 0), (4, 0), (5, 0), (5, 1)]);
        assert_eq!(snap.status, Status::Running);
        assert_eq!(snap.delay_ms, 500);
    }
}

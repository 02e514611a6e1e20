//! Full-frame renderer. Every call clears the surface and repaints the board
//! and the active piece.

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, CELL_SIZE};
use crate::game::GameState;
use crate::piece::Color;

/// The subset of a 2D drawing API the renderer needs. Implemented by the
/// canvas context in the browser.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_fill_color(&mut self, color: Color);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

pub fn render<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

    for (x, y, color) in state.board().occupied() {
        fill_cell(surface, x as i32, y as i32, color);
    }

    let piece = state.piece();
    for (x, y) in piece.cells() {
        fill_cell(surface, x, y, piece.color);
    }
}

fn fill_cell<S: Surface + ?Sized>(surface: &mut S, x: i32, y: i32, color: Color) {
    let size = CELL_SIZE as f64;
    surface.set_fill_color(color);
    surface.fill_rect(x as f64 * size, y as f64 * size, size, size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::piece::{Piece, PieceGenerator, ShapeKind};

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(f64, f64, f64, f64),
        Fill(Color, f64, f64, f64, f64),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
        fill: Option<Color>,
    }

    impl Surface for Recorder {
        fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
            self.ops.push(Op::Clear(x, y, w, h));
        }
        fn set_fill_color(&mut self, color: Color) {
            self.fill = Some(color);
        }
        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
            let color = self.fill.expect("fill color set before fill_rect");
            self.ops.push(Op::Fill(color, x, y, w, h));
        }
    }

    #[test]
    fn clears_then_paints_board_then_piece() {
        let mut board = Board::new();
        board.set(0, 19, Some(Color::Plum));
        let mut state = GameState::new(PieceGenerator::with_seed(11));
        state.load(board, Piece::spawn(ShapeKind::O, Color::SkyBlue));

        let mut rec = Recorder::default();
        render(&state, &mut rec);

        assert_eq!(
            rec.ops,
            vec![
                Op::Clear(0.0, 0.0, 400.0, 800.0),
                Op::Fill(Color::Plum, 0.0, 760.0, 40.0, 40.0),
                Op::Fill(Color::SkyBlue, 120.0, 0.0, 40.0, 40.0),
                Op::Fill(Color::SkyBlue, 160.0, 0.0, 40.0, 40.0),
                Op::Fill(Color::SkyBlue, 120.0, 40.0, 40.0, 40.0),
                Op::Fill(Color::SkyBlue, 160.0, 40.0, 40.0, 40.0),
            ]
        );
    }

    #[test]
    fn every_frame_is_a_full_redraw() {
        let state = GameState::new(PieceGenerator::with_seed(2));
        let mut rec = Recorder::default();
        render(&state, &mut rec);
        render(&state, &mut rec);
        let clears = rec.ops.iter().filter(|op| matches!(op, Op::Clear(..))).count();
        assert_eq!(clears, 2);
        assert_eq!(rec.ops.len(), 10);
    }
}

//! Castling validation.
//!
//! Only king moves of exactly two files along the back row reach this module.
//! Cheap occupancy conditions are tested before any attack scan.

use crate::board::Board;
use crate::check::{is_check, is_square_attacked};
use crate::move_log::MoveLog;
use crate::types::*;

/// Which rook the king castles with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    /// Side implied by a king move from `from` to `to`, if it is a castling shape
    pub fn of_move(from: Position, to: Position) -> Option<CastlingSide> {
        if from.row != to.row {
            return None;
        }
        match to.col as i32 - from.col as i32 {
            2 => Some(CastlingSide::KingSide),
            -2 => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }

    /// Column of the rook this side castles with
    pub fn rook_col(self) -> usize {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    /// Column the rook lands on for a king arriving at `king_to_col`
    pub fn rook_target_col(self, king_to_col: usize) -> usize {
        match self {
            CastlingSide::KingSide => king_to_col - 1,
            CastlingSide::QueenSide => king_to_col + 1,
        }
    }

    fn step(self) -> i32 {
        match self {
            CastlingSide::KingSide => 1,
            CastlingSide::QueenSide => -1,
        }
    }
}

/// Cells strictly between the king and its rook; all must be empty
fn between_cells(king: Position, side: CastlingSide) -> Vec<Position> {
    let rook_col = side.rook_col();
    let (lo, hi) = if king.col < rook_col {
        (king.col + 1, rook_col)
    } else {
        (rook_col + 1, king.col)
    };
    (lo..hi).map(|col| Position::new(king.row, col)).collect()
}

/// Cells the king crosses, destination included; none may be attacked
fn transit_cells(king: Position, side: CastlingSide) -> Vec<Position> {
    (1..=2)
        .filter_map(|i| king.offset(0, i * side.step()))
        .collect()
}

/// Whether the king on `from` may castle by moving to `to`
pub fn is_valid_castling(board: &Board, move_log: &MoveLog, from: Position, to: Position) -> bool {
    let Some(king) = board.piece_at(from) else {
        return false;
    };
    if king.kind != PieceKind::King || king.has_moved || !to.is_on_board() {
        return false;
    }
    let Some(side) = CastlingSide::of_move(from, to) else {
        return false;
    };

    let rook_cell = Position::new(from.row, side.rook_col());
    match board.piece_at(rook_cell) {
        Some(rook) if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved => {}
        _ => return false,
    }

    if !board.is_empty_at(to) || !between_cells(from, side).iter().all(|&c| board.is_empty_at(c)) {
        return false;
    }

    if is_check(board, move_log, king.color) {
        return false;
    }

    !transit_cells(from, side)
        .iter()
        .any(|&cell| is_square_attacked(board, move_log, cell, king.color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generator::is_valid_move;

    fn pos(name: &str) -> Position {
        Position::parse(name).unwrap()
    }

    fn place(board: &mut Board, name: &str, kind: PieceKind, color: Color) {
        board.set_piece_at(pos(name), Some(Piece::new(kind, color)));
    }

    /// Kings and rooks on their home cells, nothing else
    fn castling_board() -> Board {
        let mut board = Board::empty();
        place(&mut board, "e1", PieceKind::King, Color::White);
        place(&mut board, "a1", PieceKind::Rook, Color::White);
        place(&mut board, "h1", PieceKind::Rook, Color::White);
        place(&mut board, "e8", PieceKind::King, Color::Black);
        place(&mut board, "a8", PieceKind::Rook, Color::Black);
        place(&mut board, "h8", PieceKind::Rook, Color::Black);
        board
    }

    fn castles(board: &Board, from: &str, to: &str) -> bool {
        is_valid_castling(board, &MoveLog::new(), pos(from), pos(to))
    }

    #[test]
    fn explicit_cells_for_standard_layout() {
        assert_eq!(
            between_cells(pos("e1"), CastlingSide::KingSide),
            vec![pos("f1"), pos("g1")]
        );
        assert_eq!(
            between_cells(pos("e1"), CastlingSide::QueenSide),
            vec![pos("b1"), pos("c1"), pos("d1")]
        );
        assert_eq!(
            transit_cells(pos("e1"), CastlingSide::KingSide),
            vec![pos("f1"), pos("g1")]
        );
        assert_eq!(
            transit_cells(pos("e8"), CastlingSide::QueenSide),
            vec![pos("d8"), pos("c8")]
        );
    }

    #[test]
    fn both_sides_legal_when_clear() {
        let board = castling_board();
        assert!(castles(&board, "e1", "g1"));
        assert!(castles(&board, "e1", "c1"));
        assert!(castles(&board, "e8", "g8"));
        assert!(castles(&board, "e8", "c8"));
        assert!(is_valid_move(&board, &MoveLog::new(), pos("e1"), pos("g1")));
    }

    #[test]
    fn blocked_path_forbids_castling() {
        let mut board = castling_board();
        place(&mut board, "g1", PieceKind::Knight, Color::White);
        assert!(!castles(&board, "e1", "g1"));

        let mut board = castling_board();
        place(&mut board, "b1", PieceKind::Knight, Color::White);
        assert!(!castles(&board, "e1", "c1"));
        assert!(castles(&board, "e1", "g1"));
    }

    #[test]
    fn moved_king_or_rook_forbids_castling() {
        let mut board = castling_board();
        board.piece_at_mut(pos("e1")).unwrap().has_moved = true;
        assert!(!castles(&board, "e1", "g1"));
        assert!(!castles(&board, "e1", "c1"));

        let mut board = castling_board();
        board.piece_at_mut(pos("h1")).unwrap().has_moved = true;
        assert!(!castles(&board, "e1", "g1"));
        assert!(castles(&board, "e1", "c1"));
    }

    #[test]
    fn missing_or_foreign_rook_forbids_castling() {
        let mut board = castling_board();
        board.set_piece_at(pos("h1"), None);
        assert!(!castles(&board, "e1", "g1"));

        place(&mut board, "h1", PieceKind::Bishop, Color::White);
        assert!(!castles(&board, "e1", "g1"));

        place(&mut board, "h1", PieceKind::Rook, Color::Black);
        assert!(!castles(&board, "e1", "g1"));
    }

    #[test]
    fn king_in_check_cannot_castle() {
        let mut board = castling_board();
        place(&mut board, "e5", PieceKind::Rook, Color::Black);
        assert!(!castles(&board, "e1", "g1"));
        assert!(!castles(&board, "e1", "c1"));
    }

    #[test]
    fn attacked_transit_forbids_castling() {
        let mut board = castling_board();
        place(&mut board, "f5", PieceKind::Rook, Color::Black);
        assert!(!castles(&board, "e1", "g1"));
        assert!(castles(&board, "e1", "c1"));

        let mut board = castling_board();
        place(&mut board, "g5", PieceKind::Rook, Color::Black);
        assert!(!castles(&board, "e1", "g1"));
    }

    #[test]
    fn attacked_b_file_does_not_matter_queenside() {
        let mut board = castling_board();
        place(&mut board, "b5", PieceKind::Rook, Color::Black);
        assert!(castles(&board, "e1", "c1"));
    }

    #[test]
    fn non_castling_shapes_rejected() {
        let board = castling_board();
        assert!(!castles(&board, "e1", "f1"));
        assert!(!castles(&board, "e1", "e3"));
        assert!(!castles(&board, "a1", "c1"));
    }
}

//! Check and terminal-state detection.
//!
//! Every query here is a brute-force scan: each opposing piece is asked
//! whether it has a geometrically valid move onto the cell in question.
//! Escape searches simulate candidate moves on clones with plain piece
//! relocation.

use crate::board::Board;
use crate::move_generator::{candidate_moves, is_valid_move};
use crate::move_log::MoveLog;
use crate::types::*;

/// Whether any piece not of `color` can move onto `target`
pub fn is_square_attacked(board: &Board, move_log: &MoveLog, target: Position, color: Color) -> bool {
    board
        .pieces()
        .any(|(from, piece)| piece.color != color && is_valid_move(board, move_log, from, target))
}

/// Whether `color`'s king is attacked. A board without that king is never in check.
pub fn is_check(board: &Board, move_log: &MoveLog, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_square_attacked(board, move_log, king, color),
        None => false,
    }
}

/// Whether some candidate move of `color` leaves it out of check
fn has_escape(board: &Board, move_log: &MoveLog, color: Color) -> bool {
    candidate_moves(board, move_log, color)
        .into_iter()
        .any(|(from, to)| {
            let mut next = board.clone();
            next.move_piece(from, to);
            !is_check(&next, move_log, color)
        })
}

/// In check with no move that resolves it
pub fn is_checkmate(board: &Board, move_log: &MoveLog, color: Color) -> bool {
    is_check(board, move_log, color) && !has_escape(board, move_log, color)
}

/// Not in check, yet every move would leave the king in check
pub fn is_stalemate(board: &Board, move_log: &MoveLog, color: Color) -> bool {
    !is_check(board, move_log, color) && !has_escape(board, move_log, color)
}

//! Material evaluation.
//!
//! Scores are piece values only: no piece-square tables, mobility or pawn
//! structure terms.

use crate::board::Board;
use crate::types::*;

/// Material value per piece kind, indexed by `PieceKind::index()`
/// (King, Queen, Rook, Bishop, Knight, Pawn)
pub const PIECE_VALUES: [i32; 6] = [900, 9, 5, 3, 3, 1];

#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.index()]
}

/// Material balance from `perspective`'s side: own pieces count positive
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| {
            let value = piece_value(piece.kind);
            if piece.color == perspective {
                value
            } else {
                -value
            }
        })
        .sum()
}

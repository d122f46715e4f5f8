//! Move Legality Module
//!
//! Geometric legality of a single move and enumeration of every such move for
//! one side. "Valid" here means the piece can physically make the move given
//! board occupancy and the move log: it says nothing about whether the mover's
//! own king is left in check. The commit workflow in [`crate::game`] applies
//! that second filter.

use crate::board::Board;
use crate::castling::is_valid_castling;
use crate::move_log::MoveLog;
use crate::types::*;

/// Legality rule for one piece kind
type MoveRule = fn(&Board, &MoveLog, Piece, Position, Position) -> bool;

/// Rules indexed by `PieceKind::index()`
const MOVE_RULES: [MoveRule; 6] = [
    is_valid_king_move,
    is_valid_queen_move,
    is_valid_rook_move,
    is_valid_bishop_move,
    is_valid_knight_move,
    is_valid_pawn_move,
];

/// Every cell of the board in row-major order
pub fn all_squares() -> impl Iterator<Item = Position> {
    (0..8).flat_map(|row| (0..8).map(move |col| Position::new(row, col)))
}

/// Whether the piece on `from` may move to `to` by its movement rules.
///
/// Returns false when `from` is empty or either cell is off the board.
pub fn is_valid_move(board: &Board, move_log: &MoveLog, from: Position, to: Position) -> bool {
    if !from.is_on_board() || !to.is_on_board() {
        return false;
    }
    match board.piece_at(from) {
        Some(piece) => MOVE_RULES[piece.kind.index()](board, move_log, piece, from, to),
        None => false,
    }
}

/// All `(from, to)` pairs `color` may play by geometry alone.
///
/// Order is source row, source col, destination row, destination col; search
/// tie-breaking depends on it.
pub fn candidate_moves(board: &Board, move_log: &MoveLog, color: Color) -> Vec<(Position, Position)> {
    let mut moves = Vec::with_capacity(64);
    for (from, piece) in board.pieces() {
        if piece.color != color {
            continue;
        }
        for to in all_squares() {
            if is_valid_move(board, move_log, from, to) {
                moves.push((from, to));
            }
        }
    }
    moves
}

#[inline]
fn deltas(from: Position, to: Position) -> (i32, i32) {
    (
        to.row as i32 - from.row as i32,
        to.col as i32 - from.col as i32,
    )
}

/// Destination is empty or holds an enemy piece
#[inline]
fn lands_on_empty_or_enemy(board: &Board, piece: Piece, to: Position) -> bool {
    match board.piece_at(to) {
        None => true,
        Some(target) => target.color != piece.color,
    }
}

/// Every cell strictly between `from` and `to` along a straight or diagonal line is empty
fn is_path_clear(board: &Board, from: Position, to: Position) -> bool {
    let (dr, dc) = deltas(from, to);
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let distance = dr.abs().max(dc.abs());

    (1..distance).all(|i| {
        from.offset(i * step_r, i * step_c)
            .map_or(true, |cell| board.is_empty_at(cell))
    })
}

fn is_valid_pawn_move(
    board: &Board,
    move_log: &MoveLog,
    piece: Piece,
    from: Position,
    to: Position,
) -> bool {
    let (dr, dc) = deltas(from, to);
    let forward = piece.color.forward();
    let target = board.piece_at(to);

    // Single push
    if dc == 0 && dr == forward && target.is_none() {
        return true;
    }

    // Double push from the start row
    if dc == 0 && dr == 2 * forward && from.row == piece.color.pawn_start_row() && target.is_none() {
        return from
            .offset(forward, 0)
            .map_or(false, |mid| board.is_empty_at(mid));
    }

    if dc.abs() == 1 && dr == forward {
        return match target {
            Some(victim) => victim.color != piece.color,
            None => is_en_passant(move_log, piece.color, from, to),
        };
    }

    false
}

/// Diagonal pawn step onto an empty cell right after an enemy double push
/// landed beside the pawn.
fn is_en_passant(move_log: &MoveLog, color: Color, from: Position, to: Position) -> bool {
    let enemy = color.opposite();
    let landing_row = (enemy.pawn_start_row() as i32 + 2 * enemy.forward()) as usize;
    if from.row != landing_row {
        return false;
    }

    match move_log.last_move() {
        Some(last) => {
            last.is_double_pawn_push() && last.to.row == landing_row && last.to.col == to.col
        }
        None => false,
    }
}

fn is_valid_rook_move(
    board: &Board,
    _move_log: &MoveLog,
    piece: Piece,
    from: Position,
    to: Position,
) -> bool {
    let (dr, dc) = deltas(from, to);
    if dr != 0 && dc != 0 {
        return false;
    }
    is_path_clear(board, from, to) && lands_on_empty_or_enemy(board, piece, to)
}

fn is_valid_knight_move(
    board: &Board,
    _move_log: &MoveLog,
    piece: Piece,
    from: Position,
    to: Position,
) -> bool {
    let (dr, dc) = deltas(from, to);
    let (dr, dc) = (dr.abs(), dc.abs());
    ((dr == 1 && dc == 2) || (dr == 2 && dc == 1)) && lands_on_empty_or_enemy(board, piece, to)
}

fn is_valid_bishop_move(
    board: &Board,
    _move_log: &MoveLog,
    piece: Piece,
    from: Position,
    to: Position,
) -> bool {
    let (dr, dc) = deltas(from, to);
    if dr.abs() != dc.abs() {
        return false;
    }
    is_path_clear(board, from, to) && lands_on_empty_or_enemy(board, piece, to)
}

fn is_valid_queen_move(
    board: &Board,
    move_log: &MoveLog,
    piece: Piece,
    from: Position,
    to: Position,
) -> bool {
    is_valid_rook_move(board, move_log, piece, from, to)
        || is_valid_bishop_move(board, move_log, piece, from, to)
}

fn is_valid_king_move(
    board: &Board,
    move_log: &MoveLog,
    piece: Piece,
    from: Position,
    to: Position,
) -> bool {
    let (dr, dc) = deltas(from, to);
    if dr == 0 && dc.abs() == 2 {
        return is_valid_castling(board, move_log, from, to);
    }
    if dr.abs() > 1 || dc.abs() > 1 {
        return false;
    }
    lands_on_empty_or_enemy(board, piece, to)
}

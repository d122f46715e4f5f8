//! Committed moves and their algebraic notation.

use crate::types::*;
use std::fmt;

/// Check annotation attached to a committed move
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CheckStatus {
    #[default]
    None,
    Check,
    Checkmate,
}

impl CheckStatus {
    /// Notation suffix: "", "+" or "++"
    pub fn suffix(self) -> &'static str {
        match self {
            CheckStatus::None => "",
            CheckStatus::Check => "+",
            CheckStatus::Checkmate => "++",
        }
    }
}

/// A committed move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// The moved piece as it stood before the move
    pub piece: Piece,
    pub is_capture: bool,
    pub check: CheckStatus,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Create a move without capture, check or promotion annotations
    pub fn new(from: Position, to: Position, piece: Piece) -> Self {
        Move {
            from,
            to,
            piece,
            is_capture: false,
            check: CheckStatus::None,
            promotion: None,
        }
    }

    /// A king move of two files
    pub fn is_castling(&self) -> bool {
        self.piece.kind == PieceKind::King
            && self.from.row == self.to.row
            && (self.to.col as i32 - self.from.col as i32).abs() == 2
    }

    /// A pawn move of two rows
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn
            && (self.to.row as i32 - self.from.row as i32).abs() == 2
    }

    /// Algebraic notation, e.g. "e2-e4", "Nb1-c3", "Qd1xd7++", "O-O+"
    pub fn notation(&self) -> String {
        let suffix = self.check.suffix();

        if self.is_castling() {
            return if self.to.col > self.from.col {
                format!("O-O{}", suffix)
            } else {
                format!("O-O-O{}", suffix)
            };
        }

        let mut s = String::with_capacity(8);
        if let Some(letter) = self.piece.kind.letter() {
            s.push(letter);
        }
        s.push_str(&self.from.to_string());
        s.push(if self.is_capture { 'x' } else { '-' });
        s.push_str(&self.to.to_string());
        s.push_str(suffix);
        s
    }

    /// Coordinate notation used on the wire, e.g. "e2e4", "e7e8q"
    pub fn to_uci(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(c) = self.promotion.and_then(PieceKind::promotion_char) {
            s.push(c);
        }
        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

/// Append-only record of the moves of a game
#[derive(Clone, Debug, Default)]
pub struct MoveLog {
    moves: Vec<Move>,
}

impl MoveLog {
    pub fn new() -> Self {
        MoveLog { moves: Vec::new() }
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// The most recently committed move
    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub(crate) fn last_move_mut(&mut self) -> Option<&mut Move> {
        self.moves.last_mut()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Rendered notation of every move, in order
    pub fn notations(&self) -> Vec<String> {
        self.moves.iter().map(Move::notation).collect()
    }
}

impl<'a> IntoIterator for &'a MoveLog {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

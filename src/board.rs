//! Board Representation Module
//!
//! An 8x8 grid of optional pieces. This layer is purely mechanical: it stores,
//! relocates and compares pieces and never validates anything.

use crate::error::{ChessError, ChessResult};
use crate::types::*;

/// Starting position FEN
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Chess board: `squares[row][col]`, row 0 is Black's back rank
#[derive(Clone, Debug)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Create a new board with the starting position
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(*kind, Color::Black));
            board.squares[1][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.squares[6][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
            board.squares[7][col] = Some(Piece::new(*kind, Color::White));
        }
        board
    }

    /// A board with no pieces
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Build a board from a FEN string.
    ///
    /// Reads piece placement and, when present, the side to move and castling
    /// availability. Kings and rooks without a matching castling right are
    /// marked as moved, as are pawns away from their start row.
    pub fn from_fen(fen: &str) -> ChessResult<(Board, Color)> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let placement = parts
            .first()
            .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;

        let mut board = Board::empty();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::InvalidFen(fen.to_string()));
        }
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as usize;
                } else {
                    let piece =
                        Piece::from_fen_char(c).ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
                    if col >= 8 {
                        return Err(ChessError::InvalidFen(fen.to_string()));
                    }
                    board.squares[row][col] = Some(piece);
                    col += 1;
                }
            }
            if col != 8 {
                return Err(ChessError::InvalidFen(fen.to_string()));
            }
        }

        let turn = match parts.get(1).copied() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(ChessError::InvalidFen(fen.to_string())),
        };

        let rights = parts.get(2).copied().unwrap_or("KQkq");
        board.apply_castling_rights(rights);
        board.mark_advanced_pawns();

        Ok((board, turn))
    }

    fn apply_castling_rights(&mut self, rights: &str) {
        for piece in self.squares.iter_mut().flatten().flatten() {
            if matches!(piece.kind, PieceKind::King | PieceKind::Rook) {
                piece.has_moved = true;
            }
        }

        for color in [Color::White, Color::Black] {
            let (king_side, queen_side) = match color {
                Color::White => ('K', 'Q'),
                Color::Black => ('k', 'q'),
            };
            let row = color.back_row();
            let king_right = rights.contains(king_side);
            let queen_right = rights.contains(queen_side);

            for (col, rook_right) in [(7, king_right), (0, queen_right)] {
                if !rook_right {
                    continue;
                }
                if let Some(piece) = self.squares[row][col].as_mut() {
                    if piece.kind == PieceKind::Rook && piece.color == color {
                        piece.has_moved = false;
                    }
                }
            }
            if king_right || queen_right {
                if let Some(piece) = self.squares[row][4].as_mut() {
                    if piece.kind == PieceKind::King && piece.color == color {
                        piece.has_moved = false;
                    }
                }
            }
        }
    }

    fn mark_advanced_pawns(&mut self) {
        for row in 0..8 {
            for piece in self.squares[row].iter_mut().flatten() {
                if piece.kind == PieceKind::Pawn && piece.color.pawn_start_row() != row {
                    piece.has_moved = true;
                }
            }
        }
    }

    /// Piece on a cell, `None` for empty or off-board cells
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        if pos.is_on_board() {
            self.squares[pos.row][pos.col]
        } else {
            None
        }
    }

    /// Mutable access to the piece on a cell
    #[inline]
    pub fn piece_at_mut(&mut self, pos: Position) -> Option<&mut Piece> {
        if !pos.is_on_board() {
            return None;
        }
        self.squares[pos.row][pos.col].as_mut()
    }

    /// Overwrite a cell. Off-board cells are ignored.
    #[inline]
    pub fn set_piece_at(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_on_board() {
            self.squares[pos.row][pos.col] = piece;
        }
    }

    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    /// Relocate whatever stands on `from` to `to`, leaving `from` empty.
    ///
    /// Anything on `to` is overwritten. The moved flag is left alone. Nothing
    /// happens when either cell is off the board.
    pub fn move_piece(&mut self, from: Position, to: Position) {
        if !from.is_on_board() || !to.is_on_board() {
            return;
        }
        self.squares[to.row][to.col] = self.squares[from.row][from.col].take();
    }

    /// Find the king's cell for the specified color
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(pos, _)| pos)
    }

    /// All occupied cells in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (0..8).flat_map(move |row| {
            (0..8).filter_map(move |col| {
                self.squares[row][col].map(|p| (Position::new(row, col), p))
            })
        })
    }

    /// Same piece kind and color on every cell; moved flags are ignored
    pub fn same_layout(&self, other: &Board) -> bool {
        self.squares
            .iter()
            .flatten()
            .zip(other.squares.iter().flatten())
            .all(|(a, b)| match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.same_kind_and_color(b),
                _ => false,
            })
    }

    /// Display the board as a string, White at the bottom
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("  +---+---+---+---+---+---+---+---+".to_string());

        for row in 0..8 {
            let mut line = format!("{} |", 8 - row);
            for col in 0..8 {
                match self.squares[row][col] {
                    None => line.push_str("   |"),
                    Some(piece) => line.push_str(&format!(" {} |", piece.fen_char())),
                }
            }
            lines.push(line);
            lines.push("  +---+---+---+---+---+---+---+---+".to_string());
        }
        lines.push("    a   b   c   d   e   f   g   h".to_string());

        lines.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// Structural equality, as used by repetition detection
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.same_layout(other)
    }
}

impl Eq for Board {}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

//! Core type definitions: colors, piece kinds, pieces and board coordinates.
//!
//! Coordinates follow the grid convention used everywhere in the crate: row 0 is
//! Black's back rank, row 7 is White's, and column 0 is the a-file.

use std::fmt;

/// File names for algebraic notation, indexed by column
pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";

/// Side of a piece or the side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn advance: White moves toward row 0
    #[inline]
    pub fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's pawns before they move
    #[inline]
    pub fn pawn_start_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start
    #[inline]
    pub fn back_row(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row a pawn of this side is promoted on
    #[inline]
    pub fn promotion_row(self) -> usize {
        self.opposite().back_row()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// The six kinds of chess piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    /// Dense index, used by per-kind lookup tables
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Letter used in move notation; pawns have none
    pub fn letter(self) -> Option<char> {
        match self {
            PieceKind::King => Some('K'),
            PieceKind::Queen => Some('Q'),
            PieceKind::Rook => Some('R'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Knight => Some('N'),
            PieceKind::Pawn => None,
        }
    }

    /// Parse a promotion letter (either case) as used in coordinate move text
    pub fn from_promotion_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            _ => None,
        }
    }

    /// Lowercase promotion letter for coordinate move text
    pub fn promotion_char(self) -> Option<char> {
        match self {
            PieceKind::Queen => Some('q'),
            PieceKind::Rook => Some('r'),
            PieceKind::Bishop => Some('b'),
            PieceKind::Knight => Some('n'),
            _ => None,
        }
    }

    /// Whether a pawn may be promoted to this kind
    #[inline]
    pub fn is_promotion_target(self) -> bool {
        !matches!(self, PieceKind::King | PieceKind::Pawn)
    }
}

/// A piece on the board. `has_moved` only matters for castling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    /// Create an unmoved piece
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Same kind and color, regardless of the moved flag
    #[inline]
    pub fn same_kind_and_color(&self, other: &Piece) -> bool {
        self.kind == other.kind && self.color == other.color
    }

    /// FEN character: uppercase for White
    pub fn fen_char(&self) -> char {
        let c = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Piece from a FEN character
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

/// A cell on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Whether both coordinates are on the 8x8 grid
    #[inline]
    pub fn is_on_board(&self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// Offset by a signed delta, `None` when it leaves the board
    pub fn offset(&self, d_row: i32, d_col: i32) -> Option<Position> {
        let row = self.row as i32 + d_row;
        let col = self.col as i32 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Parse a square name such as "e4"
    pub fn parse(name: &str) -> Option<Position> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let col = match bytes[0] {
            b @ b'a'..=b'h' => (b - b'a') as usize,
            _ => return None,
        };
        let rank = match bytes[1] {
            b @ b'1'..=b'8' => (b - b'0') as usize,
            _ => return None,
        };
        Some(Position::new(8 - rank, col))
    }

    /// File letter of this cell
    #[inline]
    pub fn file_char(&self) -> char {
        FILE_NAMES[self.col] as char
    }

    /// Rank number of this cell (1..=8)
    #[inline]
    pub fn rank(&self) -> usize {
        8 - self.row
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_names_follow_row_convention() {
        assert_eq!(Position::new(6, 4).to_string(), "e2");
        assert_eq!(Position::new(0, 0).to_string(), "a8");
        assert_eq!(Position::new(7, 7).to_string(), "h1");
        assert_eq!(Position::parse("e4"), Some(Position::new(4, 4)));
        assert_eq!(Position::parse("a8"), Some(Position::new(0, 0)));
    }

    #[test]
    fn parse_rejects_bad_names() {
        assert_eq!(Position::parse("i1"), None);
        assert_eq!(Position::parse("a9"), None);
        assert_eq!(Position::parse("a0"), None);
        assert_eq!(Position::parse("e"), None);
        assert_eq!(Position::parse("e44"), None);
    }

    #[test]
    fn offset_stays_on_board() {
        let p = Position::new(0, 7);
        assert_eq!(p.offset(-1, 0), None);
        assert_eq!(p.offset(0, 1), None);
        assert_eq!(p.offset(1, -1), Some(Position::new(1, 6)));
    }

    #[test]
    fn fen_chars_round_trip_kind_and_color() {
        for kind in PieceKind::ALL {
            for color in [Color::White, Color::Black] {
                let piece = Piece::new(kind, color);
                assert_eq!(Piece::from_fen_char(piece.fen_char()), Some(piece));
            }
        }
    }

    #[test]
    fn color_geometry() {
        assert_eq!(Color::White.forward(), -1);
        assert_eq!(Color::Black.pawn_start_row(), 1);
        assert_eq!(Color::White.promotion_row(), 0);
        assert_eq!(Color::Black.promotion_row(), 7);
    }
}

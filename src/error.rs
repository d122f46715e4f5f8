//! Error types for game operations
//!
//! Legality predicates answer with plain booleans; these errors are only
//! produced by operations that change or export game state.

use crate::types::{PieceKind, Position};
use thiserror::Error;

/// Errors reported by the commit workflow, importers and exporters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// No piece on the source cell
    #[error("No piece at {0}")]
    NoPiece(Position),

    /// Source piece belongs to the side not on move
    #[error("Piece at {0} does not belong to the side to move")]
    WrongTurn(Position),

    /// Move fails piece geometry or occupancy rules
    #[error("Illegal move from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// Move is geometrically valid but leaves the mover's king in check
    #[error("Move from {from} to {to} leaves the king in check")]
    ExposesKing { from: Position, to: Position },

    #[error("Cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    /// Export requested before any move was committed
    #[error("No game to export")]
    NothingToExport,

    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("Invalid move text: {0}")]
    InvalidMoveText(String),
}

/// Result type alias for game operations
pub type ChessResult<T> = Result<T, ChessError>;

//! MinimaxChess - chess rules core with a UCI engine
//!
//! A chess library written in Rust with support for:
//! - Move legality per piece, castling and en passant
//! - Check, checkmate, stalemate and threefold repetition detection
//! - Algebraic move notation and PGN export
//! - Plain material minimax search, optionally split across threads
//! - UCI protocol front end

pub mod types;
pub mod error;
pub mod board;
pub mod move_log;
pub mod move_generator;
pub mod castling;
pub mod check;
pub mod history;
pub mod evaluation;
pub mod search;
pub mod parallel_search;
pub mod config;
pub mod game;
pub mod pgn;
pub mod uci;

pub use board::Board;
pub use config::EngineConfig;
pub use error::{ChessError, ChessResult};
pub use game::{Game, GameOutcome};
pub use move_log::{CheckStatus, Move, MoveLog};
pub use types::{Color, Piece, PieceKind, Position};

//! Game state and the move-commit workflow.
//!
//! A move is committed in steps: check ownership, check geometry, play it out
//! on a clone (en passant removal, promotion, rook relocation when castling),
//! reject it if the mover's king is left in check, annotate check or mate,
//! then install the clone. Any failure leaves the game untouched.

use crate::board::Board;
use crate::castling::CastlingSide;
use crate::check::{is_check, is_checkmate, is_stalemate};
use crate::config::EngineConfig;
use crate::error::{ChessError, ChessResult};
use crate::history::BoardHistory;
use crate::move_generator::is_valid_move;
use crate::move_log::{CheckStatus, Move, MoveLog};
use crate::parallel_search::ParallelSearch;
use crate::pgn::{export_pgn, PgnHeaders};
use crate::types::*;
use log::debug;

/// How a finished game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    ThreefoldRepetition,
}

impl GameOutcome {
    /// PGN result token
    pub fn result_tag(self) -> &'static str {
        match self {
            GameOutcome::Checkmate { winner: Color::White } => "1-0",
            GameOutcome::Checkmate { winner: Color::Black } => "0-1",
            GameOutcome::Stalemate | GameOutcome::ThreefoldRepetition => "1/2-1/2",
        }
    }

    pub fn status_text(self) -> &'static str {
        match self {
            GameOutcome::Checkmate { .. } => "Checkmate!",
            GameOutcome::Stalemate => "Stalemate!",
            GameOutcome::ThreefoldRepetition => "Threefold repetition!",
        }
    }
}

/// A game in progress
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
    move_log: MoveLog,
    history: BoardHistory,
    status: String,
}

impl Game {
    /// Standard start, White to move
    pub fn new() -> Self {
        Game::from_board(Board::new(), Color::White)
    }

    /// A game starting from an arbitrary position
    pub fn from_board(board: Board, turn: Color) -> Self {
        Game {
            history: BoardHistory::starting_from(&board),
            board,
            turn,
            move_log: MoveLog::new(),
            status: String::new(),
        }
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let (board, turn) = Board::from_fen(fen)?;
        Ok(Game::from_board(board, turn))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.move_log
    }

    pub fn history(&self) -> &BoardHistory {
        &self.history
    }

    /// Free-text status for the presentation layer
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Geometric legality of a move for whoever stands on `from`
    pub fn is_valid_move(&self, from: Position, to: Position) -> bool {
        is_valid_move(&self.board, &self.move_log, from, to)
    }

    pub fn is_check(&self, color: Color) -> bool {
        is_check(&self.board, &self.move_log, color)
    }

    /// Validate and commit a move for the side to move.
    ///
    /// A pawn reaching the far row becomes `promotion`, or a queen when none is
    /// given; `promotion` is ignored for every other move.
    pub fn make_move(
        &mut self,
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    ) -> ChessResult<Move> {
        let piece = self.board.piece_at(from).ok_or(ChessError::NoPiece(from))?;
        if piece.color != self.turn {
            return Err(ChessError::WrongTurn(from));
        }
        if !is_valid_move(&self.board, &self.move_log, from, to) {
            return Err(ChessError::IllegalMove { from, to });
        }

        let promotes = piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row();
        let promotion = if promotes {
            let kind = promotion.unwrap_or(PieceKind::Queen);
            if !kind.is_promotion_target() {
                return Err(ChessError::InvalidPromotion(kind));
            }
            Some(kind)
        } else {
            None
        };

        let (next, is_capture) = self.play_on_clone(piece, from, to, promotion);

        if is_check(&next, &self.move_log, self.turn) {
            return Err(ChessError::ExposesKing { from, to });
        }

        let mut mv = Move::new(from, to, piece);
        mv.is_capture = is_capture;
        mv.promotion = promotion;
        self.move_log.push(mv);

        // Annotate against the log that now ends with this move
        let opponent = self.turn.opposite();
        let check = if is_checkmate(&next, &self.move_log, opponent) {
            CheckStatus::Checkmate
        } else if is_check(&next, &self.move_log, opponent) {
            CheckStatus::Check
        } else {
            CheckStatus::None
        };
        mv.check = check;
        if let Some(last) = self.move_log.last_move_mut() {
            last.check = check;
        }

        self.board = next;
        self.history.push(self.board.clone());
        self.turn = opponent;
        self.status = match check {
            CheckStatus::None => String::new(),
            CheckStatus::Check | CheckStatus::Checkmate => "Check!".to_string(),
        };

        debug!("committed {} ({})", mv.notation(), mv.to_uci());
        Ok(mv)
    }

    /// Apply a move with all its side effects to a copy of the board
    fn play_on_clone(
        &self,
        piece: Piece,
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    ) -> (Board, bool) {
        let mut next = self.board.clone();
        let mut is_capture = next.piece_at(to).is_some();

        next.move_piece(from, to);
        if let Some(moved) = next.piece_at_mut(to) {
            moved.has_moved = true;
            if let Some(kind) = promotion {
                moved.kind = kind;
            }
        }

        // En passant: diagonal pawn step onto an empty cell
        if piece.kind == PieceKind::Pawn && to.col != from.col && !is_capture {
            is_capture = true;
            next.set_piece_at(Position::new(from.row, to.col), None);
        }

        if piece.kind == PieceKind::King {
            if let Some(side) = CastlingSide::of_move(from, to) {
                let rook_from = Position::new(to.row, side.rook_col());
                let rook_to = Position::new(to.row, side.rook_target_col(to.col));
                next.move_piece(rook_from, rook_to);
                if let Some(rook) = next.piece_at_mut(rook_to) {
                    rook.has_moved = true;
                }
            }
        }

        (next, is_capture)
    }

    /// Terminal state for the side to move, checked as mate, stalemate, repetition.
    ///
    /// Leaves the status text alone; see [`Game::outcome`].
    pub fn current_outcome(&self) -> Option<GameOutcome> {
        if is_checkmate(&self.board, &self.move_log, self.turn) {
            Some(GameOutcome::Checkmate {
                winner: self.turn.opposite(),
            })
        } else if is_stalemate(&self.board, &self.move_log, self.turn) {
            Some(GameOutcome::Stalemate)
        } else if self.history.is_threefold_repetition() {
            Some(GameOutcome::ThreefoldRepetition)
        } else {
            None
        }
    }

    /// Like [`Game::current_outcome`], but also updates the status text when the game is over
    pub fn outcome(&mut self) -> Option<GameOutcome> {
        let outcome = self.current_outcome();
        if let Some(outcome) = outcome {
            self.status = outcome.status_text().to_string();
        }
        outcome
    }

    /// PGN result token for the current state, "*" while undecided
    pub fn result_tag(&self) -> &'static str {
        self.current_outcome().map_or("*", GameOutcome::result_tag)
    }

    /// PGN text of the game so far with default headers
    pub fn export_pgn(&self) -> ChessResult<String> {
        let headers = PgnHeaders {
            result: self.result_tag().to_string(),
            ..PgnHeaders::default()
        };
        export_pgn(&self.move_log, &headers)
    }

    /// Ask the engine for the side to move and commit its choice.
    ///
    /// The engine does not filter moves that expose its own king; such a pick
    /// is rejected here with `ExposesKing`. `Ok(None)` means no candidate move.
    pub fn engine_move(&mut self, config: &EngineConfig) -> ChessResult<Option<Move>> {
        let mut search = ParallelSearch::new(config.threads);
        match search.find_best_move(&self.board, self.turn, config.depth) {
            Some((from, to)) => self.make_move(from, to, None).map(Some),
            None => Ok(None),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

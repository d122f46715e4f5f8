//! Search Engine Module
//!
//! Plain depth-limited minimax over material evaluation:
//! - every geometrically valid move is searched, in row-major order
//! - no pruning, move ordering, transposition table or quiescence
//! - ties at the root go to the first move enumerated
//!
//! Moves are applied with plain piece relocation on board clones, and the
//! search keeps no move log of its own, so en passant is never generated
//! inside the tree. Candidates are not filtered for self-check.

use crate::board::Board;
use crate::evaluation::evaluate;
use crate::move_generator::candidate_moves;
use crate::move_log::MoveLog;
use crate::types::*;
use log::{debug, trace};

/// Score of a maximizing layer with no moves
pub const NEG_INFINITY: i32 = i32::MIN;
/// Score of a minimizing layer with no moves
pub const INFINITY: i32 = i32::MAX;

/// Pick the first candidate with the strictly greatest score.
///
/// `None` when no score beats `NEG_INFINITY`.
pub fn select_best(candidates: &[(Position, Position)], scores: &[i32]) -> Option<(Position, Position)> {
    let mut best_score = NEG_INFINITY;
    let mut best_move = None;
    for (&candidate, &score) in candidates.iter().zip(scores) {
        if score > best_score {
            best_score = score;
            best_move = Some(candidate);
        }
    }
    best_move
}

/// Depth-limited minimax searcher
pub struct SearchEngine {
    move_log: MoveLog,
    pub nodes_searched: u64,
}

impl SearchEngine {
    pub fn new() -> Self {
        SearchEngine {
            move_log: MoveLog::new(),
            nodes_searched: 0,
        }
    }

    /// Moves `color` may choose from at the root
    pub fn root_candidates(&self, board: &Board, color: Color) -> Vec<(Position, Position)> {
        candidate_moves(board, &self.move_log, color)
    }

    /// Best `(from, to)` for `color` searching `depth` plies; depth 0 searches like depth 1
    pub fn find_best_move(&mut self, board: &Board, color: Color, depth: u32) -> Option<(Position, Position)> {
        self.nodes_searched = 0;

        let candidates = self.root_candidates(board, color);
        let scores: Vec<i32> = candidates
            .iter()
            .map(|&(from, to)| self.score_root_move(board, color, depth, from, to))
            .collect();

        let best = select_best(&candidates, &scores);
        debug!(
            "search depth {} for {}: {} root moves, {} nodes, best {:?}",
            depth,
            color,
            candidates.len(),
            self.nodes_searched,
            best.map(|(f, t)| format!("{}{}", f, t))
        );
        best
    }

    /// Score one root move: apply it to a clone and search the reply tree
    pub fn score_root_move(&mut self, board: &Board, color: Color, depth: u32, from: Position, to: Position) -> i32 {
        let mut next = board.clone();
        next.move_piece(from, to);
        let score = self.minimax(&next, depth.max(1) - 1, false, color);
        trace!("root {}{} scores {}", from, to, score);
        score
    }

    /// Minimax value of `board` from `perspective`'s side.
    ///
    /// The maximizing layer moves `perspective`'s pieces, the minimizing layer
    /// the opponent's.
    pub fn minimax(&mut self, board: &Board, depth: u32, maximizing: bool, perspective: Color) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return evaluate(board, perspective);
        }

        let mover = if maximizing {
            perspective
        } else {
            perspective.opposite()
        };

        let mut best = if maximizing { NEG_INFINITY } else { INFINITY };
        for (from, to) in candidate_moves(board, &self.move_log, mover) {
            let mut next = board.clone();
            next.move_piece(from, to);
            let score = self.minimax(&next, depth - 1, !maximizing, perspective);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new()
    }
}

/// Single-threaded best move for `color` at `depth`
pub fn find_best_move(board: &Board, color: Color, depth: u32) -> Option<(Position, Position)> {
    SearchEngine::new().find_best_move(board, color, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(name: &str) -> Position {
        Position::parse(name).unwrap()
    }

    fn place(board: &mut Board, name: &str, kind: PieceKind, color: Color) {
        let mut piece = Piece::new(kind, color);
        piece.has_moved = true;
        board.set_piece_at(pos(name), Some(piece));
    }

    #[test]
    fn ties_resolve_to_first_enumerated() {
        let best = find_best_move(&Board::new(), Color::White, 1);
        // a2 pawn is White's first piece; a4 comes before a3 in row order
        assert_eq!(best, Some((pos("a2"), pos("a4"))));
    }

    #[test]
    fn depth_one_takes_most_material() {
        let mut board = Board::empty();
        place(&mut board, "h1", PieceKind::King, Color::White);
        place(&mut board, "h8", PieceKind::King, Color::Black);
        place(&mut board, "a1", PieceKind::Rook, Color::White);
        place(&mut board, "a5", PieceKind::Pawn, Color::Black);
        place(&mut board, "d1", PieceKind::Rook, Color::White);
        place(&mut board, "d5", PieceKind::Queen, Color::Black);
        assert_eq!(
            find_best_move(&board, Color::White, 1),
            Some((pos("d1"), pos("d5")))
        );
    }

    #[test]
    fn black_perspective() {
        let mut board = Board::empty();
        place(&mut board, "h1", PieceKind::King, Color::White);
        place(&mut board, "h8", PieceKind::King, Color::Black);
        place(&mut board, "c6", PieceKind::Knight, Color::Black);
        place(&mut board, "b4", PieceKind::Rook, Color::White);
        place(&mut board, "e5", PieceKind::Pawn, Color::White);
        assert_eq!(
            find_best_move(&board, Color::Black, 1),
            Some((pos("c6"), pos("b4")))
        );
    }

    #[test]
    fn depth_two_avoids_defended_pawn() {
        let mut board = Board::empty();
        place(&mut board, "h1", PieceKind::King, Color::White);
        place(&mut board, "d1", PieceKind::Queen, Color::White);
        place(&mut board, "h8", PieceKind::King, Color::Black);
        place(&mut board, "d5", PieceKind::Pawn, Color::Black);
        place(&mut board, "e6", PieceKind::Pawn, Color::Black);

        assert_eq!(
            find_best_move(&board, Color::White, 1),
            Some((pos("d1"), pos("d5")))
        );
        let deeper = find_best_move(&board, Color::White, 2);
        assert!(deeper.is_some());
        assert_ne!(deeper, Some((pos("d1"), pos("d5"))));
    }

    #[test]
    fn no_candidates_yields_none() {
        let mut board = Board::empty();
        place(&mut board, "a2", PieceKind::Pawn, Color::White);
        place(&mut board, "a3", PieceKind::Pawn, Color::Black);
        assert_eq!(find_best_move(&board, Color::White, 2), None);
    }

    #[test]
    fn may_pick_a_move_that_exposes_own_king() {
        let (board, color) = Board::from_fen("4r1k1/8/q7/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert_eq!(find_best_move(&board, color, 1), Some((pos("e2"), pos("a6"))));
    }

    #[test]
    fn depth_zero_behaves_like_depth_one() {
        let board = Board::new();
        assert_eq!(
            find_best_move(&board, Color::Black, 0),
            find_best_move(&board, Color::Black, 1)
        );
    }

    #[test]
    fn minimax_leaf_is_evaluation() {
        let mut engine = SearchEngine::new();
        let board = Board::new();
        assert_eq!(engine.minimax(&board, 0, true, Color::White), 0);
        assert_eq!(engine.nodes_searched, 1);
    }

    #[test]
    fn minimax_empty_layers_are_infinite() {
        let mut engine = SearchEngine::new();
        let board = Board::empty();
        assert_eq!(engine.minimax(&board, 1, true, Color::White), NEG_INFINITY);
        assert_eq!(engine.minimax(&board, 1, false, Color::White), INFINITY);
    }

    #[test]
    fn nodes_are_counted() {
        let mut engine = SearchEngine::new();
        engine.find_best_move(&Board::new(), Color::White, 2);
        // 20 root moves, each followed by 20 replies: 20 + 400 nodes
        assert_eq!(engine.nodes_searched, 420);
    }

    #[test]
    fn select_best_keeps_first_of_equals() {
        let moves = [
            (pos("a2"), pos("a3")),
            (pos("b2"), pos("b3")),
            (pos("c2"), pos("c3")),
        ];
        assert_eq!(select_best(&moves, &[1, 4, 4]), Some(moves[1]));
        assert_eq!(select_best(&moves, &[NEG_INFINITY; 3]), None);
    }
}

//! Board history and repetition detection.

use crate::board::Board;

/// Snapshots required before a repetition can be reported
pub const REPETITION_MIN_SNAPSHOTS: usize = 9;

/// Occurrences of the latest position that make a repetition
pub const REPETITION_COUNT: usize = 3;

/// Append-only list of board snapshots, one per committed move plus the initial position
#[derive(Clone, Debug, Default)]
pub struct BoardHistory {
    snapshots: Vec<Board>,
}

impl BoardHistory {
    /// History seeded with the initial position
    pub fn starting_from(board: &Board) -> Self {
        BoardHistory {
            snapshots: vec![board.clone()],
        }
    }

    pub fn push(&mut self, board: Board) {
        self.snapshots.push(board);
    }

    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// How many snapshots have the same layout as the latest one
    pub fn repetition_count(&self) -> usize {
        match self.snapshots.last() {
            Some(latest) => self.snapshots.iter().filter(|b| b.same_layout(latest)).count(),
            None => 0,
        }
    }

    pub fn is_threefold_repetition(&self) -> bool {
        is_threefold_repetition(&self.snapshots)
    }
}

/// True when at least nine snapshots exist and the latest layout occurs three times.
///
/// Side to move, castling rights and en passant availability are not compared.
pub fn is_threefold_repetition(history: &[Board]) -> bool {
    if history.len() < REPETITION_MIN_SNAPSHOTS {
        return false;
    }
    let Some(latest) = history.last() else {
        return false;
    };
    history.iter().filter(|b| b.same_layout(latest)).count() >= REPETITION_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn shuffled(board: &Board, from: &str, to: &str) -> Board {
        let mut next = board.clone();
        next.move_piece(Position::parse(from).unwrap(), Position::parse(to).unwrap());
        next
    }

    /// Knights out and back: start, Nf3, Nf6, Ng1, Ng8, ...
    fn knight_dance(plies: usize) -> BoardHistory {
        let cycle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
        let mut board = Board::new();
        let mut history = BoardHistory::starting_from(&board);
        for (from, to) in cycle.iter().cycle().take(plies) {
            board = shuffled(&board, from, to);
            history.push(board.clone());
        }
        history
    }

    #[test]
    fn empty_history_is_not_repetition() {
        assert!(!is_threefold_repetition(&[]));
        assert_eq!(BoardHistory::default().repetition_count(), 0);
    }

    #[test]
    fn three_occurrences_over_nine_snapshots() {
        let history = knight_dance(8);
        assert_eq!(history.len(), 9);
        assert_eq!(history.repetition_count(), 3);
        assert!(history.is_threefold_repetition());
    }

    #[test]
    fn two_occurrences_are_not_enough() {
        let history = knight_dance(4);
        assert_eq!(history.repetition_count(), 2);
        assert!(!history.is_threefold_repetition());
    }

    #[test]
    fn threshold_applies_before_counting() {
        // Same position three times but only three snapshots
        let board = Board::new();
        let history = vec![board.clone(), board.clone(), board];
        assert!(!is_threefold_repetition(&history));
    }

    #[test]
    fn long_history_with_two_matches() {
        let board = Board::new();
        let mut history = BoardHistory::starting_from(&board);
        let mut current = shuffled(&board, "e2", "e4");
        history.push(current.clone());
        current = shuffled(&current, "e7", "e5");
        history.push(current.clone());
        let base = current.clone();
        for (from, to) in [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8"), ("g1", "f3"), ("g8", "f6")] {
            current = shuffled(&current, from, to);
            history.push(current.clone());
        }
        assert_eq!(history.len(), 9);
        assert!(!history.snapshots().last().unwrap().same_layout(&base));
        assert_eq!(history.repetition_count(), 2);
        assert!(!history.is_threefold_repetition());
    }
}

//! Parallel Search Module
//!
//! Splits the root move list into contiguous chunks and scores each chunk on
//! its own scoped thread. Scores are gathered back in enumeration order and
//! reduced with the same first-strictly-greatest rule as the sequential
//! search, so the chosen move never depends on the thread count.

use std::thread;

use crate::board::Board;
use crate::search::{select_best, SearchEngine};
use crate::types::*;
use log::debug;

/// Multi-threaded root search
pub struct ParallelSearch {
    pub num_threads: usize,
    pub nodes_searched: u64,
}

impl ParallelSearch {
    pub fn new(num_threads: usize) -> Self {
        ParallelSearch {
            num_threads: num_threads.max(1),
            nodes_searched: 0,
        }
    }

    pub fn set_threads(&mut self, threads: usize) {
        self.num_threads = threads.max(1);
    }

    /// Same result as [`SearchEngine::find_best_move`] for the same inputs
    pub fn find_best_move(&mut self, board: &Board, color: Color, depth: u32) -> Option<(Position, Position)> {
        let mut root = SearchEngine::new();
        let candidates = root.root_candidates(board, color);

        if self.num_threads == 1 || candidates.len() < 2 {
            let best = root.find_best_move(board, color, depth);
            self.nodes_searched = root.nodes_searched;
            return best;
        }

        let chunk_size = candidates.len().div_ceil(self.num_threads);
        let results: Vec<(Vec<i32>, u64)> = thread::scope(|s| {
            let handles: Vec<_> = candidates
                .chunks(chunk_size)
                .map(|chunk| {
                    s.spawn(move || {
                        let mut engine = SearchEngine::new();
                        let scores: Vec<i32> = chunk
                            .iter()
                            .map(|&(from, to)| engine.score_root_move(board, color, depth, from, to))
                            .collect();
                        (scores, engine.nodes_searched)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        self.nodes_searched = results.iter().map(|(_, nodes)| nodes).sum();
        let scores: Vec<i32> = results.into_iter().flat_map(|(scores, _)| scores).collect();

        let best = select_best(&candidates, &scores);
        debug!(
            "parallel search depth {} for {} on {} threads: {} nodes, best {:?}",
            depth,
            color,
            self.num_threads,
            self.nodes_searched,
            best.map(|(f, t)| format!("{}{}", f, t))
        );
        best
    }
}

impl Default for ParallelSearch {
    fn default() -> Self {
        ParallelSearch::new(num_cpus::get())
    }
}

//! Move scoring and tree search for gomoku, built on [`gomoku_core::Board`].
//!
//! [`heuristic`] is a pure function of a board: it scores candidate moves
//! and shortcuts forced tactical moves (immediate wins, forced blocks).
//! [`search`] drives an MCTS tree that consults the heuristic for those
//! shortcuts, for expansion ordering, and for the heuristic rollout policy.

pub mod heuristic;
pub mod search;

pub use heuristic::{ScoredMove, evaluate_move, find_blocking_move, find_winning_move, score_move, scored_moves};
pub use search::{Search, SearchConfig};

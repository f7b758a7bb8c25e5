//! Monte-Carlo Tree Search over [`Board`] positions, guided by the
//! pattern heuristic for forced-move shortcuts, expansion ordering, and
//! rollout policy.
//!
//! The tree is an arena of [`Node`]s addressed by `u32` index: each node
//! owns its children as a `Vec<u32>` and holds a non-owning `Option<u32>`
//! parent back-reference. The whole arena is allocated fresh for each
//! [`Search::search`] call and dropped when it returns — there is no
//! persistence or reuse between calls.

pub mod budget;
pub mod config;

use gomoku_core::board::{Board, GameResult};
use gomoku_core::moves::Move;
use gomoku_core::player::Player;
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::heuristic;

pub use budget::SearchBudget;
pub use config::SearchConfig;

/// Number of plies a rollout runs before it is truncated and scored as a
/// draw (spec.md's "no winner at the ply cap" rule).
const ROLLOUT_PLY_CAP: u32 = 50;

/// Number of top-scored moves a heuristic rollout samples from at each ply.
const ROLLOUT_HEURISTIC_TOP_N: usize = 3;

/// A node in the search tree. Owned exclusively by its parent's `children`
/// list (or, for the root, by the arena itself); `parent` never owns.
struct Node {
    /// The move that produced this node, or [`Move::INVALID`] for the root.
    mv: Move,
    parent: Option<u32>,
    children: Vec<u32>,
    /// Legal moves not yet expanded into children, captured when this
    /// node was created.
    untried: Vec<Move>,
    visits: u64,
    /// Accumulated value from `root_player`'s perspective (see
    /// [`Search::backpropagate`]).
    value: f64,
    side_to_move: Player,
}

impl Node {
    fn root(board: &Board) -> Node {
        Node {
            mv: Move::INVALID,
            parent: None,
            children: Vec::new(),
            untried: board.legal_moves(),
            visits: 0,
            value: 0.0,
            side_to_move: board.current_player(),
        }
    }

    fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }
}

/// A Monte-Carlo Tree Search engine for Gomoku.
///
/// Holds its own RNG and iteration counter; reused across calls to
/// [`Search::search`], but the search tree itself is rebuilt from scratch
/// every call.
pub struct Search {
    config: SearchConfig,
    rng: ChaCha8Rng,
    iterations: u32,
}

impl Search {
    /// Build a searcher with the given configuration. A `seed` of `0` in
    /// `config` derives the RNG's seed from the system's entropy source;
    /// any other value seeds deterministically.
    pub fn new(config: SearchConfig) -> Search {
        let rng = if config.seed == 0 {
            let seed: u64 = rand::rng().random();
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::seed_from_u64(config.seed)
        };
        Search {
            config,
            rng,
            iterations: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the configuration used by subsequent searches. Does not
    /// reseed the RNG.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Iterations completed by the most recent [`Search::search`] call.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Choose a move for `board`'s side to move within `time_limit_ms`
    /// (or unboundedly by time if `time_limit_ms == 0`; the iteration cap
    /// in [`SearchConfig`] still applies).
    ///
    /// Never mutates `board`: every simulation runs against a clone.
    pub fn search(&mut self, board: &Board, time_limit_ms: u64) -> Move {
        self.iterations = 0;

        let winning = heuristic::find_winning_move(board);
        if winning.is_valid() {
            debug!(?winning, "search: immediate win, skipping tree search");
            return winning;
        }

        let blocking = heuristic::find_blocking_move(board);
        if blocking.is_valid() {
            debug!(?blocking, "search: forced block, skipping tree search");
            return blocking;
        }

        let root_player = board.current_player();
        let mut arena = vec![Node::root(board)];
        if arena[0].untried.len() == 1 {
            return arena[0].untried[0];
        }

        let budget = SearchBudget::new(self.config.max_iterations, time_limit_ms);
        while !budget.should_stop(self.iterations) {
            let mut copy = board.clone();
            let leaf = self.select(&arena, 0, &mut copy);
            let expanded = self.expand(&mut arena, leaf, &mut copy);
            let value = self.simulate(&copy);
            self.backpropagate(&mut arena, expanded, value, root_player);
            self.iterations += 1;
        }

        let chosen = self.pick_best_child(&arena, 0);
        trace!(
            iterations = self.iterations,
            elapsed_ms = budget.elapsed().as_millis() as u64,
            ?chosen,
            "search: complete"
        );
        chosen
    }

    /// Convenience wrapper using `config.max_time_ms` as the time budget.
    pub fn search_with_config_time(&mut self, board: &Board) -> Move {
        let ms = self.config.max_time_ms;
        self.search(board, ms)
    }

    /// Descend from `root` while nodes are fully expanded and non-leaf,
    /// applying each step's move to `copy`. Returns the index of the node
    /// where selection stops (either partially expanded, or a leaf with
    /// no children at all).
    fn select(&self, arena: &[Node], root: u32, copy: &mut Board) -> u32 {
        let mut node = root;
        loop {
            let current = &arena[node as usize];
            if current.is_fully_expanded() && !current.children.is_empty() {
                let child = self.best_uct_child(arena, node);
                copy.apply(arena[child as usize].mv);
                node = child;
            } else {
                return node;
            }
        }
    }

    /// UCT selection: `-q + c * sqrt(ln(N) / n)`, maximized over children.
    /// Unvisited children (`n == 0`) have infinite UCT and are preferred in
    /// their stored (insertion) order.
    fn best_uct_child(&self, arena: &[Node], parent: u32) -> u32 {
        let node = &arena[parent as usize];
        let parent_visits = node.visits.max(1) as f64;

        let mut best_child = node.children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &child_idx in &node.children {
            let child = &arena[child_idx as usize];
            let score = if child.visits == 0 {
                f64::INFINITY
            } else {
                let q = child.value / child.visits as f64;
                -q + self.config.c * (parent_visits.ln() / child.visits as f64).sqrt()
            };
            if score > best_score {
                best_score = score;
                best_child = child_idx;
            }
        }
        best_child
    }

    /// Expand one untried move of `node` into a new child, applying it to
    /// `copy`. A no-op (returns `node` unchanged) if `copy` is already
    /// terminal or `node` has no untried moves left.
    fn expand(&mut self, arena: &mut Vec<Node>, node: u32, copy: &mut Board) -> u32 {
        if copy.terminal() || arena[node as usize].untried.is_empty() {
            return node;
        }

        let mv = self.choose_expansion_move(arena, node, copy);
        copy.apply(mv);

        let child = Node {
            mv,
            parent: Some(node),
            children: Vec::new(),
            untried: copy.legal_moves(),
            visits: 0,
            value: 0.0,
            side_to_move: copy.current_player(),
        };
        let child_idx = arena.len() as u32;
        arena.push(child);
        arena[node as usize].children.push(child_idx);
        child_idx
    }

    /// Pick (and remove) one untried move of `node` per spec.md's
    /// expansion policy: heuristic-guided sampling when there are more
    /// than 3 candidates, uniform otherwise.
    fn choose_expansion_move(&mut self, arena: &mut [Node], node: u32, board: &Board) -> Move {
        let untried = &mut arena[node as usize].untried;
        if untried.len() > 3 {
            untried.shuffle(&mut self.rng);
            let sample_len = untried.len().min(5);
            let best_pos = (0..sample_len)
                .max_by_key(|&i| heuristic::evaluate_move(board, untried[i]))
                .expect("sample is non-empty");
            untried.remove(best_pos)
        } else {
            let idx = self.rng.random_range(0..untried.len());
            untried.remove(idx)
        }
    }

    /// Run the configured rollout policies on `copy` and average their
    /// results (spec.md §4.3's "Rollout" section).
    fn simulate(&mut self, copy: &Board) -> f64 {
        if copy.terminal() {
            // Preserved verbatim per spec.md's open question: the
            // post-apply side flip means a winner here always reads as
            // "not the mover", so this only ever yields -1 or 0.
            return match copy.result() {
                GameResult::Draw => 0.0,
                GameResult::Win(winner) => {
                    if copy.current_player() == winner {
                        1.0
                    } else {
                        -1.0
                    }
                }
                GameResult::Ongoing => unreachable!("terminal() implies a non-Ongoing result"),
            };
        }

        let starting_side = copy.current_player();
        let mut total = 0.0;
        let mut policies = 0;

        if self.config.use_heuristic_rollout {
            total += self.rollout_heuristic(copy.clone(), starting_side);
            policies += 1;
        }
        if self.config.use_random_rollout {
            total += self.rollout_random(copy.clone(), starting_side);
            policies += 1;
        }

        if policies == 0 { 0.0 } else { total / policies as f64 }
    }

    fn rollout_heuristic(&mut self, mut board: Board, starting_side: Player) -> f64 {
        for _ in 0..ROLLOUT_PLY_CAP {
            if board.terminal() {
                break;
            }
            let scored = heuristic::scored_moves(&board);
            let top_len = scored.len().min(ROLLOUT_HEURISTIC_TOP_N);
            if top_len == 0 {
                break;
            }
            let idx = self.rng.random_range(0..top_len);
            board.apply(scored[idx].mv);
        }
        rollout_value(&board, starting_side)
    }

    fn rollout_random(&mut self, mut board: Board, starting_side: Player) -> f64 {
        for _ in 0..ROLLOUT_PLY_CAP {
            if board.terminal() {
                break;
            }
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let idx = self.rng.random_range(0..moves.len());
            board.apply(moves[idx]);
        }
        rollout_value(&board, starting_side)
    }

    /// Walk from `leaf` to the root, crediting each node's accumulated
    /// value from `root_player`'s perspective (spec.md §4.3's
    /// "Backpropagation").
    fn backpropagate(&self, arena: &mut [Node], leaf: u32, value: f64, root_player: Player) {
        let mut node = leaf;
        loop {
            let n = &mut arena[node as usize];
            n.visits += 1;
            if n.side_to_move == root_player {
                n.value += value;
            } else {
                n.value -= value;
            }
            match n.parent {
                Some(parent) => node = parent,
                None => break,
            }
        }
    }

    /// The root's most-visited child, ties broken by insertion order. If
    /// the root has no children (a zero-iteration budget), the first
    /// untried move, or [`Move::INVALID`] if there is none.
    fn pick_best_child(&self, arena: &[Node], root: u32) -> Move {
        let node = &arena[root as usize];
        if node.children.is_empty() {
            return node.untried.first().copied().unwrap_or(Move::INVALID);
        }

        let mut best_child = node.children[0];
        let mut best_visits = 0u64;
        for &child_idx in &node.children {
            let visits = arena[child_idx as usize].visits;
            if visits > best_visits {
                best_visits = visits;
                best_child = child_idx;
            }
        }
        arena[best_child as usize].mv
    }
}

/// Score a finished rollout from `starting_side`'s perspective: `+1` if
/// `starting_side` won, `-1` if the opponent won, `0` for a draw or a
/// truncation with no winner.
fn rollout_value(board: &Board, starting_side: Player) -> f64 {
    match board.result() {
        GameResult::Win(winner) if winner == starting_side => 1.0,
        GameResult::Win(_) => -1.0,
        _ => 0.0,
    }
}

impl Default for Search {
    fn default() -> Search {
        Search::new(SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gomoku_core::board::CENTER;

    fn mv(notation: &str) -> Move {
        let letter = notation.chars().next().unwrap();
        let x = letter.to_ascii_uppercase() as u8 - b'A';
        let y: u8 = notation[1..].parse::<u8>().unwrap() - 1;
        Move::new(x, y)
    }

    fn apply_all(board: &mut Board, notations: &str) {
        for word in notations.split_whitespace() {
            board.apply(mv(word));
        }
    }

    fn fast_config() -> SearchConfig {
        SearchConfig {
            seed: 42,
            max_iterations: 400,
            max_time_ms: 500,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn returns_immediate_win_without_building_a_tree() {
        let mut board = Board::new();
        apply_all(&mut board, "F8 F9 G8 G9 H8 H9 I8 I9");
        let mut search = Search::new(fast_config());
        let chosen = search.search(&board, 500);
        assert!(chosen == mv("E8") || chosen == mv("J8"));
        assert_eq!(search.iterations(), 0);
    }

    #[test]
    fn returns_forced_block_without_building_a_tree() {
        let mut board = Board::new();
        apply_all(&mut board, "H8 D8 I9 E8 J10 F8 K11 G8");
        let mut search = Search::new(fast_config());
        let chosen = search.search(&board, 500);
        assert_eq!(chosen, mv("C8"));
        assert_eq!(search.iterations(), 0);
    }

    #[test]
    fn single_legal_move_short_circuits() {
        let board = Board::new();
        let mut search = Search::new(fast_config());
        let chosen = search.search(&board, 500);
        assert_eq!(chosen, CENTER);
    }

    #[test]
    fn iterations_never_exceed_configured_cap() {
        let mut board = Board::new();
        board.apply(CENTER);
        let mut config = fast_config();
        config.max_iterations = 50;
        config.max_time_ms = 0;
        let mut search = Search::new(config);
        let chosen = search.search(&board, 0);
        assert!(board.legal(chosen));
        assert!(search.iterations() <= 50);
    }

    #[test]
    fn returns_a_legal_move_from_midgame() {
        let mut board = Board::new();
        apply_all(&mut board, "H8 I9 G7 F6");
        let mut search = Search::new(fast_config());
        let chosen = search.search(&board, 500);
        assert!(board.legal(chosen));
    }

    #[test]
    fn fixed_seed_is_deterministic_with_no_time_limit() {
        let mut board = Board::new();
        apply_all(&mut board, "H8 I9");
        let mut config = fast_config();
        config.max_time_ms = 0;
        config.max_iterations = 200;

        let mut search_a = Search::new(config);
        let a = search_a.search(&board, 0);

        let mut search_b = Search::new(config);
        let b = search_b.search(&board, 0);

        assert_eq!(a, b);
        assert_eq!(search_a.iterations(), search_b.iterations());
    }

    #[test]
    fn zero_budget_falls_back_to_first_untried_move() {
        let mut board = Board::new();
        board.apply(CENTER);
        let mut config = fast_config();
        config.max_iterations = 0;
        let mut search = Search::new(config);
        let chosen = search.search(&board, 500);
        assert!(board.legal(chosen) || chosen == Move::INVALID);
    }

    #[test]
    fn heuristic_only_rollout_still_returns_legal_move() {
        let mut board = Board::new();
        apply_all(&mut board, "H8 I9 G7");
        let mut config = fast_config();
        config.use_random_rollout = false;
        let mut search = Search::new(config);
        let chosen = search.search(&board, 500);
        assert!(board.legal(chosen));
    }

    #[test]
    fn random_only_rollout_still_returns_legal_move() {
        let mut board = Board::new();
        apply_all(&mut board, "H8 I9 G7");
        let mut config = fast_config();
        config.use_heuristic_rollout = false;
        let mut search = Search::new(config);
        let chosen = search.search(&board, 500);
        assert!(board.legal(chosen));
    }

    #[test]
    fn search_does_not_mutate_caller_board() {
        let mut board = Board::new();
        apply_all(&mut board, "H8 I9 G7 F6");
        let before = board.clone();
        let mut search = Search::new(fast_config());
        search.search(&board, 500);
        assert_eq!(board, before);
    }
}

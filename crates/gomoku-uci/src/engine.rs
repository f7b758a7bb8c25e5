//! Synchronous, line-oriented front-end loop (spec.md §6).
//!
//! This loop runs entirely on the calling thread: `go` drives the search
//! to completion before the next line is read, because search here is
//! single-threaded and synchronous by design (spec.md §5) and `stop` has
//! no effect on a call that has already returned by the time it could
//! arrive.

use std::io::{self, BufRead};

use tracing::{debug, info, warn};

use gomoku_core::board::Board;
use gomoku_core::perft;
use gomoku_engine::{Search, SearchConfig};

use crate::command::{Command, GoParams, parse_command};
use crate::error::UciError;
use crate::notation;

/// Iterations-per-ply multiplier for `go depth <d>` (spec.md §6.3:
/// `max_iterations = d * 1000`).
const ITERATIONS_PER_DEPTH: u32 = 1000;

/// The front-end engine: current board plus a reusable [`Search`].
pub struct UciEngine {
    board: Board,
    search: Search,
}

impl UciEngine {
    pub fn new() -> UciEngine {
        UciEngine {
            board: Board::new(),
            search: Search::default(),
        }
    }

    /// Read commands from stdin until `quit`/`exit` or input closes.
    pub fn run(mut self) -> Result<(), UciError> {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received command");

            match parse_command(trimmed) {
                Ok(cmd) => {
                    if self.handle(cmd) {
                        break;
                    }
                }
                Err(err) => warn!(error = %err, "command parse error"),
            }
        }

        info!("gomoku shutting down");
        Ok(())
    }

    /// Dispatch one parsed command. Returns `true` if the loop should stop.
    fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Uci => self.handle_uci(),
            Command::IsReady => println!("readyok"),
            Command::UciNewGame => self.board.reset(),
            Command::Position(moves) => self.handle_position(&moves),
            Command::Go(params) => self.handle_go(params),
            Command::Stop => {}
            Command::Display => self.handle_display(),
            Command::Perft(depth) => self.handle_perft(depth),
            Command::Quit => return true,
            Command::Unknown(_) => {}
        }
        false
    }

    fn handle_uci(&self) {
        println!("id name gomoku");
        println!("id author gomoku-engine");
        println!("uciok");
    }

    fn handle_position(&mut self, moves: &[gomoku_core::moves::Move]) {
        self.board.reset();
        for &mv in moves {
            if self.board.legal(mv) {
                self.board.apply(mv);
            }
        }
    }

    fn handle_go(&mut self, params: GoParams) {
        let chosen = match params {
            GoParams::Movetime(ms) => self.search.search(&self.board, ms),
            GoParams::Nodes(n) => self.search_with_iteration_cap(n),
            GoParams::Depth(d) => self.search_with_iteration_cap(d.saturating_mul(ITERATIONS_PER_DEPTH)),
            GoParams::Default => self.search.search_with_config_time(&self.board),
        };
        println!("bestmove {}", notation::to_text(chosen));
    }

    /// Run a search bounded purely by iterations (no time limit), per
    /// spec.md §9's "no time limit" sentinel.
    fn search_with_iteration_cap(&mut self, max_iterations: u32) -> gomoku_core::moves::Move {
        let config = SearchConfig {
            max_iterations,
            ..*self.search.config()
        };
        self.search.set_config(config);
        self.search.search(&self.board, 0)
    }

    fn handle_display(&self) {
        print!("{}", self.board.render());
        println!(
            "{} to move, {} moves played",
            self.board.current_player(),
            self.board.move_count()
        );
        if self.board.terminal() {
            println!("result: {:?}", self.board.result());
        }
    }

    fn handle_perft(&self, depth: u32) {
        let mut copy = self.board.clone();
        let nodes = perft::perft(&mut copy, depth);
        println!("perft {depth} nodes {nodes}");
    }
}

impl Default for UciEngine {
    fn default() -> UciEngine {
        UciEngine::new()
    }
}

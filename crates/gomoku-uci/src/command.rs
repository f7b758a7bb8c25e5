//! Front-end command parsing (spec.md §6's command table).

use gomoku_core::moves::Move;

use crate::error::UciError;
use crate::notation;

/// Budget arguments to a `go` command. Exactly one of these governs the
/// resulting search call; `Default` mirrors [`gomoku_engine::SearchConfig`]'s
/// own default time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoParams {
    /// `go movetime <ms>` — wall-clock budget in milliseconds.
    Movetime(u64),
    /// `go nodes <n>` — iteration cap, no time limit.
    Nodes(u32),
    /// `go depth <d>` — iteration cap of `d * 1000`, no time limit.
    Depth(u32),
    /// Bare `go`, with no recognized sub-parameter.
    Default,
}

/// A parsed front-end command.
#[derive(Debug)]
pub enum Command {
    /// `uci` — identify the engine.
    Uci,
    /// `isready` — synchronization ping.
    IsReady,
    /// `ucinewgame` — reset to an empty board.
    UciNewGame,
    /// `position startpos [moves ...]` — reset, then the parsed move list
    /// to apply (each only if still legal when its turn comes).
    Position(Vec<Move>),
    /// `go [movetime <ms> | nodes <n> | depth <d>]`.
    Go(GoParams),
    /// `stop` — no-op; search is synchronous.
    Stop,
    /// `d` / `display` — render the board.
    Display,
    /// `perft <depth>` — count leaf positions at `depth` plies.
    Perft(u32),
    /// `quit` / `exit` — terminate the loop.
    Quit,
    /// Unrecognized command, silently ignored (spec.md §7).
    Unknown(String),
}

/// Parse a single line of input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match head {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "d" | "display" => Ok(Command::Display),
        "quit" | "exit" => Ok(Command::Quit),
        "position" => parse_position(&tokens[1..]),
        "go" => parse_go(&tokens[1..]),
        "perft" => parse_perft(&tokens[1..]),
        _ => Ok(Command::Unknown(head.to_string())),
    }
}

/// Parse `position startpos [moves m1 m2 ...]`.
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    if tokens.first() != Some(&"startpos") {
        return Err(UciError::MalformedPosition);
    }

    let rest = &tokens[1..];
    if rest.is_empty() || rest[0] != "moves" {
        return Ok(Command::Position(Vec::new()));
    }

    let mut moves = Vec::with_capacity(rest.len() - 1);
    for text in &rest[1..] {
        let mv = notation::parse(text);
        if !mv.is_valid() {
            return Err(UciError::InvalidMove {
                text: text.to_string(),
            });
        }
        moves.push(mv);
    }
    Ok(Command::Position(moves))
}

fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    if tokens.is_empty() {
        return Ok(Command::Go(GoParams::Default));
    }

    let param = tokens[0];
    let value = tokens.get(1).ok_or_else(|| UciError::MissingGoValue {
        param: param.to_string(),
    })?;
    let parsed: u64 = value.parse().map_err(|_| UciError::InvalidGoValue {
        param: param.to_string(),
        value: value.to_string(),
    })?;

    match param {
        "movetime" => Ok(Command::Go(GoParams::Movetime(parsed))),
        "nodes" => Ok(Command::Go(GoParams::Nodes(parsed as u32))),
        "depth" => Ok(Command::Go(GoParams::Depth(parsed as u32))),
        _ => Ok(Command::Go(GoParams::Default)),
    }
}

fn parse_perft(tokens: &[&str]) -> Result<Command, UciError> {
    let value = tokens.first().ok_or_else(|| UciError::InvalidPerftDepth {
        value: String::new(),
    })?;
    let depth: u32 = value.parse().map_err(|_| UciError::InvalidPerftDepth {
        value: value.to_string(),
    })?;
    Ok(Command::Perft(depth))
}

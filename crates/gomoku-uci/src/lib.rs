//! Line-oriented front-end command surface for the gomoku engine
//! (spec.md §6). Architecturally separate from the core: this crate only
//! calls `gomoku_core`/`gomoku_engine`'s public API.

pub mod command;
pub mod engine;
pub mod error;
pub mod notation;

pub use command::{Command, GoParams};
pub use engine::UciEngine;
pub use error::UciError;

//! Game engine logic and state management.
//!
//! This module orchestrates the [`core`](crate::core) data structures into
//! gameplay:
//!
//! - [`GameState`] - the single source of truth and its lifecycle
//! - [`Command`] - discrete inputs, including gravity [`Command::Tick`]s
//! - [`Transition`] / [`GameEvent`] - transition results and notifications
//! - [`GameStats`] - score, lines, level and placement counters
//! - [`PieceGenerator`] / [`PieceSeed`] - uniform random piece selection
//! - [`EngineConfig`] / [`GravityCurve`] - board size and drop-speed curve
//!
//! # Game Flow
//!
//! 1. Create an idle [`GameState`] seeded with the persisted high score
//! 2. [`GameState::start`] deals two pieces and enters `Playing`
//! 3. The driver applies player commands and ticks every
//!    [`GameState::drop_interval`]
//! 4. Pieces lock, rows clear, a new piece spawns from the lookahead
//! 5. Repeat until a spawned piece has no valid position
//!
//! # Example
//!
//! ```
//! use quadris_engine::{Command, EngineConfig, GameEvent, GameState};
//!
//! let state = GameState::new(EngineConfig::default(), 0)?.start();
//!
//! let transition = state.apply_command(Command::MoveLeft);
//! assert_eq!(transition.events(), &[GameEvent::PieceMoved]);
//!
//! let state = transition.into_state().apply_command(Command::HardDrop).into_state();
//! assert_eq!(state.stats().completed_pieces(), 1);
//! # Ok::<(), quadris_engine::ConfigError>(())
//! ```

pub use self::{
    command::*, config::*, event::*, game_state::*, piece_generator::*, scoring::*,
};

mod command;
mod config;
mod event;
mod game_state;
mod piece_generator;
mod scoring;

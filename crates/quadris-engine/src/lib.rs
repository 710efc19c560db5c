//! Rules engine for a falling-block puzzle game.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - board grid, piece catalog, collision and placement rules
//! - [`engine`] - scoring, piece generation, commands, notifications and the
//!   game state machine that orchestrates them
//!
//! The engine is passive: it never schedules time or touches I/O. A driver
//! feeds it [`Command`]s (including [`Command::Tick`] for gravity) and gets
//! back a [`Transition`] holding the next [`GameState`] plus the
//! [`GameEvent`]s collaborators may react to.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::PieceKind;

use super::game_state::GameState;

/// Upper bound on notifications produced by one transition
/// (lock, lines, level-up, game over).
pub const MAX_EVENTS: usize = 4;

/// Notifications emitted alongside a transition.
///
/// Events are not part of [`GameState`]; collaborators such as audio or
/// persistence react to them and then drop them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    /// A player command moved the falling piece.
    PieceMoved,
    /// A rotation was accepted (possibly after a wall kick).
    PieceRotated,
    /// The falling piece was merged into the board.
    PieceLocked {
        kind: PieceKind,
        hard_drop_rows: usize,
    },
    /// One lock removed this many full rows.
    LinesCleared(usize),
    /// The level advanced to the given value.
    LevelUp(usize),
    /// The freshly spawned piece had no valid position.
    GameOver {
        final_score: usize,
        is_new_high_score: bool,
    },
}

pub type Events = ArrayVec<GameEvent, MAX_EVENTS>;

/// Result of applying a command: the next state and its notifications.
#[derive(Debug, Clone)]
pub struct Transition {
    state: GameState,
    events: Events,
}

impl Transition {
    pub(crate) fn new(state: GameState, events: Events) -> Self {
        Self { state, events }
    }

    pub(crate) fn unchanged(state: GameState) -> Self {
        Self::new(state, Events::new())
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn into_parts(self) -> (GameState, Events) {
        (self.state, self.events)
    }
}

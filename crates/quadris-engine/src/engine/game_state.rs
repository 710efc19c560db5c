use std::time::Duration;

use rand::Rng as _;
use tracing::{debug, trace};

use crate::core::{Board, Piece, PieceKind, RenderGrid};

use super::{
    command::Command,
    config::{ConfigError, EngineConfig},
    event::{Events, GameEvent, Transition},
    piece_generator::{PieceGenerator, PieceSeed},
    scoring::GameStats,
};

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    /// No game in progress.
    Idle,
    Playing,
    Paused,
    /// Terminal until the next [`GameState::start`].
    GameOver,
}

/// The single source of truth for one game.
///
/// Every operation takes `&self` and returns a new value; nothing is
/// modified in place. A driver keeps the latest state and replaces it with
/// each transition's result.
///
/// # Example
///
/// ```
/// use quadris_engine::{Command, EngineConfig, GameState, PieceSeed};
///
/// let seed = PieceSeed::from(7_u128);
/// let idle = GameState::with_seed(EngineConfig::default(), 1200, seed)?;
/// assert!(idle.phase().is_idle());
///
/// let playing = idle.start();
/// assert!(playing.is_playing());
/// assert!(playing.current_piece().is_some());
/// assert_eq!(playing.high_score(), 1200);
///
/// // Ticks are ignored while paused.
/// let paused = playing.toggle_pause();
/// let after_tick = paused.apply_command(Command::Tick);
/// assert!(after_tick.events().is_empty());
/// assert_eq!(after_tick.state().current_piece(), paused.current_piece());
/// # Ok::<(), quadris_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    stats: GameStats,
    phase: Phase,
    high_score: usize,
    generator: PieceGenerator,
}

impl Default for GameState {
    fn default() -> Self {
        Self::idle(EngineConfig::default(), 0, PieceGenerator::new())
    }
}

impl GameState {
    /// Creates an idle state with a randomly seeded piece generator.
    ///
    /// `high_score` is the externally persisted value carried through every
    /// game played from this state.
    pub fn new(config: EngineConfig, high_score: usize) -> Result<Self, ConfigError> {
        Self::with_seed(config, high_score, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for reproducible pieces.
    pub fn with_seed(
        config: EngineConfig,
        high_score: usize,
        seed: PieceSeed,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::idle(
            config,
            high_score,
            PieceGenerator::with_seed(seed),
        ))
    }

    fn idle(config: EngineConfig, high_score: usize, generator: PieceGenerator) -> Self {
        Self {
            config,
            board: Board::empty(config.width, config.height),
            current: None,
            next: None,
            stats: GameStats::new(),
            phase: Phase::Idle,
            high_score,
            generator,
        }
    }

    /// Starts a fresh game from any phase.
    ///
    /// The board is cleared, two pieces are drawn, counters are zeroed and
    /// the high score is carried over.
    #[must_use]
    pub fn start(&self) -> Self {
        let mut state = self.reset();
        let current = state.draw_piece();
        let next = state.draw_piece();
        state.current = Some(current);
        state.next = Some(next);
        state.phase = Phase::Playing;
        debug!(current = %current.kind(), next = %next.kind(), "game started");
        state
    }

    /// Returns to `Idle` from any phase, keeping only the high score.
    ///
    /// The driver is expected to stop scheduling ticks.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::idle(self.config, self.high_score, self.generator.clone())
    }

    /// Toggles between `Playing` and `Paused`. No-op in any other phase.
    #[must_use]
    pub fn toggle_pause(&self) -> Self {
        let phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            phase @ (Phase::Idle | Phase::GameOver) => phase,
        };
        if phase != self.phase {
            debug!(from = ?self.phase, to = ?phase, "pause toggled");
        }
        Self {
            phase,
            ..self.clone()
        }
    }

    /// Applies one command.
    ///
    /// Outside `Playing` every command is ignored and the state is returned
    /// unchanged without events. Movements that collide are ignored too,
    /// except downward ones, which lock the piece.
    #[must_use]
    pub fn apply_command(&self, command: Command) -> Transition {
        let Some(piece) = self.current.filter(|_| self.phase.is_playing()) else {
            trace!(%command, phase = ?self.phase, "command ignored");
            return Transition::unchanged(self.clone());
        };

        match command {
            Command::MoveLeft => self.shift(piece, -1),
            Command::MoveRight => self.shift(piece, 1),
            Command::SoftDrop => self.descend(piece, Some(GameEvent::PieceMoved)),
            Command::Tick => self.descend(piece, None),
            Command::Rotate => match piece.kicked_rotation(&self.board) {
                Some(rotated) => self.with_current(rotated, Some(GameEvent::PieceRotated)),
                None => {
                    trace!(kind = %piece.kind(), "rotation rejected");
                    Transition::unchanged(self.clone())
                }
            },
            Command::HardDrop => {
                let (landed, rows) = piece.drop_position(&self.board);
                self.lock(landed, rows)
            }
        }
    }

    /// Where the falling piece would come to rest on a hard drop.
    ///
    /// Pure query for display; `None` when there is no falling piece.
    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        self.current
            .map(|piece| piece.drop_position(&self.board).0)
    }

    /// Advisory gravity period for the current level.
    ///
    /// The engine does not enforce it; drivers use it to schedule ticks.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.config.gravity.interval(self.stats.level())
    }

    /// Returns the board with the falling piece overlaid, and its ghost when
    /// `with_ghost` is set.
    #[must_use]
    pub fn render_grid(&self, with_ghost: bool) -> RenderGrid {
        let ghost = self.ghost_piece().filter(|_| with_ghost);
        RenderGrid::new(&self.board, self.current.as_ref(), ghost.as_ref())
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Locked cells only; the falling piece is not part of the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// The lookahead piece, present from `start` on.
    #[must_use]
    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn total_cleared_lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn placements(&self, kind: PieceKind) -> usize {
        self.stats.placements(kind)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a game is in progress, paused or not.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::Paused)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.phase.is_paused()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    #[must_use]
    pub fn high_score(&self) -> usize {
        self.high_score
    }

    fn draw_piece(&mut self) -> Piece {
        Piece::spawn(self.generator.next_kind(), self.board.width())
    }

    fn with_current(&self, piece: Piece, event: Option<GameEvent>) -> Transition {
        let state = Self {
            current: Some(piece),
            ..self.clone()
        };
        Transition::new(state, event.into_iter().collect())
    }

    fn shift(&self, piece: Piece, dx: i32) -> Transition {
        let moved = piece.moved(dx, 0);
        if self.board.is_valid(&moved) {
            self.with_current(moved, Some(GameEvent::PieceMoved))
        } else {
            Transition::unchanged(self.clone())
        }
    }

    fn descend(&self, piece: Piece, event: Option<GameEvent>) -> Transition {
        let moved = piece.moved(0, 1);
        if self.board.is_valid(&moved) {
            self.with_current(moved, event)
        } else {
            self.lock(piece, 0)
        }
    }

    /// Merges `piece` into the board, clears rows, scores, and spawns the
    /// lookahead piece. Enters `GameOver` when the spawn is blocked.
    fn lock(&self, piece: Piece, hard_drop_rows: usize) -> Transition {
        let mut state = self.clone();
        let mut events = Events::new();

        let (board, cleared_lines) = self.board.place(&piece).clear_full_rows();
        let level_before = state.stats.level();
        let points = state
            .stats
            .complete_piece_drop(piece.kind(), cleared_lines, hard_drop_rows);
        state.board = board;
        debug!(
            kind = %piece.kind(),
            cleared_lines,
            hard_drop_rows,
            points,
            score = state.stats.score(),
            "piece locked"
        );

        events.push(GameEvent::PieceLocked {
            kind: piece.kind(),
            hard_drop_rows,
        });
        if cleared_lines > 0 {
            events.push(GameEvent::LinesCleared(cleared_lines));
        }
        let level = state.stats.level();
        if level > level_before {
            debug!(level, "level up");
            events.push(GameEvent::LevelUp(level));
        }

        let spawned = match state.next.take() {
            Some(next) => next,
            None => state.draw_piece(),
        };
        let lookahead = state.draw_piece();
        state.next = Some(lookahead);

        if state.board.is_valid(&spawned) {
            state.current = Some(spawned);
        } else {
            let final_score = state.stats.score();
            let is_new_high_score = final_score > state.high_score;
            state.high_score = state.high_score.max(final_score);
            state.current = None;
            state.phase = Phase::GameOver;
            debug!(
                final_score,
                is_new_high_score,
                blocked = %spawned.kind(),
                "game over"
            );
            events.push(GameEvent::GameOver {
                final_score,
                is_new_high_score,
            });
        }

        Transition::new(state, events)
    }
}

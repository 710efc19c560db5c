use std::{path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};
use quadris_engine::{Command, GameEvent, GameState, PieceSeed};
use rand::{Rng, SeedableRng as _, rngs::StdRng};
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::{config::CliConfig, display, high_score::HighScoreFile, util::Output};

/// Simulated time between two bot inputs.
const INPUT_INTERVAL: Duration = Duration::from_millis(50);

/// Commands the bot picks from with equal probability. Sideways moves are
/// listed twice so pieces travel before they land.
const BOT_COMMANDS: [Command; 7] = [
    Command::MoveLeft,
    Command::MoveLeft,
    Command::MoveRight,
    Command::MoveRight,
    Command::Rotate,
    Command::SoftDrop,
    Command::HardDrop,
];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Seed (32 hex characters) for pieces and bot inputs; random if omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// JSON configuration file (see `default-config`)
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON file holding the persisted high score
    #[arg(long)]
    high_score_file: Option<PathBuf>,
    /// Maximum number of commands issued in one game
    #[arg(long, default_value_t = 100_000)]
    max_steps: usize,
    /// Print the final board of every game to stderr
    #[arg(long)]
    show_board: bool,
    /// Output file for the JSON summary (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct PlaySummary {
    started_at: DateTime<Utc>,
    seed: PieceSeed,
    high_score: usize,
    games: Vec<GameSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct GameSummary {
    score: usize,
    level: usize,
    cleared_lines: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
    steps: usize,
    simulated_ms: u128,
    /// False when the game was cut short by `--max-steps`.
    game_over: bool,
    new_high_score: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        games,
        seed,
        config,
        high_score_file,
        max_steps,
        show_board,
        output,
    } = arg;

    let config = CliConfig::load(config.as_deref())?;
    let high_score_file = high_score_file.as_ref().map(HighScoreFile::new);
    let high_score = match &high_score_file {
        Some(file) => file.load()?,
        None => 0,
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!(%seed, high_score, games, "starting session");

    let mut bot = bot_rng(seed);
    let mut state = GameState::with_seed(config.engine, high_score, seed)?;
    let started_at = Utc::now();
    let mut summaries = Vec::with_capacity(*games);

    for game in 1..=*games {
        let (finished, summary) = play_game(state.start(), &mut bot, *max_steps);
        info!(
            game,
            score = summary.score,
            level = summary.level,
            lines = summary.cleared_lines,
            steps = summary.steps,
            "game finished"
        );
        if summary.new_high_score
            && let Some(file) = &high_score_file
        {
            file.store(finished.high_score())?;
        }
        if *show_board {
            eprintln!("game {game}: score {}", summary.score);
            eprintln!("{}", display::render_board(&finished, &config.display));
        }
        summaries.push(summary);
        state = finished;
    }

    let summary = PlaySummary {
        started_at,
        seed,
        high_score: state.high_score(),
        games: summaries,
    };
    Output::save_json(&summary, output.clone())
}

/// Bot inputs are derived from the piece seed so that a seeded session
/// replays identically.
fn bot_rng(seed: PieceSeed) -> StdRng {
    let mut bytes = [0; 32];
    bytes[..16].copy_from_slice(&u128::from(seed).to_le_bytes());
    StdRng::from_seed(bytes)
}

fn bot_command<R>(rng: &mut R) -> Command
where
    R: Rng,
{
    BOT_COMMANDS[rng.random_range(0..BOT_COMMANDS.len())]
}

/// Drives one started game until game over or `max_steps` commands.
///
/// Time is simulated: every step advances the clock by [`INPUT_INTERVAL`],
/// and a gravity tick replaces the bot input whenever the engine's drop
/// interval has elapsed.
fn play_game<R>(mut state: GameState, bot: &mut R, max_steps: usize) -> (GameState, GameSummary)
where
    R: Rng,
{
    let mut clock = Duration::ZERO;
    let mut next_tick = state.drop_interval();
    let mut steps = 0;
    let mut new_high_score = false;

    while !state.is_game_over() && steps < max_steps {
        clock += INPUT_INTERVAL;
        let command = if clock >= next_tick {
            next_tick = clock + state.drop_interval();
            Command::Tick
        } else {
            bot_command(bot)
        };

        let (next, events) = state.apply_command(command).into_parts();
        for event in &events {
            log_event(*event);
            if let GameEvent::GameOver {
                is_new_high_score, ..
            } = event
            {
                new_high_score = *is_new_high_score;
            }
        }
        state = next;
        steps += 1;
    }

    let stats = state.stats();
    let summary = GameSummary {
        score: stats.score(),
        level: stats.level(),
        cleared_lines: stats.total_cleared_lines(),
        completed_pieces: stats.completed_pieces(),
        line_cleared_counter: *stats.line_cleared_counter(),
        steps,
        simulated_ms: clock.as_millis(),
        game_over: state.is_game_over(),
        new_high_score,
    };
    (state, summary)
}

fn log_event(event: GameEvent) {
    match event {
        GameEvent::PieceMoved | GameEvent::PieceRotated => trace!(?event),
        GameEvent::PieceLocked {
            kind,
            hard_drop_rows,
        } => trace!(%kind, hard_drop_rows, "piece locked"),
        GameEvent::LinesCleared(lines) => debug!(lines, "lines cleared"),
        GameEvent::LevelUp(level) => info!(level, "level up"),
        GameEvent::GameOver {
            final_score,
            is_new_high_score,
        } => info!(final_score, is_new_high_score, "game over"),
    }
}

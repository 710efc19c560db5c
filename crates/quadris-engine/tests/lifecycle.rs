use quadris_engine::{Command, EngineConfig, GameEvent, GameState, Phase, PieceKind, PieceSeed};

fn seeded(seed: u128, high_score: usize) -> GameState {
    GameState::with_seed(EngineConfig::default(), high_score, PieceSeed::from(seed)).unwrap()
}

/// Hard-drops every piece at its spawn column until the stack tops out.
fn play_until_game_over(mut state: GameState) -> (GameState, Vec<GameEvent>) {
    let mut events = Vec::new();
    for _ in 0..1000 {
        if state.is_game_over() {
            break;
        }
        let (next, new_events) = state.apply_command(Command::HardDrop).into_parts();
        events.extend(new_events);
        state = next;
    }
    (state, events)
}

#[test]
fn idle_state_waits_for_start() {
    let idle = seeded(1, 0);
    assert_eq!(idle.phase(), Phase::Idle);
    let ticked = idle.apply_command(Command::Tick);
    assert!(ticked.events().is_empty());
    assert_eq!(ticked.state().phase(), Phase::Idle);

    let playing = idle.start();
    assert_eq!(playing.phase(), Phase::Playing);
    assert!(playing.current_piece().is_some());
    assert!(playing.next_piece().is_some());
}

#[test]
fn same_seed_deals_same_pieces() {
    let kinds = |seed| {
        let mut state = seeded(seed, 0).start();
        let mut kinds = Vec::new();
        for _ in 0..8 {
            let Some(piece) = state.current_piece() else {
                break;
            };
            kinds.push(piece.kind());
            state = state.apply_command(Command::HardDrop).into_state();
        }
        kinds
    };
    assert_eq!(kinds(99), kinds(99));
    assert_eq!(kinds(99).len(), 8);
}

#[test]
fn lookahead_becomes_current_after_lock() {
    let state = seeded(5, 0).start();
    let next_kind = state.next_piece().map(|piece| piece.kind());
    let locked = state.apply_command(Command::HardDrop).into_state();
    assert_eq!(locked.current_piece().map(|piece| piece.kind()), next_kind);
}

#[test]
fn hard_drop_lands_on_ghost() {
    let state = seeded(3, 0).start();
    let ghost = state.ghost_piece().unwrap();
    let rows = usize::try_from(
        ghost.position().row() - state.current_piece().unwrap().position().row(),
    )
    .unwrap();

    let transition = state.apply_command(Command::HardDrop);
    assert_eq!(transition.state().score(), 10 + 2 * rows);
    assert_eq!(
        transition.events()[0],
        GameEvent::PieceLocked {
            kind: ghost.kind(),
            hard_drop_rows: rows
        }
    );
    for (row, col) in ghost.cells() {
        let cell = transition
            .state()
            .board()
            .cell(usize::try_from(row).unwrap(), usize::try_from(col).unwrap());
        assert!(cell.is_some_and(|cell| cell.is_filled()));
    }
}

#[test]
fn stacking_at_spawn_ends_the_game() {
    let (over, events) = play_until_game_over(seeded(0xabcdef, 0).start());
    assert!(over.is_game_over());
    assert!(over.current_piece().is_none());
    assert_eq!(over.high_score(), over.score());

    let game_overs: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, GameEvent::GameOver { .. }))
        .collect();
    assert_eq!(
        game_overs,
        vec![&GameEvent::GameOver {
            final_score: over.score(),
            is_new_high_score: true
        }]
    );

    let locks = events
        .iter()
        .filter(|event| matches!(event, GameEvent::PieceLocked { .. }))
        .count();
    assert_eq!(locks, over.stats().completed_pieces());
    let placed: usize = PieceKind::ALL.iter().map(|&kind| over.placements(kind)).sum();
    assert_eq!(placed, locks);

    // The engine stays inert until restarted.
    for command in Command::ALL {
        let transition = over.apply_command(command);
        assert!(transition.events().is_empty());
        assert!(transition.state().is_game_over());
    }
    let restarted = over.start();
    assert!(restarted.phase().is_playing());
    assert_eq!(restarted.high_score(), over.score());
}

#[test]
fn game_over_below_high_score_is_not_a_record() {
    let (over, events) = play_until_game_over(seeded(0xabcdef, 1_000_000).start());
    assert_eq!(over.high_score(), 1_000_000);
    assert!(events.contains(&GameEvent::GameOver {
        final_score: over.score(),
        is_new_high_score: false
    }));
}

#[test]
fn score_and_level_stay_consistent() {
    let mut state = seeded(17, 0).start();
    let mut last_score = 0;
    let pattern = [
        Command::Rotate,
        Command::MoveLeft,
        Command::MoveLeft,
        Command::Tick,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
    ];
    for command in pattern.iter().cycle().take(5000) {
        if state.is_game_over() {
            break;
        }
        state = state.apply_command(*command).into_state();
        assert!(state.score() >= last_score);
        assert_eq!(state.level(), state.total_cleared_lines() / 10 + 1);
        if let Some(piece) = state.current_piece() {
            assert!(state.board().is_valid(piece));
        }
        last_score = state.score();
    }
}

#[test]
fn pause_and_reset_are_idempotent() {
    let playing = seeded(8, 42)
        .start()
        .apply_command(Command::HardDrop)
        .into_state();

    let round_trip = playing.toggle_pause().toggle_pause();
    assert_eq!(round_trip.phase(), playing.phase());
    assert_eq!(round_trip.current_piece(), playing.current_piece());
    assert_eq!(round_trip.board(), playing.board());
    assert_eq!(round_trip.stats(), playing.stats());

    let paused = playing.toggle_pause();
    let ignored = paused.apply_command(Command::HardDrop);
    assert!(ignored.events().is_empty());
    assert_eq!(ignored.state().stats(), paused.stats());

    let once = playing.reset();
    let twice = once.reset();
    assert_eq!(once.phase(), Phase::Idle);
    assert_eq!(twice.phase(), Phase::Idle);
    assert_eq!(once.board(), twice.board());
    assert_eq!(once.stats(), twice.stats());
    assert_eq!(once.high_score(), 42);
    assert_eq!(twice.high_score(), 42);
}

#[test]
fn custom_board_size_is_respected() {
    let config = EngineConfig {
        width: 6,
        height: 8,
        ..EngineConfig::default()
    };
    let state = GameState::with_seed(config, 0, PieceSeed::from(2_u128))
        .unwrap()
        .start();
    assert_eq!(state.board().width(), 6);
    assert_eq!(state.board().height(), 8);
    assert_eq!(state.render_grid(true).rows().count(), 8);
    let (over, _) = play_until_game_over(state);
    assert!(over.is_game_over());
}

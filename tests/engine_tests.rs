//! End-to-end engine tests driven through `tick`

use blockfall::core::{Board, EngineConfig, GameEngine, Piece, PieceSource, Randomizer};
use blockfall::types::{GameStatus, Intent, IntentSet, PieceKind};

fn config(seed: u32) -> EngineConfig {
    EngineConfig {
        seed: Some(seed),
        ..EngineConfig::default()
    }
}

fn one(intent: Intent) -> IntentSet {
    IntentSet::empty().with(intent)
}

/// First seed whose opening piece is `kind`
fn seed_opening_with(kind: PieceKind) -> u32 {
    (1..10_000)
        .find(|&seed| PieceSource::new(Randomizer::Uniform, seed).draw() == kind)
        .expect("some seed opens with the requested kind")
}

#[test]
fn test_full_top_rows_end_the_game_without_input() {
    let mut board = Board::new(10, 20);
    for y in 0..2 {
        for x in 0..10 {
            board.set(x, y, Some(PieceKind::Z));
        }
    }

    let mut engine = GameEngine::with_board(config(7), board).unwrap();
    assert!(engine.current_piece().is_none());

    let event = engine.tick(0, IntentSet::empty());
    assert_eq!(event, None);
    assert_eq!(engine.status(), GameStatus::GameOver);
    // The blocked spawn never touches the board.
    assert_eq!(engine.board().occupied_count(), 20);
    assert_eq!(engine.lines(), 0);
}

#[test]
fn test_game_over_is_terminal_until_start() {
    let mut board = Board::new(10, 20);
    for x in 0..10 {
        board.set(x, 0, Some(PieceKind::S));
        board.set(x, 1, Some(PieceKind::S));
    }
    let mut engine = GameEngine::with_board(config(7), board).unwrap();
    engine.tick(0, IntentSet::empty());
    assert_eq!(engine.status(), GameStatus::GameOver);

    // Pause controls and movement do nothing after game over.
    engine.toggle_pause();
    engine.focus_lost();
    engine.tick(100, one(Intent::MoveLeft));
    assert_eq!(engine.status(), GameStatus::GameOver);

    engine.tick(200, one(Intent::StartOrPause));
    assert_eq!(engine.status(), GameStatus::Running);
    assert_eq!(engine.board().occupied_count(), 0);
    assert_eq!(engine.score(), 0);
    assert!(engine.current_piece().is_some());
    assert!(engine.next_piece().is_some());
}

#[test]
fn test_restart_after_long_game_over_starts_fresh_clock() {
    let mut board = Board::new(10, 20);
    for x in 0..10 {
        board.set(x, 0, Some(PieceKind::T));
        board.set(x, 1, Some(PieceKind::T));
    }
    let mut engine = GameEngine::with_board(config(7), board).unwrap();
    engine.tick(0, IntentSet::empty());
    assert_eq!(engine.status(), GameStatus::GameOver);

    // Far longer than any fall interval spent on the game-over screen.
    engine.tick(5_000, one(Intent::StartOrPause));
    assert_eq!(engine.status(), GameStatus::Running);
    assert_eq!(engine.current_piece().unwrap().y, 0);

    // Gravity counts from the restart tick.
    engine.tick(5_500, IntentSet::empty());
    assert_eq!(engine.current_piece().unwrap().y, 0);
    engine.tick(6_001, IntentSet::empty());
    assert_eq!(engine.current_piece().unwrap().y, 1);
}

#[test]
fn test_i_piece_completes_bottom_row() {
    let seed = seed_opening_with(PieceKind::I);
    let cfg = EngineConfig {
        instant_down: true,
        ..config(seed)
    };

    // Columns 0..=5 of the bottom row filled by two overlapping I pieces.
    let mut board = Board::new(10, 20);
    board.merge_piece(&Piece::new(PieceKind::I).at(0, 19));
    board.merge_piece(&Piece::new(PieceKind::I).at(2, 19));
    let mut engine = GameEngine::with_board(cfg, board).unwrap();

    engine.tick(0, one(Intent::MoveRight));
    let piece = engine.current_piece().unwrap();
    assert_eq!(piece.kind, PieceKind::I);
    assert_eq!(piece.x, 4);

    // Release between presses so every press is immediately eligible.
    engine.tick(1, IntentSet::empty());
    engine.tick(2, one(Intent::MoveRight));
    engine.tick(3, IntentSet::empty());
    engine.tick(4, one(Intent::MoveRight));
    assert_eq!(engine.current_piece().unwrap().x, 6);

    let event = engine.tick(5, one(Intent::MoveDown)).expect("instant drop locks");
    assert_eq!(event.kind, PieceKind::I);
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.line_score, 40);
    assert_eq!(engine.lines(), 1);
    assert_eq!(engine.score(), 10 + 40);
    assert_eq!(engine.board().height(), 20);
    assert_eq!(engine.board().occupied_count(), 0);
}

#[test]
fn test_instant_drop_matches_slow_drop() {
    let mut fast = GameEngine::new(EngineConfig {
        instant_down: true,
        ..config(99)
    })
    .unwrap();
    let mut slow = GameEngine::new(config(99)).unwrap();
    let ghost = fast.ghost_y().unwrap();

    let fast_event = fast.tick(0, one(Intent::MoveDown)).expect("locks in one tick");

    let mut slow_event = None;
    let mut now = 0;
    for _ in 0..100 {
        slow_event = slow.tick(now, IntentSet::empty());
        if slow_event.is_some() {
            break;
        }
        now += 1001;
    }

    assert_eq!(slow_event, Some(fast_event));
    assert_eq!(fast.board(), slow.board());

    // The locked piece rests on the row the ghost predicted.
    let top_row = (0..20)
        .find(|&y| (0..10).any(|x| fast.board().is_occupied(x, y)))
        .unwrap();
    assert_eq!(top_row, ghost);
}

#[test]
fn test_held_instant_drop_fires_once_per_press() {
    let mut engine = GameEngine::new(EngineConfig {
        instant_down: true,
        ..config(3)
    })
    .unwrap();

    assert!(engine.tick(0, one(Intent::MoveDown)).is_some());
    let y = engine.current_piece().unwrap().y;
    // Still held: the fresh piece stays put.
    assert!(engine.tick(200, one(Intent::MoveDown)).is_none());
    assert_eq!(engine.current_piece().unwrap().y, y);

    engine.tick(216, IntentSet::empty());
    assert!(engine.tick(232, one(Intent::MoveDown)).is_some());
    assert_eq!(engine.board().occupied_count(), 8);
}

#[test]
fn test_pieces_stack_until_game_over() {
    let mut engine = GameEngine::new(EngineConfig {
        instant_down: true,
        ..config(2024)
    })
    .unwrap();

    let mut now = 0;
    let mut locks = 0;
    while engine.status() == GameStatus::Running && locks < 200 {
        if engine.tick(now, one(Intent::MoveDown)).is_some() {
            locks += 1;
        }
        now += 16;
        engine.tick(now, IntentSet::empty());
        now += 16;
    }

    assert_eq!(engine.status(), GameStatus::GameOver);
    assert!(locks > 0);
    assert!(engine.score() >= 10 * locks);
}

#[test]
fn test_same_seed_same_session() {
    let script = [
        one(Intent::MoveLeft),
        IntentSet::empty(),
        one(Intent::RotateRight),
        one(Intent::MoveDown),
        IntentSet::empty().with(Intent::MoveRight).with(Intent::MoveDown),
    ];

    let run = || {
        let mut engine = GameEngine::new(config(555)).unwrap();
        let mut now = 0;
        for round in 0..400 {
            engine.tick(now, script[round % script.len()]);
            now += 37;
        }
        engine.snapshot()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_level_rises_with_custom_thresholds() {
    let seed = seed_opening_with(PieceKind::O);
    let cfg = EngineConfig {
        board_width: 4,
        board_height: 6,
        instant_down: true,
        level_thresholds: vec![2],
        fall_rates: vec![1.0, 4.0],
        ..config(seed)
    };
    // Two bottom rows filled except the two middle columns.
    let board = Board::from_ascii(&[
        "....", //
        "....", //
        "....", //
        "....", //
        "J..J", //
        "J..J", //
    ])
    .unwrap();
    let mut engine = GameEngine::with_board(cfg, board).unwrap();
    assert_eq!(engine.fall_rate(), 1.0);

    let event = engine.tick(0, one(Intent::MoveDown)).expect("lock");
    assert_eq!(event.lines_cleared, 2);
    assert!(event.level_up);
    assert_eq!(event.level, 2);
    // Scores use the level before the clear.
    assert_eq!(engine.score(), 10 + 100);
    assert_eq!(engine.level(), 2);
    assert_eq!(engine.fall_rate(), 4.0);
}

#[test]
fn test_focus_loss_pauses_and_blocks_gravity() {
    let mut engine = GameEngine::new(config(11)).unwrap();
    let y = engine.current_piece().unwrap().y;

    engine.tick(0, IntentSet::empty());
    engine.focus_lost();
    engine.tick(5000, IntentSet::empty());
    assert_eq!(engine.status(), GameStatus::Paused);
    assert_eq!(engine.current_piece().unwrap().y, y);

    engine.focus_gained();
    assert_eq!(engine.status(), GameStatus::Running);
}

#[test]
fn test_config_from_json() {
    let cfg = EngineConfig::from_json_str(
        r#"{ "board_width": 8, "randomizer": "bag7", "seed": 5, "instant_down": true }"#,
    )
    .unwrap();
    assert_eq!(cfg.board_width, 8);
    assert_eq!(cfg.board_height, 20);
    assert_eq!(cfg.randomizer, Randomizer::Bag7);

    let engine = GameEngine::new(cfg).unwrap();
    assert_eq!(engine.board().width(), 8);

    assert!(EngineConfig::from_json_str(r#"{ "fall_rates": [] }"#).is_err());
    assert!(EngineConfig::from_json_str("not json").is_err());
}

#[test]
fn test_snapshot_serializes() {
    let engine = GameEngine::new(config(8)).unwrap();
    let json = serde_json::to_value(engine.snapshot()).unwrap();

    assert_eq!(json["width"], 10);
    assert_eq!(json["status"], "running");
    assert_eq!(json["cells"].as_array().unwrap().len(), 200);
    assert!(json["current"]["matrix"].is_array());
}

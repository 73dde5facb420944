//! Snapshot save/load tests.

use rust_simgame::{
    Game, GameConfig, GameError, GameRng, GameSnapshot, PayoffBuffer, PlayerConfig, PlayerId,
    Profile, Shape,
};

fn named_game() -> Game {
    let config = GameConfig::new()
        .with_player(PlayerConfig::named(["Top", "Bottom"]).with_rationality(2))
        .with_player(PlayerConfig::new(3))
        .with_player(PlayerConfig::new(2));
    let mut game = Game::from_config(&config).unwrap();
    game.randomize_payoffs(&mut GameRng::new(11), -9..=9).unwrap();
    game
}

#[test]
fn test_bincode_round_trip() {
    let game = named_game();
    let restored = Game::from_bytes(&game.to_bytes().unwrap()).unwrap();

    assert_eq!(restored.space(), game.space());
    assert_eq!(restored.payoffs(), game.payoffs());
    assert_eq!(restored.pure_equilibria(), game.pure_equilibria());
    assert_eq!(restored.space().strategy_name(PlayerId::ROW, 1).unwrap(), "Bottom");
    assert_eq!(restored.space().players()[0].rationality, 2);
}

#[test]
fn test_json_round_trip() {
    let game = named_game();
    let json = serde_json::to_string(&game.snapshot()).unwrap();
    let snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();
    let restored = Game::from_snapshot(snapshot).unwrap();

    assert_eq!(restored.payoffs(), game.payoffs());
}

#[test]
fn test_snapshot_after_mutation() {
    let mut game = named_game();
    game.remove_strategy(PlayerId::COLUMN, 0).unwrap();
    game.add_player(&PlayerConfig::new(2)).unwrap();

    let restored = Game::from_bytes(&game.to_bytes().unwrap()).unwrap();
    assert_eq!(restored.space().strategy_counts(), vec![2, 2, 2, 2]);
    assert_eq!(
        restored.get_payoff(&Profile::new(&[1, 1, 1, 0])).unwrap(),
        game.get_payoff(&Profile::new(&[1, 1, 1, 0])).unwrap()
    );
}

#[test]
fn test_from_snapshot_rejects_wrong_shape() {
    let snapshot = GameSnapshot {
        config: GameConfig::from_counts(&[2, 2, 3]),
        payoffs: PayoffBuffer::zeros(Shape {
            pages: 2,
            rows: 2,
            cols: 2,
            players: 3,
        })
        .unwrap(),
    };
    assert!(matches!(
        Game::from_snapshot(snapshot).unwrap_err(),
        GameError::ShapeMismatch { context: "payoff pages", expected: 3, actual: 2 }
    ));
}

#[test]
fn test_from_snapshot_rejects_bad_config() {
    let snapshot = GameSnapshot {
        config: GameConfig::from_counts(&[2]),
        payoffs: PayoffBuffer::zeros(Shape {
            pages: 1,
            rows: 2,
            cols: 1,
            players: 1,
        })
        .unwrap(),
    };
    assert!(matches!(
        Game::from_snapshot(snapshot).unwrap_err(),
        GameError::InvalidStrategySpace { .. }
    ));
}

/// Test that a huge declared game is rejected before any allocation.
#[test]
fn test_from_bytes_checks_shape_before_allocating() {
    let tiny = PayoffBuffer::zeros(Shape {
        pages: 1,
        rows: 1,
        cols: 1,
        players: 2,
    })
    .unwrap();

    // Valid but enormous: comparing shapes must fail first.
    let snapshot = GameSnapshot {
        config: GameConfig::from_counts(&[1 << 20, 1 << 20, 1 << 10]),
        payoffs: tiny.clone(),
    };
    let bytes = bincode::serialize(&snapshot).unwrap();
    assert!(matches!(
        Game::from_bytes(&bytes).unwrap_err(),
        GameError::ShapeMismatch { .. }
    ));

    // Too large to ever allocate.
    let snapshot = GameSnapshot {
        config: GameConfig::from_counts(&[1 << 31, 1 << 31]),
        payoffs: tiny,
    };
    let bytes = bincode::serialize(&snapshot).unwrap();
    assert!(matches!(
        Game::from_bytes(&bytes).unwrap_err(),
        GameError::InvalidStrategySpace { .. }
    ));
}

/// Test that a payoff buffer whose data disagrees with its shape fails to decode.
#[test]
fn test_decode_rejects_inconsistent_buffer() {
    let game = named_game();
    let mut value = serde_json::to_value(game.snapshot()).unwrap();
    value["payoffs"]["data"] = serde_json::json!([1.0, 2.0]);
    assert!(serde_json::from_value::<GameSnapshot>(value).is_err());
}

use anyhow::Result;
use common::{Direction, GameConfig, GameEngine, GameEvent, Position};

const START_MS: i64 = 1_000_000;

fn engine() -> Result<GameEngine> {
    GameEngine::new(GameConfig::default(), 42, START_MS)
}

fn moves(events: &[GameEvent]) -> usize {
    events.iter().filter(|e| matches!(e, GameEvent::SnakeMoved { .. })).count()
}

#[test]
fn test_no_tick_before_first_interval() -> Result<()> {
    let mut engine = engine()?;
    assert!(engine.run_until(START_MS)?.is_empty());
    assert!(engine.run_until(START_MS + 199)?.is_empty());
    assert!(engine.run_until(START_MS - 5_000)?.is_empty());
    assert_eq!(engine.current_tick(), 0);
    Ok(())
}

#[test]
fn test_one_tick_per_interval() -> Result<()> {
    let mut engine = engine()?;

    let events = engine.run_until(START_MS + 200)?;
    assert_eq!(moves(&events), 1);
    assert_eq!(engine.state().snake().head(), Position::new(6, 5));

    // Same timestamp again does nothing
    assert!(engine.run_until(START_MS + 250)?.is_empty());

    engine.run_until(START_MS + 400)?;
    assert_eq!(engine.current_tick(), 2);
    Ok(())
}

#[test]
fn test_catch_up_is_capped() -> Result<()> {
    let mut engine = engine()?;

    // Ten intervals overdue, only three get replayed
    let events = engine.run_until(START_MS + 10 * 200)?;
    assert_eq!(moves(&events), 3);
    assert_eq!(engine.current_tick(), 3);

    // Clock is back in sync: the next interval yields exactly one tick
    let events = engine.run_until(START_MS + 11 * 200)?;
    assert_eq!(moves(&events), 1);
    assert_eq!(engine.current_tick(), 4);
    Ok(())
}

#[test]
fn test_handle_key_routes_arrows_only() -> Result<()> {
    let mut engine = engine()?;

    assert!(engine.handle_key("a")?.is_empty());
    assert!(engine.handle_key("Enter")?.is_empty());
    assert_eq!(engine.state().direction, Direction::Right);

    let events = engine.handle_key("ArrowDown")?;
    assert_eq!(events, vec![GameEvent::SnakeTurned { direction: Direction::Down }]);
    assert_eq!(engine.state().direction, Direction::Down);
    Ok(())
}

#[test]
fn test_runs_into_wall_and_stops() -> Result<()> {
    let mut engine = engine()?;
    engine.handle_key("ArrowUp")?;

    // (5,5) heading up leaves the grid on the sixth tick
    let mut ts = START_MS;
    while !engine.is_game_over() {
        ts += 200;
        engine.run_until(ts)?;
        assert!(engine.current_tick() <= 6);
    }
    assert_eq!(engine.current_tick(), 6);
    assert_eq!(engine.state().snake().head().y, 0);

    let food = engine.state().food();
    assert!(engine.run_until(ts + 10_000)?.is_empty());
    assert!(engine.handle_key("ArrowLeft")?.is_empty());
    assert_eq!(engine.state().food(), food);
    Ok(())
}

#[test]
fn test_state_json() -> Result<()> {
    let mut engine = engine()?;
    engine.handle_key("ArrowDown")?;
    engine.tick()?;

    let state: serde_json::Value = serde_json::from_str(&engine.get_state_json()?)?;
    assert_eq!(state["tick"], 1);
    assert_eq!(state["status"], "Running");
    assert_eq!(state["arena"]["width"], 30);
    assert_eq!(state["direction"], "Down");
    Ok(())
}

#[test]
fn test_long_session_keeps_constant_footprint() -> Result<()> {
    let mut engine = engine()?;
    let circle = ["ArrowDown", "ArrowLeft", "ArrowUp", "ArrowRight"];

    // Loop around the 2x2 square at (4..=5, 5..=6), food stays at (0,12)
    for key in circle.iter().take(4) {
        engine.handle_key(key)?;
        engine.tick()?;
    }
    let early_size = engine.get_state_json()?.len();

    for key in circle.iter().cycle().take(20_000) {
        engine.handle_key(key)?;
        engine.tick()?;
    }

    assert!(!engine.is_game_over());
    assert_eq!(engine.current_tick(), 20_004);
    assert_eq!(engine.state().snake().len(), 1);
    // Only the tick counter grows, nothing accumulates per tick
    assert!(engine.get_state_json()?.len() <= early_size + 4);
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GameConfig { cell_size: 0, ..GameConfig::default() };
    assert!(GameEngine::new(config, 1, START_MS).is_err());
}

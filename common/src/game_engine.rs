use anyhow::Result;
use crate::{Direction, GameCommand, GameConfig, GameEvent, GameState};

/// Drives a `GameState` from a wall clock and keyboard input.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    start_ms: i64,
    clock_ticks: u64,
}

impl GameEngine {
    pub fn new(config: GameConfig, rng_seed: u64, start_ms: i64) -> Result<Self> {
        let state = GameState::new(&config, rng_seed)?;
        Ok(GameEngine {
            config,
            state,
            start_ms,
            clock_ticks: 0,
        })
    }

    /// Run the ticks that are due at the given timestamp.
    /// Can be called from a timer that fires late or early; only whole elapsed
    /// intervals produce ticks. A backlog larger than `max_catch_up_ticks`
    /// is dropped instead of replayed.
    pub fn run_until(&mut self, ts_ms: i64) -> Result<Vec<GameEvent>> {
        let elapsed_ms = (ts_ms - self.start_ms).max(0) as u64;
        let target_tick = elapsed_ms / self.config.tick_interval_ms as u64;
        let max_catch_up = self.config.max_catch_up_ticks.max(1) as u64;
        let mut out: Vec<GameEvent> = Vec::new();

        let mut due = target_tick.saturating_sub(self.clock_ticks);
        if due > max_catch_up {
            log::warn!(
                "{} ticks overdue at {}ms, skipping {} to resynchronise",
                due, ts_ms, due - max_catch_up
            );
            self.clock_ticks += due - max_catch_up;
            due = max_catch_up;
        }

        for _ in 0..due {
            self.clock_ticks += 1;
            out.extend(self.tick()?);
            if self.state.is_game_over() {
                self.clock_ticks = target_tick;
                break;
            }
        }

        Ok(out)
    }

    /// Advance exactly one tick, independent of the clock.
    pub fn tick(&mut self) -> Result<Vec<GameEvent>> {
        self.exec(GameCommand::Tick)
    }

    /// Route a raw `KeyboardEvent.key` value. Unknown keys are a no-op.
    pub fn handle_key(&mut self, key: &str) -> Result<Vec<GameEvent>> {
        match Direction::from_key(key) {
            Some(direction) => self.turn(direction),
            None => Ok(Vec::new()),
        }
    }

    pub fn turn(&mut self, direction: Direction) -> Result<Vec<GameEvent>> {
        self.exec(GameCommand::Turn { direction })
    }

    fn exec(&mut self, command: GameCommand) -> Result<Vec<GameEvent>> {
        self.state.exec_command(&command)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn current_tick(&self) -> u32 {
        self.state.current_tick()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn food_eaten(&self) -> u32 {
        self.state.food_eaten
    }

    // --- JSON Getters for WASM ---
    pub fn get_state_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.state)?)
    }
}

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use crate::constants::*;
use crate::{Direction, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub food: String,
    pub snake: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: DEFAULT_BACKGROUND_COLOR.to_string(),
            food: DEFAULT_FOOD_COLOR.to_string(),
            snake: DEFAULT_SNAKE_COLOR.to_string(),
        }
    }
}

/// Immutable settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: u32,
    pub tick_interval_ms: u32,
    pub start: Position,
    pub initial_direction: Direction,
    pub max_catch_up_ticks: u32,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            canvas_width: DEFAULT_CANVAS_SIZE,
            canvas_height: DEFAULT_CANVAS_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            start: Position::new(DEFAULT_START_X, DEFAULT_START_Y),
            initial_direction: Direction::Right,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP_TICKS,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Parses a (possibly partial) JSON object on top of the defaults and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)
            .context("Failed to parse game config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn grid_width(&self) -> u16 {
        (self.canvas_width / self.cell_size.max(1)) as u16
    }

    pub fn grid_height(&self) -> u16 {
        (self.canvas_height / self.cell_size.max(1)) as u16
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell_size must be positive");
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        ensure!(
            self.canvas_width % self.cell_size == 0 && self.canvas_height % self.cell_size == 0,
            "canvas {}x{} is not a multiple of cell_size {}",
            self.canvas_width, self.canvas_height, self.cell_size
        );
        ensure!(
            self.canvas_width / self.cell_size <= i16::MAX as u32
                && self.canvas_height / self.cell_size <= i16::MAX as u32,
            "grid is too large"
        );
        ensure!(
            self.grid_width() > 0 && self.grid_height() > 0,
            "grid must have at least one cell"
        );
        ensure!(
            self.start.x >= 0 && self.start.y >= 0
                && self.start.x < self.grid_width() as i16
                && self.start.y < self.grid_height() as i16,
            "start {:?} lies outside the {}x{} grid",
            self.start, self.grid_width(), self.grid_height()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width(), 30);
        assert_eq!(config.grid_height(), 30);
        assert_eq!(config.tick_interval_ms, 200);
        assert_eq!(config.start, Position::new(5, 5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() -> Result<()> {
        let config = GameConfig::from_json(r#"{"cell_size": 20, "palette": {"snake": "blue"}}"#)?;
        assert_eq!(config.grid_width(), 15);
        assert_eq!(config.canvas_width, 300);
        assert_eq!(config.palette.snake, "blue");
        assert_eq!(config.palette.food, "red");
        Ok(())
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let zero_cell = GameConfig { cell_size: 0, ..GameConfig::default() };
        assert!(zero_cell.validate().is_err());

        let uneven = GameConfig { cell_size: 7, ..GameConfig::default() };
        assert!(uneven.validate().is_err());

        let no_tick = GameConfig { tick_interval_ms: 0, ..GameConfig::default() };
        assert!(no_tick.validate().is_err());

        let off_grid = GameConfig { start: Position::new(30, 0), ..GameConfig::default() };
        assert!(off_grid.validate().is_err());

        let negative = GameConfig { start: Position::new(-1, 4), ..GameConfig::default() };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_from_json_validates() {
        assert!(GameConfig::from_json(r#"{"cell_size": 0}"#).is_err());
        assert!(GameConfig::from_json("not json").is_err());
    }
}

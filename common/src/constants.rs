/// Default tick interval in milliseconds for the game loop
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 200;

/// Default canvas edge length in pixels
pub const DEFAULT_CANVAS_SIZE: u32 = 300;

/// Default edge length of one grid cell in pixels
pub const DEFAULT_CELL_SIZE: u32 = 10;

/// Cell the snake starts on
pub const DEFAULT_START_X: i16 = 5;
pub const DEFAULT_START_Y: i16 = 5;

/// Overdue ticks the engine will replay in one go before resynchronising its clock
pub const DEFAULT_MAX_CATCH_UP_TICKS: u32 = 3;

pub const DEFAULT_BACKGROUND_COLOR: &str = "#f0f0f0";
pub const DEFAULT_FOOD_COLOR: &str = "red";
pub const DEFAULT_SNAKE_COLOR: &str = "green";

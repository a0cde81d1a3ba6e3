use super::traits::Canvas;
use crate::{GameConfig, GameState, Palette, Position};

/// Paints a whole frame: background, then food, then every snake segment.
pub struct FrameRenderer {
    cell_size: f64,
    width: f64,
    height: f64,
    palette: Palette,
}

impl FrameRenderer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            cell_size: config.cell_size as f64,
            width: config.canvas_width as f64,
            height: config.canvas_height as f64,
            palette: config.palette.clone(),
        }
    }

    pub fn render<C: Canvas + ?Sized>(&self, state: &GameState, canvas: &mut C) {
        canvas.fill_rect(0.0, 0.0, self.width, self.height, &self.palette.background);

        self.fill_cell(canvas, state.food(), &self.palette.food);

        for segment in state.snake().segments() {
            self.fill_cell(canvas, *segment, &self.palette.snake);
        }
    }

    fn fill_cell<C: Canvas + ?Sized>(&self, canvas: &mut C, cell: Position, color: &str) {
        canvas.fill_rect(
            cell.x as f64 * self.cell_size,
            cell.y as f64 * self.cell_size,
            self.cell_size,
            self.cell_size,
            color,
        );
    }
}

/// Minimal pixel surface the game is painted on.
pub trait Canvas {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
}

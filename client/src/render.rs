use common::render::{Canvas, FrameRenderer};
use common::GameState;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Browser canvas adapter for the shared frame renderer.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl Canvas for CanvasSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
    }
}

impl CanvasSurface {
    /// Looks up the 2d context. `None` when the browser cannot provide one.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(CanvasSurface { ctx })
    }
}

/// Canvas plus renderer. Without a 2d context every draw is a no-op.
pub struct CanvasView {
    surface: Option<CanvasSurface>,
    renderer: FrameRenderer,
}

impl CanvasView {
    pub fn new(canvas: &HtmlCanvasElement, renderer: FrameRenderer) -> Self {
        let surface = CanvasSurface::from_canvas(canvas);
        if surface.is_none() {
            log::warn!("2d canvas context unavailable, rendering disabled");
        }
        CanvasView { surface, renderer }
    }

    pub fn draw(&mut self, state: &GameState) {
        if let Some(surface) = self.surface.as_mut() {
            self.renderer.render(state, surface);
        }
    }
}

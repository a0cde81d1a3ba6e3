use std::cell::RefCell;
use std::rc::Rc;
use common::render::FrameRenderer;
use common::{GameConfig, GameEngine, GameEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, Window};
use crate::render::CanvasView;

const GAME_OVER_TEXT: &str = "Game Over";
const CANVAS_STYLE: &str = "border: 1px solid #d1d5db";
const GAME_OVER_STYLE: &str = "font-size: 1.25rem; font-weight: 600; color: #dc2626";

/// Everything the timer and key callbacks touch.
struct Session {
    engine: GameEngine,
    view: CanvasView,
    window: Window,
    container: Element,
    game_over_label: Element,
    interval_id: Option<i32>,
}

impl Session {
    fn advance(&mut self, now_ms: i64) {
        match self.engine.run_until(now_ms) {
            Ok(events) => self.react(&events),
            Err(e) => {
                // A failed tick leaves the state as it was, retrying would fail the same way
                log::error!("Tick failed, stopping the game loop: {:#}", e);
                self.stop_timer();
            }
        }
    }

    fn handle_key(&mut self, key: &str) {
        match self.engine.handle_key(key) {
            Ok(events) => self.react(&events),
            Err(e) => log::error!("Input failed: {:#}", e),
        }
    }

    fn react(&mut self, events: &[GameEvent]) {
        if events.iter().any(GameEvent::affects_canvas) {
            self.view.draw(self.engine.state());
        }

        if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
            if let Err(e) = self.container.append_child(&self.game_over_label) {
                log::error!("Failed to show game over label: {:?}", e);
            }
            self.stop_timer();
        }
    }

    fn stop_timer(&mut self) {
        if let Some(id) = self.interval_id.take() {
            self.window.clear_interval_with_handle(id);
        }
    }
}

/// A mounted snake game. Dropping it (or calling `unmount`/`free` from JS)
/// clears the timer, removes the key listener and detaches its elements.
#[wasm_bindgen]
pub struct SnakeGame {
    session: Rc<RefCell<Session>>,
    canvas: HtmlCanvasElement,
    key_listener: Closure<dyn FnMut(KeyboardEvent)>,
    _ticker: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl SnakeGame {
    /// Creates the canvas inside `container` and starts the game loop.
    pub fn mount(container: &Element) -> Result<SnakeGame, JsValue> {
        let config = GameConfig::default();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("No document available"))?;

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("Failed to create canvas element"))?;
        canvas.set_width(config.canvas_width);
        canvas.set_height(config.canvas_height);
        canvas.set_attribute("style", CANVAS_STYLE)?;

        let game_over_label = document.create_element("div")?;
        game_over_label.set_text_content(Some(GAME_OVER_TEXT));
        game_over_label.set_attribute("style", GAME_OVER_STYLE)?;

        // Clock starts half an interval back so timer jitter never lands on a tick boundary
        let start_ms = js_sys::Date::now() as i64 - (config.tick_interval_ms / 2) as i64;
        let seed = (js_sys::Math::random() * 2f64.powi(53)) as u64;
        let engine = GameEngine::new(config.clone(), seed, start_ms)
            .map_err(|e| JsValue::from_str(&format!("Failed to start game: {:#}", e)))?;

        container.append_child(&canvas)?;
        let mut view = CanvasView::new(&canvas, FrameRenderer::new(&config));
        view.draw(engine.state());

        let session = Rc::new(RefCell::new(Session {
            engine,
            view,
            window: window.clone(),
            container: container.clone(),
            game_over_label,
            interval_id: None,
        }));

        let key_session = session.clone();
        let key_listener = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            key_session.borrow_mut().handle_key(&evt.key());
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("keydown", key_listener.as_ref().unchecked_ref())?;

        let tick_session = session.clone();
        let ticker = Closure::wrap(Box::new(move || {
            tick_session.borrow_mut().advance(js_sys::Date::now() as i64);
        }) as Box<dyn FnMut()>);
        let interval_id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            ticker.as_ref().unchecked_ref(),
            config.tick_interval_ms as i32,
        )?;
        session.borrow_mut().interval_id = Some(interval_id);

        log::info!(
            "Snake game mounted: {}x{} grid, {}ms ticks",
            config.grid_width(), config.grid_height(), config.tick_interval_ms
        );

        Ok(SnakeGame {
            session,
            canvas,
            key_listener,
            _ticker: ticker,
        })
    }

    /// Tears the game down. The JS handle is unusable afterwards.
    pub fn unmount(self) {}

    pub fn is_game_over(&self) -> bool {
        self.session.borrow().engine.is_game_over()
    }

    pub fn food_eaten(&self) -> u32 {
        self.session.borrow().engine.food_eaten()
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        self.session
            .borrow()
            .engine
            .get_state_json()
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize state: {:#}", e)))
    }
}

impl Drop for SnakeGame {
    fn drop(&mut self) {
        let mut session = self.session.borrow_mut();
        session.stop_timer();

        let listener = self.key_listener.as_ref().unchecked_ref();
        if let Err(e) = session.window.remove_event_listener_with_callback("keydown", listener) {
            log::warn!("Failed to remove key listener: {:?}", e);
        }

        self.canvas.remove();
        session.game_over_label.remove();
        log::debug!("Snake game unmounted");
    }
}

//! Klent Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop. In the
//! browser this drives the canvas; natively it runs a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use klent_catch::Tuning;
    use klent_catch::platform::{Clock, PerformanceClock};
    use klent_catch::renderer::CanvasRenderer;
    use klent_catch::sim::{Action, GameCore, GameEvent, InputState, steer, tick};

    /// Game instance holding all state
    struct Game {
        core: GameCore,
        renderer: CanvasRenderer,
        clock: PerformanceClock,
        input: InputState,
        /// Autopilot plays instead of the keyboard
        idle_mode: bool,
        document: Document,
    }

    impl Game {
        /// Run one simulation tick
        fn update(&mut self) {
            let input = if self.idle_mode {
                steer(&self.core)
            } else {
                self.input
            };
            tick(&mut self.core, &input, self.clock.now_ms());

            for event in self.core.drain_events() {
                match event {
                    GameEvent::Caught(kind) => log::debug!("Caught {}", kind.name()),
                    GameEvent::Missed(kind) => log::debug!("Missed {}", kind.name()),
                    GameEvent::GameOver { score } => {
                        log::info!("Game over, score {}", score)
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Err(e) = self.renderer.render(&self.core) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let document = &self.document;

            if let Some(el) = document.get_element_by_id("lives") {
                el.set_text_content(Some(&self.core.lives().to_string()));
            }
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.core.score().to_string()));
            }

            // Show/hide game over
            if let Some(el) = document
                .get_element_by_id("gameOver")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let display = if self.core.is_over() { "block" } else { "none" };
                let _ = el.style().set_property("display", display);
                if self.core.is_over() {
                    if let Some(score_el) = document.get_element_by_id("finalScore") {
                        score_el.set_text_content(Some(&self.core.score().to_string()));
                    }
                }
            }
        }

        /// Reset game state for restart
        fn restart(&mut self) {
            self.core.restart();
            self.input.clear();
        }
    }

    /// Read tuning overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };

        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring invalid tuning: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Klent Catch starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no #gameCanvas"))?
            .dyn_into()?;

        let mut tuning = load_tuning(&document);
        // The field is whatever size the page gave the canvas
        tuning.field_width = canvas.width() as f32;
        tuning.field_height = canvas.height() as f32;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            core: GameCore::new(tuning, seed),
            renderer: CanvasRenderer::new(&canvas)?,
            clock: PerformanceClock::new()
                .ok_or_else(|| JsValue::from_str("no performance clock"))?,
            input: InputState::default(),
            idle_mode: false,
            document: document.clone(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone())?;
        setup_restart_button(&document, game.clone())?;
        game.borrow().update_hud();

        request_animation_frame(game)?;

        log::info!("Klent Catch running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                if let Some(action) = Action::from_key(&key) {
                    g.input.press(action);
                    event.prevent_default();
                } else if key == "i" || key == "I" {
                    g.idle_mode = !g.idle_mode;
                    log::info!("Idle mode: {}", g.idle_mode);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = Action::from_key(&event.key()) {
                    game.borrow_mut().input.release(action);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: keyups are lost while unfocused, so drop held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.clear();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.restart();
                g.update_hud();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        } else {
            log::warn!("No #restartBtn on the page");
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            // The loop keeps running after game over; tick itself is a no-op then
            g.update();
            g.render();
            g.update_hud();
        }

        if let Err(e) = request_animation_frame(game) {
            log::error!("Failed to schedule frame: {:?}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Klent Catch (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use `trunk serve` to play");

    let options = native::Options::from_args(std::env::args().skip(1));
    native::run_demo(&options);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use klent_catch::Tuning;
    use klent_catch::consts::FRAME_MS;
    use std::time::Duration;

    use klent_catch::platform::{Clock, InstantClock, ManualClock};
    use klent_catch::sim::{GameCore, GameEvent, steer, tick};

    /// Two minutes of 60 Hz frames
    const DEFAULT_TICKS: u64 = 60 * 120;

    pub struct Options {
        pub tuning_path: Option<String>,
        pub seed: u64,
        pub max_ticks: u64,
        /// Pace ticks against the wall clock instead of simulated time
        pub realtime: bool,
    }

    impl Options {
        /// `[--seed N] [--ticks N] [--realtime] [tuning.json]`
        pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
            let mut options = Self {
                tuning_path: None,
                seed: 0xC0FFEE,
                max_ticks: DEFAULT_TICKS,
                realtime: false,
            };

            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--seed" => match args.next().and_then(|v| v.parse().ok()) {
                        Some(seed) => options.seed = seed,
                        None => log::warn!("--seed needs a number"),
                    },
                    "--ticks" => match args.next().and_then(|v| v.parse().ok()) {
                        Some(ticks) => options.max_ticks = ticks,
                        None => log::warn!("--ticks needs a number"),
                    },
                    "--realtime" => options.realtime = true,
                    _ => options.tuning_path = Some(arg),
                }
            }
            options
        }
    }

    fn load_tuning(path: Option<&str>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read tuning {}: {}", path, e);
                return Tuning::default();
            }
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring invalid tuning {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    pub fn run_demo(options: &Options) {
        let tuning = load_tuning(options.tuning_path.as_deref());
        let mut core = GameCore::new(tuning, options.seed);

        log::info!("Demo seed: {}", core.seed());

        let (caught, missed) = if options.realtime {
            let clock = InstantClock::default();
            let frame = Duration::from_secs_f64(FRAME_MS / 1000.0);
            play(&mut core, options.max_ticks, &clock, || std::thread::sleep(frame))
        } else {
            let clock = ManualClock::default();
            play(&mut core, options.max_ticks, &clock, || clock.advance(FRAME_MS))
        };

        log::info!(
            "Demo finished after {} ticks: {} caught, {} missed",
            core.time_ticks(),
            caught,
            missed
        );
        match serde_json::to_string_pretty(core.state()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize final state: {}", e),
        }
    }

    /// Autopilot loop; `wait` moves `clock` on by one frame.
    /// Returns how many characters were caught and missed.
    fn play(
        core: &mut GameCore,
        max_ticks: u64,
        clock: &dyn Clock,
        wait: impl Fn(),
    ) -> (u32, u32) {
        let mut caught = 0u32;
        let mut missed = 0u32;
        while core.time_ticks() < max_ticks && !core.is_over() {
            let input = steer(core);
            tick(core, &input, clock.now_ms());
            wait();

            for event in core.drain_events() {
                match event {
                    GameEvent::Caught(kind) => {
                        caught += 1;
                        log::debug!(
                            "Caught {} (lives {}, score {})",
                            kind.name(),
                            core.lives(),
                            core.score()
                        );
                    }
                    GameEvent::Missed(_) => missed += 1,
                    GameEvent::GameOver { score } => log::info!(
                        "Game over at tick {} with score {}",
                        core.time_ticks(),
                        score
                    ),
                }
            }
        }
        (caught, missed)
    }

}

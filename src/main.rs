//! Road Racer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, Window};

    use road_racer::consts::*;
    use road_racer::diagnostic::{self, SpinningCube};
    use road_racer::error::InitError;
    use road_racer::hud;
    use road_racer::platform::KeyState;
    use road_racer::renderer::{RenderState, colors, shapes};
    use road_racer::sim::{GameState, tick};
    use road_racer::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        keys: KeyState,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Set when the page asked for the spinning cube instead of the game
        diagnostic: Option<SpinningCube>,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
            Self {
                state: GameState::with_tuning(seed, tuning),
                render_state: None,
                settings,
                keys: KeyState::default(),
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                diagnostic: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            self.track_fps(time);

            if let Some(cube) = self.diagnostic.as_mut() {
                cube.step();
                return;
            }

            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            let mut hud_dirty = false;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && !self.state.is_over() {
                let input = self.keys.input();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                for event in self.state.events.drain(..) {
                    log::trace!("{:?}", event);
                    hud_dirty |= event.affects_hud();
                }
            }

            if hud_dirty {
                set_text("score", &self.state.hud_text());
            }
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest sample is the one about to be overwritten
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            if self.settings.show_fps && self.frame_index == 0 {
                set_text("fps", &hud::fps_line(self.fps));
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            let (instances, view) = match &self.diagnostic {
                Some(cube) => (shapes::diagnostic(cube), cube.view_matrix()),
                None => (
                    shapes::scene(&self.state, &self.settings),
                    self.state.camera.view_matrix(),
                ),
            };

            match render_state.render(&instances, view, colors::SKY) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Frozen once the run ends; the diagnostic scene never ends
        fn is_over(&self) -> bool {
            self.diagnostic.is_none() && self.state.is_over()
        }
    }

    fn element(id: &str) -> Option<HtmlElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(id: &str, visible: bool) {
        if let Some(el) = element(id) {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    /// Backing-store size for the canvas, with the pixel ratio capped by quality
    fn canvas_size(window: &Window, canvas: &HtmlCanvasElement, settings: &Settings) -> (u32, u32) {
        let dpr = window
            .device_pixel_ratio()
            .min(settings.quality.max_pixel_ratio());
        let width = (canvas.client_width().max(1) as f64 * dpr) as u32;
        let height = (canvas.client_height().max(1) as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Road Racer starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
            set_text("loading", &e.to_string());
        }
    }

    async fn start() -> Result<(), InitError> {
        let window = web_sys::window().ok_or(InitError::NoWindow)?;
        let document = window.document().ok_or(InitError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(InitError::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| InitError::NotACanvas("canvas"))?;

        let settings = Settings::load();
        let tuning = Tuning::load();
        log::info!("Quality preset: {}", settings.quality.as_str());

        let (width, height) = canvas_size(&window, &canvas, &settings);
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, tuning, settings);
        let query = window.location().search().unwrap_or_default();
        if diagnostic::requested(&query) {
            log::info!("Diagnostic scene requested");
            game.diagnostic = Some(SpinningCube::new());
        }
        let game = Rc::new(RefCell::new(game));

        log::info!("Game initialized with seed: {}", game.borrow().state.seed);

        // Prefer WebGPU, fall back to WebGL2 where the browser lacks it
        let has_webgpu = js_sys::Reflect::has(&window.navigator(), &JsValue::from_str("gpu"))
            .unwrap_or(false);
        let backends = if has_webgpu {
            wgpu::Backends::BROWSER_WEBGPU
        } else {
            wgpu::Backends::GL
        };
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| InitError::SurfaceCreation(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| InitError::AdapterNotFound(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        game.borrow_mut().render_state = Some(render_state);

        set_visible("loading", false);
        if game.borrow().diagnostic.is_none() {
            set_visible("welcome", true);
            set_text("score", &game.borrow().state.hud_text());
        }
        set_visible("fps", game.borrow().settings.show_fps);

        setup_input_handlers(&window, game.clone());
        setup_buttons();
        setup_resize(&window, canvas, game.clone());

        request_animation_frame(game);

        Ok(())
    }

    fn setup_input_handlers(window: &Window, game: Rc<RefCell<Game>>) {
        // Keydown
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.set(&event.key(), true) {
                    // Arrow keys would otherwise scroll the page
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.set(&event.key(), false);
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release held keys when focus leaves the page
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons() {
        if let Some(btn) = element("startButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                set_visible("welcome", false);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart is a full page reload
        if let Some(btn) = element("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.location().reload() {
                        log::error!("Reload failed: {:?}", e);
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let mut g = game.borrow_mut();
            let (width, height) = canvas_size(&window, &canvas, &g.settings);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = g.render_state.as_mut() {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();

            // The crash frame stays on screen; no further frames are scheduled
            if g.is_over() {
                log::info!(
                    "Game over: score {}, coins {}, level {}",
                    g.state.score,
                    g.state.coins_collected,
                    g.state.difficulty.tier
                );
                set_visible("gameOver", true);
                return;
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Road Racer (native) starting...");
    log::info!("Native mode has no window; serve the wasm build for the playable game");

    headless_run(42, 60 * 120);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the simulation with a weaving input pattern until a crash or `max_ticks`
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64, max_ticks: u64) {
    use road_racer::Tuning;
    use road_racer::sim::{GameState, TickInput, tick};

    let mut state = GameState::with_tuning(seed, Tuning::load());
    while !state.is_over() && state.time_ticks < max_ticks {
        // Two seconds left, two seconds right
        let phase = (state.time_ticks / 120) % 2;
        let input = TickInput {
            left: phase == 0,
            right: phase == 1,
            ..Default::default()
        };
        tick(&mut state, &input);
        state.events.clear();
    }

    log::info!(
        "Headless run (seed {}) finished after {} ticks ({}): {}",
        state.seed,
        state.time_ticks,
        if state.is_over() { "crashed" } else { "still driving" },
        state.hud_text()
    );
}

//! Flappy Pipes entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use flappy_pipes::Settings;
    use flappy_pipes::consts::*;
    use flappy_pipes::platform::InputSignal;
    use flappy_pipes::renderer::{RenderState, scene};
    use flappy_pipes::sim::{GameEvent, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        /// Direction currently held down (level-triggered)
        held: Option<InputSignal>,
        /// One-shot signal waiting for the next tick
        pending: Option<InputSignal>,
    }

    impl Game {
        fn new(state: GameState) -> Self {
            Self {
                state,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                held: None,
                pending: None,
            }
        }

        fn key_down(&mut self, key: &str) {
            match InputSignal::from_key(key, self.state.phase) {
                signal @ (InputSignal::Ascend | InputSignal::Descend) => self.held = Some(signal),
                InputSignal::None => {}
                signal => self.pending = Some(signal),
            }
        }

        fn key_up(&mut self, key: &str) {
            if matches!(
                InputSignal::from_key(key, self.state.phase),
                InputSignal::Ascend | InputSignal::Descend
            ) {
                self.held = None;
            }
        }

        /// Run simulation ticks at the configured rate
        fn update(&mut self, dt: f32) {
            let tick_dt = 1.0 / self.state.settings.tick_rate as f32;
            self.accumulator += dt.min(0.25);

            let mut substeps = 0;
            while self.accumulator >= tick_dt && substeps < MAX_SUBSTEPS {
                let signal = self
                    .pending
                    .take()
                    .or(self.held)
                    .unwrap_or(InputSignal::None);
                tick(&mut self.state, &TickInput::from(signal));
                self.accumulator -= tick_dt;
                substeps += 1;

                for event in &self.state.events {
                    match event {
                        GameEvent::ObstacleCleared { score } => log::debug!("Score {}", score),
                        GameEvent::Crashed { cause, score } => {
                            log::info!("Game over ({:?}), score {}", cause, score)
                        }
                        _ => {}
                    }
                }

                if self.state.is_terminated() {
                    break;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene::build(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Pipes starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::default();
        let dpr = window.device_pixel_ratio();
        let width = (settings.screen_width as f64 * dpr) as u32;
        let height = (settings.screen_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let state = GameState::new(settings, seed).expect("default settings are valid");
        let game = Rc::new(RefCell::new(Game::new(state)));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let screen = glam::Vec2::new(settings.screen_width, settings.screen_height);
        let render_state = RenderState::new(surface, &adapter, width, height, screen)
            .await
            .expect("Failed to initialize renderer");
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        request_animation_frame(game);

        log::info!("Flappy Pipes running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == " " {
                    event.prevent_default();
                }
                if !event.repeat() {
                    game.borrow_mut().key_down(&event.key());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur drops held keys; the keyup would never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().held = None;
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let terminated = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.state.is_terminated()
        };

        if terminated {
            log::info!("Flappy Pipes stopped");
        } else {
            request_animation_frame(game);
        }
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
    log::info!("Flappy Pipes (native) starting...");
    log::info!("Native mode runs the headless autopilot - run with `trunk serve` to play");

    if let Err(e) = run_headless() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Settings file looked up in the working directory
#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_FILE: &str = "flappy.json";

/// Sessions the native autopilot plays before quitting
#[cfg(not(target_arch = "wasm32"))]
const DEMO_SESSIONS: u32 = 3;

#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), Box<dyn std::error::Error>> {
    use flappy_pipes::Settings;
    use flappy_pipes::platform::{self, Autopilot, HeadlessPlatform};
    use flappy_pipes::sim::GameState;
    use std::time::{SystemTime, UNIX_EPOCH};

    let settings = Settings::load_or_default(SETTINGS_FILE)?;
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    log::info!("Seed: {}", seed);

    let mut state = GameState::new(settings, seed)?;
    let mut headless = HeadlessPlatform::new(Autopilot::Hold, DEMO_SESSIONS);
    let summary = platform::run(&mut headless, &mut state)?;

    for (i, session) in summary.sessions.iter().enumerate() {
        println!(
            "Session {}: score {} ({:?} after {} ticks)",
            i + 1,
            session.score,
            session.cause,
            session.ticks
        );
    }
    if let Some(best) = summary.best_score() {
        println!("Best score: {}", best);
    }
    Ok(())
}

//! Flappy Gap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use flappy_gap::platform::web::{KeyQueue, WebCanvas, WebClock};
    use flappy_gap::platform::Clock;
    use flappy_gap::render;
    use flappy_gap::sim::SessionState;
    use flappy_gap::{Game, Tuning};

    /// Maximum simulation frames per animation frame to prevent spiral of death
    const MAX_SUBSTEPS: u32 = 4;

    /// Browser app holding the session and its collaborators
    struct App {
        game: Game,
        canvas: WebCanvas,
        keys: KeyQueue,
        clock: WebClock,
        accumulator: f64,
        last_time: f64,
    }

    impl App {
        /// Run fixed-length simulation frames for the elapsed time, then draw once
        fn update(&mut self, time: f64) {
            let frame_ms = self.game.state.tuning.frame_interval_ms();
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).min(250.0)
            } else {
                frame_ms
            };
            self.last_time = time;
            self.accumulator += dt;

            let mut substeps = 0;
            let mut quit = false;
            while self.accumulator >= frame_ms && substeps < MAX_SUBSTEPS {
                let now = self.clock.now_ms();
                if self.game.step(&mut self.keys, now) == flappy_gap::sim::TickOutcome::Quit {
                    quit = true;
                }
                self.accumulator -= frame_ms;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }

            if !quit {
                render::draw_frame(&self.game.state, &mut self.canvas);
            }
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            let now = self.clock.now_ms();
            self.game.restart(seed, now);
            self.accumulator = 0.0;
            log::info!("Started new game with seed: {}", seed);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Gap starting...");

        let tuning = Tuning::default();
        let mut canvas =
            match WebCanvas::new("canvas", "assets/bird.png", "assets/pipe.png", tuning.font_size)
                .await
            {
                Ok(canvas) => canvas,
                Err(e) => {
                    log::error!("Startup failed: {}", e);
                    return;
                }
            };
        let clock = match WebClock::new() {
            Ok(clock) => clock,
            Err(e) => {
                log::error!("Startup failed: {}", e);
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = match Game::new(tuning, seed, &clock, &mut canvas) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Startup failed: {}", e);
                return;
            }
        };

        let app = Rc::new(RefCell::new(App {
            game,
            canvas,
            keys: KeyQueue::default(),
            clock,
            accumulator: 0.0,
            last_time: 0.0,
        }));

        setup_input_handlers(app.clone());
        request_animation_frame(app);

        log::info!("Flappy Gap running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                "i" | "I" => {
                    a.game.autopilot = !a.game.autopilot;
                    log::info!("Autopilot: {}", a.game.autopilot);
                }
                "r" | "R" if a.game.phase() == SessionState::Terminated => a.restart(),
                key => {
                    if key == " " {
                        // Keep the page from scrolling
                        event.prevent_default();
                    }
                    a.keys.push_key(key);
                }
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().update(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use flappy_gap::platform::{ScriptedInput, SimulatedClock};
    use flappy_gap::render::DrawList;
    use flappy_gap::{Game, Tuning};

    /// Frame cap for the headless demo (one minute at 60 fps)
    const DEMO_FRAMES: u64 = 60 * 60;

    env_logger::init();
    log::info!("Flappy Gap (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                return std::process::ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut clock = SimulatedClock::new();
    let mut canvas = DrawList::default();
    let mut input = ScriptedInput::new();
    let mut game = match Game::new(tuning, seed, &clock, &mut canvas) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            return std::process::ExitCode::FAILURE;
        }
    };
    game.autopilot = true;

    let summary = game.run(&mut input, &mut clock, &mut canvas, Some(DEMO_FRAMES));
    log::info!(
        "Demo finished after {} frames: score {}, ended by {:?}",
        summary.frames,
        summary.score,
        summary.termination
    );
    println!("Score: {}", summary.score);

    std::process::ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

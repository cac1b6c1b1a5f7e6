//! Frog Crossing entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PageTransitionEvent, TouchEvent};

    use frog_crossing::platform::{SwipeTracker, direction_for_key};
    use frog_crossing::renderer::CanvasRenderer;
    use frog_crossing::sim::GameEvent;
    use frog_crossing::{BestScore, Game, Settings};

    /// Pixels per board cell
    const CELL_PX: f32 = 40.0;

    /// Browser-side wrapper around a session
    struct App {
        game: Game,
        renderer: Option<CanvasRenderer>,
        settings: Settings,
        best: BestScore,
        swipe: SwipeTracker,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// False once the page is leaving; stops the frame loop
        alive: bool,
    }

    impl App {
        fn new(settings: Settings) -> Self {
            Self {
                game: Game::new(settings.tuning()),
                renderer: None,
                settings,
                best: BestScore::load(),
                swipe: SwipeTracker::default(),
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                alive: true,
            }
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.game.start(seed);
            self.last_time = 0.0;
        }

        /// Run both schedules and react to what happened
        fn update(&mut self, dt: f32, time: f64) {
            self.game.advance(dt);

            for event in self.game.drain_events() {
                match event {
                    GameEvent::GameOver { score } | GameEvent::Won { score } => {
                        if self.best.submit(score, self.game.state().level) {
                            self.best.save();
                        }
                    }
                    GameEvent::LevelComplete { level } => {
                        log::info!("Level {} cleared", level);
                    }
                    _ => {}
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                renderer.draw(&self.game.snapshot());
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snap = self.game.snapshot();

            let set = |selector: &str, text: &str| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(text));
                }
            };
            set("#hud-score .hud-value", &snap.score.to_string());
            set("#hud-lives .hud-value", &snap.lives.to_string());
            set("#hud-level .hud-value", &snap.level.to_string());
            set("#hud-best .hud-value", &self.best.score.max(snap.score).to_string());
            if self.settings.show_timer {
                set("#hud-time .hud-value", &format!("{:.0}%", snap.time_fraction() * 100.0));
            }
            if self.settings.show_fps {
                set("#hud-fps .hud-value", &self.fps.to_string());
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if snap.game_over || snap.won {
                    let _ = el.set_attribute("class", "");
                    if let Some(title) = document.get_element_by_id("game-over-title") {
                        title.set_text_content(Some(if snap.won { "You win!" } else { "Game over" }));
                    }
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&snap.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Leaving the page: stop both schedules and the frame loop
        fn teardown(&mut self) {
            self.game.teardown();
            self.alive = false;
        }

        /// Restored from the back/forward cache: start over.
        /// Returns true when the frame loop needs restarting.
        fn resume(&mut self) -> bool {
            if self.alive {
                return false;
            }
            self.alive = true;
            self.restart();
            true
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Frog Crossing starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        let settings = Settings::load();
        log::info!("Difficulty: {}", settings.difficulty.as_str());
        let app = Rc::new(RefCell::new(App::new(settings)));

        {
            let mut a = app.borrow_mut();
            let tuning = &a.game.state().tuning;
            let (cols, rows) = (frog_crossing::consts::GRID_COLS, tuning.rows());
            let mut renderer = CanvasRenderer::new(&canvas, cols, rows, CELL_PX);
            if let Some(ref mut r) = renderer {
                r.high_contrast = a.settings.high_contrast;
            } else {
                log::warn!("Canvas 2D context unavailable, drawing disabled");
            }
            a.renderer = renderer;
            a.restart();
        }

        setup_input_handlers(&canvas, app.clone());
        setup_restart_button(app.clone());
        setup_page_lifecycle(app.clone());

        request_animation_frame(app);

        log::info!("Frog Crossing running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Keyboard
        {
            let app = app.clone();
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = direction_for_key(&event.key()) {
                    event.prevent_default();
                    app.borrow_mut().game.queue_move(direction);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - remember the swipe origin
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut()
                        .swipe
                        .begin(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end - turn the swipe into a hop
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    let mut a = app.borrow_mut();
                    let threshold = a.settings.swipe_threshold;
                    let swipe =
                        a.swipe
                            .end(touch.client_x() as f32, touch.client_y() as f32, threshold);
                    if let Some(direction) = swipe {
                        a.game.queue_move(direction);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if !a.alive {
                return;
            }

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                frog_crossing::consts::SIM_DT
            };
            a.last_time = time;

            a.update(dt, time);
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().restart();
                log::info!("Game restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_page_lifecycle(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let app_show = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().teardown();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();

        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            if !event.persisted() {
                return;
            }
            let restart_loop = app_show.borrow_mut().resume();
            if restart_loop {
                log::info!("Page restored, new session started");
                request_animation_frame(app_show.clone());
            }
        });
        let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Frog Crossing (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    headless_run(0xF0_66);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a scripted session: hop forward whenever idle, for two minutes of
/// simulated time or until the game ends.
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64) {
    use frog_crossing::consts::SIM_DT;
    use frog_crossing::sim::{Direction, GameEvent};
    use frog_crossing::{BestScore, Game, Settings};

    let settings = Settings::load();
    let mut game = Game::new(settings.tuning());
    let mut best = BestScore::load();
    game.start(seed);

    let mut frames = 0u32;
    while game.is_running() && frames < 120 * 60 {
        if frames % 12 == 0 {
            game.queue_move(Direction::Up);
        }
        game.advance(SIM_DT);
        frames += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::LifeLost { cause, lives_left } => {
                    println!("life lost: {:?} ({} left)", cause, lives_left)
                }
                GameEvent::GoalReached { slot, points } => {
                    println!("goal {} filled (+{})", slot, points)
                }
                GameEvent::LevelComplete { level } => println!("level {} complete", level),
                _ => {}
            }
        }
    }

    let snap = game.snapshot();
    if best.submit(snap.score, snap.level) {
        best.save();
    }
    game.teardown();
    println!(
        "Finished after {:.1}s: level {}, score {}, lives {}",
        frames as f32 * SIM_DT,
        snap.level,
        snap.score,
        snap.lives
    );
}

//! Astro Blast entry point
//!
//! The browser build wires the sim to Canvas2D, the DOM scoreboard, and
//! input events; the native build runs a short seeded headless demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use astro_blast::render::{DrawSurface, TRAIL_FADE, render_frame};
    use astro_blast::sim::{GamePhase, GameState, TickInput, spawn_enemy, tick};

    /// Canvas2D implementation of the sim's drawing sink
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        width: f32,
        height: f32,
    }

    impl DrawSurface for CanvasSurface {
        fn fade(&mut self) {
            self.ctx.set_fill_style_str(TRAIL_FADE);
            self.ctx
                .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32) {
            self.ctx.save();
            self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.set_fill_style_str(color);
            self.ctx.fill();
            self.ctx.restore();
        }

        fn glyph(&mut self, center: Vec2, text: &str) {
            self.ctx.set_font("40px sans-serif");
            self.ctx.set_text_align("center");
            let _ = self.ctx.fill_text(text, center.x as f64, center.y as f64);
        }
    }

    /// Game instance holding sim state and the live input snapshot
    struct Game {
        state: GameState,
        input: TickInput,
        surface: CanvasSurface,
        /// rAF handle while the frame loop is scheduled; doubles as the
        /// "loop active" flag
        raf_handle: Option<i32>,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Astro Blast starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = viewport_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(width, height, seed);
        let spawn_interval_ms = state.tuning.spawn_interval_ms;
        let game = Rc::new(RefCell::new(Game {
            state,
            input: TickInput::default(),
            surface: CanvasSurface { ctx, width, height },
            raf_handle: None,
        }));

        log::info!("game initialized with seed {seed}");

        setup_keyboard(game.clone());
        setup_touch(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_resize(canvas, game.clone());
        setup_spawner(game.clone(), spawn_interval_ms);

        update_ui(&game.borrow());
    }

    fn viewport_size(window: &web_sys::Window) -> (f32, f32) {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (width as f32, height as f32)
    }

    /// Schedule the next animation frame
    fn request_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let game_for_frame = game.clone();
        let closure = Closure::once(move |_time: f64| {
            frame_callback(game_for_frame);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().raf_handle = Some(handle),
            Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
        }
        closure.forget();
    }

    fn frame_callback(game: Rc<RefCell<Game>>) {
        let still_running = {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            // A frame can land after the resolver ended the game; the
            // tick is phase-gated, this guard stops the rescheduling.
            if g.state.phase == GamePhase::Running {
                tick(&mut g.state, &g.input);
                render_frame(&g.state, &mut g.surface);
            }
            update_ui(g);
            let running = g.state.phase == GamePhase::Running;
            if !running {
                g.raf_handle = None;
            }
            running
        };
        if still_running {
            request_frame(game);
        }
    }

    /// Start (or restart) a round and kick the frame loop if it is idle
    fn start_game(game: &Rc<RefCell<Game>>) {
        let needs_loop = {
            let mut g = game.borrow_mut();
            g.state.start();
            g.raf_handle.is_none() && g.state.phase == GamePhase::Running
        };
        if needs_loop {
            request_frame(game.clone());
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.move_left = true,
                    "ArrowRight" => g.input.move_right = true,
                    " " => {
                        event.prevent_default();
                        // Edge-triggered: a held key must not autofire
                        if !event.repeat() {
                            g.state.fire();
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.move_left = false,
                    "ArrowRight" => g.input.move_right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Drag anywhere on the canvas to steer
        for event_name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    game.borrow_mut().input.pointer_x = Some(x);
                }
            });
            let _ =
                canvas.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.pointer_x = None;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // On-screen fire button for touch devices
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(btn) = document.and_then(|d| d.get_element_by_id("shoot-button")) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default(); // keep the tap from zooming the page
                game.borrow_mut().state.fire();
            });
            let _ =
                btn.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");

        for id in ["startButton", "restartButton"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    start_game(&game);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                let (width, height) = viewport_size(&window);
                canvas.set_width(width as u32);
                canvas.set_height(height as u32);
                let mut g = game.borrow_mut();
                g.state.resize(width, height);
                g.surface.width = width;
                g.surface.height = height;
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_spawner(game: Rc<RefCell<Game>>, interval_ms: u32) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut()>::new(move || {
            // Self-guarded: a firing that lands after game over is a no-op
            spawn_enemy(&mut game.borrow_mut().state);
        });
        let result = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        );
        if let Err(err) = result {
            log::error!("setInterval failed: {err:?}");
        }
        closure.forget();
    }

    /// Sync the DOM scoreboard and panel visibility with the sim phase
    fn update_ui(game: &Game) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document.get_element_by_id("score") {
            el.set_text_content(Some(&game.state.score.to_string()));
        }

        let phase = game.state.phase;
        set_hidden(&document, "start-screen", phase != GamePhase::Idle);
        set_hidden(&document, "gameOver-screen", phase != GamePhase::GameOver);
        set_hidden(&document, "shoot-button", phase != GamePhase::Running);

        if phase == GamePhase::GameOver {
            if let Some(el) = document.get_element_by_id("finalScore") {
                el.set_text_content(Some(&game.state.score.to_string()));
            }
        }
    }

    fn set_hidden(document: &web_sys::Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Astro Blast (native) starting...");
    headless_demo();
}

/// A seeded, input-scripted run; the browser build is the real game
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use astro_blast::sim::{GamePhase, GameState, TickInput, spawn_enemy, tick};

    let mut state = GameState::new(800.0, 600.0, 42);
    state.start();

    let mut input = TickInput::default();
    for frame in 0..600u32 {
        input.move_left = (frame / 60) % 2 == 0;
        input.move_right = !input.move_left;
        if frame % 72 == 0 {
            spawn_enemy(&mut state); // the browser drives this off a timer
        }
        if frame % 30 == 0 {
            state.fire();
        }
        tick(&mut state, &input);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "demo finished: score {}, {} enemies airborne after {} ticks",
        state.score,
        state.enemies.len(),
        state.time_ticks
    );
    println!("final score: {}", state.score);
}

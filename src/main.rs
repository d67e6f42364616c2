//! Drift entry point
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

    use drift::renderer::{RenderState, VertexBatch, colors};
    use drift::{GameLoop, SessionEnd, Settings};

    /// Everything the frame callback needs
    struct Game {
        game: GameLoop,
        batch: VertexBatch,
        render_state: Option<RenderState>,
    }

    impl Game {
        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
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

        /// The GPU path draws no glyphs; labels go to the HUD element
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Some(el) = document.get_element_by_id("hud-score") else {
                return;
            };
            if let Some(label) = self.batch.labels.first() {
                el.set_text_content(Some(&label.text));
                let style = format!(
                    "position:absolute;left:{}px;top:{}px;font:{}px sans-serif;color:{}",
                    label.pos.x,
                    label.pos.y - label.size,
                    label.size,
                    colors::to_css(label.color)
                );
                let _ = el.set_attribute("style", &style);
            }
        }
    }

    fn announce_game_over(end: &SessionEnd) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!("Game Over! Score: {}", end.score));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Playfield is the canvas size
        let width = canvas.width();
        let height = canvas.height();
        let mut settings = Settings::load();
        settings.field_width = width as f32;
        settings.field_height = height as f32;

        let seed = js_sys::Date::now() as u64;
        let game_loop = match GameLoop::new(seed, settings) {
            Ok(g) => g,
            Err(e) => {
                log::warn!("Canvas settings rejected ({}), using defaults", e);
                let fallback = Settings::default();
                canvas.set_width(fallback.field_width as u32);
                canvas.set_height(fallback.field_height as u32);
                GameLoop::new(seed, fallback).expect("default settings are valid")
            }
        };
        // Store what is in effect so it can be edited in LocalStorage
        game_loop.state().settings.save();

        let field = (
            game_loop.state().settings.field_width,
            game_loop.state().settings.field_height,
        );

        let game = Rc::new(RefCell::new(Game {
            game: game_loop,
            batch: VertexBatch::new(),
            render_state: None,
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, canvas.width(), canvas.height(), field).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Drift running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().game.input_mut().key_down(&event.key()) {
                    event.prevent_default();
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
                game.borrow_mut().game.input_mut().key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (key-ups will never arrive)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().game.input_mut().release_all();
                log::info!("Focus lost, released held keys");
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let ended = {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            let ended = g.game.frame(&mut g.batch);
            g.render();
            g.update_hud();
            ended
        };

        // Alert blocks; no borrow may be held across it
        if let Some(end) = ended {
            announce_game_over(&end);
        }

        if game.borrow().game.is_running() {
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
    log::info!("Drift (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    let frames = env_u64("DRIFT_FRAMES").unwrap_or(60 * 60);
    let seed = env_u64("DRIFT_SEED").unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let settings = drift::Settings::load();
    let mut game = match drift::GameLoop::new(seed, settings) {
        Ok(g) => g,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    };
    // Store what is in effect so the DRIFT_SETTINGS file can be edited
    game.state().settings.save();

    run_headless(&mut game, frames);
}

#[cfg(not(target_arch = "wasm32"))]
fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Fly a scripted pilot: sweep the nose around while tapping fire
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(game: &mut drift::GameLoop, frames: u64) {
    use drift::platform::Control;
    use drift::renderer::CommandList;

    let mut surface = CommandList::new();
    let mut best = 0;

    for frame in 0..frames {
        let input = game.input_mut();
        if frame % 120 < 40 {
            input.press(Control::TurnRight);
        } else {
            input.release(Control::TurnRight);
        }
        if frame % 240 < 15 {
            input.press(Control::Thrust);
        } else {
            input.release(Control::Thrust);
        }
        if frame % 10 == 0 {
            input.press(Control::Fire);
        } else {
            input.release(Control::Fire);
        }

        if let Some(end) = game.frame(&mut surface) {
            println!(
                "Game Over! Score: {} (session {}, {} ticks, seed {})",
                end.score, end.session, end.ticks, end.seed
            );
            best = best.max(end.score);
        }
    }

    let state = game.state();
    println!(
        "Ran {} frames over {} sessions; score {}, best {}, {} draw calls last frame",
        game.frames(),
        game.session(),
        state.score,
        best,
        surface.len()
    );
}

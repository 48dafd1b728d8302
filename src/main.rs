//! Sky Strike entry point
//!
//! Web: binds the canvas and drives the engine from requestAnimationFrame.
//! Native: runs a headless autoplay session and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use sky_strike::platform::{Key, LocalStorageStore, RafScheduler};
    use sky_strike::renderer::{CanvasContext, CanvasSurface};
    use sky_strike::{GameEngine, GamePhase};

    use crate::hud;

    type Engine = GameEngine<CanvasContext, RafScheduler, LocalStorageStore>;

    fn set_text(id: &str, text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            el.set_text_content(Some(text));
        }
    }

    fn apply(updates: Vec<(&'static str, String)>) {
        for (id, text) in updates {
            set_text(id, &text);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Sky Strike starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let scheduler = RafScheduler::new();
        let seed = js_sys::Date::now() as u64;
        let surface = CanvasSurface::new(canvas.clone());
        let mut engine = Engine::new(&surface, scheduler.clone(), LocalStorageStore, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        engine.on_score_change(|stats| apply(hud::score_changed(stats)));
        engine.on_game_over(|stats| apply(hud::game_over(stats)));
        apply(hud::run_started(&engine.stats()));

        let engine = Rc::new(RefCell::new(engine));

        {
            let weak = Rc::downgrade(&engine);
            scheduler.set_frame_callback(move || {
                if let Some(engine) = weak.upgrade() {
                    if let Ok(mut engine) = engine.try_borrow_mut() {
                        engine.run_frame();
                    }
                }
            });
        }

        setup_input_handlers(&canvas, engine.clone())?;

        log::info!("Sky Strike ready (seed {}), press Space to start", seed);
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, engine: Rc<RefCell<Engine>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard: directions, start and pause
        {
            let engine = engine.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut e = engine.borrow_mut();
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    event.prevent_default();
                    e.on_key_down(key);
                    return;
                }
                match event.key().as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        if e.state() != GamePhase::Playing {
                            e.start();
                            apply(hud::run_started(&e.stats()));
                        }
                    }
                    "Escape" | "p" | "P" => match e.state() {
                        GamePhase::Playing => e.pause(),
                        GamePhase::Paused => e.resume(),
                        _ => {}
                    },
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let engine = engine.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    engine.borrow_mut().on_key_up(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse: absolute x in canvas pixels
        {
            let engine = engine.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = target.get_bounding_client_rect();
                if rect.width() <= 0.0 {
                    return;
                }
                let scale = target.width() as f64 / rect.width();
                let x = (event.client_x() as f64 - rect.left()) * scale;
                engine.borrow_mut().handle_pointer_move(x as f32);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Tear down with the page
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                engine.borrow_mut().destroy();
            });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

/// DOM text updates for the score panel, as (element id, text) pairs
#[cfg(any(target_arch = "wasm32", test))]
mod hud {
    use sky_strike::GameStats;

    /// Fresh run: zero the live score and hide the previous run's result
    pub fn run_started(stats: &GameStats) -> Vec<(&'static str, String)> {
        vec![
            ("score", stats.score.to_string()),
            ("high-score", stats.high_score.to_string()),
            ("final-score", String::new()),
            ("game-over", String::new()),
        ]
    }

    pub fn score_changed(stats: &GameStats) -> Vec<(&'static str, String)> {
        vec![
            ("score", stats.score.to_string()),
            ("high-score", stats.high_score.to_string()),
        ]
    }

    pub fn game_over(stats: &GameStats) -> Vec<(&'static str, String)> {
        vec![
            ("final-score", stats.score.to_string()),
            ("game-over", "GAME OVER".to_string()),
        ]
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Strike (native) starting...");
    log::info!("Native mode runs a headless autoplay session - serve the wasm build to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);

    match headless::autoplay(seed, headless::MAX_FRAMES) {
        Ok(report) => {
            println!(
                "seed {}: {} frames, score {}, {} destroyed, {} draw calls, ended in {:?}",
                seed, report.frames, report.stats.score, report.stats.enemies_destroyed, report.draw_calls, report.phase
            );
        }
        Err(e) => {
            log::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use sky_strike::consts::{FRAME_MS, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
    use sky_strike::platform::{ManualScheduler, MemoryStore};
    use sky_strike::renderer::RecordingSurface;
    use sky_strike::sim::GameState;
    use sky_strike::{EngineError, GameEngine, GamePhase, GameStats, Tuning};

    /// Two minutes at 60 Hz
    pub const MAX_FRAMES: u64 = 60 * 120;

    pub struct Report {
        pub frames: u64,
        pub stats: GameStats,
        pub draw_calls: usize,
        pub phase: GamePhase,
    }

    /// Follow the lowest hostile's center; tuning may be overridden from
    /// the JSON file named by `SKY_STRIKE_TUNING`
    pub fn autoplay(seed: u64, max_frames: u64) -> Result<Report, EngineError> {
        let tuning = load_tuning()?;
        let surface = RecordingSurface::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
        let mut engine = GameEngine::with_rng(
            &surface,
            ManualScheduler::new(),
            MemoryStore::new(),
            Pcg32::seed_from_u64(seed),
            tuning,
        )?;

        engine.on_game_over(|stats| log::info!("Autoplay run over at score {}", stats.score));
        engine.start();

        let mut frames = 1;
        let mut draw_calls = 0;
        while frames < max_frames {
            if let Some(x) = target_x(engine.game_state()) {
                engine.handle_pointer_move(x);
            }
            draw_calls += engine.draw_context_mut().take().len();
            if !engine.step(FRAME_MS) {
                break;
            }
            frames += 1;
        }
        draw_calls += engine.draw_context_mut().take().len();

        Ok(Report {
            frames,
            stats: engine.stats(),
            draw_calls,
            phase: engine.state(),
        })
    }

    fn target_x(state: &GameState) -> Option<f32> {
        state
            .hostiles
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|h| h.center().x)
    }

    fn load_tuning() -> Result<Tuning, EngineError> {
        let Ok(path) = std::env::var("SKY_STRIKE_TUNING") else {
            return Ok(Tuning::default());
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Ok(Tuning::from_json(&json)?),
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}, using defaults", path, e);
                Ok(Tuning::default())
            }
        }
    }
}

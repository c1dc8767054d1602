pub mod host;
pub mod runner;

pub use host::{JsRenderer, RenderHost};
pub use runner::EngineRunner;

use std::cell::RefCell;

use orrery::{BodyKind, EngineConfig, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<EngineRunner<JsRenderer>>> = RefCell::new(None);
}

/// Run `f` against the live runner. Calls before `orrery_init` (or after
/// `orrery_shutdown`) are reported on the console and ignored.
fn with_runner<T>(f: impl FnOnce(&mut EngineRunner<JsRenderer>) -> T) -> Option<T> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                web_sys::console::warn_1(&JsValue::from_str("orrery: not initialized, call orrery_init() first"));
                None
            }
        }
    })
}

/// Build the engine over `host`. `config_json` may be empty or a partial
/// `EngineConfig`. A previous engine, if any, is shut down first.
#[wasm_bindgen]
pub fn orrery_init(host: RenderHost, config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        EngineConfig::default()
    } else {
        EngineConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    let runner = EngineRunner::new(config, JsRenderer::new(host)).map_err(|e| JsValue::from_str(&e.to_string()))?;

    RUNNER.with(|cell| {
        if let Some(mut previous) = cell.borrow_mut().replace(runner) {
            previous.shutdown();
        }
    });
    log::info!("orrery: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn orrery_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn orrery_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_leave() {
    with_runner(|r| r.push_input(InputEvent::PointerLeave));
}

#[wasm_bindgen]
pub fn orrery_wheel(delta: f32) {
    with_runner(|r| r.push_input(InputEvent::Wheel { delta }));
}

#[wasm_bindgen]
pub fn orrery_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn orrery_set_time_scale(scale: f32) {
    with_runner(|r| r.push_input(InputEvent::SetTimeScale(scale)));
}

#[wasm_bindgen]
pub fn orrery_toggle_pause() {
    with_runner(|r| r.push_input(InputEvent::TogglePause));
}

#[wasm_bindgen]
pub fn orrery_set_paused(paused: bool) {
    with_runner(|r| r.push_input(InputEvent::SetPaused(paused)));
}

/// `category`: 0 = star, 1 = planet, 2 = moon.
#[wasm_bindgen]
pub fn orrery_set_scale(category: u32, multiplier: f32) {
    match BodyKind::from_code(category) {
        Some(kind) => {
            with_runner(|r| r.push_input(InputEvent::SetScale { kind, multiplier }));
        }
        None => log::warn!("orrery: unknown scale category {}", category),
    }
}

#[wasm_bindgen]
pub fn orrery_set_show_orbits(show: bool) {
    with_runner(|r| r.push_input(InputEvent::SetShowOrbits(show)));
}

#[wasm_bindgen]
pub fn orrery_reset_view() {
    with_runner(|r| r.push_input(InputEvent::ResetView));
}

/// Queue a focus transition toward the named body. Returns `false` for
/// unknown names.
#[wasm_bindgen]
pub fn orrery_focus(name: &str) -> bool {
    with_runner(|r| r.queue_focus(name)).unwrap_or(false)
}

// ---- Queries ----

#[wasm_bindgen]
pub fn orrery_time_scale() -> f32 {
    with_runner(|r| r.engine().time_scale()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn orrery_paused() -> bool {
    with_runner(|r| r.engine().paused()).unwrap_or(true)
}

#[wasm_bindgen]
pub fn orrery_show_orbits() -> bool {
    with_runner(|r| r.engine().show_orbits()).unwrap_or(false)
}

/// Current multiplier for a category, or 0 for an unknown category.
#[wasm_bindgen]
pub fn orrery_scale(category: u32) -> f32 {
    BodyKind::from_code(category)
        .and_then(|kind| with_runner(|r| r.engine().scale_config().get(kind)))
        .unwrap_or(0.0)
}

/// `true` while the pointer is over an interactive body.
#[wasm_bindgen]
pub fn orrery_pointer_cursor() -> bool {
    with_runner(|r| r.engine().cursor() == orrery::Cursor::Pointer).unwrap_or(false)
}

/// JSON `BodyInfo` of the selected body.
#[wasm_bindgen]
pub fn orrery_selected_info() -> Option<String> {
    with_runner(|r| r.selected_info_json()).flatten()
}

/// JSON array of body names for the quick-select menu.
#[wasm_bindgen]
pub fn orrery_focusable_names() -> String {
    with_runner(|r| r.focusable_names_json()).unwrap_or_else(|| "[]".into())
}

/// JSON array of engine events since the last call.
#[wasm_bindgen]
pub fn orrery_events() -> String {
    with_runner(|r| r.take_events_json()).unwrap_or_else(|| "[]".into())
}

/// Dispose every drawable and drop the engine.
#[wasm_bindgen]
pub fn orrery_shutdown() {
    RUNNER.with(|cell| {
        if let Some(mut runner) = cell.borrow_mut().take() {
            runner.shutdown();
        }
    });
}

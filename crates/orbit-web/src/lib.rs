pub mod runner;

pub use runner::{HostOrbitController, SceneRunner};

use std::cell::RefCell;

use glam::DVec3;
use orbit_engine::{Modifiers, PROTOCOL_VERSION, SNAPSHOT_FLOATS};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Returns `None` before `scene_init`.
fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                web_sys::console::warn_1(&"scene not initialized. Call scene_init() first.".into());
                None
            }
        }
    })
}

/// Create the engine from a JSON config ("" for defaults).
#[wasm_bindgen]
pub fn scene_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = SceneRunner::from_json(config_json)
        .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orbit-web: initialized");
    Ok(())
}

/// Called from `requestAnimationFrame` with `performance.now()`.
#[wasm_bindgen]
pub fn scene_tick(now_ms: f64) {
    with_runner(|r| r.tick(now_ms));
}

#[wasm_bindgen]
pub fn scene_key_down(key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) {
    with_runner(|r| r.key_down(key, Modifiers { shift, ctrl, alt, meta }));
}

/// Pointer click in normalized device coordinates.
#[wasm_bindgen]
pub fn scene_click(ndc_x: f64, ndc_y: f64) {
    with_runner(|r| r.click(ndc_x, ndc_y));
}

#[wasm_bindgen]
pub fn scene_set_camera_mode(mode: u32) {
    with_runner(|r| r.set_camera_mode(mode));
}

#[wasm_bindgen]
pub fn scene_set_speed(multiplier: f64) {
    with_runner(|r| r.set_speed(multiplier));
}

#[wasm_bindgen]
pub fn scene_reset_view() {
    with_runner(|r| r.reset_view());
}

#[wasm_bindgen]
pub fn scene_set_aspect(aspect: f64) {
    with_runner(|r| r.set_aspect(aspect));
}

/// Write back the pose produced by the browser's orbit controls.
#[wasm_bindgen]
pub fn scene_sync_free_look(px: f64, py: f64, pz: f64, tx: f64, ty: f64, tz: f64) {
    with_runner(|r| r.sync_free_look(DVec3::new(px, py, pz), DVec3::new(tx, ty, tz)));
}

// ---- Data accessors ----

/// True when the browser's orbit controls own the camera this frame.
#[wasm_bindgen]
pub fn get_free_look() -> bool {
    with_runner(|r| r.free_look()).unwrap_or(true)
}

#[wasm_bindgen]
pub fn get_snapshot_ptr() -> *const f32 {
    with_runner(|r| r.snapshot_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_snapshot_floats() -> u32 {
    SNAPSHOT_FLOATS as u32
}

#[wasm_bindgen]
pub fn get_protocol_version() -> f32 {
    PROTOCOL_VERSION
}

//! wasm-bindgen exports for the plexus field.
//!
//! JS calls `field_init` once, then `field_tick(dt)` from its
//! `requestAnimationFrame` loop, and reads the frame through the pointer
//! accessors. `field_dispose` tears everything down.

pub mod runner;

pub use runner::FieldRunner;

use std::cell::RefCell;

use plexus::FieldConfig;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<FieldRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner, or return `default` if there is none.
fn with_runner<R>(default: R, f: impl FnOnce(&mut FieldRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => default,
    })
}

/// Parse the optional JSON config, falling back to defaults on error.
fn load_config(config_json: Option<String>) -> FieldConfig {
    let Some(json) = config_json else {
        return FieldConfig::default();
    };
    match FieldConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            log::error!("plexus: bad config ({}), using defaults", err);
            FieldConfig::default()
        }
    }
}

/// No runner on a coarse-pointer (touch-only) device, where the background is hidden.
fn build_runner(coarse_pointer: bool, config: FieldConfig) -> Option<FieldRunner> {
    if coarse_pointer {
        log::info!("plexus: coarse pointer detected, field not created");
        return None;
    }
    Some(FieldRunner::new(config))
}

/// Create the field. Returns false without creating anything on a
/// coarse-pointer device.
#[wasm_bindgen]
pub fn field_init(coarse_pointer: bool, config_json: Option<String>) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut config = load_config(config_json);
    if !coarse_pointer && config.seed.is_none() {
        config.seed = Some((js_sys::Math::random() * u32::MAX as f64) as u64);
    }

    let Some(runner) = build_runner(coarse_pointer, config) else {
        return false;
    };
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("plexus: initialized");
    true
}

#[wasm_bindgen]
pub fn field_tick(dt: f32) {
    with_runner((), |r| r.tick(dt));
}

#[wasm_bindgen]
pub fn field_resize(width: f32, height: f32, device_pixel_ratio: f32) {
    with_runner((), |r| r.resize(width, height, device_pixel_ratio));
}

/// Release all buffers and drop the runner.
#[wasm_bindgen]
pub fn field_dispose() {
    RUNNER.with(|cell| {
        if let Some(mut runner) = cell.borrow_mut().take() {
            runner.dispose();
        }
    });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn get_frame_total_floats() -> u32 {
    with_runner(0, |r| r.frame_total_floats())
}

#[wasm_bindgen]
pub fn get_point_count() -> u32 {
    with_runner(0, |r| r.point_count())
}

#[wasm_bindgen]
pub fn get_edge_count() -> u32 {
    with_runner(0, |r| r.edge_count())
}

#[wasm_bindgen]
pub fn get_view_projection_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.view_projection_ptr())
}

#[wasm_bindgen]
pub fn get_pixel_ratio() -> f32 {
    with_runner(1.0, |r| r.pixel_ratio())
}

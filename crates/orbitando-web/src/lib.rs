pub mod runner;

pub use runner::{map_key_code, AppRunner};

use std::cell::RefCell;

use orbitando_core::{AppConfig, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<AppRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut AppRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("App not initialized. Call app_init() first.");
        f(runner)
    })
}

#[wasm_bindgen]
pub fn app_init(viewport_w: f32, viewport_h: f32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = AppConfig {
        viewport_w,
        viewport_h,
        ..AppConfig::default()
    };
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(AppRunner::new(config));
    });
    log::info!("orbitando: initialized");
}

#[wasm_bindgen]
pub fn app_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn app_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn app_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn app_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn app_wheel(delta_y: f32) {
    with_runner(|r| r.wheel(delta_y));
}

#[wasm_bindgen]
pub fn app_key_down(key_code: u32, shift: bool) {
    with_runner(|r| r.key_down(key_code, shift));
}

#[wasm_bindgen]
pub fn app_text_input(text: &str) {
    with_runner(|r| r.text_input(text));
}

#[wasm_bindgen]
pub fn app_set_defaults(json: &str) {
    with_runner(|r| r.set_defaults_json(json));
}

#[wasm_bindgen]
pub fn app_is_closed() -> bool {
    with_runner(|r| r.is_closed())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_draw_cmds_ptr() -> *const f32 {
    with_runner(|r| r.draw_cmds_ptr())
}

#[wasm_bindgen]
pub fn get_draw_cmd_count() -> u32 {
    with_runner(|r| r.draw_cmd_count())
}

#[wasm_bindgen]
pub fn get_text_ptr() -> *const u8 {
    with_runner(|r| r.text_ptr())
}

#[wasm_bindgen]
pub fn get_text_len() -> u32 {
    with_runner(|r| r.text_len())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_event_count() -> u32 {
    with_runner(|r| r.event_count())
}

#[wasm_bindgen]
pub fn get_viewport_width() -> f32 {
    with_runner(|r| r.viewport_width())
}

#[wasm_bindgen]
pub fn get_viewport_height() -> f32 {
    with_runner(|r| r.viewport_height())
}

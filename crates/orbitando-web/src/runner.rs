use orbitando_core::{AppConfig, Canvas, DefaultsTable, InputEvent, InputQueue, Key, OrbitalApp};

/// Wires the core app to the browser loop: the JS side pushes input and
/// ticks once per rAF, then reads the draw-command, text, and event buffers
/// through the exported pointers.
pub struct AppRunner {
    app: OrbitalApp,
    input: InputQueue,
    canvas: Canvas,
}

impl AppRunner {
    pub fn new(config: AppConfig) -> Self {
        let canvas = Canvas::new(config.max_draw_cmds);
        Self {
            app: OrbitalApp::new(&config),
            input: InputQueue::new(),
            canvas,
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Map and enqueue a browser key press; unmapped keys are dropped here
    /// so they never reach the core.
    pub fn key_down(&mut self, key_code: u32, shift: bool) {
        if let Some(key) = map_key_code(key_code) {
            self.input.push(InputEvent::KeyDown { key, shift });
        }
    }

    /// Split a text-input string into per-char events.
    pub fn text_input(&mut self, text: &str) {
        for ch in text.chars() {
            self.input.push(InputEvent::Text { ch });
        }
    }

    /// Browser wheel deltas grow downward; the core scrolls up on positive.
    pub fn wheel(&mut self, delta_y: f32) {
        self.input.push(InputEvent::Wheel { dy: -delta_y });
    }

    /// Run one frame: update the app, then rebuild the draw buffer.
    pub fn tick(&mut self, dt: f32) {
        self.app.update(&mut self.input, dt);
        self.canvas.clear();
        self.app.draw(&mut self.canvas);
    }

    /// Apply a defaults-table override from JSON; invalid input is logged
    /// and ignored.
    pub fn set_defaults_json(&mut self, json: &str) {
        match DefaultsTable::from_json(json) {
            Ok(table) => self.app.set_defaults(table),
            Err(err) => log::warn!("ignoring invalid defaults JSON: {err}"),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.app.is_closed()
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn draw_cmds_ptr(&self) -> *const f32 {
        self.canvas.cmds_ptr()
    }

    pub fn draw_cmd_count(&self) -> u32 {
        self.canvas.cmd_count()
    }

    pub fn text_ptr(&self) -> *const u8 {
        self.canvas.text_ptr()
    }

    pub fn text_len(&self) -> u32 {
        self.canvas.text_len()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.app.events().as_ptr() as *const f32
    }

    pub fn event_count(&self) -> u32 {
        self.app.events().len() as u32
    }

    pub fn viewport_width(&self) -> f32 {
        self.app.viewport().w
    }

    pub fn viewport_height(&self) -> f32 {
        self.app.viewport().h
    }

    #[cfg(test)]
    pub(crate) fn app(&self) -> &OrbitalApp {
        &self.app
    }
}

/// Map browser `KeyboardEvent.keyCode` values onto modal keys.
pub fn map_key_code(code: u32) -> Option<Key> {
    match code {
        8 => Some(Key::Backspace),
        9 => Some(Key::Tab),
        13 => Some(Key::Enter),
        27 => Some(Key::Escape),
        33 => Some(Key::PageUp),
        34 => Some(Key::PageDown),
        38 => Some(Key::Up),
        40 => Some(Key::Down),
        // '+' lives on the '=' key (61 on Firefox, 187 elsewhere) and the keypad
        61 | 107 | 187 => Some(Key::Plus),
        109 | 173 | 189 => Some(Key::Minus),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitando_core::ModalLayout;

    fn runner() -> AppRunner {
        AppRunner::new(AppConfig::default())
    }

    #[test]
    fn tick_produces_a_frame() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        assert!(r.draw_cmd_count() > 0);
        assert!(r.text_len() > 0, "modal frame draws labels");
    }

    #[test]
    fn ok_click_switches_to_animation() {
        let mut r = runner();
        let state = r.app().modal().unwrap();
        let layout = ModalLayout::compute(
            r.app().viewport(),
            state.grid().len(),
            state.scroll(),
        );
        let p = layout.ok_btn.center();
        r.push_input(InputEvent::PointerDown { x: p.x, y: p.y });
        r.tick(1.0 / 60.0);
        assert!(r.app().is_animating());
        assert_eq!(r.event_count(), 1);
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        let mut r = runner();
        r.key_down(65, false); // 'A'
        r.tick(0.0);
        assert!(!r.is_closed());
        r.key_down(27, false); // Escape cancels the fresh modal
        r.tick(0.0);
        assert!(r.is_closed());
    }

    #[test]
    fn wheel_delta_is_inverted() {
        let mut r = runner();
        r.wheel(100.0); // browser scroll-down
        r.tick(0.0);
        let state = r.app().modal().unwrap();
        assert_eq!(state.scroll(), 1);
    }

    #[test]
    fn invalid_defaults_json_is_ignored() {
        let mut r = runner();
        r.set_defaults_json("{broken");
        r.tick(0.0);
        assert!(r.draw_cmd_count() > 0);
    }

    #[test]
    fn key_map_covers_the_modal_keys() {
        assert_eq!(map_key_code(9), Some(Key::Tab));
        assert_eq!(map_key_code(187), Some(Key::Plus));
        assert_eq!(map_key_code(189), Some(Key::Minus));
        assert_eq!(map_key_code(65), None);
    }
}

use crate::api::types::Viewport;

/// Configuration for the app, provided by the host.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Viewport width in pixels.
    pub viewport_w: f32,
    /// Viewport height in pixels.
    pub viewport_h: f32,
    /// Maximum number of draw commands per frame (default: 4096; a full
    /// animation frame emits ~120 line segments per orbit).
    pub max_draw_cmds: usize,
    /// Maximum number of app events per frame (default: 32).
    pub max_events: usize,
}

impl AppConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_w, self.viewport_h)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            viewport_w: 1024.0,
            viewport_h: 768.0,
            max_draw_cmds: 4096,
            max_events: 32,
        }
    }
}

pub mod api;
pub mod app;
pub mod input;
pub mod modal;
pub mod render;
pub mod scene;

// Re-export key types at crate root for convenience
pub use api::config::AppConfig;
pub use api::types::{
    AppEvent, Body, Rgba, Viewport, EVENT_CANCELLED, EVENT_CONFIRMED, FIELDS_PER_BODY,
    MAX_BODIES, PALETTE,
};
pub use app::OrbitalApp;
pub use input::queue::{InputEvent, InputQueue, Key};
pub use modal::controller::{ModalOutcome, ModalState};
pub use modal::defaults::{BodyDefaults, DefaultsTable};
pub use modal::draw::draw_modal;
pub use modal::grid::{Cell, Grid, CELL_MAX_CHARS};
pub use modal::layout::{ModalLayout, VISIBLE_ROWS};
pub use modal::session::ModalSession;
pub use modal::validate::{grid_to_bodies, Field, ParamError, SPEED_SCALE};
pub use render::canvas::{Canvas, DrawCmd, Rect};
pub use render::text::{FixedAdvance, TextMetrics};
pub use scene::OrbitScene;

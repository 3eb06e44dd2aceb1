use bytemuck::{Pod, Zeroable};

/// Maximum number of configurable bodies.
pub const MAX_BODIES: usize = 15;

/// Text cells per body: Ry, Rx, angular velocity, size.
pub const FIELDS_PER_BODY: usize = 4;

/// An RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Body colors, assigned round-robin by body index.
pub const PALETTE: [Rgba; 10] = [
    Rgba::opaque(255, 80, 80),
    Rgba::opaque(80, 255, 120),
    Rgba::opaque(100, 160, 255),
    Rgba::opaque(180, 100, 255),
    Rgba::opaque(255, 200, 80),
    Rgba::opaque(160, 160, 160),
    Rgba::opaque(0, 200, 200),
    Rgba::opaque(255, 120, 200),
    Rgba::opaque(200, 200, 100),
    Rgba::opaque(160, 80, 200),
];

/// One orbiting body. Produced by grid validation; the animation mutates
/// only `ang` afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Semi-axis along X, in pixels.
    pub rx: f64,
    /// Semi-axis along Y, in pixels.
    pub ry: f64,
    /// Angular position in radians, kept in [0, 2π).
    pub ang: f64,
    /// Angular velocity in radians per second.
    pub omega: f64,
    /// Side of the rendered square, in pixels.
    pub size: i32,
    /// Index into [`PALETTE`].
    pub color: usize,
}

/// Drawing surface dimensions, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub w: f32,
    pub h: f32,
}

impl Viewport {
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// Scale factor converting relative semi-axis fractions to pixels.
    pub fn base_radius(&self) -> f64 {
        f64::from(self.w.min(self.h)) / 2.0 - 30.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

/// An app event communicated to the host via the shared float buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct AppEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl AppEvent {
    pub const FLOATS: usize = 4;
}

/// The user confirmed the grid; `a` carries the body count.
pub const EVENT_CONFIRMED: f32 = 1.0;
/// The user cancelled the modal; the host should tear the app down.
pub const EVENT_CANCELLED: f32 = 2.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<AppEvent>(), 16);
        assert_eq!(AppEvent::FLOATS, 4);
    }

    #[test]
    fn base_radius_uses_short_side() {
        let vp = Viewport::new(1024.0, 768.0);
        assert_eq!(vp.base_radius(), 768.0 / 2.0 - 30.0);
        let tall = Viewport::new(600.0, 900.0);
        assert_eq!(tall.base_radius(), 270.0);
    }
}

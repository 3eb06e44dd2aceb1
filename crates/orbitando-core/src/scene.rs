use glam::Vec2;

use crate::api::types::{Body, Rgba, Viewport, PALETTE};
use crate::render::canvas::{Canvas, Rect};

/// Sample points per orbit ellipse.
const ORBIT_SAMPLES: usize = 120;
const ORBIT_COLOR: Rgba = Rgba::opaque(64, 200, 220);
const SUN_COLOR: Rgba = Rgba::opaque(255, 215, 0);
const SUN_SIZE: f32 = 16.0;
const BACKGROUND: Rgba = Rgba::opaque(0, 0, 0);
/// Frame-time cap; a stalled tab must not teleport the bodies.
const MAX_FRAME_DT: f32 = 0.1;

/// The running animation: bodies sweeping parametric ellipses around a
/// central sun. Only `ang` changes after construction.
pub struct OrbitScene {
    bodies: Vec<Body>,
    viewport: Viewport,
}

impl OrbitScene {
    pub fn new(bodies: Vec<Body>, viewport: Viewport) -> Self {
        Self { bodies, viewport }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Advance every body by `omega·dt`, wrapping into [0, 2π).
    pub fn advance(&mut self, dt: f32) {
        let dt = f64::from(dt.min(MAX_FRAME_DT));
        let tau = std::f64::consts::TAU;
        for body in &mut self.bodies {
            body.ang += body.omega * dt;
            if body.ang > tau {
                body.ang -= tau;
            }
            if body.ang < 0.0 {
                body.ang += tau;
            }
        }
    }

    /// Emit the frame: background, orbit outlines, sun, then one square per
    /// body at its current angular position.
    pub fn draw(&self, canvas: &mut Canvas) {
        let vp = self.viewport;
        canvas.fill_rect(Rect::new(0.0, 0.0, vp.w, vp.h), BACKGROUND);
        let center = Vec2::new(vp.w / 2.0, vp.h / 2.0);

        for body in &self.bodies {
            self.draw_ellipse(canvas, center, body.rx as f32, body.ry as f32);
        }

        canvas.fill_rect(
            Rect::new(
                center.x - SUN_SIZE / 2.0,
                center.y - SUN_SIZE / 2.0,
                SUN_SIZE,
                SUN_SIZE,
            ),
            SUN_COLOR,
        );

        for body in &self.bodies {
            let x = center.x + (body.rx * body.ang.cos()) as f32;
            let y = center.y + (body.ry * body.ang.sin()) as f32;
            let s = body.size as f32;
            canvas.fill_rect(
                Rect::new(x - s / 2.0, y - s / 2.0, s, s),
                PALETTE[body.color % PALETTE.len()],
            );
        }
    }

    fn draw_ellipse(&self, canvas: &mut Canvas, center: Vec2, a: f32, b: f32) {
        let mut prev = Vec2::new(center.x + a, center.y);
        for k in 1..=ORBIT_SAMPLES {
            let t = std::f32::consts::TAU * k as f32 / ORBIT_SAMPLES as f32;
            let p = Vec2::new(center.x + a * t.cos(), center.y + b * t.sin());
            canvas.line(prev, p, ORBIT_COLOR);
            prev = p;
        }
    }
}

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::api::types::Rgba;

/// An axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Draw command kinds. Must stay in sync with the host renderer.
pub const CMD_FILL_RECT: f32 = 1.0;
pub const CMD_RECT_OUTLINE: f32 = 2.0;
pub const CMD_ROUND_RECT_FILL: f32 = 3.0;
pub const CMD_ROUND_RECT_OUTLINE: f32 = 4.0;
pub const CMD_FILL_CIRCLE: f32 = 5.0;
pub const CMD_LINE: f32 = 6.0;
pub const CMD_TEXT: f32 = 7.0;

/// Text style flag carried in [`DrawCmd::radius`] for `CMD_TEXT`.
pub const TEXT_BODY: f32 = 0.0;
pub const TEXT_TITLE: f32 = 1.0;

/// One draw command written to the shared float buffer for the host renderer.
/// 12 floats = 48 bytes stride.
///
/// Geometry by kind: rects use `x/y/w/h` (+ `radius` for rounded corners);
/// circles use `x/y` center and `w` radius; lines use `x/y` → `w/h` as the
/// second endpoint; text uses `x/y` with `text_off/text_len` indexing the
/// UTF-8 side buffer and `radius` as the style flag.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct DrawCmd {
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub text_off: f32,
    pub text_len: f32,
}

impl DrawCmd {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

fn channel(v: u8) -> f32 {
    f32::from(v) / 255.0
}

/// Retained list of draw commands for one frame, plus the UTF-8 side buffer
/// holding every string referenced by text commands.
pub struct Canvas {
    cmds: Vec<DrawCmd>,
    text: Vec<u8>,
    max_cmds: usize,
}

impl Canvas {
    pub fn new(max_cmds: usize) -> Self {
        Self {
            cmds: Vec::with_capacity(max_cmds),
            text: Vec::with_capacity(1024),
            max_cmds,
        }
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
        self.text.clear();
    }

    fn push(&mut self, cmd: DrawCmd) {
        if self.cmds.len() >= self.max_cmds {
            log::warn!("draw command capacity exceeded ({}), dropping", self.max_cmds);
            return;
        }
        self.cmds.push(cmd);
    }

    fn push_shape(&mut self, kind: f32, rect: Rect, radius: f32, color: Rgba) {
        self.push(DrawCmd {
            kind,
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            radius,
            r: channel(color.r),
            g: channel(color.g),
            b: channel(color.b),
            a: channel(color.a),
            ..DrawCmd::default()
        });
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.push_shape(CMD_FILL_RECT, rect, 0.0, color);
    }

    pub fn rect_outline(&mut self, rect: Rect, color: Rgba) {
        self.push_shape(CMD_RECT_OUTLINE, rect, 0.0, color);
    }

    pub fn round_rect_fill(&mut self, rect: Rect, radius: f32, color: Rgba) {
        self.push_shape(CMD_ROUND_RECT_FILL, rect, radius, color);
    }

    pub fn round_rect_outline(&mut self, rect: Rect, radius: f32, color: Rgba) {
        self.push_shape(CMD_ROUND_RECT_OUTLINE, rect, radius, color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.push_shape(
            CMD_FILL_CIRCLE,
            Rect::new(center.x, center.y, radius, 0.0),
            0.0,
            color,
        );
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.push_shape(CMD_LINE, Rect::new(from.x, from.y, to.x, to.y), 0.0, color);
    }

    pub fn text(&mut self, pos: Vec2, s: &str, color: Rgba) {
        self.push_text(pos, s, TEXT_BODY, color);
    }

    pub fn title(&mut self, pos: Vec2, s: &str, color: Rgba) {
        self.push_text(pos, s, TEXT_TITLE, color);
    }

    fn push_text(&mut self, pos: Vec2, s: &str, style: f32, color: Rgba) {
        let off = self.text.len();
        self.text.extend_from_slice(s.as_bytes());
        self.push(DrawCmd {
            kind: CMD_TEXT,
            x: pos.x,
            y: pos.y,
            radius: style,
            r: channel(color.r),
            g: channel(color.g),
            b: channel(color.b),
            a: channel(color.a),
            text_off: off as f32,
            text_len: s.len() as f32,
            ..DrawCmd::default()
        });
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn cmd_count(&self) -> u32 {
        self.cmds.len() as u32
    }

    /// Raw pointer to command data for shared-buffer reads.
    pub fn cmds_ptr(&self) -> *const f32 {
        self.cmds.as_ptr() as *const f32
    }

    /// The UTF-8 string slice a text command refers to.
    pub fn text_slice(&self, cmd: &DrawCmd) -> &str {
        let off = cmd.text_off as usize;
        let len = cmd.text_len as usize;
        std::str::from_utf8(&self.text[off..off + len]).unwrap_or("")
    }

    pub fn text_ptr(&self) -> *const u8 {
        self.text.as_ptr()
    }

    pub fn text_len(&self) -> u32 {
        self.text.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_cmd_is_12_floats() {
        assert_eq!(std::mem::size_of::<DrawCmd>(), 48);
        assert_eq!(DrawCmd::FLOATS, 12);
    }

    #[test]
    fn rect_contains_is_edge_inclusive() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 30.0)));
        assert!(!r.contains(Vec2::new(30.1, 30.0)));
    }

    #[test]
    fn text_round_trips_through_side_buffer() {
        let mut canvas = Canvas::new(16);
        canvas.text(Vec2::new(5.0, 6.0), "Objeto 1", Rgba::opaque(255, 255, 255));
        canvas.text(Vec2::new(5.0, 30.0), "OK", Rgba::opaque(0, 255, 0));
        assert_eq!(canvas.cmd_count(), 2);
        assert_eq!(canvas.text_slice(&canvas.cmds()[0]), "Objeto 1");
        assert_eq!(canvas.text_slice(&canvas.cmds()[1]), "OK");
    }

    #[test]
    fn clear_resets_both_buffers() {
        let mut canvas = Canvas::new(16);
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba::opaque(1, 2, 3));
        canvas.text(Vec2::ZERO, "x", Rgba::opaque(1, 2, 3));
        canvas.clear();
        assert_eq!(canvas.cmd_count(), 0);
        assert_eq!(canvas.text_len(), 0);
    }

    #[test]
    fn command_capacity_is_enforced() {
        let mut canvas = Canvas::new(2);
        for _ in 0..5 {
            canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba::opaque(0, 0, 0));
        }
        assert_eq!(canvas.cmd_count(), 2);
    }
}

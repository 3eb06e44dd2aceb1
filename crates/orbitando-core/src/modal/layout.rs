use glam::Vec2;

use crate::api::types::Viewport;
use crate::render::canvas::Rect;

/// Fixed page size: body rows visible at once, regardless of window size.
pub const VISIBLE_ROWS: usize = 2;

pub const PANEL_W: f32 = 840.0;
pub const PANEL_H: f32 = 620.0;
pub const PADDING: f32 = 16.0;
pub const HEADER_H: f32 = 32.0;
pub const CELL_H: f32 = 42.0;

const CTRL_BTN_W: f32 = 36.0;
const CTRL_BTN_H: f32 = 32.0;
const COUNT_BOX_W: f32 = 160.0;
const BUTTON_W: f32 = 160.0;
const BUTTON_H: f32 = 40.0;
const TRACK_W: f32 = 12.0;
const THUMB_MIN_H: f32 = 16.0;
/// First-row vertical offset; also the control cluster's downward shift.
const ROW_VOFFSET: f32 = CELL_H / 2.0;

/// Display rectangles for one visible body row. The two axis cells are
/// rendered swapped versus storage: the left rect edits Rx (slot 1), the
/// right rect edits Ry (slot 0).
#[derive(Debug, Clone, Copy)]
pub struct RowRects {
    /// Anchor of the row's title line.
    pub origin: Vec2,
    pub axis_left: Rect,
    pub axis_right: Rect,
    pub omega: Rect,
    pub size: Rect,
}

/// Every rectangle the controller hit-tests and the renderer draws,
/// recomputed each frame as a pure function of viewport, body count, and
/// scroll offset.
#[derive(Debug, Clone)]
pub struct ModalLayout {
    pub panel: Rect,
    pub view: Rect,
    pub minus_btn: Rect,
    pub count_box: Rect,
    pub plus_btn: Rect,
    pub toggle: Rect,
    pub ok_btn: Rect,
    pub cancel_btn: Rect,
    pub track: Rect,
    /// Present only when the grid overflows the page (`body_count > 2`).
    pub thumb: Option<Rect>,
    pub cell_w: f32,
    pub per_body_h: f32,
    /// Top of the row banding area; row `vis` occupies
    /// `[rows_top + vis·per_body_h, rows_top + (vis+1)·per_body_h)`.
    pub rows_top: f32,
    rows: [RowRects; VISIBLE_ROWS],
}

impl ModalLayout {
    pub fn compute(viewport: Viewport, body_count: usize, scroll: usize) -> Self {
        let panel = Rect::new(
            (viewport.w - PANEL_W) / 2.0,
            (viewport.h - PANEL_H) / 2.0,
            PANEL_W,
            PANEL_H,
        );

        let cell_w = (PANEL_W - PADDING * 2.0 - 24.0) / 2.0;
        let body_area_x = panel.x + PADDING;
        let body_area_y = panel.y + PADDING + HEADER_H + 24.0;
        let body_area_h = PANEL_H - (PADDING * 3.0 + 120.0);
        let view = Rect::new(
            body_area_x,
            body_area_y + ROW_VOFFSET,
            PANEL_W - PADDING * 2.0 - 8.0,
            body_area_h - ROW_VOFFSET,
        );
        let per_body_h = (body_area_h / VISIBLE_ROWS as f32).max(2.0 * CELL_H + 60.0);

        let control_w = CTRL_BTN_W + 8.0 + COUNT_BOX_W + 8.0 + CTRL_BTN_W;
        let ctrl_x = (body_area_x + 2.0 * cell_w + 12.0 - control_w).max(panel.x + PADDING);
        let minus_btn = Rect::new(
            ctrl_x,
            panel.y + PADDING + 28.0 + ROW_VOFFSET,
            CTRL_BTN_W,
            CTRL_BTN_H,
        );
        let count_box = Rect::new(
            minus_btn.x + CTRL_BTN_W + 8.0,
            panel.y + PADDING + 24.0 + ROW_VOFFSET,
            COUNT_BOX_W,
            BUTTON_H,
        );
        let plus_btn = Rect::new(count_box.x + COUNT_BOX_W + 8.0, minus_btn.y, CTRL_BTN_W, CTRL_BTN_H);

        let bottom_y = panel.y + PANEL_H - PADDING - 48.0;
        let toggle = Rect::new(panel.x + PADDING, bottom_y, (220.0f32 * 0.6).round(), BUTTON_H);
        let ok_btn = Rect::new(panel.x + PANEL_W - PADDING - BUTTON_W, bottom_y, BUTTON_W, BUTTON_H);
        let cancel_btn = Rect::new(
            panel.x + PANEL_W - PADDING - 2.0 * BUTTON_W,
            bottom_y,
            BUTTON_W,
            BUTTON_H,
        );

        let track = Rect::new(view.x + view.w + 8.0, view.y, TRACK_W, view.h);
        let thumb = if body_count > VISIBLE_ROWS {
            let thumb_h =
                (track.h * VISIBLE_ROWS as f32 / body_count as f32).max(THUMB_MIN_H);
            let range = (body_count - VISIBLE_ROWS) as f32;
            let thumb_y = track.y + ((track.h - thumb_h) * scroll as f32 / range).round();
            Some(Rect::new(track.x + 2.0, thumb_y, track.w - 4.0, thumb_h))
        } else {
            None
        };

        let mut rows = [RowRects {
            origin: Vec2::ZERO,
            axis_left: Rect::default(),
            axis_right: Rect::default(),
            omega: Rect::default(),
            size: Rect::default(),
        }; VISIBLE_ROWS];
        for (vis, row) in rows.iter_mut().enumerate() {
            let by = body_area_y
                + vis as f32 * per_body_h
                + if vis == 0 { ROW_VOFFSET } else { 0.0 };
            let axis_y = by + 52.0;
            let lower_y = axis_y + CELL_H + 10.0 + 24.0;
            *row = RowRects {
                origin: Vec2::new(body_area_x + 2.0, by),
                axis_left: Rect::new(body_area_x, axis_y, cell_w, CELL_H),
                axis_right: Rect::new(body_area_x + cell_w + 12.0, axis_y, cell_w, CELL_H),
                omega: Rect::new(body_area_x, lower_y, cell_w, CELL_H),
                size: Rect::new(body_area_x + cell_w + 12.0, lower_y, cell_w, CELL_H),
            };
        }

        Self {
            panel,
            view,
            minus_btn,
            count_box,
            plus_btn,
            toggle,
            ok_btn,
            cancel_btn,
            track,
            thumb,
            cell_w,
            per_body_h,
            rows_top: body_area_y,
            rows,
        }
    }

    /// Rects of the `vis`-th visible row, `vis < VISIBLE_ROWS`.
    pub fn row(&self, vis: usize) -> &RowRects {
        &self.rows[vis]
    }

    /// Display rect of a storage slot within a visible row. Slots 0/1 map
    /// to the right/left axis cells (the visual swap).
    pub fn cell_rect(&self, vis: usize, slot: usize) -> Rect {
        let row = &self.rows[vis];
        match slot {
            0 => row.axis_right,
            1 => row.axis_left,
            2 => row.omega,
            _ => row.size,
        }
    }

    /// Vertical travel of the thumb within the track, for drag mapping.
    pub fn thumb_track_range(&self) -> f32 {
        match self.thumb {
            Some(thumb) => (self.track.h - thumb.h).max(1.0),
            None => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(n: usize, scroll: usize) -> ModalLayout {
        ModalLayout::compute(Viewport::default(), n, scroll)
    }

    #[test]
    fn panel_is_centered() {
        let l = layout(2, 0);
        assert_eq!(l.panel.x, (1024.0 - PANEL_W) / 2.0);
        assert_eq!(l.panel.y, (768.0 - PANEL_H) / 2.0);
    }

    #[test]
    fn axis_cells_are_swapped() {
        let l = layout(2, 0);
        // storage slot 1 (Rx) is displayed on the left
        assert_eq!(l.cell_rect(0, 1), l.row(0).axis_left);
        assert_eq!(l.cell_rect(0, 0), l.row(0).axis_right);
        assert!(l.row(0).axis_left.x < l.row(0).axis_right.x);
    }

    #[test]
    fn no_thumb_when_grid_fits_page() {
        assert!(layout(1, 0).thumb.is_none());
        assert!(layout(2, 0).thumb.is_none());
        assert!(layout(3, 0).thumb.is_some());
    }

    #[test]
    fn thumb_spans_track_ends() {
        let top = layout(9, 0);
        let thumb = top.thumb.unwrap();
        assert_eq!(thumb.y, top.track.y);

        let bottom = layout(9, 7);
        let thumb = bottom.thumb.unwrap();
        assert!((thumb.y + thumb.h - (bottom.track.y + bottom.track.h)).abs() <= 1.0);
    }

    #[test]
    fn rows_sit_inside_view_horizontally() {
        let l = layout(4, 1);
        for vis in 0..VISIBLE_ROWS {
            let row = l.row(vis);
            assert!(row.axis_left.x >= l.view.x);
            assert!(row.axis_right.x + row.axis_right.w <= l.view.x + l.view.w);
        }
    }
}

use glam::Vec2;

use crate::api::types::{Body, Viewport, FIELDS_PER_BODY, MAX_BODIES};
use crate::input::queue::{InputEvent, Key};
use crate::modal::defaults::DefaultsTable;
use crate::modal::grid::{Grid, CELL_MAX_CHARS};
use crate::modal::layout::{ModalLayout, VISIBLE_ROWS};
use crate::modal::session::ModalSession;
use crate::modal::validate::{grid_to_bodies, ParamError};

/// Terminal result of a modal run.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalOutcome {
    Confirmed { bodies: Vec<Body>, count: usize },
    Cancelled,
}

/// Body count enforced whenever the defaults toggle drives the grid.
const DEFAULTS_COUNT: usize = 9;

/// Overwrite-on-first-keystroke bookkeeping for the focused cell.
#[derive(Debug, Clone, Default)]
struct EditState {
    /// Cell text as it was when the edit began; Escape restores it.
    backup: String,
    /// Which cell the backup belongs to.
    index: Option<usize>,
    /// Whether the cell has been cleared for overwriting yet.
    started: bool,
}

#[derive(Debug, Clone, Copy)]
struct ThumbDrag {
    /// Pointer offset from the thumb top at grab time.
    grab_offset: f32,
}

/// The modal's live state machine. Translates input events into grid,
/// focus, scroll, and toggle mutations; validation runs on commit.
pub struct ModalState {
    grid: Grid,
    use_defaults: bool,
    chosen_n: usize,
    focus: usize,
    scroll: usize,
    edit: EditState,
    drag: Option<ThumbDrag>,
    error: Option<ParamError>,
    defaults: DefaultsTable,
    viewport: Viewport,
}

impl ModalState {
    /// Open the modal, restoring the previous session when one was saved,
    /// otherwise starting from the defaults toggle switched on.
    pub fn open(session: &ModalSession, defaults: DefaultsTable, viewport: Viewport) -> Self {
        let mut state = Self {
            grid: Grid::new(),
            use_defaults: true,
            chosen_n: DEFAULTS_COUNT,
            focus: 0,
            scroll: 0,
            edit: EditState::default(),
            drag: None,
            error: None,
            defaults,
            viewport,
        };
        if session.is_initialized() {
            state.grid = session.grid.clone();
            state.use_defaults = session.use_defaults;
            state.chosen_n = session.chosen_n;
            state.focus = session.focus;
            state.scroll = session.scroll;
        } else {
            state.grid.resize(state.chosen_n, &state.defaults);
        }
        state
    }

    /// Write the restorable parts of the state back into the session.
    pub fn save_into(&self, session: &mut ModalSession) {
        session.grid = self.grid.clone();
        session.use_defaults = self.use_defaults;
        session.chosen_n = self.chosen_n;
        session.focus = self.focus;
        session.scroll = self.scroll;
        session.mark_initialized();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn use_defaults(&self) -> bool {
        self.use_defaults
    }

    pub fn chosen_n(&self) -> usize {
        self.chosen_n
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn error(&self) -> Option<ParamError> {
        self.error
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Swap the defaults table used for subsequent fills.
    pub fn set_defaults(&mut self, defaults: DefaultsTable) {
        self.defaults = defaults;
    }

    /// Feed one event through the state machine. `layout` must be the
    /// frame's layout for the current scroll position (recomputed once per
    /// frame, before the event drain).
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        layout: &ModalLayout,
    ) -> Option<ModalOutcome> {
        match *event {
            InputEvent::Quit => Some(ModalOutcome::Cancelled),
            InputEvent::KeyDown { key, shift } => self.on_key(key, shift),
            InputEvent::Text { ch } => {
                self.on_text(ch);
                None
            }
            InputEvent::Wheel { dy } => {
                self.on_wheel(dy);
                None
            }
            InputEvent::PointerDown { x, y } => self.on_pointer_down(Vec2::new(x, y), layout),
            InputEvent::PointerMove { y, .. } => {
                self.on_pointer_move(y, layout);
                None
            }
            InputEvent::PointerUp { .. } => {
                self.drag = None;
                None
            }
        }
    }

    fn max_scroll(&self) -> usize {
        self.grid.len().saturating_sub(VISIBLE_ROWS)
    }

    fn on_key(&mut self, key: Key, shift: bool) -> Option<ModalOutcome> {
        if key == Key::Escape {
            if self.edit.started && self.edit.index == Some(self.focus) {
                // revert the in-progress edit, keep the modal open
                self.grid.cell_at_mut(self.focus).text = self.edit.backup.clone();
                self.edit.started = false;
                self.edit.index = None;
                return None;
            }
            return Some(ModalOutcome::Cancelled);
        }

        // Grid and count editing keys are inert while defaults drive the
        // values; the toggle, buttons, wheel, and scrollbar stay live.
        if self.use_defaults {
            return None;
        }

        match key {
            Key::Plus => self.grow(),
            Key::Minus => self.shrink(),
            Key::Tab => self.step_focus(if shift { -1 } else { 1 }),
            Key::Enter => self.step_focus(1),
            Key::Backspace => {
                if self.grid.cell_at_mut(self.focus).text.pop().is_some() {
                    self.edit.started = true;
                }
            }
            Key::PageUp => {
                self.scroll = self
                    .scroll
                    .saturating_sub(VISIBLE_ROWS)
                    .min(self.max_scroll());
            }
            Key::PageDown => {
                self.scroll = (self.scroll + VISIBLE_ROWS).min(self.max_scroll());
            }
            Key::Up => self.move_row(-1),
            Key::Down => self.move_row(1),
            Key::Escape => {}
        }
        None
    }

    fn grow(&mut self) {
        self.chosen_n = (self.chosen_n + 1).clamp(1, MAX_BODIES);
        self.grid.resize(self.chosen_n, &self.defaults);
        // keep the freshly added row visible
        if self.grid.len() > VISIBLE_ROWS {
            self.scroll = self.chosen_n - VISIBLE_ROWS;
        }
    }

    fn shrink(&mut self) {
        self.chosen_n = self.chosen_n.saturating_sub(1).clamp(1, MAX_BODIES);
        self.grid.resize(self.chosen_n, &self.defaults);
        let max_scroll = self.max_scroll();
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
        if self.focus >= self.grid.total_cells() {
            self.focus = self.grid.total_cells() - 1;
        }
    }

    /// Advance or retreat focus circularly over all active cells, starting
    /// a fresh edit backup and scrolling the focused row into view.
    fn step_focus(&mut self, dir: i32) {
        let total = self.grid.total_cells();
        self.focus = if dir >= 0 {
            (self.focus + 1) % total
        } else {
            (self.focus + total - 1) % total
        };
        self.begin_backup();
        self.scroll_to_focus();
    }

    fn scroll_to_focus(&mut self) {
        let body = self.focus / FIELDS_PER_BODY;
        if body < self.scroll {
            self.scroll = body;
        }
        if body >= self.scroll + VISIBLE_ROWS {
            self.scroll = body + 1 - VISIBLE_ROWS;
        }
    }

    /// Move focus to the same field of the adjacent body row, clamped at
    /// the grid edges. The edit backup refreshes even when clamped.
    fn move_row(&mut self, delta: i32) {
        let col = self.focus % FIELDS_PER_BODY;
        let body = self.focus / FIELDS_PER_BODY;
        if delta < 0 {
            if body > 0 {
                let body = body - 1;
                self.focus = body * FIELDS_PER_BODY + col;
                if body < self.scroll {
                    self.scroll = body;
                }
            }
        } else if body + 1 < self.grid.len() {
            let body = body + 1;
            self.focus = body * FIELDS_PER_BODY + col;
            if body >= self.scroll + VISIBLE_ROWS {
                self.scroll = body + 1 - VISIBLE_ROWS;
            }
        }
        self.begin_backup();
    }

    fn begin_backup(&mut self) {
        self.edit.backup = self.grid.cell_at(self.focus).text.clone();
        self.edit.index = Some(self.focus);
        self.edit.started = false;
    }

    fn clear_edit(&mut self) {
        self.edit.started = false;
        self.edit.index = None;
    }

    fn on_text(&mut self, ch: char) {
        if self.use_defaults {
            return;
        }
        if self.edit.index != Some(self.focus) {
            self.begin_backup();
        }
        if !self.edit.started {
            // first keystroke overwrites the cell
            self.grid.cell_at_mut(self.focus).text.clear();
            self.edit.started = true;
        }
        if ch.is_ascii_digit() || ch == '.' || ch == '-' {
            let cell = self.grid.cell_at_mut(self.focus);
            if cell.text.len() < CELL_MAX_CHARS {
                cell.text.push(ch);
            }
        }
    }

    fn on_wheel(&mut self, dy: f32) {
        if dy > 0.0 {
            self.scroll = self.scroll.saturating_sub(1);
        } else if dy < 0.0 && self.grid.len() > VISIBLE_ROWS {
            self.scroll = (self.scroll + 1).min(self.max_scroll());
        }
    }

    fn on_pointer_down(&mut self, p: Vec2, layout: &ModalLayout) -> Option<ModalOutcome> {
        if self.grid.len() > VISIBLE_ROWS {
            if let Some(thumb) = layout.thumb {
                if thumb.contains(p) {
                    self.drag = Some(ThumbDrag {
                        grab_offset: p.y - thumb.y,
                    });
                    return None;
                }
            }
        }

        if !self.use_defaults {
            if layout.plus_btn.contains(p) {
                self.grow();
                self.clear_edit();
                return None;
            }
            if layout.minus_btn.contains(p) {
                self.shrink();
                self.clear_edit();
                return None;
            }
            if layout.view.contains(p) {
                self.click_view(p, layout);
                return None;
            }
        }

        if layout.toggle.contains(p) {
            self.toggle_defaults();
            return None;
        }
        if layout.ok_btn.contains(p) {
            return self.commit();
        }
        if layout.cancel_btn.contains(p) {
            return Some(ModalOutcome::Cancelled);
        }
        if self.grid.len() > VISIBLE_ROWS && layout.track.contains(p) {
            self.track_page(p.y, layout);
        }
        None
    }

    /// A click inside the view focuses the cell under the pointer. The two
    /// axis cells are displayed swapped: the left rect edits Rx (slot 1),
    /// the right rect edits Ry (slot 0). Any press on a valid row refreshes
    /// the edit backup, hit or not.
    fn click_view(&mut self, p: Vec2, layout: &ModalLayout) {
        let rel = p.y - layout.rows_top;
        if rel < 0.0 {
            return;
        }
        let vis = (rel / layout.per_body_h) as usize;
        if vis >= VISIBLE_ROWS {
            return;
        }
        let body = self.scroll + vis;
        if body >= self.grid.len() {
            return;
        }
        let row = layout.row(vis);
        let base = body * FIELDS_PER_BODY;
        if row.axis_left.contains(p) {
            self.focus = base + 1;
        } else if row.axis_right.contains(p) {
            self.focus = base;
        } else if row.omega.contains(p) {
            self.focus = base + 2;
        } else if row.size.contains(p) {
            self.focus = base + 3;
        }
        self.begin_backup();
    }

    fn toggle_defaults(&mut self) {
        self.use_defaults = !self.use_defaults;
        if self.use_defaults {
            self.chosen_n = DEFAULTS_COUNT;
            self.grid.fill_all(self.chosen_n, &self.defaults);
            self.scroll = 0;
            self.focus = 0;
        } else {
            self.grid.resize(self.chosen_n, &self.defaults);
            self.scroll = 0;
        }
        self.clear_edit();
    }

    /// OK press: with defaults on, force the policy count and regenerate
    /// before validating. On failure the offending body is flagged,
    /// focused, and scrolled into view; the modal stays open.
    fn commit(&mut self) -> Option<ModalOutcome> {
        if self.use_defaults {
            self.chosen_n = DEFAULTS_COUNT;
            self.grid.fill_all(self.chosen_n, &self.defaults);
            self.scroll = 0;
            self.focus = 0;
        }
        match grid_to_bodies(&self.grid, self.viewport.base_radius()) {
            Ok(bodies) => {
                self.grid.clear_invalid();
                self.error = None;
                let count = bodies.len();
                Some(ModalOutcome::Confirmed { bodies, count })
            }
            Err(err) => {
                let body = err.body();
                self.grid.mark_body_invalid(body);
                self.focus = body * FIELDS_PER_BODY;
                if body < self.scroll {
                    self.scroll = body;
                }
                if body >= self.scroll + VISIBLE_ROWS {
                    self.scroll = body + 1 - VISIBLE_ROWS;
                }
                self.error = Some(err);
                None
            }
        }
    }

    /// A press on the track outside the thumb pages toward the pointer.
    fn track_page(&mut self, y: f32, layout: &ModalLayout) {
        let Some(thumb) = layout.thumb else { return };
        if y < thumb.y {
            self.scroll = self.scroll.saturating_sub(VISIBLE_ROWS);
        } else if y > thumb.y + thumb.h {
            self.scroll = (self.scroll + VISIBLE_ROWS).min(self.max_scroll());
        }
    }

    /// While the thumb is held, vertical displacement maps linearly onto
    /// the scroll range.
    fn on_pointer_move(&mut self, y: f32, layout: &ModalLayout) {
        let Some(drag) = self.drag else { return };
        if self.grid.len() <= VISIBLE_ROWS {
            return;
        }
        let track_range = layout.thumb_track_range();
        let rel = (y - layout.track.y - drag.grab_offset).clamp(0.0, track_range);
        let range = self.max_scroll();
        let frac = rel / track_range;
        self.scroll = ((frac * range as f32).round() as usize).min(range);
    }
}

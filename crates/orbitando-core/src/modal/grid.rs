use crate::api::types::{FIELDS_PER_BODY, MAX_BODIES};
use crate::modal::defaults::DefaultsTable;

/// Longest cell text the editor accepts.
pub const CELL_MAX_CHARS: usize = 31;

/// One editable text cell holding a numeric token pending parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub valid: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            text: String::new(),
            valid: true,
        }
    }
}

/// The full set of cells for all configurable bodies.
///
/// The backing store is always `MAX_BODIES × 4` cells; `n` is the logical
/// body count. Resizing never reallocates: shrinking leaves stale cells in
/// the slack and growing overwrites them from the defaults table.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    n: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An empty grid; `resize` activates rows.
    pub fn new() -> Self {
        Self {
            n: 0,
            cells: vec![Cell::default(); MAX_BODIES * FIELDS_PER_BODY],
        }
    }

    /// Active body count.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Number of active cells.
    pub fn total_cells(&self) -> usize {
        self.n * FIELDS_PER_BODY
    }

    /// Cell by body index and field slot (0: Ry, 1: Rx, 2: omega, 3: size).
    pub fn cell(&self, body: usize, slot: usize) -> &Cell {
        &self.cells[body * FIELDS_PER_BODY + slot]
    }

    /// Cell by flat index in `[0, total_cells)`.
    pub fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub fn cell_at_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    /// Change the active body count, clamped to `[1, MAX_BODIES]`.
    /// Newly exposed rows are populated from `defaults`; surviving rows are
    /// untouched. Shrinking only lowers the count.
    pub fn resize(&mut self, new_n: usize, defaults: &DefaultsTable) {
        let new_n = new_n.clamp(1, MAX_BODIES);
        if new_n > self.n {
            for i in self.n..new_n {
                self.fill_one(i, defaults);
            }
        }
        self.n = new_n;
    }

    /// Regenerate every active row from `defaults` and set the count.
    pub fn fill_all(&mut self, n: usize, defaults: &DefaultsTable) {
        let n = n.clamp(1, MAX_BODIES);
        self.n = n;
        for i in 0..n {
            self.fill_one(i, defaults);
        }
    }

    /// Regenerate one body's 4 cells from `defaults`, clearing their
    /// invalid flags.
    pub fn fill_one(&mut self, body: usize, defaults: &DefaultsTable) {
        let d = defaults.get(body);
        let base = body * FIELDS_PER_BODY;
        self.cells[base].text = format!("{:.2}", d.rel_ry);
        self.cells[base + 1].text = format!("{:.2}", d.rel_rx);
        self.cells[base + 2].text = format!("{:.2}", d.rel_omega);
        self.cells[base + 3].text = format!("{}", d.grid_size * 4);
        for slot in 0..FIELDS_PER_BODY {
            self.cells[base + slot].valid = true;
        }
    }

    /// Flag all 4 cells of one body as invalid.
    pub fn mark_body_invalid(&mut self, body: usize) {
        let base = body * FIELDS_PER_BODY;
        for slot in 0..FIELDS_PER_BODY {
            self.cells[base + slot].valid = false;
        }
    }

    /// Clear every invalid flag.
    pub fn clear_invalid(&mut self) {
        for cell in &mut self.cells {
            cell.valid = true;
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> DefaultsTable {
        DefaultsTable::builtin()
    }

    #[test]
    fn resize_clamps_to_bounds() {
        let mut g = Grid::new();
        g.resize(0, &defaults());
        assert_eq!(g.len(), 1);
        g.resize(99, &defaults());
        assert_eq!(g.len(), MAX_BODIES);
    }

    #[test]
    fn backing_store_never_shrinks() {
        let mut g = Grid::new();
        g.resize(MAX_BODIES, &defaults());
        g.resize(1, &defaults());
        assert_eq!(g.len(), 1);
        assert_eq!(g.cells.len(), MAX_BODIES * FIELDS_PER_BODY);
    }

    #[test]
    fn growth_fills_new_rows_only() {
        let mut g = Grid::new();
        g.resize(2, &defaults());
        g.cell_at_mut(0).text = "0.42".to_string();
        g.resize(4, &defaults());
        assert_eq!(g.cell(0, 0).text, "0.42");
        assert_eq!(g.cell(2, 0).text, "0.28");
        assert_eq!(g.cell(3, 3).text, "16");
    }

    #[test]
    fn regrow_overwrites_trimmed_edits_with_defaults() {
        // Shrinking then growing back re-defaults the regrown rows; prior
        // edits there are intentionally not restored.
        let mut g = Grid::new();
        g.resize(3, &defaults());
        g.cell_at_mut(2 * FIELDS_PER_BODY).text = "1.11".to_string();
        g.resize(2, &defaults());
        g.resize(3, &defaults());
        assert_eq!(g.cell(2, 0).text, "0.28");
    }

    #[test]
    fn fill_all_is_idempotent() {
        let mut g = Grid::new();
        g.fill_all(9, &defaults());
        let first = g.clone();
        g.fill_all(9, &defaults());
        assert_eq!(g, first);
    }

    #[test]
    fn fill_one_resets_validity() {
        let mut g = Grid::new();
        g.resize(2, &defaults());
        g.mark_body_invalid(1);
        assert!(!g.cell(1, 0).valid);
        g.fill_one(1, &defaults());
        assert!(g.cell(1, 0).valid);
        assert!(g.cell(1, 3).valid);
    }

    #[test]
    fn size_cell_is_grid_units_times_four() {
        let mut g = Grid::new();
        g.resize(1, &defaults());
        // builtin grid_size for body 0 is 3
        assert_eq!(g.cell(0, 3).text, "12");
    }
}

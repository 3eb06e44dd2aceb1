use crate::modal::grid::Grid;

/// UI state retained between modal invocations within one run: grid
/// contents, toggle, chosen count, focus, and scroll all come back when the
/// modal reopens. Owned by the caller and passed in on open; the controller
/// is the only writer.
#[derive(Debug, Clone)]
pub struct ModalSession {
    pub grid: Grid,
    pub use_defaults: bool,
    pub chosen_n: usize,
    pub focus: usize,
    pub scroll: usize,
    initialized: bool,
}

impl ModalSession {
    /// Whether a modal run has been saved into this session yet.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }
}

impl Default for ModalSession {
    fn default() -> Self {
        Self {
            grid: Grid::new(),
            use_defaults: true,
            chosen_n: 9,
            focus: 0,
            scroll: 0,
            initialized: false,
        }
    }
}

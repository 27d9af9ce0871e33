use crate::analysis::Figure;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Which figure is on screen, independent of rendering.
pub struct ViewerState {
    /// Figures in the order the analysis produced them.
    pub figures: Vec<Figure>,

    /// Index into `figures` of the one being shown.
    pub current: usize,
}

impl ViewerState {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self {
            figures,
            current: 0,
        }
    }

    /// The figure on screen, `None` only when there are no figures.
    pub fn current_figure(&self) -> Option<&Figure> {
        self.figures.get(self.current)
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.figures.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    /// Advance one figure; stays on the last one.
    pub fn next(&mut self) {
        if self.has_next() {
            self.current += 1;
        }
    }

    /// Step back one figure; stays on the first one.
    pub fn previous(&mut self) {
        if self.has_previous() {
            self.current -= 1;
        }
    }

    /// "Figure i of n" for the top bar.
    pub fn position_label(&self) -> String {
        format!("Figure {} of {}", self.current + 1, self.figures.len())
    }
}

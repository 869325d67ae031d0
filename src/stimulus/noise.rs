/// Source of independent uniform binary cells backing every noise grid.
///
/// Injectable so tests (and `--seed`) get a reproducible stream; the default
/// construction draws entropy the same way the rest of the crate does.
pub struct NoiseSource {
    rng: fastrand::Rng,
}

impl NoiseSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// One cell: true with probability 0.5, no correlation between calls.
    pub fn flip(&mut self) -> bool {
        self.rng.bool()
    }
}

/// Low-resolution binary grid. Immutable once generated; regeneration always
/// builds a fresh grid rather than patching cells in place.
pub struct NoiseGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl NoiseGrid {
    pub fn generate(rows: usize, cols: usize, source: &mut NoiseSource) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let cells = (0..rows * cols).map(|_| source.flip()).collect();
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell lookup with the row/col clamped to the grid edge. Fractional
    /// pixel sizes can floor-map the last pixel row one cell past the end;
    /// clamping keeps the documented in-range guarantee.
    pub fn cell(&self, row: usize, col: usize) -> bool {
        let r = row.min(self.rows - 1);
        let c = col.min(self.cols - 1);
        self.cells[r * self.cols + c]
    }
}

//! Uniform cell grid for cutoff-radius pair search.

use std::collections::HashMap;

/// Grid-based spatial index over bead positions.
///
/// Space is cut into cubic cells of side `cell_size` and each cell stores
/// the indices of the beads inside it. With `cell_size >= cutoff`, every
/// bead within the cutoff of a point lies in the point's cell or one of its
/// 26 neighbors.
///
/// Non-finite positions are never stored and never match a query.
#[derive(Debug)]
pub struct SpatialGrid {
    inv_cell_size: f64,
    cells: HashMap<Cell, Vec<usize>>,
}

type Cell = (i64, i64, i64);

impl SpatialGrid {
    /// Creates an empty grid.
    ///
    /// # Arguments
    ///
    /// * `cell_size` — Side of each cubic cell, usually the cutoff radius
    ///
    /// # Panics
    ///
    /// Panics if `cell_size <= 0.0`. Callers validate the cutoff first.
    pub fn new(cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "Cell size must be positive");
        Self {
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        }
    }

    /// Creates a grid holding every position, indexed by slice position.
    pub fn from_positions(positions: &[[f64; 3]], cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, pos) in positions.iter().enumerate() {
            grid.insert(idx, *pos);
        }
        grid
    }

    /// Cell holding `pos`, or `None` for a non-finite position.
    ///
    /// Coordinates beyond the `i64` range saturate at its ends.
    fn cell_coords(&self, pos: [f64; 3]) -> Option<Cell> {
        if !pos.iter().all(|c| c.is_finite()) {
            return None;
        }
        Some((
            (pos[0] * self.inv_cell_size).floor() as i64,
            (pos[1] * self.inv_cell_size).floor() as i64,
            (pos[2] * self.inv_cell_size).floor() as i64,
        ))
    }

    /// Stores bead `idx` at `pos`; a non-finite position is ignored.
    pub fn insert(&mut self, idx: usize, pos: [f64; 3]) {
        if let Some(cell) = self.cell_coords(pos) {
            self.cells.entry(cell).or_default().push(idx);
        }
    }

    /// Indices of all beads within `cutoff` of `query`, in ascending order.
    ///
    /// # Arguments
    ///
    /// * `query` — Query position [x, y, z]
    /// * `positions` — Full position array used for distance checks
    /// * `cutoff` — Maximum distance to include, at most the cell size
    pub fn query_radius(
        &self,
        query: [f64; 3],
        positions: &[[f64; 3]],
        cutoff: f64,
    ) -> Vec<usize> {
        let cutoff_sq = cutoff * cutoff;
        let Some((cx, cy, cz)) = self.cell_coords(query) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let cell = (
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    let Some(indices) = self.cells.get(&cell) else {
                        continue;
                    };
                    for &idx in indices {
                        let pos = positions[idx];
                        let dist_sq = (pos[0] - query[0]).powi(2)
                            + (pos[1] - query[1]).powi(2)
                            + (pos[2] - query[2]).powi(2);
                        if dist_sq <= cutoff_sq {
                            results.push(idx);
                        }
                    }
                }
            }
        }

        // Saturated cells at the edge of the range are visited twice.
        results.sort_unstable();
        results.dedup();
        results
    }

    /// Every unordered pair `(i, j)` with `i < j` closer than `cutoff`,
    /// sorted by `(i, j)`.
    pub fn pairs_within(&self, positions: &[[f64; 3]], cutoff: f64) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, pos) in positions.iter().enumerate() {
            for j in self.query_radius(*pos, positions, cutoff) {
                if j > i {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

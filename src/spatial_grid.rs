/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * It divides the toroidal world into a grid of cells and hashes every cell
 * into a fixed-size bucket table, so a neighborhood query only touches the
 * handful of buckets around a position instead of the whole flock.
 *
 * Optimized for performance by:
 * - Keeping bucket storage alive across ticks (clear never frees)
 * - Growing a full bucket by doubling its capacity
 * - Storing plain boid indices rather than per-query linked nodes
 * - Visiting each bucket at most once per query
 */

use glam::Vec2;
use tracing::debug;

use crate::error::SimError;

const HASH_PRIME_X: u32 = 73_856_093;
const HASH_PRIME_Y: u32 = 19_349_663;

// One hash bucket: the boids of every cell that hashes here
#[derive(Debug, Clone, Default)]
pub struct GridCell {
    members: Vec<usize>,
}

impl GridCell {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.members.capacity()
    }

    // Append, doubling the backing storage first when it is full
    #[inline]
    fn push(&mut self, boid_index: usize) -> bool {
        let grew = self.members.len() == self.members.capacity();
        if grew {
            let additional = self.members.capacity().max(1);
            self.members.reserve_exact(additional);
        }
        self.members.push(boid_index);
        grew
    }
}

pub struct SpatialGrid {
    cells: Vec<GridCell>,
    cells_x: usize,
    cells_y: usize,
    cell_width: f32,
    cell_height: f32,
    len: usize,
}

impl SpatialGrid {
    pub fn new(
        width: f32,
        height: f32,
        cell_size: f32,
        table_size: usize,
        initial_cell_capacity: usize,
    ) -> Result<Self, SimError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(width) || !positive(height) {
            return Err(SimError::InvalidWorld { width, height });
        }
        if !positive(cell_size) {
            return Err(SimError::InvalidConfig("cell_size must be positive"));
        }
        if table_size == 0 {
            return Err(SimError::InvalidConfig("hash_table_size must be non-zero"));
        }

        // Whole cells only, so the last column is never narrower than the rest
        let cells_x = ((width / cell_size).floor() as usize).max(1);
        let cells_y = ((height / cell_size).floor() as usize).max(1);

        let cells = (0..table_size)
            .map(|_| GridCell::with_capacity(initial_cell_capacity))
            .collect();

        Ok(Self {
            cells,
            cells_x,
            cells_y,
            cell_width: width / cells_x as f32,
            cell_height: height / cells_y as f32,
            len: 0,
        })
    }

    #[inline]
    pub fn cells_x(&self) -> usize {
        self.cells_x
    }

    #[inline]
    pub fn cells_y(&self) -> usize {
        self.cells_y
    }

    #[inline]
    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    #[inline]
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    #[inline]
    pub fn table_size(&self) -> usize {
        self.cells.len()
    }

    // Number of indices currently stored
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket(&self, bucket: usize) -> &GridCell {
        &self.cells[bucket]
    }

    // Convert world coordinates to wrapped cell coordinates
    #[inline]
    pub fn cell_of(&self, position: Vec2) -> (usize, usize) {
        let cx = (position.x / self.cell_width).floor() as i64;
        let cy = (position.y / self.cell_height).floor() as i64;
        (
            cx.rem_euclid(self.cells_x as i64) as usize,
            cy.rem_euclid(self.cells_y as i64) as usize,
        )
    }

    /// Bucket index for a cell. Distinct cells may share a bucket.
    #[inline]
    pub fn hash_cell(&self, cell_x: usize, cell_y: usize) -> usize {
        let hash = (cell_x as u32).wrapping_mul(HASH_PRIME_X) ^ (cell_y as u32).wrapping_mul(HASH_PRIME_Y);
        hash as usize % self.cells.len()
    }

    // Clear the grid, keeping every bucket's storage
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.members.clear();
        }
        self.len = 0;
    }

    // Insert a boid into the grid
    #[inline]
    pub fn insert(&mut self, boid_index: usize, position: Vec2) {
        let (cx, cy) = self.cell_of(position);
        let bucket = self.hash_cell(cx, cy);
        let cell = &mut self.cells[bucket];
        if cell.push(boid_index) {
            debug!(bucket, capacity = cell.capacity(), "grid bucket grew");
        }
        self.len += 1;
    }

    // Clear and re-insert from committed positions
    pub fn rebuild<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = (usize, Vec2)>,
    {
        self.clear();
        for (index, position) in positions {
            self.insert(index, position);
        }
    }

    /// Visit every index in the 3x3 block of cells around `position`.
    ///
    /// Callers must keep their interaction radius at or below the cell size,
    /// anything further away may be missed.
    #[inline]
    pub fn for_each_in_neighborhood<F>(&self, position: Vec2, mut f: F)
    where
        F: FnMut(usize),
    {
        let (cx, cy) = self.cell_of(position);
        let mut buckets = [0usize; 9];
        let mut n = 0;
        for y_offset in -1..=1 {
            let y = wrap_cell(cy as i64 + y_offset, self.cells_y);
            for x_offset in -1..=1 {
                let x = wrap_cell(cx as i64 + x_offset, self.cells_x);
                buckets[n] = self.hash_cell(x, y);
                n += 1;
            }
        }
        self.visit_buckets(&mut buckets, &mut f);
    }

    /// Visit every index within `reach` cells of `position` in each direction.
    pub fn for_each_within_cells<F>(&self, position: Vec2, reach: usize, mut f: F)
    where
        F: FnMut(usize),
    {
        let (cx, cy) = self.cell_of(position);
        // A block wider than the grid would wrap onto itself
        let span_x = (2 * reach + 1).min(self.cells_x);
        let span_y = (2 * reach + 1).min(self.cells_y);
        let mut buckets = Vec::with_capacity(span_x * span_y);
        for dy in 0..span_y {
            let y = wrap_cell(cy as i64 - reach as i64 + dy as i64, self.cells_y);
            for dx in 0..span_x {
                let x = wrap_cell(cx as i64 - reach as i64 + dx as i64, self.cells_x);
                buckets.push(self.hash_cell(x, y));
            }
        }
        self.visit_buckets(&mut buckets, &mut f);
    }

    // Visit every stored index exactly once
    pub fn for_each_member<F>(&self, mut f: F)
    where
        F: FnMut(usize),
    {
        for cell in &self.cells {
            for &index in &cell.members {
                f(index);
            }
        }
    }

    #[inline]
    fn visit_buckets<F>(&self, buckets: &mut [usize], f: &mut F)
    where
        F: FnMut(usize),
    {
        buckets.sort_unstable();
        let mut previous = None;
        for &bucket in buckets.iter() {
            if previous == Some(bucket) {
                continue;
            }
            previous = Some(bucket);
            for &index in &self.cells[bucket].members {
                f(index);
            }
        }
    }
}

#[inline]
fn wrap_cell(cell: i64, cells: usize) -> usize {
    cell.rem_euclid(cells as i64) as usize
}

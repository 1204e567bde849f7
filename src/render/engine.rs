use crate::foundation::core::{ColorState, Rgba8};
use crate::render::raster::{Layout, Raster};
use crate::transform::grid::TransformGrid;

/// Receives every leaf of a subdivision, exactly once per output pixel.
pub(crate) trait LeafVisitor {
    fn leaf(&mut self, x: u32, y: u32, state: &ColorState);
}

/// Writes the clamped primary color of each leaf.
pub(crate) struct RasterWriter<'a> {
    pub(crate) raster: &'a mut Raster,
}

impl LeafVisitor for RasterWriter<'_> {
    fn leaf(&mut self, x: u32, y: u32, state: &ColorState) {
        self.raster.put(x, y, Rgba8::from_color(state.primary()));
    }
}

/// The recursive subdivision of a raster by a fixed grid.
///
/// At remaining depth `d` the current block is split into `R × C` child blocks of
/// `R^(d-1) × C^(d-1)` pixels; child `(row, col)` starts `row · R^(d-1)` along the row axis
/// and `col · C^(d-1)` along the column axis, so children tile the parent without overlap.
pub(crate) struct Subdivision<'g> {
    grid: &'g TransformGrid,
    layout: Layout,
    /// `strides[k] = (R^k, C^k)` for `k < depth`.
    strides: Vec<(u32, u32)>,
}

impl<'g> Subdivision<'g> {
    /// `depth` must already have passed [`crate::render::raster::raster_size`].
    pub(crate) fn new(grid: &'g TransformGrid, depth: u32, layout: Layout) -> Self {
        let mut strides = Vec::with_capacity(depth as usize);
        let (mut rs, mut cs) = (1u32, 1u32);
        for _ in 0..depth {
            strides.push((rs, cs));
            rs = rs.saturating_mul(grid.rows() as u32);
            cs = cs.saturating_mul(grid.cols() as u32);
        }
        Self {
            grid,
            layout,
            strides,
        }
    }

    pub(crate) fn depth(&self) -> u32 {
        self.strides.len() as u32
    }

    /// Pixel offset of child `(row, col)` inside a block at remaining depth `d > 0`.
    fn child_offset(&self, d: u32, row: usize, col: usize) -> (u32, u32) {
        let (rs, cs) = self.strides[d as usize - 1];
        let along_rows = row as u32 * rs;
        let along_cols = col as u32 * cs;
        match self.layout {
            Layout::RowsDown => (along_cols, along_rows),
            Layout::RowsAcross => (along_rows, along_cols),
        }
    }

    /// Walk the whole tree from `initial`, handing each leaf to `visitor`.
    pub(crate) fn run(&self, initial: &ColorState, visitor: &mut impl LeafVisitor) {
        self.descend(self.depth(), 0, 0, initial, visitor);
    }

    fn descend(
        &self,
        d: u32,
        x: u32,
        y: u32,
        state: &ColorState,
        visitor: &mut impl LeafVisitor,
    ) {
        if d == 0 {
            visitor.leaf(x, y, state);
            return;
        }
        for (row, col, cell) in self.grid.iter() {
            let child = cell.apply(state);
            let (dx, dy) = self.child_offset(d, row, col);
            self.descend(d - 1, x + dx, y + dy, &child, visitor);
        }
    }

    /// The `(row, col)` cells visited on the way from the root to pixel `(x, y)`, root first.
    pub(crate) fn path_to(&self, x: u32, y: u32) -> Vec<(usize, usize)> {
        let (mut x, mut y) = (x, y);
        let mut path = Vec::with_capacity(self.strides.len());
        for &(rs, cs) in self.strides.iter().rev() {
            let (along_rows, along_cols) = match self.layout {
                Layout::RowsDown => (&mut y, &mut x),
                Layout::RowsAcross => (&mut x, &mut y),
            };
            let row = *along_rows / rs;
            let col = *along_cols / cs;
            *along_rows %= rs;
            *along_cols %= cs;
            path.push((row as usize, col as usize));
        }
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;

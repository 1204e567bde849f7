use crate::expression::Expression;
use crate::foundation::core::MAX_COLORS;
use crate::foundation::error::{QuiltError, QuiltResult};
use crate::transform::cell::CellTransform;

/// Which transform model a grid was compiled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformKind {
    /// Per-channel formulas.
    Arithmetic,
    /// Slot selections.
    Permutation,
}

/// Rectangular `R × C` matrix of [`CellTransform`]s, reused unchanged at every depth.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformGrid {
    rows: usize,
    cols: usize,
    numcolors: usize,
    kind: TransformKind,
    /// Row-major.
    cells: Vec<CellTransform>,
}

impl TransformGrid {
    /// Number of grid rows (`R`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns (`C`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Colors consumed and produced by every cell.
    pub fn numcolors(&self) -> usize {
        self.numcolors
    }

    /// The transform model of this grid.
    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    /// The transform at `(row, col)`. Panics when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &CellTransform {
        assert!(row < self.rows && col < self.cols, "cell out of range");
        &self.cells[row * self.cols + col]
    }

    /// Iterate `(row, col, transform)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &CellTransform)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, t)| (i / self.cols, i % self.cols, t))
    }

    /// Compile `functions[row][col][color][channel]` formula strings.
    ///
    /// Checks run in this order: grid non-empty, equal row widths, color entries per cell,
    /// channel entries per color, then each formula.
    #[tracing::instrument(skip(functions))]
    pub fn compile_expressions<S: AsRef<str>>(
        functions: &[Vec<Vec<Vec<S>>>],
        numcolors: usize,
    ) -> QuiltResult<Self> {
        check_numcolors(numcolors)?;
        let (rows, cols) = check_rectangular(functions)?;

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in functions.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                if cell.len() != numcolors {
                    return Err(QuiltError::shape(format!(
                        "cell ({row},{col}) has {} color functions, expected {numcolors}",
                        cell.len()
                    )));
                }
                let mut triples = Vec::with_capacity(numcolors);
                for (color, channels) in cell.iter().enumerate() {
                    if channels.len() != 3 {
                        return Err(QuiltError::shape(format!(
                            "cell ({row},{col}) color {color} has {} channel expressions, expected 3",
                            channels.len()
                        )));
                    }
                    let compile = |ch: usize| {
                        Expression::compile_raw(channels[ch].as_ref(), numcolors).map_err(|e| {
                            QuiltError::parse(format!(
                                "cell ({row},{col}) color {color} channel {ch}: {e}"
                            ))
                        })
                    };
                    triples.push([compile(0)?, compile(1)?, compile(2)?]);
                }
                cells.push(CellTransform::Arithmetic(triples));
            }
        }

        tracing::debug!(rows, cols, numcolors, "compiled expression grid");
        Ok(Self {
            rows,
            cols,
            numcolors,
            kind: TransformKind::Arithmetic,
            cells,
        })
    }

    /// Compile `selections[row][col][slot]` permutation arrays.
    #[tracing::instrument(skip(selections))]
    pub fn compile_permutations(
        selections: &[Vec<Vec<usize>>],
        numcolors: usize,
    ) -> QuiltResult<Self> {
        check_numcolors(numcolors)?;
        let (rows, cols) = check_rectangular(selections)?;

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in selections.iter().enumerate() {
            for (col, sel) in line.iter().enumerate() {
                if sel.len() != numcolors {
                    return Err(QuiltError::shape(format!(
                        "cell ({row},{col}) selects {} slots, expected {numcolors}",
                        sel.len()
                    )));
                }
                if let Some(&bad) = sel.iter().find(|&&src| src >= numcolors) {
                    return Err(QuiltError::bounds(format!(
                        "cell ({row},{col}) selects slot {bad}, only {numcolors} colors exist"
                    )));
                }
                cells.push(CellTransform::Permutation(sel.clone()));
            }
        }

        tracing::debug!(rows, cols, numcolors, "compiled permutation grid");
        Ok(Self {
            rows,
            cols,
            numcolors,
            kind: TransformKind::Permutation,
            cells,
        })
    }

    /// A grid of identity cells.
    pub fn identity(rows: usize, cols: usize, numcolors: usize) -> QuiltResult<Self> {
        let cell = CellTransform::identity(numcolors)?;
        if rows == 0 || cols == 0 {
            return Err(QuiltError::shape("grid must have at least one row and column"));
        }
        Ok(Self {
            rows,
            cols,
            numcolors,
            kind: TransformKind::Permutation,
            cells: vec![cell; rows * cols],
        })
    }
}

fn check_numcolors(numcolors: usize) -> QuiltResult<()> {
    if numcolors == 0 || numcolors > MAX_COLORS {
        return Err(QuiltError::bounds(format!(
            "color count {numcolors} is outside 1..={MAX_COLORS}"
        )));
    }
    Ok(())
}

fn check_rectangular<T>(grid: &[Vec<T>]) -> QuiltResult<(usize, usize)> {
    let Some(first) = grid.first() else {
        return Err(QuiltError::shape("grid has no rows"));
    };
    let cols = first.len();
    if cols == 0 {
        return Err(QuiltError::shape("grid has no columns"));
    }
    if let Some((row, line)) = grid.iter().enumerate().find(|(_, l)| l.len() != cols) {
        return Err(QuiltError::shape(format!(
            "row {row} has width {}, expected {cols}",
            line.len()
        )));
    }
    Ok((grid.len(), cols))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/grid.rs"]
mod tests;

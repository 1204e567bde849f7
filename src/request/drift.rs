use crate::foundation::error::{QuiltError, QuiltResult};
use crate::request::model::{FunctionGrid, RenderRequest};

/// Small deterministic PRNG for request drift.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Seeded generator; equal seeds give equal sequences.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Fair coin.
    pub fn coin(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }
}

/// What a single [`drift`] step changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriftStep {
    /// A formula at `(row, col, color, channel)` gained `suffix`.
    Formula {
        /// Grid row.
        row: usize,
        /// Grid column.
        col: usize,
        /// Output color index.
        color: usize,
        /// Channel index (0 = r, 1 = g, 2 = b).
        channel: usize,
        /// Appended text, e.g. `*4/3`.
        suffix: String,
    },
    /// Selection slot `slot` at `(row, col)` now reads `source`.
    Selection {
        /// Grid row.
        row: usize,
        /// Grid column.
        col: usize,
        /// Output slot.
        slot: usize,
        /// New source slot.
        source: usize,
    },
}

/// Nudge one transform of `req` so successive renders form a slowly changing sequence.
///
/// Formula grids get `*n/(n-1)` or `/n*(n-1)` (with `n` in `2..=6`) appended to one random
/// channel formula; selection grids get one random slot redirected to a random source.
/// The request must already have a rectangular grid and a valid color count.
pub fn drift(req: &mut RenderRequest, rng: &mut Rng64) -> QuiltResult<DriftStep> {
    let numcolors = req.colors.len();
    let (rows, cols) = req.functions.dims();
    if rows == 0 || cols == 0 || numcolors == 0 {
        return Err(QuiltError::shape("cannot drift an empty request"));
    }
    let row = rng.below(rows);
    let col = rng.below(cols);

    match &mut req.functions {
        FunctionGrid::Expressions(g) => {
            let color = rng.below(numcolors);
            let channel = rng.below(3);
            let n = rng.below(5) + 2;
            let suffix = if rng.coin() {
                format!("*{n}/{}", n - 1)
            } else {
                format!("/{n}*{}", n - 1)
            };
            let formula = g
                .get_mut(row)
                .and_then(|line| line.get_mut(col))
                .and_then(|cell| cell.get_mut(color))
                .and_then(|triple| triple.get_mut(channel))
                .ok_or_else(|| {
                    QuiltError::shape(format!(
                        "no formula at cell ({row},{col}) color {color} channel {channel}"
                    ))
                })?;
            formula.push_str(&suffix);
            Ok(DriftStep::Formula {
                row,
                col,
                color,
                channel,
                suffix,
            })
        }
        FunctionGrid::Permutations(g) => {
            let slot = rng.below(numcolors);
            let source = rng.below(numcolors);
            let entry = g
                .get_mut(row)
                .and_then(|line| line.get_mut(col))
                .and_then(|sel| sel.get_mut(slot))
                .ok_or_else(|| {
                    QuiltError::shape(format!("no selection slot {slot} at cell ({row},{col})"))
                })?;
            *entry = source;
            Ok(DriftStep::Selection {
                row,
                col,
                slot,
                source,
            })
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/request/drift.rs"]
mod tests;

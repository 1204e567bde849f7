use smallvec::SmallVec;

use crate::expression::Expression;
use crate::foundation::core::{Color, ColorState, MAX_COLORS};
use crate::foundation::error::{QuiltError, QuiltResult};

/// One grid cell's function from a [`ColorState`] to a new [`ColorState`] of the same length.
///
/// Both variants share the same recursive engine; the variant is chosen per request.
/// Cells are built by [`crate::TransformGrid`] compilation or [`CellTransform::identity`],
/// which check their arity.
#[derive(Clone, Debug, PartialEq)]
pub enum CellTransform {
    /// One `[r, g, b]` formula triple per output color. Every formula reads the *input*
    /// state, so output colors are independent of each other.
    #[non_exhaustive]
    Arithmetic(Vec<[Expression; 3]>),
    /// `selection[i]` names the input slot copied into output slot `i`.
    #[non_exhaustive]
    Permutation(Vec<usize>),
}

impl CellTransform {
    /// Number of colors consumed and produced.
    pub fn arity(&self) -> usize {
        match self {
            CellTransform::Arithmetic(fs) => fs.len(),
            CellTransform::Permutation(sel) => sel.len(),
        }
    }

    /// Apply the transform, producing a fresh state.
    pub fn apply(&self, state: &ColorState) -> ColorState {
        match self {
            CellTransform::Arithmetic(fs) => {
                let colors: SmallVec<[Color; 4]> = fs
                    .iter()
                    .map(|[r, g, b]| Color::new(r.eval(state), g.eval(state), b.eval(state)))
                    .collect();
                ColorState::from_vec_unchecked(colors)
            }
            CellTransform::Permutation(sel) => permute_unchecked(sel, state),
        }
    }

    /// The identity transform for `numcolors` colors.
    pub fn identity(numcolors: usize) -> QuiltResult<Self> {
        if numcolors == 0 || numcolors > MAX_COLORS {
            return Err(QuiltError::bounds(format!(
                "color count {numcolors} is outside 1..={MAX_COLORS}"
            )));
        }
        Ok(CellTransform::Permutation((0..numcolors).collect()))
    }
}

/// Relabel color slots: output slot `i` receives input slot `selection[i]`.
///
/// The selection must name 1 to [`MAX_COLORS`] slots, each one present in `state`.
pub fn permute(selection: &[usize], state: &ColorState) -> QuiltResult<ColorState> {
    if selection.is_empty() || selection.len() > MAX_COLORS {
        return Err(QuiltError::shape(format!(
            "selection has {} slots, expected 1..={MAX_COLORS}",
            selection.len()
        )));
    }
    if let Some(&bad) = selection.iter().find(|&&src| src >= state.len()) {
        return Err(QuiltError::bounds(format!(
            "selection reads slot {bad}, state has {} colors",
            state.len()
        )));
    }
    Ok(permute_unchecked(selection, state))
}

/// Grid cells are checked at compile time; an out-of-range entry here reads as black.
pub(crate) fn permute_unchecked(selection: &[usize], state: &ColorState) -> ColorState {
    let colors: SmallVec<[Color; 4]> = selection
        .iter()
        .map(|&src| state.get(src).unwrap_or_default())
        .collect();
    ColorState::from_vec_unchecked(colors)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/cell.rs"]
mod tests;

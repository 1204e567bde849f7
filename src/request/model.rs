use crate::foundation::core::{Color, ColorState, MAX_COLORS};
use crate::foundation::error::{QuiltError, QuiltResult};
use crate::transform::grid::TransformGrid;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete quilt request as accepted at the boundary.
///
/// ```json
/// { "iterations": 3,
///   "colors": [[255, 0, 0], {"r": 0, "g": 0, "b": 255}],
///   "functions": [[ [["r0","g0","b0"], ["r1","g1","b1"]], ... ]] }
/// ```
///
/// Unknown fields are ignored.
pub struct RenderRequest {
    /// Recursion depth `N`; the raster is `base^N` pixels per axis.
    pub iterations: u32,
    /// Initial color state, 1 to 10 entries.
    pub colors: Vec<ColorSpec>,
    /// The `R × C` seed pattern.
    pub functions: FunctionGrid,
    /// Frames to produce when animating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numframes: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// One initial color, written either as `[r, g, b]` or `{"r": .., "g": .., "b": ..}`.
pub enum ColorSpec {
    /// Positional channels; must have exactly three entries.
    Triple(Vec<f64>),
    /// Named channels.
    Named {
        /// Red.
        r: f64,
        /// Green.
        g: f64,
        /// Blue.
        b: f64,
    },
}

impl ColorSpec {
    fn to_color(&self, index: usize) -> QuiltResult<Color> {
        let c = match self {
            ColorSpec::Triple(v) => match v.as_slice() {
                &[r, g, b] => Color::new(r, g, b),
                other => {
                    return Err(QuiltError::shape(format!(
                        "color {index} has {} channels, expected 3",
                        other.len()
                    )));
                }
            },
            ColorSpec::Named { r, g, b } => Color::new(*r, *g, *b),
        };
        if ![c.r, c.g, c.b].iter().all(|v| v.is_finite()) {
            return Err(QuiltError::shape(format!(
                "color {index} has a non-finite channel"
            )));
        }
        Ok(c)
    }
}

impl From<Color> for ColorSpec {
    fn from(c: Color) -> Self {
        ColorSpec::Triple(vec![c.r, c.g, c.b])
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Per-cell transforms: `[row][col][color][channel]` formulas, or `[row][col][slot]`
/// selections.
pub enum FunctionGrid {
    /// Channel formulas.
    Expressions(Vec<Vec<Vec<Vec<String>>>>),
    /// Slot selections.
    Permutations(Vec<Vec<Vec<usize>>>),
}

impl FunctionGrid {
    /// `(rows, cols)` as declared by the first row; not validated.
    pub fn dims(&self) -> (usize, usize) {
        match self {
            FunctionGrid::Expressions(g) => (g.len(), g.first().map_or(0, Vec::len)),
            FunctionGrid::Permutations(g) => (g.len(), g.first().map_or(0, Vec::len)),
        }
    }
}

impl RenderRequest {
    /// Parse a request from JSON.
    pub fn from_json(s: &str) -> QuiltResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize this request as pretty JSON.
    pub fn to_json_pretty(&self) -> QuiltResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the color list into an initial state.
    pub fn initial_state(&self) -> QuiltResult<ColorState> {
        if self.colors.is_empty() {
            return Err(QuiltError::bounds("must have at least one color"));
        }
        if self.colors.len() > MAX_COLORS {
            return Err(QuiltError::bounds(format!(
                "too many colors ({} exceeds {MAX_COLORS})",
                self.colors.len()
            )));
        }
        let colors = self
            .colors
            .iter()
            .enumerate()
            .map(|(i, c)| c.to_color(i))
            .collect::<QuiltResult<Vec<_>>>()?;
        ColorState::new(colors)
    }

    /// Compile the function grid for this request's color count.
    pub fn compile_grid(&self) -> QuiltResult<TransformGrid> {
        let numcolors = self.colors.len();
        match &self.functions {
            FunctionGrid::Expressions(g) => TransformGrid::compile_expressions(g, numcolors),
            FunctionGrid::Permutations(g) => TransformGrid::compile_permutations(g, numcolors),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/request/model.rs"]
mod tests;

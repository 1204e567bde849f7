//! fraquilt renders self-similar "quilt" images.
//!
//! A starting set of color registers is recursively subdivided into an `R × C` grid. Each
//! grid cell transforms the running color state; after `N` levels one pixel is emitted per
//! leaf, giving an `R^N × C^N` raster.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: [`RenderRequest`] colors become an initial [`ColorState`].
//! 2. **Compile**: formulas (or slot selections) become a [`TransformGrid`] of
//!    [`CellTransform`]s.
//! 3. **Plan**: the grid is fixed to a depth as a [`QuiltPlan`]; the raster size is checked
//!    against [`RenderOpts`] before any allocation.
//! 4. **Render / replay**: the plan is replayed against one initial state ([`QuiltPlan::render`]),
//!    per-pixel states from a base bitmap ([`QuiltPlan::composite`]), or its own previous
//!    output ([`QuiltPlan::animate`]).
//!
//! Compilation and rendering are pure, synchronous and deterministic. File IO, encoding and
//! uploads live outside the library (see [`FrameSink`] and the `fraquilt` binary).
//!
//! # Formula language
//!
//! `r0`, `g1`, `b2` read one channel of one color; literals are unsigned decimal integers;
//! `+ - * /` chain strictly left to right with no precedence (`r0+5*2` is `(r0+5)*2`).
//! Dividing by zero returns the left operand unchanged.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod encode;
mod expression;
mod foundation;
mod render;
mod request;
mod transform;

pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use expression::Expression;
pub use foundation::core::{Channel, Color, ColorState, MAX_COLORS, Rgba8, clamp_channel};
pub use foundation::error::{QuiltError, QuiltResult};
pub use render::pipeline::{
    CompiledRequest, animate_request, compile_request, composite_request, render_drift,
    render_request,
};
pub use render::plan::{DEFAULT_FRAMES, Leaf, QuiltPlan};
pub use render::raster::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_PIXELS, Layout, Raster, RenderOpts, raster_size,
};
pub use request::drift::{DriftStep, Rng64, drift};
pub use request::model::{ColorSpec, FunctionGrid, RenderRequest};
pub use transform::cell::{CellTransform, permute};
pub use transform::grid::{TransformGrid, TransformKind};

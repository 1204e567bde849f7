use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::ColorState;
use crate::foundation::error::QuiltResult;
use crate::render::plan::{DEFAULT_FRAMES, QuiltPlan};
use crate::render::raster::{Raster, RenderOpts, raster_size};
use crate::request::drift::{Rng64, drift};
use crate::request::model::RenderRequest;

/// A request that passed validation and compilation.
#[derive(Clone, Debug)]
pub struct CompiledRequest {
    /// The replayable plan.
    pub plan: QuiltPlan,
    /// The validated initial colors.
    pub initial: ColorState,
    /// Frames to animate (from the request, or the default).
    pub frames: u32,
}

/// Validate colors, compile the grid and check the raster size, in that order.
///
/// All failure modes are reported here, before any pixel buffer exists.
#[tracing::instrument(skip(req), fields(iterations = req.iterations))]
pub fn compile_request(req: &RenderRequest, opts: &RenderOpts) -> QuiltResult<CompiledRequest> {
    let initial = req.initial_state()?;
    let grid = req.compile_grid()?;
    let plan = QuiltPlan::new(grid, req.iterations, opts)?;
    Ok(CompiledRequest {
        plan,
        initial,
        frames: req.numframes.unwrap_or(DEFAULT_FRAMES),
    })
}

/// Render a request to a raster. All-or-nothing: on error no raster is produced.
pub fn render_request(req: &RenderRequest, opts: &RenderOpts) -> QuiltResult<Raster> {
    let compiled = compile_request(req, opts)?;
    compiled.plan.render(&compiled.initial)
}

/// Render a request over an externally supplied base bitmap of the quilt's dimensions.
pub fn composite_request(
    req: &RenderRequest,
    base: &Raster,
    opts: &RenderOpts,
) -> QuiltResult<Raster> {
    let compiled = compile_request(req, opts)?;
    compiled.plan.composite(base, &compiled.initial)
}

/// Animate a request: frame 0 renders its colors, each later frame replays the previous one.
pub fn animate_request(
    req: &RenderRequest,
    opts: &RenderOpts,
    sink: &mut dyn FrameSink,
) -> QuiltResult<()> {
    let compiled = compile_request(req, opts)?;
    compiled
        .plan
        .animate(&compiled.initial, compiled.frames, sink)
}

/// Render `frames` frames, drifting the request's transforms before each one.
///
/// `req` is left holding the last drifted state so a caller can continue the sequence.
#[tracing::instrument(skip(req, opts, sink))]
pub fn render_drift(
    req: &mut RenderRequest,
    frames: u32,
    seed: u64,
    opts: &RenderOpts,
    sink: &mut dyn FrameSink,
) -> QuiltResult<()> {
    // Fail on an oversized request before the sink sees anything.
    let (rows, cols) = req.functions.dims();
    let (width, height) = raster_size(rows, cols, req.iterations, opts)?;
    compile_request(req, opts)?;

    sink.begin(SinkConfig {
        width,
        height,
        frames,
    })?;
    let mut rng = Rng64::new(seed);
    for idx in 0..frames {
        let step = drift(req, &mut rng)?;
        tracing::debug!(idx, ?step, "drifted request");
        let frame = render_request(req, opts)?;
        sink.push_frame(idx, &frame)?;
    }
    sink.end()
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

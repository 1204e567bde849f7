use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Color, ColorState, Rgba8};
use crate::foundation::error::{QuiltError, QuiltResult};
use crate::render::engine::{RasterWriter, Subdivision};
use crate::render::raster::{Layout, Raster, RenderOpts, raster_size};
use crate::transform::grid::TransformGrid;

/// Frames produced by [`QuiltPlan::animate`] when the request does not say otherwise.
pub const DEFAULT_FRAMES: u32 = 10;

/// A compiled grid fixed to a depth and layout, ready to be replayed.
///
/// The recursive structure is decided once, when the plan is built. Any number of initial
/// states can then be pushed through it: a whole raster from one state ([`QuiltPlan::render`]),
/// or one state per pixel ([`QuiltPlan::composite`], [`QuiltPlan::leaf`]).
#[derive(Clone, Debug)]
pub struct QuiltPlan {
    grid: TransformGrid,
    depth: u32,
    layout: Layout,
    width: u32,
    height: u32,
}

impl QuiltPlan {
    /// Fix `grid` to `depth`, failing before any allocation if the raster would be too large.
    #[tracing::instrument(skip(grid), fields(rows = grid.rows(), cols = grid.cols()))]
    pub fn new(grid: TransformGrid, depth: u32, opts: &RenderOpts) -> QuiltResult<Self> {
        let (width, height) = raster_size(grid.rows(), grid.cols(), depth, opts)?;
        tracing::debug!(width, height, "planned quilt");
        Ok(Self {
            grid,
            depth,
            layout: opts.layout,
            width,
            height,
        })
    }

    /// Output width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Recursion depth (iterations).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Axis mapping.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The compiled grid.
    pub fn grid(&self) -> &TransformGrid {
        &self.grid
    }

    fn subdivision(&self) -> Subdivision<'_> {
        Subdivision::new(&self.grid, self.depth, self.layout)
    }

    fn check_state(&self, state: &ColorState) -> QuiltResult<()> {
        if state.len() != self.grid.numcolors() {
            return Err(QuiltError::shape(format!(
                "state has {} colors, grid expects {}",
                state.len(),
                self.grid.numcolors()
            )));
        }
        Ok(())
    }

    /// Render the whole quilt from one initial state.
    #[tracing::instrument(skip_all, fields(depth = self.depth))]
    pub fn render(&self, initial: &ColorState) -> QuiltResult<Raster> {
        self.check_state(initial)?;
        let mut raster = Raster::zeroed(self.width, self.height);
        self.subdivision().run(
            initial,
            &mut RasterWriter {
                raster: &mut raster,
            },
        );
        Ok(raster)
    }

    /// The replayable leaf behind pixel `(x, y)`, or `None` outside the raster.
    pub fn leaf(&self, x: u32, y: u32) -> Option<Leaf<'_>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Leaf {
            grid: &self.grid,
            path: self.subdivision().path_to(x, y),
        })
    }

    /// Replay every leaf against a per-pixel state taken from `base`.
    ///
    /// Each pixel's state is `initial` with slot 0 replaced by the base pixel's color. `base`
    /// must already be resized to the plan's dimensions.
    #[tracing::instrument(skip_all, fields(depth = self.depth))]
    pub fn composite(&self, base: &Raster, initial: &ColorState) -> QuiltResult<Raster> {
        self.check_state(initial)?;
        if base.width != self.width || base.height != self.height {
            return Err(QuiltError::shape(format!(
                "base image is {}x{}, quilt is {}x{}",
                base.width, base.height, self.width, self.height
            )));
        }
        let sub = self.subdivision();
        let mut out = Raster::zeroed(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let seed = initial.with_primary(Color::from_rgba8(base.pixel(x, y)));
                let leaf = Leaf {
                    grid: &self.grid,
                    path: sub.path_to(x, y),
                };
                out.put(x, y, Rgba8::from_color(leaf.replay(&seed).primary()));
            }
        }
        Ok(out)
    }

    /// Feed `frames` frames into `sink`: frame 0 renders `initial`, every later frame
    /// composites the previous frame through the plan again.
    #[tracing::instrument(skip(self, initial, sink), fields(depth = self.depth))]
    pub fn animate(
        &self,
        initial: &ColorState,
        frames: u32,
        sink: &mut dyn FrameSink,
    ) -> QuiltResult<()> {
        self.check_state(initial)?;
        sink.begin(SinkConfig {
            width: self.width,
            height: self.height,
            frames,
        })?;
        let mut prev: Option<Raster> = None;
        for idx in 0..frames {
            let frame = match &prev {
                None => self.render(initial)?,
                Some(p) => self.composite(p, initial)?,
            };
            sink.push_frame(idx, &frame)?;
            prev = Some(frame);
        }
        sink.end()
    }
}

/// The chain of cells reaching one pixel, replayable against any initial state.
#[derive(Clone, Debug)]
pub struct Leaf<'a> {
    grid: &'a TransformGrid,
    path: Vec<(usize, usize)>,
}

impl Leaf<'_> {
    /// `(row, col)` of each cell from the outermost level inward.
    pub fn path(&self) -> &[(usize, usize)] {
        &self.path
    }

    /// Push `initial` through the chain. The state must have the grid's color count.
    pub fn replay(&self, initial: &ColorState) -> ColorState {
        self.path
            .iter()
            .fold(initial.clone(), |state, &(row, col)| {
                self.grid.cell(row, col).apply(&state)
            })
    }

    /// Replay and clamp the visible color into a pixel.
    pub fn pixel(&self, initial: &ColorState) -> Rgba8 {
        Rgba8::from_color(self.replay(initial).primary())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;

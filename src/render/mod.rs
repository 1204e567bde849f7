pub(crate) mod engine;
pub(crate) mod pipeline;
pub(crate) mod plan;
pub(crate) mod raster;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{QuiltError, QuiltResult};

/// Default pixel-area ceiling (4000 × 4000).
pub const DEFAULT_MAX_PIXELS: u64 = 4000 * 4000;

/// Default recursion depth ceiling.
///
/// This bounds recursion depth, not raster size: a `1 × 1` grid stays one pixel at any
/// depth, so without it the pixel ceiling never stops the recursion. Every larger grid hits
/// the pixel ceiling first.
pub const DEFAULT_MAX_ITERATIONS: u32 = 64;

/// A rendered quilt as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major. Alpha is always 255 in rendered output.
    pub data: Vec<u8>,
}

impl Raster {
    /// Wrap existing RGBA8 bytes (e.g. a decoded base image).
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> QuiltResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| QuiltError::bounds("raster dimensions overflow"))?;
        if data.len() != expected {
            return Err(QuiltError::shape(format!(
                "raster data has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Allocate an all-zero (transparent) raster. Callers have already checked the size.
    pub(crate) fn zeroed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Read the pixel at `(x, y)`. Panics when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let i = self.index(x, y);
        Rgba8 {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        }
    }

    pub(crate) fn put(&mut self, x: u32, y: u32, px: Rgba8) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&px.to_array());
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel out of range");
        (y as usize * self.width as usize + x as usize) * 4
    }
}

/// Which raster axis the grid's rows advance along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// Grid rows stack top to bottom: the raster is `C^N` wide and `R^N` tall.
    #[default]
    RowsDown,
    /// Grid rows advance left to right: the raster is `R^N` wide and `C^N` tall.
    RowsAcross,
}

/// Render limits and layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOpts {
    /// Maximum raster area in pixels, checked before allocation.
    pub max_pixels: u64,
    /// Maximum recursion depth.
    pub max_iterations: u32,
    /// Axis mapping.
    pub layout: Layout,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            layout: Layout::default(),
        }
    }
}

/// Output `(width, height)` for an `rows × cols` grid at `depth`, or a bounds error when the
/// raster would exceed the limits in `opts`.
pub fn raster_size(
    rows: usize,
    cols: usize,
    depth: u32,
    opts: &RenderOpts,
) -> QuiltResult<(u32, u32)> {
    if depth > opts.max_iterations {
        return Err(QuiltError::bounds(format!(
            "iterations {depth} exceed the maximum of {}",
            opts.max_iterations
        )));
    }
    let too_big = || {
        QuiltError::bounds(format!(
            "a {rows}x{cols} grid at {depth} iterations exceeds {} pixels",
            opts.max_pixels
        ))
    };
    let row_extent = (rows as u64).checked_pow(depth).ok_or_else(too_big)?;
    let col_extent = (cols as u64).checked_pow(depth).ok_or_else(too_big)?;
    let area = row_extent.checked_mul(col_extent).ok_or_else(too_big)?;
    if area > opts.max_pixels {
        return Err(too_big());
    }
    let row_extent = u32::try_from(row_extent).map_err(|_| too_big())?;
    let col_extent = u32::try_from(col_extent).map_err(|_| too_big())?;
    Ok(match opts.layout {
        Layout::RowsDown => (col_extent, row_extent),
        Layout::RowsAcross => (row_extent, col_extent),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;

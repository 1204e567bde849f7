use smallvec::SmallVec;

use crate::foundation::error::{QuiltError, QuiltResult};

/// Maximum number of colors a [`ColorState`] may hold.
pub const MAX_COLORS: usize = 10;

/// Channel selector for a [`Color`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red channel (`r` in expressions).
    Red,
    /// Green channel (`g` in expressions).
    Green,
    /// Blue channel (`b` in expressions).
    Blue,
}

impl Channel {
    /// All channels in `r, g, b` order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of this channel in an `[r, g, b]` triple.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// Expression letter for this channel.
    pub fn letter(self) -> char {
        match self {
            Channel::Red => 'r',
            Channel::Green => 'g',
            Channel::Blue => 'b',
        }
    }
}

/// One color register: unclamped channel values.
///
/// Channels are plain `f64`s while a quilt is being computed; they are only clamped to
/// `[0, 255]` when written to a pixel (see [`Rgba8::from_color`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Build a color from channel values.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Read one channel.
    pub fn channel(self, ch: Channel) -> f64 {
        match ch {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Build a color from an opaque pixel.
    pub fn from_rgba8(px: Rgba8) -> Self {
        Self::new(f64::from(px.r), f64::from(px.g), f64::from(px.b))
    }
}

impl From<[f64; 3]> for Color {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Ordered register set threaded through the recursion.
///
/// `ColorState` owns its colors; every transform returns a fresh state, so sibling branches
/// of the recursion never observe each other's results.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorState {
    colors: SmallVec<[Color; 4]>,
}

impl ColorState {
    /// Build a state from 1 to [`MAX_COLORS`] colors.
    pub fn new(colors: impl IntoIterator<Item = Color>) -> QuiltResult<Self> {
        let colors: SmallVec<[Color; 4]> = colors.into_iter().collect();
        if colors.is_empty() {
            return Err(QuiltError::bounds("at least one color is required"));
        }
        if colors.len() > MAX_COLORS {
            return Err(QuiltError::bounds(format!(
                "too many colors ({} exceeds {MAX_COLORS})",
                colors.len()
            )));
        }
        Ok(Self { colors })
    }

    /// Build a state without checking the color count.
    ///
    /// Only transforms use this, and they preserve the count of an already validated state.
    pub(crate) fn from_vec_unchecked(colors: SmallVec<[Color; 4]>) -> Self {
        Self { colors }
    }

    /// Number of colors held.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: a state holds at least one color.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The visible color: only slot 0 is ever written to a pixel.
    pub fn primary(&self) -> Color {
        self.colors[0]
    }

    /// Read a color slot.
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Borrow all colors in slot order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Return a copy with slot 0 replaced.
    pub fn with_primary(&self, color: Color) -> Self {
        let mut colors = self.colors.clone();
        colors[0] = color;
        Self { colors }
    }
}

/// Opaque RGBA8 pixel as written to a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (always 255 for quilt output).
    pub a: u8,
}

impl Rgba8 {
    /// Clamp and round a color into an opaque pixel.
    pub fn from_color(c: Color) -> Self {
        Self {
            r: clamp_channel(c.r),
            g: clamp_channel(c.g),
            b: clamp_channel(c.b),
            a: 255,
        }
    }

    /// Pixel bytes in `R, G, B, A` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Clamp a channel to `[0, 255]` and round to the nearest integer. NaN maps to 0.
pub fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

//! FILENAME: core/pivot-table/src/color.rs
//! PURPOSE: Range-based color scales for heatmap cells.
//! CONTEXT: A color scale generator receives the values of one heatmap scope
//! and returns a function mapping a value to a background color, linearly
//! interpolated between the scope's minimum and maximum.

use serde::{Deserialize, Serialize};

// ============================================================================
// COLOR
// ============================================================================

/// An RGB background color attached to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const fn white() -> Self {
        Color::new(255, 255, 255)
    }

    /// Convert to a CSS rgb() string.
    pub fn to_css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

// ============================================================================
// COLOR SCALES
// ============================================================================

/// Maps a value to its color within one heatmap scope.
pub type ColorScale = Box<dyn Fn(f64) -> Color>;

/// Builds a color scale from the values of one heatmap scope.
pub trait ColorScaleGenerator {
    fn generate(&self, values: &[f64]) -> ColorScale;
}

impl<F> ColorScaleGenerator for F
where
    F: Fn(&[f64]) -> ColorScale,
{
    fn generate(&self, values: &[f64]) -> ColorScale {
        self(values)
    }
}

/// The channel held at full intensity by a [`RangeColorizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Linear color ramp over the range of a set of values.
///
/// The fixed channel stays at 255 while the other two fade from 255 at the
/// minimum to 0 at the maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeColorizer {
    min: f64,
    max: f64,
    channel: Channel,
}

impl RangeColorizer {
    /// NaN values are ignored when finding the range.
    pub fn new(values: &[f64], channel: Channel) -> Self {
        let (min, max) = values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        RangeColorizer { min, max, channel }
    }

    /// Position of `value` within the range; 0 for an empty or single-valued range.
    pub fn position(&self, value: f64) -> f64 {
        let width = self.max - self.min;
        if !width.is_finite() || width <= 0.0 || value.is_nan() {
            return 0.0;
        }
        (value - self.min) / width
    }

    pub fn colorize(&self, value: f64) -> Color {
        let t = self.position(value);
        let faded = (255.0 - (255.0 * t).round()).clamp(0.0, 255.0) as u8;
        match self.channel {
            Channel::Red => Color::new(255, faded, faded),
            Channel::Green => Color::new(faded, 255, faded),
            Channel::Blue => Color::new(faded, faded, 255),
        }
    }
}

/// Default generator: red stays at full intensity, higher values are redder.
pub fn red_color_scale(values: &[f64]) -> ColorScale {
    let colorizer = RangeColorizer::new(values, Channel::Red);
    Box::new(move |x| colorizer.colorize(x))
}

/// Generator for a ramp on any channel.
pub fn channel_color_scale(channel: Channel) -> impl Fn(&[f64]) -> ColorScale {
    move |values: &[f64]| -> ColorScale {
        let colorizer = RangeColorizer::new(values, channel);
        Box::new(move |x| colorizer.colorize(x))
    }
}

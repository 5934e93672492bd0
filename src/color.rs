//! Colours and the piecewise-linear [`ColorRamp`] used to tint meter levels.
use std::{fmt, str::FromStr};

use ratatui::style::Color;

use crate::error::{MeterError, MeterResult};

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from integer channels, rejecting anything outside `0..=255`.
    pub fn from_channels(r: i64, g: i64, b: i64) -> MeterResult<Self> {
        let channel = |name: &str, value: i64| {
            u8::try_from(value).map_err(|_| {
                MeterError::invalid_config(format!(
                    "{name} channel {value} is outside 0..=255"
                ))
            })
        };
        Ok(Self::new(
            channel("red", r)?,
            channel("green", g)?,
            channel("blue", b)?,
        ))
    }

    /// Parse `#rrggbb` or the short `#rgb` form.
    pub fn from_hex(text: &str) -> MeterResult<Self> {
        let malformed = || MeterError::invalid_config(format!("malformed colour {text:?}"));
        let digits = text.trim().strip_prefix('#').ok_or_else(malformed)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map_err(|_| malformed());
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| malformed());
        match digits.len() {
            3 => Ok(Self::new(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            6 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?)),
            _ => Err(malformed()),
        }
    }

    /// Scale every channel by `factor`, used for dimmed (inactive) segments.
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |c: u8| (f64::from(c) * factor).round().clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Interpolate each channel independently, rounding half away from zero.
    pub fn lerp(self, other: Self, ratio: f64) -> Self {
        let mix = |a: u8, b: u8| {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * ratio).round().clamp(0.0, 255.0) as u8
        };
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

impl FromStr for Rgb {
    type Err = MeterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// A `(value, color)` breakpoint of a [`ColorRamp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSegment {
    pub value: f64,
    pub color: Rgb,
}

impl ColorSegment {
    pub const fn new(value: f64, color: Rgb) -> Self {
        Self { value, color }
    }
}

/// Piecewise-linear colour interpolation over ordered breakpoints.
///
/// Values below the first breakpoint or above the last one resolve to the
/// colour of that breakpoint. Two adjacent breakpoints sharing a value form an
/// instantaneous step: the first of the pair wins at that exact value and the
/// ramp continues from the second one above it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    segments: Vec<ColorSegment>,
}

impl ColorRamp {
    /// Validate breakpoints and build the ramp.
    ///
    /// At least two finite breakpoints in non-decreasing order are required.
    pub fn new(segments: Vec<ColorSegment>) -> MeterResult<Self> {
        if segments.len() < 2 {
            return Err(MeterError::invalid_config(format!(
                "colour ramp needs at least 2 segments, got {}",
                segments.len()
            )));
        }
        if let Some(bad) = segments.iter().find(|s| !s.value.is_finite()) {
            return Err(MeterError::invalid_config(format!(
                "colour segment value {} is not finite",
                bad.value
            )));
        }
        if let Some(pair) = segments.windows(2).find(|w| w[1].value < w[0].value) {
            return Err(MeterError::invalid_config(format!(
                "colour segments must ascend, {} follows {}",
                pair[1].value, pair[0].value
            )));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[ColorSegment] {
        &self.segments
    }

    /// Interpolated colour for `value`.
    pub fn resolve(&self, value: f64) -> Rgb {
        let first = self.segments[0];
        let last = self.segments[self.segments.len() - 1];
        if value <= first.value {
            return first.color;
        }
        if value >= last.value {
            return last.color;
        }
        for pair in self.segments.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if lo.value <= value && value <= hi.value {
                if hi.value == lo.value {
                    return lo.color;
                }
                let ratio = (value - lo.value) / (hi.value - lo.value);
                return lo.color.lerp(hi.color, ratio);
            }
        }
        // NaN compares false everywhere.
        first.color
    }

    /// Colour of the last breakpoint at or below `value` (step colouring).
    pub fn zone(&self, value: f64) -> Rgb {
        self.segments
            .iter()
            .take_while(|s| s.value <= value)
            .last()
            .unwrap_or(&self.segments[0])
            .color
    }
}

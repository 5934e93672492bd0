//! Mapping of domain values onto meter geometry.
use crate::error::{MeterError, MeterResult};

/// The `[min, max]` input range a meter accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    min: f64,
    max: f64,
}

impl Domain {
    pub fn new(min: f64, max: f64) -> MeterResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(MeterError::invalid_config(format!(
                "domain bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min >= max {
            return Err(MeterError::invalid_config(format!(
                "domain min must be below max, got [{min}, {max}]"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp `value` into the domain. NaN is treated as the lower bound.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

/// Direction in which a linear meter grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Grows upwards from the bottom edge.
    Vertical,
    /// Grows rightwards from the left edge.
    #[default]
    Horizontal,
}

/// Angular range covered by an arc-style meter, in degrees.
///
/// Angles run clockwise from the positive x axis on a y-down surface, so 90°
/// points straight down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSweep {
    pub start: f64,
    pub extent: f64,
}

impl ArcSweep {
    pub const fn new(start: f64, extent: f64) -> Self {
        Self { start, extent }
    }

    pub fn end(&self) -> f64 {
        self.start + self.extent
    }
}

/// An axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Converts values into fractions, angles and pixel offsets.
///
/// Fractions are normalised over `[domain.min, scale]` where `scale` is the
/// meter's `max_level`. When the scale equals `domain.max` this is the plain
/// domain normalisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeMapper {
    domain: Domain,
    scale: f64,
    orientation: Orientation,
    inverted: bool,
}

impl RangeMapper {
    pub fn new(domain: Domain, orientation: Orientation, inverted: bool) -> Self {
        Self {
            domain,
            scale: domain.max(),
            orientation,
            inverted,
        }
    }

    /// Normalise geometry against `max_level` instead of `domain.max`.
    pub fn with_scale(mut self, max_level: f64) -> MeterResult<Self> {
        if !max_level.is_finite() || max_level <= self.domain.min() {
            return Err(MeterError::invalid_config(format!(
                "max level {max_level} leaves no room above domain min {}",
                self.domain.min()
            )));
        }
        self.scale = max_level;
        Ok(self)
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn inverted(&self) -> bool {
        self.inverted
    }

    /// Position of `value` within the scale, in `[0, 1]`.
    pub fn fraction(&self, value: f64) -> f64 {
        let min = self.domain.min();
        let frac = (value - min) / (self.scale - min);
        if frac.is_nan() {
            return 0.0;
        }
        frac.clamp(0.0, 1.0)
    }

    /// Angle of `value` along `sweep`, in degrees.
    pub fn angle(&self, value: f64, sweep: ArcSweep) -> f64 {
        sweep.start + self.fraction(value) * sweep.extent
    }

    /// Length of the filled portion along an `extent` long track.
    pub fn offset(&self, value: f64, extent: f64) -> f64 {
        let filled = self.fraction(value) * extent;
        if self.inverted {
            extent - filled
        } else {
            filled
        }
    }

    /// Length of the track along the main axis.
    pub fn extent(&self, track: Bounds) -> f64 {
        match self.orientation {
            Orientation::Horizontal => track.width,
            Orientation::Vertical => track.height,
        }
    }

    /// Surface coordinate of `value` along the track's main axis.
    ///
    /// Horizontal tracks return an x coordinate measured from the left edge,
    /// vertical tracks a y coordinate measured up from the bottom edge.
    pub fn position(&self, value: f64, track: Bounds) -> f64 {
        let offset = self.offset(value, self.extent(track));
        match self.orientation {
            Orientation::Horizontal => track.x + offset,
            Orientation::Vertical => track.bottom() - offset,
        }
    }
}

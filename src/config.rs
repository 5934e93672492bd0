//! Validated, immutable meter configuration.
//!
//! A [`MeterConfig`] is produced once, either from the [`MeterConfigBuilder`]
//! or from deserialised [`MeterOptions`], and never changes afterwards. Every
//! option left unset falls back to the defaults of the meter's [`MeterKind`].
use std::time::Duration;

use serde::Deserialize;

use crate::{
    color::{ColorRamp, ColorSegment, Rgb},
    constants::{DEFAULT_BLOCK_LENGTH, DEFAULT_DECAY_FACTOR, DEFAULT_SEGMENTS, GAUGE_LABELS},
    error::{MeterError, MeterResult},
    peak::PeakHold,
    range::{Domain, Orientation, RangeMapper},
    smoothing::{Smoothing, SmoothingLaw},
};

/// The family of meter widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterKind {
    /// 270° arc filled up to the level, with the rounded value in the centre.
    Gauge,
    /// Coloured arc bands with a needle pointing at the level.
    PeakGauge,
    /// Linear VU bar.
    Bar,
    /// Ladder of discrete LED blocks.
    Blocks,
}

impl MeterKind {
    fn is_arc(self) -> bool {
        matches!(self, Self::Gauge | Self::PeakGauge)
    }

    fn default_frame_rate(self) -> f64 {
        match self {
            Self::Bar => 60.0,
            _ => 30.0,
        }
    }

    fn default_peak_hold(self) -> PeakHold {
        match self {
            Self::Bar => PeakHold::new(Duration::from_millis(2000), DEFAULT_DECAY_FACTOR)
                .unwrap_or_default(),
            Self::Blocks => PeakHold::new(Duration::from_millis(1000), DEFAULT_DECAY_FACTOR)
                .unwrap_or_default(),
            Self::Gauge | Self::PeakGauge => PeakHold::disabled(),
        }
    }

    fn default_orientation(self) -> Orientation {
        match self {
            Self::Blocks => Orientation::Vertical,
            _ => Orientation::Horizontal,
        }
    }
}

/// A scale annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub value: f64,
    pub label: String,
}

impl TextLabel {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Immutable, validated configuration of one meter.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterConfig {
    kind: MeterKind,
    mapper: RangeMapper,
    max_level: f64,
    ramp: ColorRamp,
    text_labels: Vec<TextLabel>,
    smoothing: Smoothing,
    frame_rate: f64,
    frame_interval: Duration,
    peak_hold: PeakHold,
    channels: usize,
    blocks: Option<usize>,
    block_length: f64,
}

impl MeterConfig {
    pub fn builder(kind: MeterKind) -> MeterConfigBuilder {
        MeterConfigBuilder::new(kind)
    }

    /// Resolve deserialised options on top of the defaults for `kind`.
    pub fn from_options(kind: MeterKind, options: &MeterOptions) -> MeterResult<Self> {
        options.apply(Self::builder(kind))?.build()
    }

    pub fn kind(&self) -> MeterKind {
        self.kind
    }

    pub fn domain(&self) -> Domain {
        self.mapper.domain()
    }

    pub fn max_level(&self) -> f64 {
        self.max_level
    }

    pub fn mapper(&self) -> &RangeMapper {
        &self.mapper
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn text_labels(&self) -> &[TextLabel] {
        &self.text_labels
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Minimum time between two ticks, `1 / frame_rate`.
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn peak_hold(&self) -> PeakHold {
        self.peak_hold
    }

    pub fn orientation(&self) -> Orientation {
        self.mapper.orientation()
    }

    pub fn inverted(&self) -> bool {
        self.mapper.inverted()
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Explicit block count, if configured.
    pub fn blocks(&self) -> Option<usize> {
        self.blocks
    }

    pub fn block_length(&self) -> f64 {
        self.block_length
    }
}

enum PeakSetting {
    KindDefault,
    Disabled,
    Enabled { duration: Duration, decay_factor: f64 },
}

/// Builder for [`MeterConfig`]. Nothing is validated until
/// [`MeterConfigBuilder::build`].
#[must_use = "a builder does nothing until `build` is called"]
pub struct MeterConfigBuilder {
    kind: MeterKind,
    domain: (f64, f64),
    max_level: Option<f64>,
    segments: Option<Vec<ColorSegment>>,
    labels: Option<Vec<TextLabel>>,
    smoothing: (SmoothingLaw, f64),
    frame_rate: Option<f64>,
    peak: PeakSetting,
    orientation: Option<Orientation>,
    inverted: bool,
    channels: usize,
    blocks: Option<usize>,
    block_length: f64,
}

impl MeterConfigBuilder {
    fn new(kind: MeterKind) -> Self {
        Self {
            kind,
            domain: (0.0, 100.0),
            max_level: None,
            segments: None,
            labels: None,
            smoothing: (SmoothingLaw::Linear, 0.5),
            frame_rate: None,
            peak: PeakSetting::KindDefault,
            orientation: None,
            inverted: false,
            channels: 1,
            blocks: None,
            block_length: DEFAULT_BLOCK_LENGTH,
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    /// Value drawn at the far end of the scale. Defaults to the domain max.
    pub fn max_level(mut self, max_level: f64) -> Self {
        self.max_level = Some(max_level);
        self
    }

    pub fn color_segments(mut self, segments: impl IntoIterator<Item = ColorSegment>) -> Self {
        self.segments = Some(segments.into_iter().collect());
        self
    }

    pub fn text_labels(mut self, labels: impl IntoIterator<Item = TextLabel>) -> Self {
        self.labels = Some(labels.into_iter().collect());
        self
    }

    pub fn smoothing(mut self, law: SmoothingLaw, rate: f64) -> Self {
        self.smoothing = (law, rate);
        self
    }

    pub fn frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = Some(frame_rate);
        self
    }

    pub fn peak_hold(mut self, duration: Duration, decay_factor: f64) -> Self {
        self.peak = PeakSetting::Enabled {
            duration,
            decay_factor,
        };
        self
    }

    pub fn without_peak_hold(mut self) -> Self {
        self.peak = PeakSetting::Disabled;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Number of side by side sub-meters (bar and block meters only).
    pub fn channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// Fixed number of blocks for a block meter.
    pub fn blocks(mut self, blocks: usize) -> Self {
        self.blocks = Some(blocks);
        self
    }

    /// Length of one block including its gap, used when no block count is set.
    pub fn block_length(mut self, block_length: f64) -> Self {
        self.block_length = block_length;
        self
    }

    pub fn build(self) -> MeterResult<MeterConfig> {
        let kind = self.kind;
        let domain = Domain::new(self.domain.0, self.domain.1)?;
        let max_level = self.max_level.unwrap_or(domain.max());
        let mapper = RangeMapper::new(
            domain,
            self.orientation.unwrap_or(kind.default_orientation()),
            self.inverted,
        )
        .with_scale(max_level)?;

        let along = |fraction: f64| domain.min() + fraction * (domain.max() - domain.min());
        let segments = self.segments.unwrap_or_else(|| {
            DEFAULT_SEGMENTS
                .iter()
                .map(|&(fraction, color)| ColorSegment::new(along(fraction), color))
                .collect()
        });
        if let Some(outside) = segments.iter().find(|s| !domain.contains(s.value)) {
            return Err(MeterError::invalid_config(format!(
                "colour segment at {} lies outside the domain [{}, {}]",
                outside.value,
                domain.min(),
                domain.max()
            )));
        }
        let ramp = ColorRamp::new(segments)?;

        let text_labels = self.labels.unwrap_or_else(|| {
            if kind.is_arc() {
                GAUGE_LABELS
                    .iter()
                    .map(|&(fraction, label)| TextLabel::new(along(fraction), label))
                    .collect()
            } else {
                Vec::new()
            }
        });
        if let Some(bad) = text_labels.iter().find(|l| !l.value.is_finite()) {
            return Err(MeterError::invalid_config(format!(
                "text label {:?} has a non-finite value",
                bad.label
            )));
        }

        let smoothing = Smoothing::with_law(self.smoothing.0, self.smoothing.1)?;

        let frame_rate = self.frame_rate.unwrap_or(kind.default_frame_rate());
        if !(frame_rate > 0.0 && frame_rate.is_finite()) {
            return Err(MeterError::invalid_config(format!(
                "frame rate must be positive, got {frame_rate}"
            )));
        }
        let frame_interval = Duration::try_from_secs_f64(1.0 / frame_rate).map_err(|_| {
            MeterError::invalid_config(format!("frame rate {frame_rate} is too low"))
        })?;

        let peak_hold = match self.peak {
            PeakSetting::KindDefault => kind.default_peak_hold(),
            PeakSetting::Disabled => PeakHold::disabled(),
            PeakSetting::Enabled {
                duration,
                decay_factor,
            } => PeakHold::new(duration, decay_factor)?,
        };

        if self.channels == 0 {
            return Err(MeterError::invalid_config("a meter needs at least one channel"));
        }
        if kind.is_arc() && self.channels != 1 {
            return Err(MeterError::invalid_config(format!(
                "{kind:?} meters draw a single channel, got {}",
                self.channels
            )));
        }
        if self.blocks == Some(0) {
            return Err(MeterError::invalid_config("block count must be at least 1"));
        }
        if !(self.block_length > 0.0 && self.block_length.is_finite()) {
            return Err(MeterError::invalid_config(format!(
                "block length must be positive, got {}",
                self.block_length
            )));
        }

        Ok(MeterConfig {
            kind,
            mapper,
            max_level,
            ramp,
            text_labels,
            smoothing,
            frame_rate,
            frame_interval,
            peak_hold,
            channels: self.channels,
            blocks: self.blocks,
            block_length: self.block_length,
        })
    }
}

/// A colour written either as `"#rrggbb"` / `"#rgb"` or as `[r, g, b]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Hex(String),
    Channels([i64; 3]),
}

impl ColorSpec {
    pub fn to_rgb(&self) -> MeterResult<Rgb> {
        match self {
            Self::Hex(text) => Rgb::from_hex(text),
            Self::Channels([r, g, b]) => Rgb::from_channels(*r, *g, *b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DomainOptions {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SegmentOptions {
    pub value: f64,
    pub color: ColorSpec,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelOptions {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SmoothingOptions {
    #[serde(default)]
    pub law: SmoothingLaw,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PeakHoldOptions {
    #[serde(default = "default_peak_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default = "default_decay_factor")]
    pub decay_factor: f64,
}

fn default_peak_enabled() -> bool {
    true
}

fn default_decay_factor() -> f64 {
    DEFAULT_DECAY_FACTOR
}

/// Serialisable meter options. Every field is optional.
///
/// ```toml
/// frame_rate = 60
/// domain = { min = -60.0, max = 6.0 }
/// smoothing = { law = "power", rate = 0.05 }
/// peak_hold = { duration_ms = 1500 }
///
/// [[color_segments]]
/// value = -60.0
/// color = "#00ff00"
///
/// [[color_segments]]
/// value = 6.0
/// color = [255, 0, 0]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeterOptions {
    pub domain: Option<DomainOptions>,
    pub max_level: Option<f64>,
    pub color_segments: Option<Vec<SegmentOptions>>,
    pub text_labels: Option<Vec<LabelOptions>>,
    pub smoothing: Option<SmoothingOptions>,
    pub frame_rate: Option<f64>,
    pub peak_hold: Option<PeakHoldOptions>,
    pub orientation: Option<Orientation>,
    pub inverted: Option<bool>,
    pub channels: Option<usize>,
    pub blocks: Option<usize>,
    pub block_length: Option<f64>,
}

impl MeterOptions {
    pub fn from_toml_str(text: &str) -> MeterResult<Self> {
        Ok(toml::from_str(text)?)
    }

    fn apply(&self, mut builder: MeterConfigBuilder) -> MeterResult<MeterConfigBuilder> {
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.min, domain.max);
        }
        if let Some(max_level) = self.max_level {
            builder = builder.max_level(max_level);
        }
        if let Some(segments) = &self.color_segments {
            let segments = segments
                .iter()
                .map(|s| Ok(ColorSegment::new(s.value, s.color.to_rgb()?)))
                .collect::<MeterResult<Vec<_>>>()?;
            builder = builder.color_segments(segments);
        }
        if let Some(labels) = &self.text_labels {
            builder = builder.text_labels(
                labels
                    .iter()
                    .map(|l| TextLabel::new(l.value, l.label.clone())),
            );
        }
        if let Some(smoothing) = &self.smoothing {
            builder = builder.smoothing(smoothing.law, smoothing.rate);
        }
        if let Some(frame_rate) = self.frame_rate {
            builder = builder.frame_rate(frame_rate);
        }
        if let Some(peak) = &self.peak_hold {
            builder = if peak.enabled {
                builder.peak_hold(Duration::from_millis(peak.duration_ms), peak.decay_factor)
            } else {
                builder.without_peak_hold()
            };
        }
        if let Some(orientation) = self.orientation {
            builder = builder.orientation(orientation);
        }
        if let Some(inverted) = self.inverted {
            builder = builder.inverted(inverted);
        }
        if let Some(channels) = self.channels {
            builder = builder.channels(channels);
        }
        if let Some(blocks) = self.blocks {
            builder = builder.blocks(blocks);
        }
        if let Some(block_length) = self.block_length {
            builder = builder.block_length(block_length);
        }
        Ok(builder)
    }
}

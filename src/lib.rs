//! Animated meter widgets for ratatui.
//!
//! Every meter runs the same pipeline on each admitted frame: the
//! [`ValueSmoother`] moves the displayed level toward the requested one, the
//! [`PeakTracker`] updates the peak hold, the [`RangeMapper`] turns levels into
//! geometry, the [`ColorRamp`] picks colours and the [`MeterRenderer`] paints
//! the result on a [`Surface`].
mod color;
mod config;
mod constants;
mod error;
mod meter;
mod peak;
mod range;
mod rendering;
mod scheduler;
mod smoothing;
mod state;
mod surface;

pub use color::{ColorRamp, ColorSegment, Rgb};
pub use config::{
    ColorSpec, DomainOptions, LabelOptions, MeterConfig, MeterConfigBuilder, MeterKind,
    MeterOptions, PeakHoldOptions, SegmentOptions, SmoothingOptions, TextLabel,
};
pub use constants::{GAUGE_SWEEP, PEAK_GAUGE_SWEEP};
pub use error::{MeterError, MeterResult};
pub use meter::AnimatedMeter;
pub use peak::{PeakHold, PeakTracker};
pub use range::{ArcSweep, Bounds, Domain, Orientation, RangeMapper};
pub use rendering::MeterRenderer;
pub use scheduler::{FrameClock, FrameScheduler};
pub use smoothing::{Smoothing, SmoothingLaw, ValueSmoother};
pub use state::{LevelHandle, MeterState};
pub use surface::{ArcPath, DrawCommand, Point, Scene, Stroke, Surface};

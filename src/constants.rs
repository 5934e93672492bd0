use lazy_static::lazy_static;

use crate::{color::Rgb, range::ArcSweep};

/// Arc gauge: starts bottom-left and sweeps three quarters of a turn.
pub const GAUGE_SWEEP: ArcSweep = ArcSweep::new(135.0, 270.0);
/// Peak gauge: a wider sweep with the needle pivot below centre.
pub const PEAK_GAUGE_SWEEP: ArcSweep = ArcSweep::new(144.0, 288.0);

pub const TRACK_COLOR: Rgb = Rgb::new(0x33, 0x33, 0x33);
pub const PEAK_COLOR: Rgb = Rgb::new(0xff, 0x99, 0x00);
pub const NEEDLE_COLOR: Rgb = Rgb::new(0xff, 0xff, 0xff);
pub const LABEL_COLOR: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// Brightness of blocks and regions that are not lit.
pub const INACTIVE_INTENSITY: f64 = 0.2;

pub const DEFAULT_DECAY_FACTOR: f64 = 0.95;
pub const DEFAULT_BLOCK_LENGTH: f64 = 11.0;

lazy_static! {
    /// Green to yellow to red, as `(fraction of the domain, colour)`.
    pub static ref DEFAULT_SEGMENTS: Vec<(f64, Rgb)> = vec![
        (0.0, Rgb::new(0x00, 0xff, 0x00)),
        (0.5, Rgb::new(0xff, 0xff, 0x00)),
        (1.0, Rgb::new(0xff, 0x00, 0x00)),
    ];
    /// Scale annotations of the arc gauges, as `(fraction of the domain, label)`.
    pub static ref GAUGE_LABELS: Vec<(f64, &'static str)> =
        vec![(0.0, "-20"), (0.5, "0"), (1.0, "+3")];
}

//! Peak hold: a marker remembering the recent maximum before decaying.
use std::time::Duration;

use crate::{
    error::{MeterError, MeterResult},
    range::Domain,
    state::MeterState,
};

/// Peak hold settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakHold {
    enabled: bool,
    duration: Duration,
    decay_factor: f64,
}

impl PeakHold {
    /// Hold each new peak for `duration`, then shrink it by `decay_factor`
    /// every tick.
    pub fn new(duration: Duration, decay_factor: f64) -> MeterResult<Self> {
        if !(decay_factor > 0.0 && decay_factor <= 1.0) {
            return Err(MeterError::invalid_config(format!(
                "peak decay factor must be in (0, 1], got {decay_factor}"
            )));
        }
        Ok(Self {
            enabled: true,
            duration,
            decay_factor,
        })
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            duration: Duration::ZERO,
            decay_factor: 1.0,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn decay_factor(&self) -> f64 {
        self.decay_factor
    }
}

impl Default for PeakHold {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Updates the peak fields of a [`MeterState`] once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakTracker {
    hold: PeakHold,
    floor: f64,
}

impl PeakTracker {
    pub fn new(hold: PeakHold, domain: Domain) -> Self {
        Self {
            hold,
            floor: domain.min(),
        }
    }

    pub fn hold(&self) -> PeakHold {
        self.hold
    }

    /// Advance the peak state machine at time `now`.
    ///
    /// Decay scales the distance between the marker and the domain floor, which
    /// is the plain `hold * decay_factor` for meters starting at zero.
    pub fn update(&self, state: &mut MeterState, now: Duration) {
        if !self.hold.enabled {
            state.peak_level = state.current_level;
            state.peak_hold_level = state.current_level;
            return;
        }

        if state.current_level > state.peak_level {
            state.peak_level = state.current_level;
            state.peak_hold_level = state.peak_level;
            state.last_peak_time = now;
        } else if now.saturating_sub(state.last_peak_time) > self.hold.duration {
            let decayed = self.floor + (state.peak_hold_level - self.floor) * self.hold.decay_factor;
            state.peak_hold_level = state.current_level.max(decayed);
            state.peak_level = state.peak_hold_level;
        }
    }
}

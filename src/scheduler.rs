//! Frame pacing for the meter animation.
//!
//! The host calls into a meter on every display frame (a terminal redraw, a
//! vsync callback, ...). [`FrameScheduler`] decides which of those frames run a
//! tick so that meters animate at their configured frame rate whatever the
//! host's native rate is.
use std::time::{Duration, Instant};

use tracing::warn;

/// Elapsed-time gate in front of the host's frame signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameScheduler {
    interval: Duration,
    running: bool,
}

impl FrameScheduler {
    /// A running scheduler admitting at most one tick per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: true,
        }
    }

    /// Minimum time between two ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop admitting frames. Frames delivered afterwards are ignored.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    /// Admit frames again after [`FrameScheduler::cancel`].
    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Decide whether the host frame at `now` runs a tick.
    ///
    /// A frame is admitted once at least one interval has passed since
    /// `last_tick`, which is then moved to `now`. Comparing absolute elapsed
    /// time means a late frame never leaves a backlog of ticks behind it.
    pub fn admit(&self, now: Duration, last_tick: &mut Duration) -> bool {
        if !self.running {
            return false;
        }
        if now < *last_tick {
            warn!(?now, ?last_tick, "frame timestamp went backwards");
            return false;
        }
        if now - *last_tick >= self.interval {
            *last_tick = now;
            return true;
        }
        false
    }
}

/// Monotonic frame timestamps for hosts driven by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time since the clock started.
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Timestamp of `instant` on this clock, zero if it predates the origin.
    pub fn at(&self, instant: Instant) -> Duration {
        instant.saturating_duration_since(self.origin)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}

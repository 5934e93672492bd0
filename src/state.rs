use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use crate::range::Domain;

/// A lock-free `f64` cell shared between a meter and its [`LevelHandle`]s.
#[derive(Clone)]
struct SharedLevel {
    storage: Arc<AtomicU64>,
}

impl SharedLevel {
    fn new(value: f64) -> Self {
        Self {
            storage: Arc::new(AtomicU64::new(value.to_bits())),
        }
    }

    fn store(&self, value: f64) {
        self.storage.store(value.to_bits(), Ordering::Relaxed);
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.storage.load(Ordering::Relaxed))
    }
}

/// State of one (sub-)meter.
///
/// The state is owned by a single meter and mutated by its frame ticks. The
/// only field written from outside a tick is the target level, which goes
/// through [`MeterState::set_target`] or a [`LevelHandle`].
///
/// The state consists of:
/// - `target_level`: the last requested level, already clamped to the domain
/// - [`current_level`](Self::current_level): the animated level
/// - [`peak_level`](Self::peak_level): the highest level since the last decay
/// - [`peak_hold_level`](Self::peak_hold_level): the displayed peak marker
/// - [`last_peak_time`](Self::last_peak_time): when the peak was last raised
/// - [`last_tick`](Self::last_tick): when the last frame was painted
pub struct MeterState {
    target: SharedLevel,
    domain: Domain,
    pub current_level: f64,
    pub peak_level: f64,
    pub peak_hold_level: f64,
    pub last_peak_time: Duration,
    pub last_tick: Duration,
}

impl MeterState {
    /// A resting state with every level at the bottom of `domain`.
    pub fn new(domain: Domain) -> Self {
        let rest = domain.min();
        Self {
            target: SharedLevel::new(rest),
            domain,
            current_level: rest,
            peak_level: rest,
            peak_hold_level: rest,
            last_peak_time: Duration::ZERO,
            last_tick: Duration::ZERO,
        }
    }

    pub fn target_level(&self) -> f64 {
        self.target.load()
    }

    /// Clamp `value` to the domain and store it as the new target.
    pub fn set_target(&self, value: f64) {
        self.target.store(self.domain.clamp(value));
    }

    /// A handle writing this state's target from anywhere.
    pub fn handle(&self) -> LevelHandle {
        LevelHandle {
            target: self.target.clone(),
            domain: self.domain,
        }
    }
}

impl fmt::Debug for MeterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeterState")
            .field("target_level", &self.target_level())
            .field("current_level", &self.current_level)
            .field("peak_level", &self.peak_level)
            .field("peak_hold_level", &self.peak_hold_level)
            .field("last_peak_time", &self.last_peak_time)
            .field("last_tick", &self.last_tick)
            .finish()
    }
}

/// Writes the target level of one meter channel.
///
/// Handles are cheap to clone and can be moved to other threads, e.g. an
/// audio callback. Like [`AnimatedMeter::set_level`](crate::AnimatedMeter::set_level)
/// the new value only shows up after the next painted frame.
#[derive(Clone)]
pub struct LevelHandle {
    target: SharedLevel,
    domain: Domain,
}

impl LevelHandle {
    pub fn set(&self, value: f64) {
        self.target.store(self.domain.clamp(value));
    }

    pub fn get(&self) -> f64 {
        self.target.load()
    }
}

impl fmt::Debug for LevelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelHandle")
            .field("target", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> MeterState {
        MeterState::new(Domain::new(0.0, 100.0).unwrap())
    }

    #[test]
    fn test_new_state_rests_at_domain_min() {
        let s = MeterState::new(Domain::new(-60.0, 0.0).unwrap());
        assert_eq!(s.target_level(), -60.0);
        assert_eq!(s.current_level, -60.0);
        assert_eq!(s.peak_hold_level, -60.0);
        assert_eq!(s.last_tick, Duration::ZERO);
    }

    #[test]
    fn test_set_target_clamps() {
        let s = state();
        for (input, expected) in [(-5.0, 0.0), (50.0, 50.0), (250.0, 100.0)] {
            s.set_target(input);
            assert_eq!(s.target_level(), expected);
        }
    }

    #[test]
    fn test_set_target_leaves_animated_fields() {
        let s = state();
        s.set_target(80.0);
        assert_eq!(s.current_level, 0.0);
        assert_eq!(s.peak_level, 0.0);
        assert_eq!(s.peak_hold_level, 0.0);
    }

    #[test]
    fn test_handle_writes_target_across_threads() {
        let s = state();
        let handle = s.handle();
        std::thread::spawn(move || handle.set(140.0))
            .join()
            .unwrap();
        assert_eq!(s.target_level(), 100.0);
    }
}

//! Per-tick smoothing of the displayed level toward its target.
use crate::{
    error::{MeterError, MeterResult},
    range::Domain,
};

/// Update rule advancing the displayed value each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingLaw {
    /// `current += (target - current) * rate`
    #[default]
    Linear,
    /// `current += sign(gap) * |gap|^rate`
    ///
    /// With a fractional rate the step exceeds the remaining gap once the gap
    /// drops below 1, so the level overshoots and can oscillate around the
    /// target. Only the clamp to the domain bounds it.
    Power,
}

/// Smoothing law and its rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothing {
    law: SmoothingLaw,
    rate: f64,
}

impl Smoothing {
    /// Exponential approach, `rate` in `(0, 1]`.
    pub fn linear(rate: f64) -> MeterResult<Self> {
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(MeterError::invalid_config(format!(
                "linear smoothing rate must be in (0, 1], got {rate}"
            )));
        }
        Ok(Self {
            law: SmoothingLaw::Linear,
            rate,
        })
    }

    /// Exponentiated gap step, `rate > 0`.
    pub fn power(rate: f64) -> MeterResult<Self> {
        if !(rate > 0.0 && rate.is_finite()) {
            return Err(MeterError::invalid_config(format!(
                "power smoothing rate must be positive, got {rate}"
            )));
        }
        Ok(Self {
            law: SmoothingLaw::Power,
            rate,
        })
    }

    pub fn with_law(law: SmoothingLaw, rate: f64) -> MeterResult<Self> {
        match law {
            SmoothingLaw::Linear => Self::linear(rate),
            SmoothingLaw::Power => Self::power(rate),
        }
    }

    pub fn law(&self) -> SmoothingLaw {
        self.law
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            law: SmoothingLaw::Linear,
            rate: 0.5,
        }
    }
}

/// Advances a current value toward a target once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueSmoother {
    smoothing: Smoothing,
    domain: Domain,
}

impl ValueSmoother {
    pub fn new(smoothing: Smoothing, domain: Domain) -> Self {
        Self { smoothing, domain }
    }

    /// The value after one tick, clamped to the domain.
    pub fn step(&self, current: f64, target: f64) -> f64 {
        let gap = target - current;
        let next = match self.smoothing.law {
            SmoothingLaw::Linear => current + gap * self.smoothing.rate,
            SmoothingLaw::Power => current + gap.signum() * gap.abs().powf(self.smoothing.rate),
        };
        // signum(0.0) is 1.0 and 0^rate is 0, so an exact hit stays put.
        self.domain.clamp(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn smoother(smoothing: Smoothing) -> ValueSmoother {
        ValueSmoother::new(smoothing, Domain::new(0.0, 100.0).unwrap())
    }

    #[test]
    fn test_linear_halving_scenario() {
        let s = smoother(Smoothing::linear(0.5).unwrap());
        let mut current = 0.0;
        current = s.step(current, 100.0);
        assert!((current - 50.0).abs() < EPSILON);
        current = s.step(current, 100.0);
        assert!((current - 75.0).abs() < EPSILON);
        for _ in 2..10 {
            current = s.step(current, 100.0);
        }
        assert!(current > 99.8, "current: {}", current);
        assert!(current < 100.0);
    }

    #[test]
    fn test_linear_never_overshoots() {
        let s = smoother(Smoothing::linear(0.3).unwrap());
        let target: f64 = 37.0;
        let mut current = 90.0;
        let mut gap = (current - target).abs();
        for _ in 0..60 {
            current = s.step(current, target);
            let next_gap = (current - target).abs();
            assert!(current >= target, "overshot to {}", current);
            assert!(next_gap <= gap);
            gap = next_gap;
        }
    }

    #[test]
    fn test_linear_unit_rate_snaps() {
        let s = smoother(Smoothing::linear(1.0).unwrap());
        assert_eq!(s.step(12.0, 80.0), 80.0);
    }

    #[test]
    fn test_rate_validation() {
        assert!(Smoothing::linear(0.0).is_err());
        assert!(Smoothing::linear(1.5).is_err());
        assert!(Smoothing::linear(f64::NAN).is_err());
        assert!(Smoothing::power(0.0).is_err());
        assert!(Smoothing::power(2.0).is_ok());
    }

    #[test]
    fn test_power_law_formula() {
        let s = smoother(Smoothing::power(0.5).unwrap());
        assert!((s.step(0.0, 64.0) - 8.0).abs() < EPSILON);
        assert!((s.step(64.0, 0.0) - 56.0).abs() < EPSILON);
    }

    // Fractional gaps raised to a fractional rate step past the target. The
    // clamp keeps the value in the domain but the oscillation is inherited.
    #[test]
    fn test_power_law_overshoots_small_gaps() {
        let s = smoother(Smoothing::power(0.05).unwrap());
        let next = s.step(49.5, 50.0);
        assert!(next > 50.0, "expected overshoot, got {}", next);
        let back = s.step(next, 50.0);
        assert!(back < 50.0, "expected oscillation, got {}", back);
    }

    #[test]
    fn test_power_law_clamps_to_domain() {
        let s = smoother(Smoothing::power(0.05).unwrap());
        assert_eq!(s.step(99.5, 100.0), 100.0);
        assert_eq!(s.step(0.5, 0.0), 0.0);
    }

    #[test]
    fn test_power_law_stays_at_target() {
        let s = smoother(Smoothing::power(0.05).unwrap());
        assert_eq!(s.step(42.0, 42.0), 42.0);
    }
}

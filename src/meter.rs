//! The [`AnimatedMeter`] widget drives the meter pipeline frame by frame.
use std::time::Duration;

use ratatui::prelude::{Buffer, Rect, Widget};
use tracing::{debug, trace};

use crate::{
    config::MeterConfig,
    error::{MeterError, MeterResult},
    peak::PeakTracker,
    rendering::MeterRenderer,
    scheduler::FrameScheduler,
    smoothing::ValueSmoother,
    state::{LevelHandle, MeterState},
    surface::{Scene, Surface},
};

/// An animated meter bound to a render surface.
///
/// Levels pushed with [`AnimatedMeter::set_level`] or [`AnimatedMeter::update`]
/// only become visible once the host delivers a frame through
/// [`AnimatedMeter::on_frame`]. Each admitted frame smooths the level, updates
/// the peak hold and repaints the surface.
///
/// ```
/// use std::time::Duration;
/// use rataudio_gauges::{AnimatedMeter, MeterConfig, MeterKind, Scene};
///
/// let config = MeterConfig::builder(MeterKind::Gauge).build().unwrap();
/// let mut meter = AnimatedMeter::new(Scene::new(200.0, 200.0), config).unwrap();
/// meter.set_level(100.0);
/// assert!(meter.on_frame(Duration::from_millis(40)));
/// assert_eq!(meter.state(0).unwrap().current_level, 50.0);
/// ```
#[derive(Debug)]
pub struct AnimatedMeter<S = Scene> {
    config: MeterConfig,
    smoother: ValueSmoother,
    tracker: PeakTracker,
    scheduler: FrameScheduler,
    states: Vec<MeterState>,
    surface: S,
}

impl<S: Surface> AnimatedMeter<S> {
    /// Bind a meter to `surface`.
    ///
    /// Fails with [`MeterError::ConstructionFailure`] when the surface has no
    /// drawable area.
    pub fn new(surface: S, config: MeterConfig) -> MeterResult<Self> {
        let (width, height) = surface.size();
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(MeterError::construction(format!(
                "surface of {width}x{height} has no drawable area"
            )));
        }

        let domain = config.domain();
        let meter = Self {
            smoother: ValueSmoother::new(config.smoothing(), domain),
            tracker: PeakTracker::new(config.peak_hold(), domain),
            scheduler: FrameScheduler::new(config.frame_interval()),
            states: (0..config.channels()).map(|_| MeterState::new(domain)).collect(),
            surface,
            config,
        };
        debug!(
            kind = ?meter.config.kind(),
            channels = meter.config.channels(),
            frame_rate = meter.config.frame_rate(),
            interval = ?meter.scheduler.interval(),
            "meter constructed"
        );
        Ok(meter)
    }

    /// Request a new level for the first channel.
    ///
    /// The value is clamped to the domain. Nothing is painted until the next
    /// admitted frame.
    pub fn set_level(&self, value: f64) {
        self.states[0].set_target(value);
    }

    /// Alias of [`AnimatedMeter::set_level`].
    pub fn set_value(&self, value: f64) {
        self.set_level(value);
    }

    /// Request one level per channel.
    ///
    /// Surplus values are ignored and channels without a value keep their
    /// current target.
    pub fn update(&self, levels: &[f64]) {
        if levels.len() != self.states.len() {
            debug!(
                given = levels.len(),
                channels = self.states.len(),
                "level count does not match channel count"
            );
        }
        for (state, &level) in self.states.iter().zip(levels) {
            state.set_target(level);
        }
    }

    /// A handle writing the target of `channel` from another thread.
    pub fn level_handle(&self, channel: usize) -> Option<LevelHandle> {
        self.states.get(channel).map(MeterState::handle)
    }

    /// Host frame signal at time `now`.
    ///
    /// Returns `true` when the frame was admitted and the surface repainted.
    /// Cancelled meters ignore every frame.
    pub fn on_frame(&mut self, now: Duration) -> bool {
        let Some(first) = self.states.first_mut() else {
            return false;
        };
        if !self.scheduler.admit(now, &mut first.last_tick) {
            return false;
        }
        self.tick(now);
        MeterRenderer::new(&self.config).paint(&self.states, &mut self.surface);
        true
    }

    fn tick(&mut self, now: Duration) {
        for state in &mut self.states {
            state.last_tick = now;
            state.current_level = self
                .smoother
                .step(state.current_level, state.target_level());
            self.tracker.update(state, now);
        }
        trace!(
            ?now,
            level = self.states[0].current_level,
            peak = self.states[0].peak_hold_level,
            "meter tick"
        );
    }

    /// Stop reacting to host frames, e.g. when the widget is torn down.
    pub fn cancel(&mut self) {
        if self.scheduler.is_running() {
            debug!("meter animation cancelled");
        }
        self.scheduler.cancel();
    }

    /// Start reacting to host frames again after [`AnimatedMeter::cancel`].
    pub fn resume(&mut self) {
        if !self.scheduler.is_running() {
            debug!("meter animation resumed");
        }
        self.scheduler.resume();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn state(&self, channel: usize) -> Option<&MeterState> {
        self.states.get(channel)
    }

    pub fn states(&self) -> &[MeterState] {
        &self.states
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Tear the meter down and hand back its surface.
    pub fn into_surface(mut self) -> S {
        self.cancel();
        self.surface
    }
}

impl Widget for &AnimatedMeter<Scene> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self.surface, area, buf);
    }
}

use tracing::trace;

use crate::{
    config::{MeterConfig, MeterKind},
    constants::{
        GAUGE_SWEEP, INACTIVE_INTENSITY, LABEL_COLOR, NEEDLE_COLOR, PEAK_COLOR, PEAK_GAUGE_SWEEP,
        TRACK_COLOR,
    },
    range::{Bounds, Orientation},
    state::MeterState,
    surface::{ArcPath, Point, Stroke, Surface},
};

/// Share of the cross axis reserved for scale labels on linear meters.
const LABEL_BAND: f64 = 0.3;
/// Share of the main axis left empty at both ends of a linear track.
const TRACK_PADDING: f64 = 0.04;
/// Share of each lane left empty on both sides, separating channels.
const LANE_GAP: f64 = 0.1;

/// Paints one frame of a meter.
///
/// The renderer is stateless: everything it draws comes from the config and
/// the per-channel [`MeterState`]s handed to [`MeterRenderer::paint`].
#[derive(Debug, Clone, Copy)]
pub struct MeterRenderer<'a> {
    config: &'a MeterConfig,
}

impl<'a> MeterRenderer<'a> {
    pub fn new(config: &'a MeterConfig) -> Self {
        Self { config }
    }

    pub fn paint<S: Surface + ?Sized>(&self, states: &[MeterState], surface: &mut S) {
        surface.clear();
        let Some(first) = states.first() else {
            return;
        };
        let (width, height) = surface.size();
        match self.config.kind() {
            MeterKind::Gauge => self.paint_gauge(first, width, height, surface),
            MeterKind::PeakGauge => self.paint_peak_gauge(first, width, height, surface),
            MeterKind::Bar | MeterKind::Blocks => {
                let (lanes, label_line) = self.lanes(states.len(), width, height);
                for (state, lane) in states.iter().zip(&lanes) {
                    if self.config.kind() == MeterKind::Bar {
                        self.paint_bar(state, *lane, surface);
                    } else {
                        self.paint_blocks(state, *lane, surface);
                    }
                }
                if let Some(track) = lanes.first() {
                    self.paint_linear_labels(*track, label_line, surface);
                }
            }
        }
    }

    /// Number of blocks along a track of `extent` pixels.
    pub fn block_count(&self, extent: f64) -> usize {
        self.config
            .blocks()
            .unwrap_or_else(|| (extent / self.config.block_length()).floor().max(1.0) as usize)
    }

    /// Number of lit blocks out of `count` for `fraction` of the scale.
    pub fn active_blocks(fraction: f64, count: usize) -> usize {
        ((fraction * count as f64).floor() as usize).min(count)
    }

    fn paint_gauge<S: Surface + ?Sized>(&self, state: &MeterState, w: f64, h: f64, surface: &mut S) {
        let mapper = self.config.mapper();
        let center = Point::new(w / 2.0, h / 2.0);
        let radius = w.min(h) * 0.4;
        let band = radius * 0.2;

        let track = ArcPath {
            center,
            radius,
            start: GAUGE_SWEEP.start,
            end: GAUGE_SWEEP.end(),
        };
        surface.stroke_arc(track, Stroke::new(band, TRACK_COLOR));

        let level = ArcPath {
            end: mapper.angle(state.current_level, GAUGE_SWEEP),
            ..track
        };
        let color = self.config.ramp().resolve(state.current_level);
        surface.stroke_arc(level, Stroke::new(band, color));

        if self.config.peak_hold().enabled() {
            let angle = mapper.angle(state.peak_hold_level, GAUGE_SWEEP);
            surface.stroke_line(
                center.polar(radius - band / 2.0, angle),
                center.polar(radius + band / 2.0, angle),
                Stroke::new(2.0, PEAK_COLOR),
            );
        }

        for label in self.config.text_labels() {
            let angle = mapper.angle(label.value, GAUGE_SWEEP);
            surface.fill_text(&label.label, center.polar(radius * 1.3, angle), LABEL_COLOR);
        }

        let readout = format!("{}", state.current_level.round() as i64);
        surface.fill_text(&readout, center, LABEL_COLOR);
    }

    fn paint_peak_gauge<S: Surface + ?Sized>(
        &self,
        state: &MeterState,
        w: f64,
        h: f64,
        surface: &mut S,
    ) {
        let mapper = self.config.mapper();
        let center = Point::new(w / 2.0, h * 0.7);
        let radius = w.min(h) * 0.4;
        let band = radius * 0.2;

        // each breakpoint colours the band up to the next one, the last up to the domain max
        let segments = self.config.ramp().segments();
        for (i, segment) in segments.iter().enumerate() {
            let until = segments
                .get(i + 1)
                .map_or(self.config.domain().max(), |next| next.value);
            let arc = ArcPath {
                center,
                radius,
                start: mapper.angle(segment.value, PEAK_GAUGE_SWEEP),
                end: mapper.angle(until, PEAK_GAUGE_SWEEP),
            };
            if arc.end > arc.start {
                surface.stroke_arc(arc, Stroke::new(band, segment.color));
            }
        }

        if self.config.peak_hold().enabled() {
            let angle = mapper.angle(state.peak_hold_level, PEAK_GAUGE_SWEEP);
            surface.stroke_line(
                center.polar(radius * 0.8, angle),
                center.polar(radius * 1.1, angle),
                Stroke::new(2.0, PEAK_COLOR),
            );
        }

        let needle = mapper.angle(state.current_level, PEAK_GAUGE_SWEEP);
        surface.stroke_line(
            center,
            center.polar(radius * 0.8, needle),
            Stroke::new(2.0, NEEDLE_COLOR),
        );

        for label in self.config.text_labels() {
            let angle = mapper.angle(label.value, PEAK_GAUGE_SWEEP);
            surface.fill_text(&label.label, center.polar(radius * 1.2, angle), LABEL_COLOR);
        }
    }

    /// One track per channel plus the cross-axis coordinate of the label row.
    fn lanes(&self, channels: usize, w: f64, h: f64) -> (Vec<Bounds>, f64) {
        let labelled = !self.config.text_labels().is_empty();
        let n = channels as f64;
        match self.config.orientation() {
            Orientation::Horizontal => {
                let pad = w * TRACK_PADDING;
                let band = if labelled { h * LABEL_BAND } else { 0.0 };
                let lane = (h - band) / n;
                let lanes = (0..channels)
                    .map(|i| {
                        let y = band + i as f64 * lane;
                        Bounds::new(pad, y + lane * LANE_GAP, w - 2.0 * pad, lane * (1.0 - 2.0 * LANE_GAP))
                    })
                    .collect();
                (lanes, band / 2.0)
            }
            Orientation::Vertical => {
                let pad = h * TRACK_PADDING;
                let band = if labelled { w * LABEL_BAND } else { 0.0 };
                let lane = (w - band) / n;
                let lanes = (0..channels)
                    .map(|i| {
                        let x = band + i as f64 * lane;
                        Bounds::new(x + lane * LANE_GAP, pad, lane * (1.0 - 2.0 * LANE_GAP), h - 2.0 * pad)
                    })
                    .collect();
                (lanes, band / 2.0)
            }
        }
    }

    /// The part of `track` between the scale origin and `value`.
    fn span(&self, track: Bounds, from: f64, to: f64) -> Bounds {
        let mapper = self.config.mapper();
        let a = mapper.position(from, track);
        let b = mapper.position(to, track);
        let (lo, hi) = (a.min(b), a.max(b));
        match self.config.orientation() {
            Orientation::Horizontal => Bounds::new(lo, track.y, hi - lo, track.height),
            Orientation::Vertical => Bounds::new(track.x, lo, track.width, hi - lo),
        }
    }

    fn paint_bar<S: Surface + ?Sized>(&self, state: &MeterState, track: Bounds, surface: &mut S) {
        let mapper = self.config.mapper();
        let origin = self.config.domain().min();
        surface.fill_rect(track, TRACK_COLOR);

        let filled = self.span(track, origin, state.current_level);
        let color = self.config.ramp().resolve(state.current_level);
        surface.fill_rect(filled, color);

        if self.config.peak_hold().enabled() {
            let extent = mapper.extent(track);
            // at least one pixel, but never wider than the track itself
            let thickness = (extent * 0.012).max(1.0).min(extent.max(0.0));
            let at = mapper.position(state.peak_hold_level, track) - thickness / 2.0;
            let marker = match self.config.orientation() {
                Orientation::Horizontal => {
                    let x = at.min(track.right() - thickness).max(track.x);
                    Bounds::new(x, track.y, thickness, track.height)
                }
                Orientation::Vertical => {
                    let y = at.min(track.bottom() - thickness).max(track.y);
                    Bounds::new(track.x, y, track.width, thickness)
                }
            };
            surface.fill_rect(marker, PEAK_COLOR);
        }
    }

    fn paint_blocks<S: Surface + ?Sized>(&self, state: &MeterState, track: Bounds, surface: &mut S) {
        let mapper = self.config.mapper();
        let ramp = self.config.ramp();
        let min = self.config.domain().min();
        let span = self.config.max_level() - min;
        let count = self.block_count(mapper.extent(track));
        let active = Self::active_blocks(mapper.fraction(state.current_level), count);
        let peak = if self.config.peak_hold().enabled() {
            Self::active_blocks(mapper.fraction(state.peak_hold_level), count).checked_sub(1)
        } else {
            None
        };
        trace!(count, active, ?peak, "painting block ladder");

        for j in 0..count {
            let lower = min + span * j as f64 / count as f64;
            let upper = min + span * (j + 1) as f64 / count as f64;
            let mut block = self.span(track, lower, upper);
            // one pixel gap between neighbours, shrunk for tiny blocks
            match self.config.orientation() {
                Orientation::Horizontal => {
                    let gap = (block.width * 0.2).min(1.0);
                    block.x += gap / 2.0;
                    block.width -= gap;
                }
                Orientation::Vertical => {
                    let gap = (block.height * 0.2).min(1.0);
                    block.y += gap / 2.0;
                    block.height -= gap;
                }
            }
            let color = ramp.zone(upper);
            let lit = j < active || peak == Some(j);
            let color = if lit {
                color
            } else {
                color.scaled(INACTIVE_INTENSITY)
            };
            surface.fill_rect(block, color);
        }
    }

    fn paint_linear_labels<S: Surface + ?Sized>(&self, track: Bounds, label_line: f64, surface: &mut S) {
        let mapper = self.config.mapper();
        for label in self.config.text_labels() {
            let along = mapper.position(label.value, track);
            let at = match self.config.orientation() {
                Orientation::Horizontal => Point::new(along, label_line),
                Orientation::Vertical => Point::new(label_line, along),
            };
            surface.fill_text(&label.label, at, LABEL_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        color::{ColorSegment, Rgb},
        config::TextLabel,
        range::Domain,
        surface::{DrawCommand, Scene},
    };

    const EPSILON: f64 = 1e-9;

    fn state(level: f64) -> MeterState {
        let mut state = MeterState::new(Domain::new(0.0, 100.0).unwrap());
        state.current_level = level;
        state.peak_hold_level = level;
        state
    }

    fn ladder() -> MeterConfig {
        MeterConfig::builder(MeterKind::Blocks)
            .blocks(10)
            .max_level(100.0)
            .without_peak_hold()
            .build()
            .unwrap()
    }

    fn is_dim(color: Rgb, ramp_color: Rgb) -> bool {
        color == ramp_color.scaled(INACTIVE_INTENSITY)
    }

    fn text_positions(scene: &Scene) -> Vec<(String, Point)> {
        scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, at, .. } => Some((text.clone(), *at)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_active_blocks() {
        assert_eq!(MeterRenderer::active_blocks(0.45, 10), 4);
        assert_eq!(MeterRenderer::active_blocks(0.0, 10), 0);
        assert_eq!(MeterRenderer::active_blocks(1.0, 10), 10);
    }

    #[test]
    fn test_block_ladder_lights_four_of_ten() {
        let config = ladder();
        let mut scene = Scene::new(40.0, 200.0);
        MeterRenderer::new(&config).paint(&[state(45.0)], &mut scene);

        let blocks: Vec<(Bounds, Rgb)> = scene.rects().collect();
        assert_eq!(blocks.len(), 10);
        let lit = blocks
            .iter()
            .enumerate()
            .filter(|(j, (_, color))| {
                let upper = (*j as f64 + 1.0) * 10.0;
                !is_dim(*color, config.ramp().zone(upper))
            })
            .count();
        assert_eq!(lit, 4);
        // block 0 sits at the bottom of a vertical ladder
        assert!(blocks[0].0.y > blocks[9].0.y);
    }

    #[test]
    fn test_block_count_from_length() {
        let config = MeterConfig::builder(MeterKind::Blocks)
            .block_length(10.0)
            .build()
            .unwrap();
        assert_eq!(MeterRenderer::new(&config).block_count(95.0), 9);
        assert_eq!(MeterRenderer::new(&config).block_count(3.0), 1);
    }

    #[test]
    fn test_block_peak_stays_lit() {
        let config = MeterConfig::builder(MeterKind::Blocks)
            .blocks(10)
            .peak_hold(Duration::from_secs(1), 0.95)
            .build()
            .unwrap();
        let mut s = state(20.0);
        s.peak_hold_level = 80.0;
        let mut scene = Scene::new(40.0, 200.0);
        MeterRenderer::new(&config).paint(&[s], &mut scene);
        let blocks: Vec<(Bounds, Rgb)> = scene.rects().collect();
        assert!(!is_dim(blocks[7].1, config.ramp().zone(80.0)));
        assert!(is_dim(blocks[6].1, config.ramp().zone(70.0)));
    }

    #[test]
    fn test_bar_fill_and_peak() {
        let config = MeterConfig::builder(MeterKind::Bar)
            .peak_hold(Duration::from_secs(1), 0.95)
            .build()
            .unwrap();
        let mut s = state(25.0);
        s.peak_hold_level = 60.0;
        let mut scene = Scene::new(200.0, 20.0);
        MeterRenderer::new(&config).paint(&[s], &mut scene);

        let rects: Vec<(Bounds, Rgb)> = scene.rects().collect();
        assert_eq!(rects.len(), 3);
        let (track, track_color) = rects[0];
        assert_eq!(track_color, TRACK_COLOR);
        let (fill, fill_color) = rects[1];
        assert_eq!(fill_color, config.ramp().resolve(25.0));
        assert!((fill.x - track.x).abs() < EPSILON);
        assert!((fill.width - track.width * 0.25).abs() < EPSILON);
        let (_, peak_color) = rects[2];
        assert_eq!(peak_color, PEAK_COLOR);
    }

    #[test]
    fn test_inverted_bar_fills_from_the_right() {
        let config = MeterConfig::builder(MeterKind::Bar)
            .inverted(true)
            .without_peak_hold()
            .build()
            .unwrap();
        let mut scene = Scene::new(200.0, 20.0);
        MeterRenderer::new(&config).paint(&[state(25.0)], &mut scene);
        let rects: Vec<(Bounds, Rgb)> = scene.rects().collect();
        let (track, _) = rects[0];
        let (fill, _) = rects[1];
        assert!((fill.right() - track.right()).abs() < EPSILON);
        assert!((fill.width - track.width * 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_vertical_bar_grows_upwards() {
        let config = MeterConfig::builder(MeterKind::Bar)
            .orientation(Orientation::Vertical)
            .without_peak_hold()
            .build()
            .unwrap();
        let mut scene = Scene::new(20.0, 200.0);
        MeterRenderer::new(&config).paint(&[state(50.0)], &mut scene);
        let rects: Vec<(Bounds, Rgb)> = scene.rects().collect();
        let (track, _) = rects[0];
        let (fill, _) = rects[1];
        assert!((fill.bottom() - track.bottom()).abs() < EPSILON);
        assert!((fill.height - track.height / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_gauge_frame() {
        let config = MeterConfig::builder(MeterKind::Gauge).build().unwrap();
        let mut scene = Scene::new(200.0, 200.0);
        MeterRenderer::new(&config).paint(&[state(50.0)], &mut scene);

        let arcs: Vec<&DrawCommand> = scene
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Arc { .. }))
            .collect();
        assert_eq!(arcs.len(), 2);
        match arcs[1] {
            DrawCommand::Arc { arc, stroke } => {
                assert!((arc.start - 135.0).abs() < EPSILON);
                assert!((arc.end - 270.0).abs() < EPSILON);
                assert_eq!(stroke.color, Rgb::new(0xff, 0xff, 0x00));
            }
            _ => unreachable!(),
        }
        let texts: Vec<&str> = scene.texts().collect();
        assert_eq!(texts, vec!["-20", "0", "+3", "50"]);
    }

    #[test]
    fn test_peak_gauge_segments_and_needle() {
        let config = MeterConfig::builder(MeterKind::PeakGauge)
            .color_segments([
                ColorSegment::new(0.0, Rgb::new(0, 255, 0)),
                ColorSegment::new(80.0, Rgb::new(255, 0, 0)),
            ])
            .text_labels([TextLabel::new(100.0, "max")])
            .build()
            .unwrap();
        let mut scene = Scene::new(400.0, 200.0);
        MeterRenderer::new(&config).paint(&[state(100.0)], &mut scene);

        let mut arcs = scene.commands().iter().filter_map(|c| match c {
            DrawCommand::Arc { arc, .. } => Some(*arc),
            _ => None,
        });
        let first = arcs.next().unwrap();
        let second = arcs.next().unwrap();
        assert!(arcs.next().is_none());
        assert!((first.start - 144.0).abs() < EPSILON);
        assert!((second.end - 432.0).abs() < EPSILON);

        let needle = scene
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Line { from, to, stroke } if stroke.color == NEEDLE_COLOR => {
                    Some((*from, *to))
                }
                _ => None,
            })
            .unwrap();
        assert!((needle.0.x - 200.0).abs() < EPSILON);
        assert!((needle.0.y - 140.0).abs() < EPSILON);
        // full scale points at the end of the sweep
        let expected = needle.0.polar(200.0 * 0.4 * 0.8, 432.0);
        assert!((needle.1.x - expected.x).abs() < EPSILON);
        assert!((needle.1.y - expected.y).abs() < EPSILON);
        assert_eq!(scene.texts().collect::<Vec<_>>(), vec!["max"]);
    }

    #[test]
    fn test_paint_clears_previous_frame() {
        let config = MeterConfig::builder(MeterKind::Bar).build().unwrap();
        let mut scene = Scene::new(200.0, 20.0);
        let renderer = MeterRenderer::new(&config);
        renderer.paint(&[state(10.0)], &mut scene);
        let first = scene.commands().len();
        renderer.paint(&[state(90.0)], &mut scene);
        assert_eq!(scene.commands().len(), first);
    }

    #[test]
    fn test_stereo_bar_lanes_do_not_overlap() {
        let config = MeterConfig::builder(MeterKind::Bar)
            .channels(2)
            .without_peak_hold()
            .build()
            .unwrap();
        let mut scene = Scene::new(200.0, 40.0);
        MeterRenderer::new(&config).paint(&[state(10.0), state(90.0)], &mut scene);
        let rects: Vec<(Bounds, Rgb)> = scene.rects().collect();
        assert_eq!(rects.len(), 4);
        assert!(rects[0].0.bottom() <= rects[2].0.y);
    }

    #[test]
    fn test_bar_peak_marker_on_sub_pixel_track() {
        let horizontal = MeterConfig::builder(MeterKind::Bar).build().unwrap();
        let vertical = MeterConfig::builder(MeterKind::Bar)
            .orientation(Orientation::Vertical)
            .build()
            .unwrap();
        for (config, mut scene) in [
            (horizontal, Scene::new(1.0, 20.0)),
            (vertical, Scene::new(20.0, 1.0)),
        ] {
            let mut s = state(40.0);
            s.peak_hold_level = 100.0;
            MeterRenderer::new(&config).paint(&[s], &mut scene);

            let rects: Vec<(Bounds, Rgb)> = scene.rects().collect();
            let (track, _) = rects[0];
            let (marker, color) = rects[2];
            assert_eq!(color, PEAK_COLOR);
            assert!(marker.x >= track.x - EPSILON && marker.right() <= track.right() + EPSILON);
            assert!(marker.y >= track.y - EPSILON && marker.bottom() <= track.bottom() + EPSILON);
        }
    }

    #[test]
    fn test_bar_labels_follow_the_scale() {
        for inverted in [false, true] {
            let config = MeterConfig::builder(MeterKind::Bar)
                .inverted(inverted)
                .without_peak_hold()
                .text_labels([TextLabel::new(25.0, "low"), TextLabel::new(75.0, "high")])
                .build()
                .unwrap();
            let mut scene = Scene::new(200.0, 40.0);
            MeterRenderer::new(&config).paint(&[state(0.0)], &mut scene);

            let (track, _) = scene.rects().next().unwrap();
            // the label row sits in the band above the track
            assert!(track.y >= 40.0 * LABEL_BAND);
            let labels = text_positions(&scene);
            assert_eq!(labels.len(), 2);
            for ((text, at), value) in labels.iter().zip([25.0, 75.0]) {
                let expected = config.mapper().position(value, track);
                assert!((at.x - expected).abs() < EPSILON, "{text} inverted={inverted}");
                assert!((at.y - 40.0 * LABEL_BAND / 2.0).abs() < EPSILON);
            }
            let low_x = labels[0].1.x;
            let high_x = labels[1].1.x;
            assert_eq!(low_x < high_x, !inverted);
        }
    }

    #[test]
    fn test_vertical_block_labels_sit_in_left_band() {
        let config = MeterConfig::builder(MeterKind::Blocks)
            .blocks(10)
            .without_peak_hold()
            .text_labels([TextLabel::new(50.0, "-6")])
            .build()
            .unwrap();
        let mut scene = Scene::new(100.0, 200.0);
        MeterRenderer::new(&config).paint(&[state(0.0)], &mut scene);

        let band = 100.0 * LABEL_BAND;
        let labels = text_positions(&scene);
        assert_eq!(labels.len(), 1);
        let at = labels[0].1;
        assert!((at.x - band / 2.0).abs() < EPSILON);
        // halfway up a track padded at both ends
        assert!((at.y - 100.0).abs() < EPSILON);
        assert!(scene.rects().all(|(block, _)| block.x >= band));
    }

    #[test]
    fn test_gauge_peak_marker() {
        let config = MeterConfig::builder(MeterKind::Gauge)
            .peak_hold(Duration::from_secs(1), 0.95)
            .build()
            .unwrap();
        let mut s = state(30.0);
        s.peak_hold_level = 70.0;
        let mut scene = Scene::new(200.0, 200.0);
        MeterRenderer::new(&config).paint(&[s], &mut scene);

        let (from, to) = scene
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Line { from, to, stroke } if stroke.color == PEAK_COLOR => {
                    Some((*from, *to))
                }
                _ => None,
            })
            .unwrap();
        let center = Point::new(100.0, 100.0);
        let angle = config.mapper().angle(70.0, GAUGE_SWEEP);
        let inner = center.polar(80.0 - 8.0, angle);
        let outer = center.polar(80.0 + 8.0, angle);
        assert!((from.x - inner.x).abs() < EPSILON && (from.y - inner.y).abs() < EPSILON);
        assert!((to.x - outer.x).abs() < EPSILON && (to.y - outer.y).abs() < EPSILON);
    }

    #[test]
    fn test_gauge_without_peak_hold_has_no_marker() {
        let config = MeterConfig::builder(MeterKind::Gauge).build().unwrap();
        let mut scene = Scene::new(200.0, 200.0);
        MeterRenderer::new(&config).paint(&[state(30.0)], &mut scene);
        assert!(!scene
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Line { .. })));
    }

    #[test]
    fn test_inverted_vertical_ladder_starts_at_the_top() {
        let config = MeterConfig::builder(MeterKind::Blocks)
            .blocks(10)
            .inverted(true)
            .without_peak_hold()
            .build()
            .unwrap();
        let mut scene = Scene::new(40.0, 200.0);
        MeterRenderer::new(&config).paint(&[state(30.0)], &mut scene);

        let blocks: Vec<(Bounds, Rgb)> = scene.rects().collect();
        let pad = 200.0 * TRACK_PADDING;
        assert!(blocks[0].0.y < blocks[9].0.y);
        assert!((blocks[0].0.y - pad).abs() <= 1.0);
        // the three lit blocks hang down from the top edge
        assert!(!is_dim(blocks[2].1, config.ramp().zone(30.0)));
        assert!(is_dim(blocks[3].1, config.ramp().zone(40.0)));
    }

    #[test]
    fn test_horizontal_ladder_starts_at_the_left() {
        let config = MeterConfig::builder(MeterKind::Blocks)
            .blocks(10)
            .orientation(Orientation::Horizontal)
            .without_peak_hold()
            .build()
            .unwrap();
        let mut scene = Scene::new(200.0, 40.0);
        MeterRenderer::new(&config).paint(&[state(30.0)], &mut scene);

        let blocks: Vec<(Bounds, Rgb)> = scene.rects().collect();
        let pad = 200.0 * TRACK_PADDING;
        assert!((blocks[0].0.x - pad).abs() <= 1.0);
        assert!(blocks.windows(2).all(|w| w[0].0.right() <= w[1].0.x));
    }
}

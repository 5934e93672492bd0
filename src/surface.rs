//! The 2D drawing surface meters paint on.
//!
//! Renderers only need a handful of immediate-mode primitives, captured by the
//! [`Surface`] trait. [`Scene`] records them as a display list which can be
//! inspected directly or rendered into a ratatui [`Buffer`] through a
//! [`Canvas`].
use ratatui::{
    prelude::{Buffer, Rect, Widget},
    style::Style,
    symbols::Marker,
    text::Line as TextLine,
    widgets::canvas::{Canvas, Context, Line as CanvasLine},
};

use crate::{color::Rgb, range::Bounds};

/// A point in surface pixels, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point `distance` away from `self` in direction `degrees`.
    pub fn polar(self, distance: f64, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x + distance * cos, self.y + distance * sin)
    }
}

/// Width and colour of a stroked path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Rgb,
}

impl Stroke {
    pub const fn new(width: f64, color: Rgb) -> Self {
        Self { width, color }
    }
}

/// A circular arc, angles in degrees running clockwise on the y-down surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub center: Point,
    pub radius: f64,
    pub start: f64,
    pub end: f64,
}

/// Immediate-mode drawing primitives used by the meter renderers.
pub trait Surface {
    /// Width and height in pixels, fixed for the lifetime of the surface.
    fn size(&self) -> (f64, f64);

    fn clear(&mut self);

    fn stroke_arc(&mut self, arc: ArcPath, stroke: Stroke);

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke);

    fn fill_rect(&mut self, bounds: Bounds, color: Rgb);

    /// Draw `text` centred on `at`.
    fn fill_text(&mut self, text: &str, at: Point, color: Rgb);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Arc { arc: ArcPath, stroke: Stroke },
    Line { from: Point, to: Point, stroke: Stroke },
    Rect { bounds: Bounds, color: Rgb },
    Text { text: String, at: Point, color: Rgb },
}

/// A display list holding the most recently painted frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: f64,
    height: f64,
    marker: Marker,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            marker: Marker::Braille,
            commands: Vec::new(),
        }
    }

    /// Set the canvas marker used when rendering into a terminal buffer.
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Filled rectangles of the current frame, in paint order.
    pub fn rects(&self) -> impl Iterator<Item = (Bounds, Rgb)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Rect { bounds, color } => Some((*bounds, *color)),
            _ => None,
        })
    }

    /// Text drawn in the current frame, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for Scene {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn stroke_arc(&mut self, arc: ArcPath, stroke: Stroke) {
        self.commands.push(DrawCommand::Arc { arc, stroke });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn fill_rect(&mut self, bounds: Bounds, color: Rgb) {
        self.commands.push(DrawCommand::Rect { bounds, color });
    }

    fn fill_text(&mut self, text: &str, at: Point, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            color,
        });
    }
}

/// Rasterises a [`Scene`] into canvas dots.
///
/// The canvas has y pointing up, so every y coordinate is flipped. Wide strokes
/// and filled rectangles are drawn as runs of one-dot lines.
struct Rasterizer {
    height: f64,
    dot_x: f64,
    dot_y: f64,
    cell_width: f64,
}

impl Rasterizer {
    fn dot(&self) -> f64 {
        self.dot_x.min(self.dot_y)
    }

    fn line(&self, ctx: &mut Context<'_>, from: Point, to: Point, color: Rgb) {
        ctx.draw(&CanvasLine {
            x1: from.x,
            y1: self.height - from.y,
            x2: to.x,
            y2: self.height - to.y,
            color: color.into(),
        });
    }

    fn command(&self, ctx: &mut Context<'_>, command: &DrawCommand) {
        match command {
            DrawCommand::Arc { arc, stroke } => self.arc(ctx, arc, stroke),
            DrawCommand::Line { from, to, stroke } => {
                let length = (to.x - from.x).hypot(to.y - from.y);
                if length == 0.0 {
                    return;
                }
                // unit normal of the segment
                let (nx, ny) = (-(to.y - from.y) / length, (to.x - from.x) / length);
                for offset in self.spread(stroke.width) {
                    let shift = |p: Point| Point::new(p.x + nx * offset, p.y + ny * offset);
                    self.line(ctx, shift(*from), shift(*to), stroke.color);
                }
            }
            DrawCommand::Rect { bounds, color } => {
                if bounds.width <= 0.0 || bounds.height <= 0.0 {
                    return;
                }
                let mut y = bounds.y;
                while y <= bounds.bottom() {
                    self.line(
                        ctx,
                        Point::new(bounds.x, y),
                        Point::new(bounds.right(), y),
                        *color,
                    );
                    y += self.dot_y;
                }
            }
            DrawCommand::Text { text, at, color } => {
                let half = text.chars().count() as f64 * self.cell_width / 2.0;
                ctx.print(
                    at.x - half,
                    self.height - at.y,
                    TextLine::styled(text.clone(), Style::new().fg((*color).into())),
                );
            }
        }
    }

    fn arc(&self, ctx: &mut Context<'_>, arc: &ArcPath, stroke: &Stroke) {
        for offset in self.spread(stroke.width) {
            let radius = arc.radius + offset;
            if radius <= 0.0 {
                continue;
            }
            let sweep = (arc.end - arc.start).to_radians() * radius;
            let steps = (sweep.abs() / self.dot()).ceil().max(1.0) as usize;
            let mut previous = arc.center.polar(radius, arc.start);
            for step in 1..=steps {
                let angle = arc.start + (arc.end - arc.start) * step as f64 / steps as f64;
                let next = arc.center.polar(radius, angle);
                self.line(ctx, previous, next, stroke.color);
                previous = next;
            }
        }
    }

    /// Offsets across a stroke of `width`, one dot apart and centred on zero.
    fn spread(&self, width: f64) -> Vec<f64> {
        let dot = self.dot();
        let count = (width / dot).floor().max(0.0) as usize + 1;
        let first = -(count as f64 - 1.0) * dot / 2.0;
        (0..count).map(|i| first + i as f64 * dot).collect()
    }
}

impl Widget for &Scene {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        // braille packs 2x4 dots per cell, the densest marker available
        let raster = Rasterizer {
            height: self.height,
            dot_x: self.width / (f64::from(area.width) * 2.0),
            dot_y: self.height / (f64::from(area.height) * 4.0),
            cell_width: self.width / f64::from(area.width),
        };
        Canvas::default()
            .marker(self.marker)
            .x_bounds([0.0, self.width])
            .y_bounds([0.0, self.height])
            .paint(|ctx| {
                for command in &self.commands {
                    raster.command(ctx, command);
                }
            })
            .render(area, buf);
    }
}

impl Widget for Scene {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

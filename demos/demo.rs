use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use tracing_subscriber::EnvFilter;

use rataudio_gauges::{
    AnimatedMeter, FrameClock, MeterConfig, MeterKind, Orientation, Scene, SmoothingLaw,
    TextLabel,
};

struct Meters {
    gauge: AnimatedMeter,
    peak: AnimatedMeter,
    bar: AnimatedMeter,
    blocks: AnimatedMeter,
}

impl Meters {
    fn all_mut(&mut self) -> [&mut AnimatedMeter; 4] {
        [&mut self.gauge, &mut self.peak, &mut self.bar, &mut self.blocks]
    }

    /// Freeze every meter on its current frame, or let them run again.
    fn toggle_pause(&mut self) {
        for meter in self.all_mut() {
            if meter.is_running() {
                meter.cancel();
            } else {
                meter.resume();
            }
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    // logs would corrupt the terminal, so they go to a file when RUST_LOG is set
    if std::env::var_os("RUST_LOG").is_some() {
        let file = std::fs::File::create("demo.log")?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }
    let meters = build_meters()?;
    let terminal = ratatui::init();
    let result = run(terminal, meters);
    ratatui::restore();
    result
}

fn build_meters() -> Result<Meters> {
    let gauge = MeterConfig::builder(MeterKind::Gauge).build()?;
    let peak = MeterConfig::builder(MeterKind::PeakGauge)
        .peak_hold(Duration::from_millis(1500), 0.9)
        .build()?;
    let bar = MeterConfig::builder(MeterKind::Bar)
        .channels(2)
        .smoothing(SmoothingLaw::Linear, 0.3)
        .text_labels([
            TextLabel::new(0.0, "-∞"),
            TextLabel::new(50.0, "-12"),
            TextLabel::new(100.0, "0"),
        ])
        .build()?;
    let blocks = MeterConfig::builder(MeterKind::Blocks)
        .channels(4)
        .orientation(Orientation::Vertical)
        .blocks(16)
        .build()?;

    Ok(Meters {
        gauge: AnimatedMeter::new(Scene::new(200.0, 200.0), gauge)?,
        peak: AnimatedMeter::new(Scene::new(400.0, 200.0), peak)?,
        bar: AnimatedMeter::new(Scene::new(250.0, 50.0), bar)?,
        blocks: AnimatedMeter::new(Scene::new(120.0, 200.0), blocks)?,
    })
}

fn run(mut terminal: DefaultTerminal, mut meters: Meters) -> Result<()> {
    const UPDATE_INTERVAL: Duration = Duration::from_millis(80);
    const FRAME_POLL: Duration = Duration::from_millis(16);
    let clock = FrameClock::start();
    let mut last_update = clock.now();
    let mut rng = rand::rng();
    let mut levels = [50.0_f64; 4];

    loop {
        let now = clock.now();
        if now - last_update >= UPDATE_INTERVAL {
            for level in levels.iter_mut() {
                *level = (*level + rng.random_range(-25.0..25.0)).clamp(0.0, 100.0);
            }
            meters.gauge.set_level(levels[0]);
            meters.peak.set_value(levels[1]);
            meters.bar.update(&levels[..2]);
            meters.blocks.update(&levels);
            last_update = now;
        }

        for meter in meters.all_mut() {
            meter.on_frame(now);
        }

        terminal.draw(|frame| draw(frame, &meters))?;
        match poll_command(FRAME_POLL)? {
            Some(Command::Quit) => break Ok(()),
            Some(Command::TogglePause) => meters.toggle_pause(),
            None => {}
        }
    }
}

fn draw(frame: &mut Frame, meters: &Meters) {
    let [title, top, bottom] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Percentage(50),
        Constraint::Fill(1),
    ])
    .areas(frame.area());

    let p = Paragraph::new("Rataudio Gauges Demo (space to pause, q to quit)")
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .alignment(Alignment::Center);
    frame.render_widget(p, title);

    let [gauge, peak] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Fill(1)]).areas(top);
    let [bar, blocks] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Fill(1)]).areas(bottom);

    render_meter(frame, &meters.gauge, gauge, "Gauge");
    render_meter(frame, &meters.peak, peak, "Peak gauge");
    render_meter(frame, &meters.bar, bar, "VU bar");
    render_meter(frame, &meters.blocks, blocks, "Blocks");
}

fn render_meter(frame: &mut Frame, meter: &AnimatedMeter, area: Rect, title: &str) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(meter, inner);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    TogglePause,
}

/// Wait up to `timeout` for a key press and map it to a demo command.
fn poll_command(timeout: Duration) -> Result<Option<Command>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let Event::Key(key) = event::read()? else {
        return Ok(None);
    };
    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }
    Ok(match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::TogglePause),
        _ => None,
    })
}

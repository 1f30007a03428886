use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use super::super::components::interpolate::Point;
use super::super::components::stroke::Stroke;
use super::DrawContext;
use super::PathState;
use super::Subpath;
use super::Surface;

/// Shared counter stamping strokes across several surfaces in a global order.
pub type Ticker = Arc<AtomicU64>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Stroke,
    ClosePath,
}

#[derive(Clone, Debug)]
pub struct StrokeRecord {
    pub subpaths: Vec<Subpath>,
    pub stroke: Stroke,
    pub tick: u64,
    pub at: Instant,
}

impl StrokeRecord {
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.subpaths
            .iter()
            .flat_map(|subpath| subpath.points.iter().copied())
    }
}

pub struct RecordingSurface {
    width: f64,
    height: f64,
    context: Option<RecordingContext>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_ticker(width, height, Ticker::default())
    }

    pub fn with_ticker(width: f64, height: f64, ticker: Ticker) -> Self {
        Self {
            width,
            height,
            context: Some(RecordingContext::new(ticker)),
        }
    }

    /// A surface whose context can never be obtained.
    pub fn detached(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            context: None,
        }
    }

    pub fn recording(&self) -> Option<&RecordingContext> {
        self.context.as_ref()
    }
}

impl Surface for RecordingSurface {
    type Context = RecordingContext;

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        if let Some(context) = self.context.as_mut() {
            context.clear();
        }
    }

    fn context(&mut self) -> Option<&mut Self::Context> {
        self.context.as_mut()
    }
}

pub struct RecordingContext {
    ticker: Ticker,
    stroke: Stroke,
    path: PathState,
    commands: Vec<Command>,
    strokes: Vec<StrokeRecord>,
}

impl RecordingContext {
    fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            stroke: Stroke::default(),
            path: PathState::default(),
            commands: Vec::new(),
            strokes: Vec::new(),
        }
    }

    fn clear(&mut self) {
        self.path.clear();
        self.commands.clear();
        self.strokes.clear();
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn strokes(&self) -> &[StrokeRecord] {
        &self.strokes
    }

    pub fn current_stroke(&self) -> &Stroke {
        &self.stroke
    }
}

impl DrawContext for RecordingContext {
    fn begin_path(&mut self) {
        self.path.clear();
        self.commands.push(Command::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.path.move_to(point);
        self.commands.push(Command::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.path.line_to(point);
        self.commands.push(Command::LineTo(point));
    }

    fn stroke(&mut self) {
        self.strokes.push(StrokeRecord {
            subpaths: self.path.subpaths().to_vec(),
            stroke: self.stroke.clone(),
            tick: self.ticker.fetch_add(1, Ordering::Relaxed),
            at: Instant::now(),
        });
        self.commands.push(Command::Stroke);
    }

    fn close_path(&mut self) {
        self.path.close();
        self.commands.push(Command::ClosePath);
    }

    fn line_width(&self) -> f64 {
        self.stroke.width
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.stroke.width = width;
        }
    }

    fn set_stroke_color(&mut self, color: palette::Srgba<f32>) {
        self.stroke.color = color;
    }
}

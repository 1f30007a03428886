use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use itertools::Itertools;

use super::canvas::recording::RecordingSurface;
use super::canvas::recording::Ticker;
use super::components::interpolate::Point;
use super::timelines::pacer::InstantPacer;
use super::timelines::pacer::TimerPacer;
use super::timelines::sequence::draw_spirals;
use super::timelines::sequence::SURFACE_COUNT;
use super::toplevel::app::App;
use super::toplevel::config::Config;

#[derive(Parser)]
#[command(name = "spiral", version, about = "Nested spiralling squares")]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: CliSubcommand,
}

#[derive(Subcommand)]
pub enum CliSubcommand {
    /// Open a window; the first click starts the animation.
    Run {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Draw the spirals without a window and print every stroked square.
    Trace {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "1280x720", value_parser = parse_viewport)]
        viewport: (u32, u32),
        /// Skip the delay between squares.
        #[arg(long)]
        instant: bool,
    },
}

fn parse_viewport(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|error| format!("{part:?}: {error}"))
    };
    Ok((parse(width)?, parse(height)?))
}

#[derive(Debug, serde::Serialize)]
struct TraceEntry {
    canvas: usize,
    iteration: usize,
    t: f64,
    points: Vec<Point>,
}

pub fn run(config: Option<&Path>) -> anyhow::Result<()> {
    App::run(Config::load(config)?)
}

pub fn trace(config: Option<&Path>, viewport: (u32, u32), instant: bool) -> anyhow::Result<()> {
    let config = Config::load(config)?;
    let ticker = Ticker::default();
    let mut surfaces: Vec<RecordingSurface> = (0..SURFACE_COUNT)
        .map(|_| RecordingSurface::with_ticker(0.0, 0.0, ticker.clone()))
        .collect();
    let viewport = (viewport.0 as f64, viewport.1 as f64);

    if instant {
        pollster::block_on(draw_spirals(
            &mut surfaces,
            &config,
            viewport,
            &InstantPacer::new(),
        ))?;
    } else {
        pollster::block_on(draw_spirals(&mut surfaces, &config, viewport, &TimerPacer))?;
    }

    let factors = config.spiral.factors();
    let entries = surfaces
        .iter()
        .enumerate()
        .flat_map(|(canvas, surface)| {
            surface
                .recording()
                .into_iter()
                .flat_map(|recording| recording.strokes().iter())
                .enumerate()
                .map(move |(index, stroke)| {
                    (
                        stroke.tick,
                        TraceEntry {
                            canvas,
                            iteration: index + 1,
                            t: factors[canvas],
                            points: stroke.points().collect(),
                        },
                    )
                })
        })
        .sorted_by_key(|(tick, _)| *tick);

    let mut stdout = std::io::stdout().lock();
    for (_, entry) in entries {
        writeln!(stdout, "{}", ron::ser::to_string(&entry)?)?;
    }
    Ok(())
}

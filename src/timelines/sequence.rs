use super::super::canvas::DrawContext;
use super::super::canvas::Surface;
use super::super::components::stroke::Stroke;
use super::super::toplevel::config::Config;
use super::super::toplevel::config::Layout;
use super::super::toplevel::config::SpiralSettings;
use super::super::toplevel::error::Error;
use super::pacer::Pacer;
use super::spiral::draw_squares;
use super::spiral::RunSummary;

pub const SURFACE_COUNT: usize = 4;

fn check_surface_count<S>(surfaces: &[S]) -> Result<(), Error> {
    if surfaces.len() < SURFACE_COUNT {
        Err(Error::MissingSurfaces {
            expected: SURFACE_COUNT,
            found: surfaces.len(),
        })?;
    }
    if surfaces.len() > SURFACE_COUNT {
        log::warn!(
            "{} drawing surfaces found, only the first {SURFACE_COUNT} are animated",
            surfaces.len()
        );
    }
    Ok(())
}

/// Sizes every surface to a square canvas and applies the stroke style.
pub fn setup_surfaces<S>(surfaces: &mut [S], layout: &Layout, stroke: &Stroke) -> Result<(), Error>
where
    S: Surface,
{
    let size = layout.canvas_size as f64;
    for surface in surfaces.iter_mut() {
        surface.set_size(size, size);
        let context = surface.context().ok_or(Error::SurfaceUnavailable)?;
        context.set_line_width(stroke.width);
        context.set_stroke_color(stroke.color);
    }
    Ok(())
}

/// Animates the first four surfaces one after another, with factors `1 - t, t, t, 1 - t`.
pub async fn draw_all_canvases<S, P>(
    surfaces: &mut [S],
    settings: &SpiralSettings,
    pacer: &P,
) -> Result<Vec<RunSummary>, Error>
where
    S: Surface,
    P: Pacer,
{
    check_surface_count(surfaces)?;
    settings.validate()?;

    let mut summaries = Vec::with_capacity(SURFACE_COUNT);
    for (index, (surface, t)) in surfaces.iter_mut().zip(settings.factors()).enumerate() {
        log::debug!("animating canvas {index} with t = {t}");
        let summary = draw_squares(surface, settings.square_number, settings.delay, t, pacer)
            .await
            .inspect_err(|error| log::error!("canvas {index} failed: {error}"))?;
        summaries.push(summary);
    }
    Ok(summaries)
}

/// Lays out the surfaces for a `viewport` and runs the whole animation on them.
pub async fn draw_spirals<S, P>(
    surfaces: &mut [S],
    config: &Config,
    viewport: (f64, f64),
    pacer: &P,
) -> Result<Vec<RunSummary>, Error>
where
    S: Surface,
    P: Pacer,
{
    check_surface_count(surfaces)?;
    config.validate()?;
    let (width, height) = viewport;
    let layout = Layout::from_viewport(width, height, &config.style);
    let stroke = config.style.stroke(&layout)?;
    setup_surfaces(surfaces, &layout, &stroke)?;

    log::info!(
        "drawing {SURFACE_COUNT} spirals on {size}x{size} canvases",
        size = layout.canvas_size
    );
    let summaries = draw_all_canvases(surfaces, &config.spiral, pacer).await?;
    log::info!("all spirals drawn");
    Ok(summaries)
}

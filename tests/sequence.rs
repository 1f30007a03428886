use std::time::Duration;
use std::time::Instant;

use spiral::canvas::recording::RecordingSurface;
use spiral::canvas::recording::Ticker;
use spiral::canvas::Surface;
use spiral::components::interpolate::Point;
use spiral::components::square::next_square;
use spiral::components::square::Square;
use spiral::timelines::pacer::TimerPacer;
use spiral::timelines::sequence::draw_spirals;
use spiral::toplevel::config::Config;
use spiral::toplevel::error::Error;

fn surfaces(count: usize) -> Vec<RecordingSurface> {
    let ticker = Ticker::default();
    (0..count)
        .map(|_| RecordingSurface::with_ticker(0.0, 0.0, ticker.clone()))
        .collect()
}

fn config(square_number: usize, delay: Duration) -> Config {
    let mut config = Config::default();
    config.spiral.square_number = square_number;
    config.spiral.delay = delay;
    config
}

#[test]
fn test_timed_sequence_runs_canvases_in_order() {
    let delay = Duration::from_millis(5);
    let config = config(3, delay);
    let mut surfaces = surfaces(4);

    let start = Instant::now();
    let summaries = pollster::block_on(draw_spirals(
        &mut surfaces,
        &config,
        (300.0, 300.0),
        &TimerPacer,
    ))
    .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(summaries.len(), 4);
    assert!(summaries.iter().all(|summary| summary.draws == 3));
    // Two pauses per canvas, none between canvases.
    assert!(elapsed >= delay * 8);

    let mut previous = None;
    for surface in &surfaces {
        assert_eq!(surface.size(), (136.0, 136.0));
        let strokes = surface.recording().unwrap().strokes();
        assert_eq!(strokes.len(), 3);
        for pair in strokes.windows(2) {
            assert!(pair[1].at.duration_since(pair[0].at) >= delay);
            assert_eq!(pair[1].tick, pair[0].tick + 1);
        }
        if let Some((tick, at)) = previous {
            assert!(strokes[0].tick > tick);
            assert!(strokes[0].at >= at);
        }
        let last = strokes.last().unwrap();
        previous = Some((last.tick, last.at));
    }
}

#[test]
fn test_first_canvas_spirals_with_mirrored_factor() {
    let config = config(2, Duration::ZERO);
    let mut surfaces = surfaces(4);
    pollster::block_on(draw_spirals(
        &mut surfaces,
        &config,
        (300.0, 300.0),
        &TimerPacer,
    ))
    .unwrap();

    let initial = Square::inset(136.0, 136.0, 0.5);
    let expected = [(0, next_square(&initial, 0.9)), (1, next_square(&initial, 0.1))];
    for (canvas, square) in expected {
        let strokes = surfaces[canvas].recording().unwrap().strokes();
        let points: Vec<Point> = strokes[1].points().collect();
        assert_eq!(points, square.trace().to_vec());
        assert_eq!(strokes[1].stroke.width, 1.0);
    }
}

#[test]
fn test_missing_surfaces_draw_nothing() {
    let config = config(3, Duration::ZERO);
    let mut surfaces = surfaces(2);
    let result = pollster::block_on(draw_spirals(
        &mut surfaces,
        &config,
        (300.0, 300.0),
        &TimerPacer,
    ));
    assert!(matches!(
        result,
        Err(Error::MissingSurfaces {
            expected: 4,
            found: 2
        })
    ));
    assert!(surfaces
        .iter()
        .all(|surface| surface.recording().unwrap().strokes().is_empty()));
}

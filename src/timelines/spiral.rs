use std::time::Duration;

use super::super::canvas::draw_square;
use super::super::canvas::DrawContext;
use super::super::canvas::Surface;
use super::super::components::square::Square;
use super::super::toplevel::error::Error;
use super::pacer::Pacer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running(usize),
    Complete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub draws: usize,
    pub final_square: Square,
}

/// One spiral animation. Owns the square being drawn and counts the draws.
#[derive(Clone, Debug)]
pub struct SpiralRun {
    square: Square,
    t: f64,
    square_number: usize,
    state: RunState,
}

impl SpiralRun {
    pub fn new(width: f64, height: f64, line_width: f64, t: f64, square_number: usize) -> Self {
        Self {
            square: Square::inset(width, height, line_width / 2.0),
            t,
            square_number,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Draws the current square. While draws remain, the square moves on to
    /// its successor and the run stays `Running`; the last draw completes it.
    pub fn step<C>(&mut self, context: &mut C) -> RunState
    where
        C: DrawContext,
    {
        let drawn = match self.state {
            RunState::Idle => 1,
            RunState::Running(count) => count + 1,
            RunState::Complete => return self.state,
        };
        draw_square(&self.square, context);
        self.state = if drawn < self.square_number {
            self.square = self.square.next(self.t);
            RunState::Running(drawn)
        } else {
            RunState::Complete
        };
        self.state
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            draws: match self.state {
                RunState::Idle => 0,
                RunState::Running(count) => count,
                RunState::Complete => self.square_number,
            },
            final_square: self.square,
        }
    }
}

/// Draws `square_number` nested squares on `surface`, one every `delay`.
///
/// The first square is drawn at once. The returned future resolves after the
/// last one has been stroked.
pub async fn draw_squares<S, P>(
    surface: &mut S,
    square_number: usize,
    delay: Duration,
    t: f64,
    pacer: &P,
) -> Result<RunSummary, Error>
where
    S: Surface,
    P: Pacer,
{
    if square_number == 0 {
        Err(Error::InvalidConfig("square number must be positive".into()))?;
    }
    let (width, height) = surface.size();
    let context = surface.context().ok_or(Error::SurfaceUnavailable)?;
    let mut run = SpiralRun::new(width, height, context.line_width(), t, square_number);
    log::debug!("spiral run started: {width}x{height}, t = {t}, {square_number} squares");

    while let RunState::Running(count) = run.step(context) {
        log::trace!("drew square {count} of {square_number}");
        pacer.pause(delay).await;
    }

    log::debug!("spiral run complete after {square_number} squares");
    Ok(run.summary())
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::atomic::Ordering;

    use super::super::super::canvas::recording::RecordingSurface;
    use super::super::super::canvas::recording::Ticker;
    use super::super::pacer::InstantPacer;
    use super::*;

    #[test]
    fn test_step_state_machine() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let context = surface.context().unwrap();
        let mut run = SpiralRun::new(100.0, 100.0, 2.0, 0.1, 3);

        assert_eq!(run.state(), RunState::Idle);
        assert_eq!(run.step(context), RunState::Running(1));
        assert_eq!(run.step(context), RunState::Running(2));
        assert_eq!(run.step(context), RunState::Complete);
        assert_eq!(run.step(context), RunState::Complete);
        assert_eq!(surface.recording().unwrap().strokes().len(), 3);
    }

    #[test]
    fn test_single_square_run_completes_immediately() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        let mut run = SpiralRun::new(10.0, 10.0, 1.0, 0.1, 1);
        assert_eq!(run.step(surface.context().unwrap()), RunState::Complete);
        assert_eq!(run.summary().final_square, Square::inset(10.0, 10.0, 0.5));
    }

    #[test]
    fn test_first_square_uses_line_width_inset() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.context().unwrap().set_line_width(2.0);
        let pacer = InstantPacer::new();
        pollster::block_on(draw_squares(
            &mut surface,
            2,
            Duration::ZERO,
            0.1,
            &pacer,
        ))
        .unwrap();

        let strokes = surface.recording().unwrap().strokes();
        let first: Vec<_> = strokes[0].points().take(4).collect();
        assert_eq!(first, Square::inset(100.0, 100.0, 1.0).0.to_vec());
        let second_start = strokes[1].points().next().unwrap();
        assert!((second_start.x - 10.8).abs() < 1e-9);
        assert!((second_start.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fifty_draws_and_forty_nine_pauses() {
        let mut surface = RecordingSurface::new(300.0, 300.0);
        let pacer = InstantPacer::new();
        let summary = pollster::block_on(draw_squares(
            &mut surface,
            50,
            Duration::from_millis(100),
            0.1,
            &pacer,
        ))
        .unwrap();

        assert_eq!(summary.draws, 50);
        assert_eq!(surface.recording().unwrap().strokes().len(), 50);
        assert_eq!(pacer.pauses().len(), 49);
        assert!(pacer
            .pauses()
            .iter()
            .all(|&pause| pause == Duration::from_millis(100)));
        assert!(summary.final_square.diagonal() < Square::inset(300.0, 300.0, 0.5).diagonal());
    }

    /// Notes how many strokes the shared ticker has seen at every pause.
    struct ProbePacer {
        ticker: Ticker,
        seen: parking_lot::Mutex<Vec<u64>>,
    }

    impl Pacer for ProbePacer {
        fn pause(&self, _delay: Duration) -> impl Future<Output = ()> {
            self.seen.lock().push(self.ticker.load(Ordering::SeqCst));
            std::future::ready(())
        }
    }

    #[test]
    fn test_resolves_only_after_last_draw() {
        let ticker = Ticker::default();
        let mut surface = RecordingSurface::with_ticker(64.0, 64.0, ticker.clone());
        let pacer = ProbePacer {
            ticker: ticker.clone(),
            seen: parking_lot::Mutex::new(Vec::new()),
        };

        let summary =
            pollster::block_on(draw_squares(&mut surface, 5, Duration::ZERO, 0.25, &pacer))
                .unwrap();

        assert_eq!(*pacer.seen.lock(), vec![1, 2, 3, 4]);
        assert_eq!(ticker.load(Ordering::SeqCst), 5);
        assert_eq!(summary.draws, 5);
    }

    #[test]
    fn test_unavailable_surface_draws_nothing() {
        let mut surface = RecordingSurface::detached(100.0, 100.0);
        let pacer = InstantPacer::new();
        let result = pollster::block_on(draw_squares(
            &mut surface,
            50,
            Duration::ZERO,
            0.1,
            &pacer,
        ));

        assert!(matches!(result, Err(Error::SurfaceUnavailable)));
        assert!(pacer.pauses().is_empty());
    }

    #[test]
    fn test_zero_squares_rejected() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let pacer = InstantPacer::new();
        let result = pollster::block_on(draw_squares(&mut surface, 0, Duration::ZERO, 0.1, &pacer));

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        assert!(surface.recording().unwrap().commands().is_empty());
    }
}

use std::future::Future;
use std::time::Duration;

/// Source of the waits between animation frames.
pub trait Pacer {
    fn pause(&self, delay: Duration) -> impl Future<Output = ()>;
}

/// Wall-clock pacing on the async-std timer, usable from any executor.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimerPacer;

impl Pacer for TimerPacer {
    fn pause(&self, delay: Duration) -> impl Future<Output = ()> {
        async_std::task::sleep(delay)
    }
}

/// Resolves every pause immediately and remembers what was asked for.
#[derive(Debug, Default)]
pub struct InstantPacer {
    pauses: parking_lot::Mutex<Vec<Duration>>,
}

impl InstantPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().clone()
    }
}

impl Pacer for InstantPacer {
    fn pause(&self, delay: Duration) -> impl Future<Output = ()> {
        self.pauses.lock().push(delay);
        std::future::ready(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_timer_pacer_waits() {
        let start = Instant::now();
        pollster::block_on(TimerPacer.pause(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_timer_pauses_share_one_clock() {
        let delay = Duration::from_millis(50);
        // Pending pauses cost nothing until polled.
        let pauses: Vec<_> = (0..49).map(|_| TimerPacer.pause(delay)).collect();
        std::thread::sleep(delay);

        let start = Instant::now();
        pollster::block_on(futures::future::join_all(pauses));
        let elapsed = start.elapsed();
        assert!(elapsed >= delay);
        assert!(elapsed < delay * 20);
    }

    #[test]
    fn test_dropped_pause_does_not_block() {
        drop(TimerPacer.pause(Duration::from_secs(60)));
        let start = Instant::now();
        pollster::block_on(TimerPacer.pause(Duration::from_millis(5)));
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[test]
    fn test_instant_pacer_records() {
        let pacer = InstantPacer::new();
        pollster::block_on(async {
            pacer.pause(Duration::from_millis(5)).await;
            pacer.pause(Duration::from_millis(7)).await;
        });
        assert_eq!(
            pacer.pauses(),
            vec![Duration::from_millis(5), Duration::from_millis(7)]
        );
    }
}

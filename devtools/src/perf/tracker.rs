//! Start/stop wall-clock timer and helpers that time a unit of work

use std::future::Future;
use std::time::{Duration, Instant};
use tracing::trace;

/// Start/stop timer over a pair of captured instants.
///
/// Never fails: reading a duration before both ends are captured, or after
/// `stop` ran before `start`, yields `Duration::ZERO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationTracker {
    start: Option<Instant>,
    end: Option<Instant>,
}

impl DurationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the start instant
    pub fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    /// Capture the end instant and return the elapsed duration
    pub fn stop(&mut self) -> Duration {
        self.end = Some(Instant::now());
        self.elapsed()
    }

    /// Duration between the last captured start and end, without capturing
    pub fn elapsed(&self) -> Duration {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }

    /// `elapsed` in fractional milliseconds, the unit render times are reported in
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    /// Clear both captured instants
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }
}

/// Run `f` to completion and pair its result with how long it took
pub fn time_sync<T, F>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let mut tracker = DurationTracker::new();
    tracker.start();
    let result = f();
    let duration = tracker.stop();
    trace!("Timed sync work in {:?}", duration);
    (result, duration)
}

/// Like `time_sync` for fallible work: an error is returned unchanged and no
/// duration is reported for it.
pub fn try_time_sync<T, E, F>(f: F) -> Result<(T, Duration), E>
where
    F: FnOnce() -> Result<T, E>,
{
    let (result, duration) = time_sync(f);
    result.map(|value| (value, duration))
}

/// Await the future produced by `f` and pair its output with how long it took.
///
/// Only suspends while awaiting the wrapped work; there is no timeout or
/// cancellation beyond dropping the returned future.
pub async fn time_async<T, F, Fut>(f: F) -> (T, Duration)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let mut tracker = DurationTracker::new();
    tracker.start();
    let result = f().await;
    let duration = tracker.stop();
    trace!("Timed async work in {:?}", duration);
    (result, duration)
}

/// Like `time_async` for fallible work: a failure propagates unchanged and
/// no duration is reported for it.
pub async fn try_time_async<T, E, F, Fut>(f: F) -> Result<(T, Duration), E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let (result, duration) = time_async(f).await;
    result.map(|value| (value, duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstarted_tracker_reports_zero() {
        let mut tracker = DurationTracker::new();
        assert_eq!(tracker.elapsed(), Duration::ZERO);

        // stop without start is defined, just meaningless
        assert_eq!(tracker.stop(), Duration::ZERO);
    }

    #[test]
    fn test_start_stop_measures_work() {
        let mut tracker = DurationTracker::new();
        tracker.start();
        std::thread::sleep(Duration::from_millis(5));
        let measured = tracker.stop();

        assert!(measured >= Duration::from_millis(5));
        assert_eq!(tracker.elapsed(), measured);
        assert!(tracker.elapsed_ms() >= 5.0);
    }

    #[test]
    fn test_elapsed_does_not_recapture() {
        let mut tracker = DurationTracker::new();
        tracker.start();
        let measured = tracker.stop();
        std::thread::sleep(Duration::from_millis(2));

        assert_eq!(tracker.elapsed(), measured);
    }

    #[test]
    fn test_restart_after_stop_reads_zero_until_stopped() {
        let mut tracker = DurationTracker::new();
        tracker.start();
        tracker.stop();
        std::thread::sleep(Duration::from_millis(1));
        tracker.start();

        // start is now after end
        assert_eq!(tracker.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_reset_clears_instants() {
        let mut tracker = DurationTracker::new();
        tracker.start();
        std::thread::sleep(Duration::from_millis(1));
        tracker.stop();
        tracker.reset();

        assert_eq!(tracker.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_time_sync_returns_result() {
        let (value, duration) = time_sync(|| {
            std::thread::sleep(Duration::from_millis(3));
            21 * 2
        });
        assert_eq!(value, 42);
        assert!(duration >= Duration::from_millis(3));
    }

    #[test]
    fn test_try_time_sync_propagates_error() {
        let ok: Result<(u8, Duration), String> = try_time_sync(|| Ok(7));
        assert_eq!(ok.unwrap().0, 7);

        let err: Result<(u8, Duration), String> = try_time_sync(|| Err("boom".to_string()));
        assert_eq!(err.unwrap_err(), "boom");
    }

    #[tokio::test]
    async fn test_time_async_returns_result() {
        let (value, duration) = time_async(|| async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            "done"
        })
        .await;

        assert_eq!(value, "done");
        assert!(duration >= Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_try_time_async_propagates_failure() {
        let result: Result<((), Duration), std::io::Error> = try_time_async(|| async {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert_eq!(err.to_string(), "missing");
    }
}

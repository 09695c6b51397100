//! Periodic callbacks for the auto-lock check.
//!
//! Expiry is enforced lazily on every session read, so the ticker is only
//! there to lock an idle wallet nobody is looking at. [`TokioTicker`] runs
//! callbacks on the async runtime; [`ManualTicker`] fires on demand for
//! tests.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Shortest period a [`TokioTicker`] will run at.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Callback run on every tick.
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Schedules a callback to run every `period`.
///
/// [`TokioTicker`] raises periods shorter than [`MIN_TICK_PERIOD`] to that
/// minimum.
pub trait Ticker {
    fn every(&mut self, period: Duration, callback: TickCallback);
}

// ---------------------------------------------------------------------------
// TokioTicker
// ---------------------------------------------------------------------------

/// Runs each callback in its own task. Tasks are aborted when the ticker
/// is dropped or [`stop`](TokioTicker::stop)ped.
pub struct TokioTicker {
    handle: Handle,
    tasks: Vec<JoinHandle<()>>,
}

impl TokioTicker {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            tasks: Vec::new(),
        }
    }

    /// Ticker bound to the runtime we're currently inside, if any.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Number of scheduled callbacks still running.
    pub fn active(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }

    pub fn stop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Ticker for TokioTicker {
    fn every(&mut self, period: Duration, mut callback: TickCallback) {
        // tokio's interval panics on a zero period.
        let period = period.max(MIN_TICK_PERIOD);
        let task = self.handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately; skip it.
            interval.tick().await;
            loop {
                interval.tick().await;
                callback();
            }
        });
        self.tasks.push(task);
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

// ---------------------------------------------------------------------------
// ManualTicker
// ---------------------------------------------------------------------------

/// Collects callbacks and runs them only when [`fire`](ManualTicker::fire)
/// is called.
#[derive(Default)]
pub struct ManualTicker {
    callbacks: Mutex<Vec<(Duration, TickCallback)>>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every registered callback once.
    pub fn fire(&self) {
        for (_, callback) in self.callbacks.lock().iter_mut() {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Periods the callbacks were registered with.
    pub fn periods(&self) -> Vec<Duration> {
        self.callbacks.lock().iter().map(|(p, _)| *p).collect()
    }
}

impl Ticker for ManualTicker {
    fn every(&mut self, period: Duration, callback: TickCallback) {
        self.callbacks.lock().push((period, callback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_manual_ticker_fires_on_demand() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut ticker = ManualTicker::new();
        let c = count.clone();
        ticker.every(
            Duration::from_secs(60),
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(count.load(Ordering::SeqCst), 0);
        ticker.fire();
        ticker.fire();
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(ticker.periods(), vec![Duration::from_secs(60)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_ticker_runs_every_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut ticker = TokioTicker::try_current().expect("inside a runtime");
        let c = count.clone();
        ticker.every(
            Duration::from_secs(60),
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        );

        // Let the task register its interval before moving time.
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_secs(61)).await;
        tokio::task::yield_now().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        tokio::task::yield_now().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(ticker.active(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_ticker_stops_firing() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut ticker = TokioTicker::try_current().unwrap();
        let c = count.clone();
        ticker.every(
            Duration::from_secs(1),
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        );
        ticker.stop();

        tokio::time::sleep(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(ticker.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_raised_to_minimum() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut ticker = TokioTicker::try_current().unwrap();
        let c = count.clone();
        ticker.every(
            Duration::ZERO,
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        tokio::task::yield_now().await;
        assert!(count.load(Ordering::SeqCst) >= 1);
        assert_eq!(ticker.active(), 1, "task must still be running");
    }

    #[test]
    fn test_no_runtime_means_no_tokio_ticker() {
        assert!(TokioTicker::try_current().is_none());
    }
}

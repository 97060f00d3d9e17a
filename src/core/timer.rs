use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// A tick delivered by a round timer. Carries the round it was armed for so
/// that a tick still queued when its round ended can be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub round: u32,
}

/// Ownership of a running round timer. Dropping the handle cancels the timer.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Arms the once-per-round countdown timer.
pub trait TickScheduler: Send {
    fn arm(&mut self, round: u32) -> TimerHandle;
}

/// Sends a [`TimerTick`] down a channel every `period` on the tokio runtime.
pub struct IntervalScheduler {
    period: Duration,
    ticks: UnboundedSender<TimerTick>,
}

impl IntervalScheduler {
    pub fn new(period: Duration, ticks: UnboundedSender<TimerTick>) -> Self {
        Self { period, ticks }
    }
}

impl TickScheduler for IntervalScheduler {
    fn arm(&mut self, round: u32) -> TimerHandle {
        let ticks = self.ticks.clone();
        let period = self.period;

        let task = tokio::spawn(async move {
            // First tick one full period after arming, not immediately.
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if ticks.send(TimerTick { round }).is_err() {
                    break;
                }
            }
        });

        debug!("Armed round timer for round {}", round);
        let abort = task.abort_handle();
        TimerHandle::new(move || {
            abort.abort();
            debug!("Cancelled round timer for round {}", round);
        })
    }
}

/// A scheduler that never ticks on its own; ticks are driven by hand. Keeps
/// count of live timers so callers can check that every armed timer was
/// released.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    live: Arc<AtomicUsize>,
    armed: Arc<AtomicUsize>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_timers(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn times_armed(&self) -> usize {
        self.armed.load(Ordering::SeqCst)
    }
}

impl TickScheduler for ManualScheduler {
    fn arm(&mut self, _round: u32) -> TimerHandle {
        self.live.fetch_add(1, Ordering::SeqCst);
        self.armed.fetch_add(1, Ordering::SeqCst);

        let live = Arc::clone(&self.live);
        TimerHandle::new(move || {
            live.fetch_sub(1, Ordering::SeqCst);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_handle_cancels_once() {
        let scheduler = ManualScheduler::new();
        let mut arming = scheduler.clone();

        let handle = arming.arm(1);
        assert_eq!(scheduler.live_timers(), 1);

        handle.cancel();
        assert_eq!(scheduler.live_timers(), 0);
    }

    #[test]
    fn test_drop_releases_timer() {
        let scheduler = ManualScheduler::new();
        let mut arming = scheduler.clone();

        {
            let _first = arming.arm(1);
            let _second = arming.arm(2);
            assert_eq!(scheduler.live_timers(), 2);
        }

        assert_eq!(scheduler.live_timers(), 0);
        assert_eq!(scheduler.times_armed(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_scheduler_ticks_and_stops() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = IntervalScheduler::new(Duration::from_secs(1), tx);

        let started = Instant::now();
        let handle = scheduler.arm(3);
        assert_eq!(format!("{:?}", handle), "TimerHandle { armed: true }");

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(TimerTick { round: 3 }));
        }
        assert_eq!(started.elapsed(), Duration::from_secs(3));

        handle.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;

        // Drop the scheduler's sender so recv ends once the channel drains.
        drop(scheduler);
        let mut late = 0;
        while rx.recv().await.is_some() {
            late += 1;
        }
        assert_eq!(late, 0);
    }
}

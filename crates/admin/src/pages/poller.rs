//! Fixed-interval background refresh.
//!
//! The poll task lives as long as its [`Poller`] handle; dropping the
//! handle aborts the task, so an unmounted page stops polling immediately.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Handle to a running poll task.
#[derive(Debug)]
pub struct Poller {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Spawn a task that runs `tick` every `period`, starting one period from now.
    ///
    /// Ticks never overlap: a slow tick delays the next one and missed ticks
    /// are skipped. Failures are the tick's business; the poller keeps going.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, tick: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::debug!(poller = name, period_secs = period.as_secs(), "Poller started");
            loop {
                timer.tick().await;
                tick().await;
            }
        });

        Self { name, handle }
    }

    /// Whether the task is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(poller = self.name, "Poller stopped");
    }
}

//! Inactivity timer - countdown to forced logout

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use super::format::format_countdown;

/// Countdown that decrements once per tick until it reaches zero
///
/// The countdown runs on its own task and publishes the remaining ticks on a
/// watch channel. Dropping the timer aborts the task, so replacing a timer
/// cancels any ticks the previous one still had pending.
#[derive(Debug)]
pub struct InactivityTimer {
    remaining: watch::Receiver<u32>,
    task: JoinHandle<()>,
}

impl InactivityTimer {
    /// Start a countdown of `ticks` steps, one step every `tick`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(ticks: u32, tick: Duration) -> Self {
        let (tx, rx) = watch::channel(ticks);
        let task = tokio::spawn(async move {
            let mut remaining = ticks;
            let mut interval = interval_at(Instant::now() + tick, tick);
            while remaining > 0 {
                interval.tick().await;
                remaining -= 1;
                if tx.send(remaining).is_err() {
                    break;
                }
            }
        });

        Self {
            remaining: rx,
            task,
        }
    }

    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining() == 0
    }

    /// `MM:SS` of the remaining time, assuming one-second ticks
    pub fn display(&self) -> String {
        format_countdown(self.remaining())
    }

    /// Watch the remaining ticks
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.clone()
    }

    /// Resolves once the countdown reaches zero. Never resolves if the timer
    /// is dropped first.
    pub fn expiry(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.remaining.clone();
        async move {
            let closed = rx.wait_for(|remaining| *remaining == 0).await.is_err();
            if closed {
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Drop for InactivityTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_once_per_tick() {
        let timer = InactivityTimer::start(120, TICK);
        assert_eq!(timer.remaining(), 120);
        assert_eq!(timer.display(), "02:00");

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(timer.remaining(), 119);
        assert_eq!(timer.display(), "01:59");

        tokio::time::sleep(Duration::from_secs(118)).await;
        assert_eq!(timer.remaining(), 1);
        assert!(!timer.is_expired());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(timer.is_expired());
        assert_eq!(timer.display(), "00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_future_resolves_at_zero() {
        let timer = InactivityTimer::start(3, TICK);
        let start = Instant::now();
        timer.expiry().await;
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert!(start.elapsed() < Duration::from_secs(4));
        assert!(timer.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_length_timer_is_expired_immediately() {
        let timer = InactivityTimer::start(0, TICK);
        assert!(timer.is_expired());
        timer.expiry().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_timer_stops_ticking() {
        let timer = InactivityTimer::start(5, TICK);
        let mut rx = timer.subscribe();
        drop(timer);

        tokio::time::sleep(Duration::from_secs(10)).await;
        // the task was aborted before its first tick
        assert_eq!(*rx.borrow_and_update(), 5);
        assert!(rx.has_changed().is_err());
    }
}

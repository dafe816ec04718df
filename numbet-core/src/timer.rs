//! Cancellable timers for countdowns and auto-close behaviour.
//!
//! A [`ScopedTimer`] owns a spawned tokio task. Cancelling the timer or
//! dropping its handle stops the task, and a stopped timer never runs its
//! completion callback.

use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    Completed,
    Cancelled,
}

pub struct ScopedTimer {
    cancel_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<TimerOutcome>>,
}

impl ScopedTimer {
    /// Run `on_complete` once `delay` has elapsed.
    pub fn after<F>(delay: Duration, on_complete: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::countdown(delay, delay, |_| {}, on_complete)
    }

    /// Tick every `tick` until `total` has elapsed, then run `on_complete`.
    ///
    /// `on_tick` receives the remaining time and is called before the
    /// first wait, so a 5s countdown with 1s ticks reports 5, 4, 3, 2, 1.
    pub fn countdown<T, F>(total: Duration, tick: Duration, mut on_tick: T, on_complete: F) -> Self
    where
        T: FnMut(Duration) + Send + 'static,
        F: FnOnce() + Send + 'static,
    {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let tick = if tick.is_zero() { total } else { tick };

        let handle = tokio::spawn(async move {
            let mut remaining = total;
            while !remaining.is_zero() {
                on_tick(remaining);
                let step = tick.min(remaining);
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => {
                        tracing::debug!("Timer cancelled with {:?} remaining", remaining);
                        return TimerOutcome::Cancelled;
                    }
                    _ = tokio::time::sleep(step) => {
                        remaining -= step;
                    }
                }
            }

            // A cancel that raced the last tick still wins.
            if !matches!(cancel_rx.try_recv(), Err(oneshot::error::TryRecvError::Empty)) {
                tracing::debug!("Timer cancelled at its deadline");
                return TimerOutcome::Cancelled;
            }
            on_complete();
            TimerOutcome::Completed
        });

        Self {
            cancel_tx: Some(cancel_tx),
            handle: Some(handle),
        }
    }

    /// Stop the timer. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Wait for the timer to complete or be cancelled.
    pub async fn wait(mut self) -> TimerOutcome {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => return TimerOutcome::Cancelled,
        };
        // Keep the sender alive so waiting does not cancel the timer.
        let _cancel_tx = self.cancel_tx.take();

        join_outcome(handle.await)
    }

    /// Like [`wait`](Self::wait) but keeps the handle, so the timer can
    /// still be cancelled if this future is dropped first.
    ///
    /// Reports `Cancelled` once the outcome has already been taken.
    pub async fn finished(&mut self) -> TimerOutcome {
        let outcome = match self.handle.as_mut() {
            Some(handle) => join_outcome(handle.await),
            None => return TimerOutcome::Cancelled,
        };
        self.handle = None;
        outcome
    }
}

fn join_outcome(result: Result<TimerOutcome, tokio::task::JoinError>) -> TimerOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Timer task did not finish cleanly: {}", e);
            TimerOutcome::Cancelled
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for ScopedTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedTimer")
            .field("finished", &self.is_finished())
            .field("cancel_pending", &self.cancel_tx.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let timer = ScopedTimer::after(Duration::from_secs(5), move || {
            flag.store(true, Ordering::SeqCst);
        });

        assert_eq!(timer.wait().await, TimerOutcome::Completed);
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismissed_countdown_never_completes() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let mut timer = ScopedTimer::countdown(
            Duration::from_secs(5),
            Duration::from_secs(1),
            |_| {},
            move || flag.store(true, Ordering::SeqCst),
        );

        tokio::time::sleep(Duration::from_secs(2)).await;
        timer.cancel();
        assert_eq!(timer.wait().await, TimerOutcome::Cancelled);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        {
            let _timer = ScopedTimer::after(Duration::from_secs(5), move || {
                flag.store(true, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_reports_remaining_time() {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let seen = ticks.clone();
        let completions = Arc::new(AtomicUsize::new(0));
        let done = completions.clone();

        let timer = ScopedTimer::countdown(
            Duration::from_secs(3),
            Duration::from_secs(1),
            move |remaining| seen.lock().unwrap().push(remaining.as_secs()),
            move || {
                done.fetch_add(1, Ordering::SeqCst);
            },
        );

        assert_eq!(timer.wait().await, TimerOutcome::Completed);
        assert_eq!(*ticks.lock().unwrap(), vec![3, 2, 1]);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_first_poll_wins() {
        let fired = Arc::new(AtomicUsize::new(0));

        // Neither task has run yet, so the cancel is already pending when
        // the deadline check happens.
        let flag = fired.clone();
        let mut zero = ScopedTimer::after(Duration::ZERO, move || {
            flag.fetch_add(1, Ordering::SeqCst);
        });
        let flag = fired.clone();
        let mut short = ScopedTimer::after(Duration::from_millis(1), move || {
            flag.fetch_add(1, Ordering::SeqCst);
        });
        zero.cancel();
        short.cancel();

        assert_eq!(zero.wait().await, TimerOutcome::Cancelled);
        assert_eq!(short.wait().await, TimerOutcome::Cancelled);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_while_waiting() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let mut timer = ScopedTimer::countdown(
            Duration::from_secs(5),
            Duration::from_secs(1),
            |_| {},
            move || flag.store(true, Ordering::SeqCst),
        );

        let dismissed = tokio::select! {
            _ = timer.finished() => false,
            _ = tokio::time::sleep(Duration::from_secs(2)) => true,
        };
        assert!(dismissed);
        assert!(!timer.is_finished());

        timer.cancel();
        assert_eq!(timer.finished().await, TimerOutcome::Cancelled);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_reports_completion() {
        let mut timer = ScopedTimer::after(Duration::from_secs(1), || {});
        assert_eq!(timer.finished().await, TimerOutcome::Completed);
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_completion_is_harmless() {
        let mut timer = ScopedTimer::after(Duration::from_millis(10), || {});
        tokio::time::sleep(Duration::from_millis(50)).await;
        timer.cancel();
        timer.cancel();
        assert_eq!(timer.wait().await, TimerOutcome::Completed);
    }
}

//! Scoped, cancellable timers on the tokio runtime.
//!
//! A [`ScopedTimer`] aborts its task when dropped. A [`TimerScope`] owns every
//! timer armed for one stage and stamps each delivery with the stage's epoch,
//! so the receiver can discard a delivery that raced with the scope's drop.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::trace;

/// A timer payload tagged with the epoch of the scope that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamped<T> {
    pub epoch: u64,
    pub payload: T,
}

/// One-shot delivery of a value into a channel after a delay.
#[derive(Debug)]
pub struct ScopedTimer {
    handle: JoinHandle<()>,
}

impl ScopedTimer {
    /// Must be called from within a tokio runtime.
    pub fn after<T: Send + 'static>(delay: Duration, tx: UnboundedSender<T>, value: T) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session is shutting down.
            let _ = tx.send(value);
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// All timers of one stage. Dropping the scope cancels them.
#[derive(Debug)]
pub struct TimerScope<T> {
    epoch: u64,
    tx: UnboundedSender<Stamped<T>>,
    timers: Vec<ScopedTimer>,
}

impl<T: Send + 'static> TimerScope<T> {
    pub fn new(epoch: u64, tx: UnboundedSender<Stamped<T>>) -> Self {
        Self {
            epoch,
            tx,
            timers: Vec::new(),
        }
    }

    /// Deliver `payload` after `delay`, unless the scope is dropped first.
    pub fn schedule(&mut self, delay: Duration, payload: T) {
        self.timers.retain(|t| !t.is_finished());
        trace!(epoch = self.epoch, delay_ms = delay.as_millis() as u64, "timer armed");
        let stamped = Stamped {
            epoch: self.epoch,
            payload,
        };
        self.timers
            .push(ScopedTimer::after(delay, self.tx.clone(), stamped));
    }

    /// Whether a delivery belongs to this scope.
    pub fn owns<U>(&self, stamped: &Stamped<U>) -> bool {
        stamped.epoch == self.epoch
    }

    /// Number of timers that have not fired yet.
    pub fn pending(&self) -> usize {
        self.timers.iter().filter(|t| !t.is_finished()).count()
    }
}

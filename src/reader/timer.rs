//! Owned, cancelable tick timer.
//!
//! A [`TickTimer`] is a tokio task that sleeps until its deadline and then
//! sends a [`Tick`] carrying the timer's generation.  The handle is the only
//! owner of the task: dropping it (or calling [`TickTimer::cancel`]) aborts
//! the task, so a canceled timer never delivers.
//!
//! An abort can race with a send that has already happened.  The generation
//! number lets the receiver tell such a leftover tick apart from the tick of
//! the timer it currently holds.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Called from the timer task after a tick has been sent, so a UI event loop
/// can wake up and drain the channel.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Message delivered when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Handle to one pending tick.
#[derive(Debug)]
pub struct TickTimer {
    generation: u64,
    deadline: Instant,
    task: JoinHandle<()>,
}

impl TickTimer {
    /// Spawn a task on `runtime` that sends `Tick { generation }` on `tx`
    /// once `after` has elapsed.
    pub fn arm(
        runtime: &Handle,
        after: Duration,
        generation: u64,
        tx: mpsc::Sender<Tick>,
        waker: Option<Waker>,
    ) -> Self {
        let deadline = Instant::now() + after;

        let task = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if tx.send(Tick { generation }).await.is_err() {
                // Receiver dropped with the session.
                return;
            }
            if let Some(wake) = waker {
                wake();
            }
        });

        Self {
            generation,
            deadline,
            task,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the tick fires, zero once the deadline has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Abort the pending tick.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

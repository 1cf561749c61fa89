//! Debouncer - single pending-timer slot
//!
//! Each `call` cancels the pending value and re-arms the deadline;
//! only the last call inside the window ever fires.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
struct Pending<T> {
    deadline: Instant,
    value: T,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    /// Arm (or re-arm) the slot with `value`. Returns `true` if a pending
    /// value was cancelled.
    pub fn call(&mut self, value: T) -> bool {
        self.call_at(Instant::now(), value)
    }

    pub fn call_at(&mut self, now: Instant, value: T) -> bool {
        let replaced = self.pending.is_some();
        self.pending = Some(Pending {
            deadline: now + self.window,
            value,
        });
        replaced
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the value if its deadline has passed
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.deadline <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Resolve when the pending value fires. Never resolves while idle.
    ///
    /// Cancel-safe: dropping the future leaves the slot untouched.
    pub async fn fired(&mut self) -> T {
        loop {
            let Some(deadline) = self.deadline() else {
                return std::future::pending().await;
            };
            tokio::time::sleep_until(deadline).await;
            if let Some(value) = self.take_due(Instant::now()) {
                return value;
            }
        }
    }
}

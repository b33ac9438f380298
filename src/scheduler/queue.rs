//! DeferredScheduler - FIFO of payloads counting down hourly ticks

use serde::{Deserialize, Serialize};

/// A payload waiting for its counter to run out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledCompletion<P> {
    /// Ticks left; the completion fires on the advance that takes this to zero or below
    pub remaining: i32,
    pub payload: P,
}

/// Pending completions in scheduling order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeferredScheduler<P> {
    pending: Vec<ScheduledCompletion<P>>,
}

impl<P> Default for DeferredScheduler<P> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<P> DeferredScheduler<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a payload to complete after `ticks` advances
    ///
    /// Non-positive delays complete on the very next advance.
    pub fn schedule(&mut self, ticks: i32, payload: P) {
        self.pending.push(ScheduledCompletion { remaining: ticks, payload });
    }

    /// Advance one tick: decrement every counter, then hand back the payloads
    /// that reached zero in the order they were scheduled
    pub fn advance(&mut self) -> Vec<P> {
        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.pending.len());

        for mut item in self.pending.drain(..) {
            item.remaining -= 1;
            if item.remaining <= 0 {
                due.push(item.payload);
            } else {
                waiting.push(item);
            }
        }

        self.pending = waiting;
        due
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledCompletion<P>> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

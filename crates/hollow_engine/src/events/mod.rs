//! Deferred event delivery
//!
//! Producers push typed events during a simulation step; the owning
//! coordinator drains them once the step is done. Nothing holds a callback
//! into anything else, so producers never need a reference to the systems
//! reacting to them.

use std::collections::VecDeque;

/// First-in first-out queue of pending events
#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    pending: VecDeque<E>,
    total_sent: u64,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventQueue<E> {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            total_sent: 0,
        }
    }

    /// Queue an event for the next drain
    pub fn send(&mut self, event: E) {
        self.pending.push_back(event);
        self.total_sent += 1;
    }

    /// Remove and return every pending event in send order
    pub fn drain(&mut self) -> Vec<E> {
        self.pending.drain(..).collect()
    }

    /// Number of events waiting to be drained
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no event is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of events sent since creation
    pub fn total_sent(&self) -> u64 {
        self.total_sent
    }
}

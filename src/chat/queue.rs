//! Pending reply queue
//!
//! Each submitted message schedules one reply after the typing delay. Replies
//! come out in schedule order; ties keep submission order.

use std::collections::VecDeque;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    /// The user message the reply answers
    pub message: String,
    pub due: Instant,
}

#[derive(Debug, Default)]
pub struct ReplyQueue {
    pending: VecDeque<PendingReply>,
}

impl ReplyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, message: String, due: Instant) {
        let at = self.pending.iter().position(|p| p.due > due).unwrap_or(self.pending.len());
        self.pending.insert(at, PendingReply { message, due });
    }

    /// Take the oldest reply if it is due at `now`
    pub fn pop_due(&mut self, now: Instant) -> Option<PendingReply> {
        match self.pending.front() {
            Some(front) if front.due <= now => self.pending.pop_front(),
            _ => None,
        }
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.front().map(|p| p.due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

//! Bounded in-memory log of recent notifications.

use std::collections::VecDeque;

use crate::types::NotificationEvent;

/// Keeps the newest `capacity` events, newest first.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    entries: VecDeque<NotificationEvent>,
    capacity: usize,
}

impl NotificationLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an event, dropping the oldest when full.
    pub fn push(&mut self, event: NotificationEvent) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(event);
        self.entries.truncate(self.capacity);
    }

    /// Events, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &NotificationEvent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
